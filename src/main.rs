use anyhow::Result;
use clap::Parser;
use placeholder_icons::{
    generate_icons,
    palette::{Palette, DEFAULT_ACCENT, DEFAULT_BACKGROUND, DEFAULT_FOREGROUND},
    GenerateOptions,
};

#[derive(Debug, Parser)]
#[clap(
    name = "placeholder-icons",
    about = "Generate labeled placeholder icons into ./icons"
)]
struct Args {
    /// Icon sizes to generate, in pixels.
    #[clap(
        short,
        long,
        value_delimiter = ',',
        value_name = "SIZES",
        default_value = "16,48,128"
    )]
    sizes: Vec<u32>,

    /// Canvas and label color (CSS color format)
    #[clap(long, default_value = DEFAULT_BACKGROUND)]
    background: String,

    /// Rounded rectangle fill color (CSS color format)
    #[clap(long, default_value = DEFAULT_FOREGROUND)]
    foreground: String,

    /// Rounded rectangle outline color (CSS color format)
    #[clap(long, default_value = DEFAULT_ACCENT)]
    accent: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let options = GenerateOptions {
        sizes: args.sizes,
        palette: Palette::from_css(&args.background, &args.foreground, &args.accent)?,
        ..GenerateOptions::default()
    };

    generate_icons(&options)?;
    Ok(())
}
