pub mod font;
pub mod layout;
pub mod palette;
pub mod renderer;
pub mod shapes;

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use crate::{
    font::LabelFont,
    palette::Palette,
    renderer::{write_icon, IconSpec},
};

pub const DEFAULT_SIZES: [u32; 3] = [16, 48, 128];

/// Everything a batch run needs to know
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub output_dir: PathBuf,
    pub sizes: Vec<u32>,
    pub palette: Palette,
    /// Preferred fonts, tried in order before the built-in font
    pub font_candidates: Vec<PathBuf>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("icons"),
            sizes: DEFAULT_SIZES.to_vec(),
            palette: Palette::default(),
            font_candidates: font::default_font_candidates(),
        }
    }
}

/// Write `icon{size}.png` for every requested size into the output directory
///
/// Sizes are checked up front so an invalid entry writes nothing at all.
pub fn generate_icons(options: &GenerateOptions) -> Result<Vec<IconSpec>> {
    if options.sizes.contains(&0) {
        bail!("Icon sizes must be positive numbers of pixels");
    }

    let font = LabelFont::load(&options.font_candidates);

    let mut written = Vec::with_capacity(options.sizes.len());
    for &size in &options.sizes {
        let spec = IconSpec::in_dir(&options.output_dir, size);
        write_icon(&spec, &options.palette, &font)
            .with_context(|| format!("Failed to generate {}x{} icon", size, size))?;
        println!("Created {}", spec.output_path.display());
        written.push(spec);
    }

    println!("\nAll icons created successfully!");

    Ok(written)
}
