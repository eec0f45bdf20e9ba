use crate::{
    font::{GlyphCoverage, LabelFont},
    layout::IconLayout,
    palette::Palette,
    shapes::{draw_rounded_rect, RoundedRect},
};
use anyhow::{bail, Context, Result};
use image::{Rgb, RgbImage};
use std::{
    fs::create_dir_all,
    path::{Path, PathBuf},
};

/// One icon to produce: its edge length and where the PNG goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSpec {
    pub size: u32,
    pub output_path: PathBuf,
}

impl IconSpec {
    /// `icon{size}.png` inside `dir`
    pub fn in_dir(dir: &Path, size: u32) -> Self {
        Self {
            size,
            output_path: dir.join(format!("icon{size}.png")),
        }
    }
}

/// Compose a `size × size` icon in memory
pub fn render_icon(size: u32, palette: &Palette, font: &LabelFont) -> Result<RgbImage> {
    if size == 0 {
        bail!("Icon size must be a positive number of pixels");
    }

    let layout = IconLayout::for_size(size);
    let mut img = RgbImage::from_pixel(size, size, palette.background);

    let (x0, y0, x1, y1) = layout.frame();
    let frame = RoundedRect::from_inclusive(x0, y0, x1, y1, layout.radius);
    draw_rounded_rect(
        &mut img,
        &frame,
        palette.foreground,
        palette.accent,
        layout.stroke_width,
    );

    let label = font.rasterize(&layout.label(), layout.font_size, layout.label_room());
    draw_centered(&mut img, &label, palette.background);

    Ok(img)
}

/// Render the icon described by `spec` and write it as PNG
pub fn write_icon(spec: &IconSpec, palette: &Palette, font: &LabelFont) -> Result<()> {
    let img = render_icon(spec.size, palette, font)?;

    if let Some(parent) = spec.output_path.parent() {
        create_dir_all(parent).context("Can't create output directory")?;
    }

    let mut file = std::fs::File::create(&spec.output_path).with_context(|| {
        format!(
            "Failed to create PNG file: {}",
            spec.output_path.display()
        )
    })?;
    img.write_to(&mut file, image::ImageOutputFormat::Png)
        .context("Failed to write PNG")?;

    Ok(())
}

/// Blend `coverage` onto the middle of `img`, clipping whatever falls outside
fn draw_centered(img: &mut RgbImage, coverage: &GlyphCoverage, color: Rgb<u8>) {
    if coverage.is_empty() {
        return;
    }

    // Signed: labels wider than the canvas start left of it
    let origin_x = (i64::from(img.width()) - i64::from(coverage.width)) / 2;
    let origin_y = (i64::from(img.height()) - i64::from(coverage.height)) / 2;

    for y in 0..coverage.height {
        for x in 0..coverage.width {
            let alpha = coverage.get(x, y);
            if alpha <= 0.0 {
                continue;
            }
            let (Ok(px), Ok(py)) = (
                u32::try_from(origin_x + i64::from(x)),
                u32::try_from(origin_y + i64::from(y)),
            ) else {
                continue;
            };
            if px >= img.width() || py >= img.height() {
                continue;
            }

            let pixel = img.get_pixel_mut(px, py);
            *pixel = blend(*pixel, color, alpha);
        }
    }
}

fn blend(under: Rgb<u8>, over: Rgb<u8>, alpha: f32) -> Rgb<u8> {
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * alpha).round() as u8;
    Rgb([
        mix(under[0], over[0]),
        mix(under[1], over[1]),
        mix(under[2], over[2]),
    ])
}
