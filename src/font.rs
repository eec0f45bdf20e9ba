//! Label fonts
//!
//! A label is drawn with the first preferred system font that loads. When
//! none does, the built-in bitmap font takes over. The switch is silent: it
//! only shows up in debug logs.

use anyhow::{anyhow, Context, Result};
use log::debug;
use rusttype::{point, Font, Scale};
use std::{
    fmt,
    path::{Path, PathBuf},
};

/// System fonts tried in order before falling back to the built-in font
pub const PREFERRED_FONTS: &[&str] = &[
    "/System/Library/Fonts/Helvetica.ttc",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

pub fn default_font_candidates() -> Vec<PathBuf> {
    PREFERRED_FONTS.iter().map(PathBuf::from).collect()
}

pub enum LabelFont {
    TrueType { font: Font<'static>, path: PathBuf },
    Builtin,
}

impl fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelFont::TrueType { path, .. } => f.debug_tuple("TrueType").field(path).finish(),
            LabelFont::Builtin => f.write_str("Builtin"),
        }
    }
}

impl LabelFont {
    /// Pick the first candidate that loads, or the built-in font. Never fails.
    pub fn load(candidates: &[PathBuf]) -> Self {
        for path in candidates {
            match load_truetype(path) {
                Ok(font) => {
                    debug!("Using label font {}", path.display());
                    return LabelFont::TrueType {
                        font,
                        path: path.clone(),
                    };
                }
                Err(err) => debug!("Skipping label font: {:#}", err),
            }
        }

        debug!("No preferred font available, using the built-in bitmap font");
        LabelFont::Builtin
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, LabelFont::Builtin)
    }

    /// Rasterize `text` at `font_size` pixels, trimmed to its ink
    ///
    /// The built-in font shrinks its scale so the run fits in `max_width`
    /// pixels where it can. TrueType runs keep the requested size.
    pub fn rasterize(&self, text: &str, font_size: u32, max_width: u32) -> GlyphCoverage {
        if font_size == 0 || text.is_empty() {
            return GlyphCoverage::empty();
        }

        let coverage = match self {
            LabelFont::TrueType { font, .. } => rasterize_truetype(font, text, font_size),
            LabelFont::Builtin => rasterize_builtin(text, font_size, max_width),
        };
        coverage.trimmed()
    }
}

/// Load a TrueType font or the first face of a font collection
pub fn load_truetype(path: &Path) -> Result<Font<'static>> {
    let data = std::fs::read(path)
        .with_context(|| format!("Failed to read font file: {}", path.display()))?;

    Font::try_from_vec_and_index(data, 0)
        .ok_or_else(|| anyhow!("Failed to parse font file: {}", path.display()))
}

/// Per-pixel ink of a rendered text run, row-major, alpha in `[0, 1]`
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphCoverage {
    pub width: u32,
    pub height: u32,
    alpha: Vec<f32>,
}

impl GlyphCoverage {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            alpha: vec![0.0; (width * height) as usize],
        }
    }

    fn empty() -> Self {
        Self::new(0, 0)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.alpha[(y * self.width + x) as usize]
    }

    fn mark(&mut self, x: u32, y: u32, value: f32) {
        if x < self.width && y < self.height {
            let cell = &mut self.alpha[(y * self.width + x) as usize];
            *cell = cell.max(value.clamp(0.0, 1.0));
        }
    }

    /// Crop to the smallest box holding every inked pixel
    fn trimmed(self) -> Self {
        let inked = |x: u32, y: u32| self.get(x, y) > 0.0;

        let rows: Vec<u32> = (0..self.height)
            .filter(|&y| (0..self.width).any(|x| inked(x, y)))
            .collect();
        let cols: Vec<u32> = (0..self.width)
            .filter(|&x| (0..self.height).any(|y| inked(x, y)))
            .collect();

        let (Some(&top), Some(&bottom), Some(&left), Some(&right)) =
            (rows.first(), rows.last(), cols.first(), cols.last())
        else {
            return Self::empty();
        };

        let mut trimmed = Self::new(right - left + 1, bottom - top + 1);
        for y in 0..trimmed.height {
            for x in 0..trimmed.width {
                trimmed.mark(x, y, self.get(left + x, top + y));
            }
        }
        trimmed
    }
}

fn rasterize_truetype(font: &Font<'static>, text: &str, font_size: u32) -> GlyphCoverage {
    let scale = Scale::uniform(font_size as f32);
    let v_metrics = font.v_metrics(scale);
    let glyphs: Vec<_> = font
        .layout(text, scale, point(0.0, v_metrics.ascent))
        .collect();

    let boxes: Vec<_> = glyphs.iter().filter_map(|g| g.pixel_bounding_box()).collect();
    let (Some(min_x), Some(min_y), Some(max_x), Some(max_y)) = (
        boxes.iter().map(|b| b.min.x).min(),
        boxes.iter().map(|b| b.min.y).min(),
        boxes.iter().map(|b| b.max.x).max(),
        boxes.iter().map(|b| b.max.y).max(),
    ) else {
        return GlyphCoverage::empty();
    };

    let mut coverage = GlyphCoverage::new((max_x - min_x) as u32, (max_y - min_y) as u32);
    for glyph in &glyphs {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|x, y, v| {
                let cx = (bb.min.x - min_x) as u32 + x;
                let cy = (bb.min.y - min_y) as u32 + y;
                coverage.mark(cx, cy, v);
            });
        }
    }
    coverage
}

const BITMAP_COLUMNS: u32 = 5;
const BITMAP_ROWS: u32 = 7;

/// 5×7 glyphs, one byte per row, bit 4 is the leftmost column
fn bitmap_glyph(c: char) -> Option<[u8; 7]> {
    let rows = match c {
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        'x' | 'X' => [0x00, 0x00, 0x11, 0x0A, 0x04, 0x0A, 0x11],
        _ => return None,
    };
    Some(rows)
}

/// Integer magnification of the bitmap font for a requested pixel size
///
/// Capped so that `chars` glyphs fit in `max_width`, but never below 1.
pub fn bitmap_scale(font_size: u32, chars: u32, max_width: u32) -> u32 {
    let run_width = (chars * (BITMAP_COLUMNS + 1)).saturating_sub(1).max(1);
    (font_size / BITMAP_ROWS)
        .min(max_width / run_width)
        .max(1)
}

fn rasterize_builtin(text: &str, font_size: u32, max_width: u32) -> GlyphCoverage {
    let count = text.chars().count() as u32;
    let scale = bitmap_scale(font_size, count, max_width);
    let advance = (BITMAP_COLUMNS + 1) * scale;

    let mut coverage = GlyphCoverage::new(advance * count, BITMAP_ROWS * scale);
    for (index, c) in text.chars().enumerate() {
        // Unknown characters keep their advance but draw nothing
        let Some(rows) = bitmap_glyph(c) else {
            continue;
        };
        let origin = index as u32 * advance;
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..BITMAP_COLUMNS {
                if bits & (0x10 >> col) == 0 {
                    continue;
                }
                for dy in 0..scale {
                    for dx in 0..scale {
                        coverage.mark(origin + col * scale + dx, row as u32 * scale + dy, 1.0);
                    }
                }
            }
        }
    }
    coverage
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_candidates_fall_back_to_builtin() {
        let font = LabelFont::load(&[PathBuf::from("/definitely/not/a/font.ttf")]);
        assert!(font.is_builtin());
    }

    #[test]
    fn unparsable_font_file_falls_back_to_builtin() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"this is not a font").unwrap();

        assert!(load_truetype(file.path()).is_err());
        let font = LabelFont::load(&[file.path().to_path_buf()]);
        assert!(font.is_builtin());
    }

    #[test]
    fn load_error_names_the_path() {
        let err = load_truetype(Path::new("/nope/missing.ttf")).unwrap_err();
        assert!(format!("{:#}", err).contains("/nope/missing.ttf"));
    }

    #[test]
    fn builtin_single_digit_is_five_by_seven_at_scale_one() {
        let coverage = LabelFont::Builtin.rasterize("8", 7, u32::MAX);
        assert_eq!((coverage.width, coverage.height), (5, 7));
        assert_eq!(coverage.get(0, 0), 0.0);
        assert_eq!(coverage.get(1, 0), 1.0);
    }

    #[test]
    fn builtin_label_scales_with_font_size() {
        let small = LabelFont::Builtin.rasterize("48x48", 12, u32::MAX);
        let large = LabelFont::Builtin.rasterize("48x48", 28, u32::MAX);
        assert_eq!(bitmap_scale(12, 5, u32::MAX), 1);
        assert_eq!(bitmap_scale(28, 5, u32::MAX), 4);
        assert_eq!(small.width, 5 * 6 - 1);
        assert_eq!(small.height, 7);
        assert_eq!(large.width, small.width * 4);
        assert_eq!(large.height, small.height * 4);
    }

    #[test]
    fn builtin_scale_is_capped_to_available_width() {
        // 128px icon: font size 32, frame interior 88px, 7 glyphs span 41 columns
        assert_eq!(bitmap_scale(32, 7, 88), 2);
        let label = LabelFont::Builtin.rasterize("128x128", 32, 88);
        assert!(label.width <= 88, "label is {}px wide", label.width);
        assert_eq!(label.height, 7 * 2);
    }

    #[test]
    fn builtin_scale_never_drops_below_one() {
        assert_eq!(bitmap_scale(4, 5, 10), 1);
        assert_eq!(bitmap_scale(0, 0, 0), 1);
    }

    #[test]
    fn preferred_font_renders_label_when_installed() {
        let font = LabelFont::load(&default_font_candidates());
        if font.is_builtin() {
            eprintln!("No preferred font installed, TrueType path not exercised");
            return;
        }

        let label = font.rasterize("48x48", 12, u32::MAX);
        assert!(!label.is_empty());
        assert!(label.height <= 12, "label is {}px tall", label.height);
        // 48px icon frame: 48 - 2 * margin 6
        assert!(label.width <= 36, "label is {}px wide", label.width);
        assert!((0..label.height).any(|y| (0..label.width).any(|x| label.get(x, y) > 0.5)));
    }

    #[test]
    fn zero_font_size_draws_nothing() {
        assert!(LabelFont::Builtin.rasterize("16x16", 0, u32::MAX).is_empty());
    }

    #[test]
    fn unknown_characters_are_blank() {
        assert!(LabelFont::Builtin.rasterize("??", 7, u32::MAX).is_empty());
    }
}
