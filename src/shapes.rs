use image::{Rgb, RgbImage};

/// An axis-aligned rectangle with arced corners, in continuous pixel space
///
/// Pixels are sampled at their centers, so pixel `(x, y)` is covered when
/// `(x + 0.5, y + 0.5)` falls inside the shape. Edges are hard, with no
/// anti-aliasing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedRect {
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
    radius: f32,
}

impl RoundedRect {
    /// Build from inclusive pixel corners, so `x1` and `y1` are covered too.
    pub fn from_inclusive(x0: u32, y0: u32, x1: u32, y1: u32, radius: u32) -> Self {
        Self::new(
            x0 as f32,
            y0 as f32,
            x1 as f32 + 1.0,
            y1 as f32 + 1.0,
            radius as f32,
        )
    }

    fn new(left: f32, top: f32, right: f32, bottom: f32, radius: f32) -> Self {
        let half_extent = ((right - left).min(bottom - top) / 2.0).max(0.0);
        Self {
            left,
            top,
            right,
            bottom,
            radius: radius.clamp(0.0, half_extent),
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// The shape shrunk by `by` on every side, or `None` once nothing is left.
    pub fn inset(&self, by: f32) -> Option<Self> {
        let inner = (
            self.left + by,
            self.top + by,
            self.right - by,
            self.bottom - by,
        );
        if inner.0 >= inner.2 || inner.1 >= inner.3 {
            return None;
        }
        Some(Self::new(
            inner.0,
            inner.1,
            inner.2,
            inner.3,
            (self.radius - by).max(0.0),
        ))
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        let px = x as f32 + 0.5;
        let py = y as f32 + 0.5;
        if px < self.left || px > self.right || py < self.top || py > self.bottom {
            return false;
        }

        // Distance to the core rectangle that the corner arcs are centered on
        let dx = px - px.clamp(self.left + self.radius, self.right - self.radius);
        let dy = py - py.clamp(self.top + self.radius, self.bottom - self.radius);
        dx * dx + dy * dy <= self.radius * self.radius
    }

    /// Pixel range `(x_start, y_start, x_end, y_end)` touched by the shape,
    /// clipped to a `width × height` canvas. Ends are exclusive.
    fn pixel_bounds(&self, width: u32, height: u32) -> (u32, u32, u32, u32) {
        let clip = |v: f32, max: u32| (v.max(0.0) as u32).min(max);
        (
            clip(self.left.floor(), width),
            clip(self.top.floor(), height),
            clip(self.right.ceil(), width),
            clip(self.bottom.ceil(), height),
        )
    }
}

/// Fill `rect` with `fill` and trace its inside edge with `outline`
///
/// The outline is `stroke_width` pixels thick and never extends past the
/// filled area.
pub fn draw_rounded_rect(
    img: &mut RgbImage,
    rect: &RoundedRect,
    fill: Rgb<u8>,
    outline: Rgb<u8>,
    stroke_width: u32,
) {
    let inner = rect.inset(stroke_width as f32);
    let (x_start, y_start, x_end, y_end) = rect.pixel_bounds(img.width(), img.height());

    for y in y_start..y_end {
        for x in x_start..x_end {
            if !rect.contains(x, y) {
                continue;
            }
            let inside_stroke = inner.map_or(false, |inner| inner.contains(x, y));
            img.put_pixel(x, y, if inside_stroke { fill } else { outline });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: Rgb<u8> = Rgb([0, 0, 0]);
    const FILL: Rgb<u8> = Rgb([255, 255, 255]);
    const LINE: Rgb<u8> = Rgb([255, 0, 0]);

    #[test]
    fn square_corners_cover_the_full_rectangle() {
        let rect = RoundedRect::from_inclusive(2, 2, 5, 5, 0);
        assert!(rect.contains(2, 2));
        assert!(rect.contains(5, 5));
        assert!(!rect.contains(1, 2));
        assert!(!rect.contains(6, 5));
    }

    #[test]
    fn rounded_corners_exclude_the_corner_pixel() {
        let rect = RoundedRect::from_inclusive(0, 0, 19, 19, 6);
        assert!(!rect.contains(0, 0));
        assert!(!rect.contains(19, 19));
        assert!(rect.contains(10, 0));
        assert!(rect.contains(0, 10));
        assert!(rect.contains(10, 10));
    }

    #[test]
    fn radius_is_clamped_to_half_the_extent() {
        let rect = RoundedRect::from_inclusive(0, 0, 3, 9, 50);
        assert_eq!(rect.radius(), 2.0);
    }

    #[test]
    fn inset_shrinks_radius_and_disappears_when_exhausted() {
        let rect = RoundedRect::from_inclusive(0, 0, 9, 9, 3);
        let inner = rect.inset(2.0).unwrap();
        assert_eq!(inner.radius(), 1.0);
        assert!(!inner.contains(1, 5));
        assert!(inner.contains(2, 5));
        assert!(rect.inset(5.0).is_none());
    }

    #[test]
    fn draws_fill_inside_outline() {
        let mut img = RgbImage::from_pixel(20, 20, BG);
        let rect = RoundedRect::from_inclusive(2, 2, 17, 17, 3);
        draw_rounded_rect(&mut img, &rect, FILL, LINE, 2);

        assert_eq!(*img.get_pixel(0, 0), BG);
        assert_eq!(*img.get_pixel(2, 2), BG);
        assert_eq!(*img.get_pixel(2, 10), LINE);
        assert_eq!(*img.get_pixel(3, 10), LINE);
        assert_eq!(*img.get_pixel(4, 10), FILL);
        assert_eq!(*img.get_pixel(10, 17), LINE);
        assert_eq!(*img.get_pixel(10, 18), BG);
        assert_eq!(*img.get_pixel(10, 10), FILL);
    }

    #[test]
    fn shape_larger_than_canvas_is_clipped() {
        let mut img = RgbImage::from_pixel(4, 4, BG);
        let rect = RoundedRect::from_inclusive(0, 0, 40, 40, 0);
        draw_rounded_rect(&mut img, &rect, FILL, LINE, 1);
        assert_eq!(*img.get_pixel(0, 0), LINE);
        assert_eq!(*img.get_pixel(3, 3), FILL);
    }
}
