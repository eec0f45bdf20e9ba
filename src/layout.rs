/// Geometry of one icon, all derived from its edge length in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconLayout {
    pub size: u32,
    /// Inset of the rounded rectangle from each canvas edge
    pub margin: u32,
    pub radius: u32,
    pub stroke_width: u32,
    pub font_size: u32,
}

impl IconLayout {
    pub fn for_size(size: u32) -> Self {
        Self {
            size,
            margin: size / 8,
            radius: size / 6,
            stroke_width: (size / 32).max(1),
            font_size: size / 4,
        }
    }

    /// Inclusive pixel corners of the rounded rectangle: `(x0, y0, x1, y1)`
    pub fn frame(&self) -> (u32, u32, u32, u32) {
        let far = self.size - self.margin;
        (self.margin, self.margin, far, far)
    }

    /// Horizontal room for the label inside the frame's outline
    pub fn label_room(&self) -> u32 {
        self.size
            .saturating_sub(2 * (self.margin + self.stroke_width))
    }

    pub fn label(&self) -> String {
        format!("{0}x{0}", self.size)
    }
}
