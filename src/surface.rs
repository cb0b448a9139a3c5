use crate::color::Rgba;
use crate::geometry::{Point, Rect, Size};

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct FontSpec {
    pub size: f32,
    pub bold: bool,
}

impl FontSpec {
    pub fn bold(size: f32) -> Self {
        Self { size, bold: true }
    }
}

/// How a fill combines with what is already on the surface.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FillMode {
    /// Overwrite the area.
    Solid,
    /// Blend over the area using the color's alpha channel.
    Alpha,
}

/// The drawing operations a host exposes to a screensaver.
///
/// Coordinates are host units; `draw_text` takes the left-bottom anchor
/// (baseline origin) of the run.
pub trait DrawSurface {
    fn bounds(&self) -> Rect;

    fn fill(&mut self, rect: Rect, color: Rgba, mode: FillMode);

    fn set_font(&mut self, font: FontSpec);

    /// Measures `text` in `font` with no extra inter-glyph spacing.
    fn measure_text(&self, text: &str, font: &FontSpec) -> Size;

    fn draw_text(&mut self, text: &str, at: Point, color: Rgba);
}
