use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{
    style, Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor, Stylize,
};
use crossterm::terminal::{Clear, ClearType};
use justbounce::color::Rgba;
use justbounce::geometry::{Point, Rect, Size};
use justbounce::surface::{DrawSurface, FillMode, FontSpec};
use justbounce::ConfigPanel;

use std::io::{self, Write};

const SLIDER_WIDTH: usize = 24;

fn term_color(c: Rgba) -> Color {
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// A [`DrawSurface`] where one unit is one character cell.
///
/// Commands are queued and only written by [`present`](Self::present); the
/// first write error is kept and reported there.
pub struct TerminalSurface<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    font: FontSpec,
    error: Option<io::Error>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        Self {
            out,
            cols,
            rows,
            font: FontSpec::bold(1.),
            error: None,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    pub fn present(&mut self) -> io::Result<()> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            self.error.get_or_insert(e);
        }
    }

    fn fill_rows(&mut self, rect: Rect, color: Rgba) -> io::Result<()> {
        let bounds = self.bounds();
        let left = rect.left.max(bounds.left);
        let right = rect.right.min(bounds.right);
        if left > right {
            return Ok(());
        }
        let blank = " ".repeat((right - left + 1) as usize);

        queue!(self.out, SetBackgroundColor(term_color(color)))?;
        for row in rect.top.max(bounds.top)..=rect.bottom.min(bounds.bottom) {
            queue!(self.out, MoveTo(left as u16, row as u16), Print(&blank))?;
        }
        queue!(self.out, ResetColor)
    }
}

impl<W: Write> DrawSurface for TerminalSurface<W> {
    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.cols as i32 - 1, self.rows as i32 - 1)
    }

    fn fill(&mut self, rect: Rect, color: Rgba, mode: FillMode) {
        // cells cannot be partially transparent, anything visible paints
        if mode == FillMode::Alpha && color.a == 0 {
            return;
        }

        let result = if rect == self.bounds() {
            queue!(
                self.out,
                SetBackgroundColor(term_color(color)),
                Clear(ClearType::All),
                ResetColor
            )
        } else {
            self.fill_rows(rect, color)
        };
        self.record(result);
    }

    fn set_font(&mut self, font: FontSpec) {
        self.font = font;
    }

    fn measure_text(&self, text: &str, _font: &FontSpec) -> Size {
        Size::new(text.chars().count() as i32, 1)
    }

    fn draw_text(&mut self, text: &str, at: Point, color: Rgba) {
        // the anchor is the cell below the text
        let (Ok(col), Ok(row)) = (u16::try_from(at.x), u16::try_from(at.y - 1)) else {
            return;
        };

        let weight = if self.font.bold {
            Attribute::Bold
        } else {
            Attribute::NormalIntensity
        };
        let result = queue!(
            self.out,
            MoveTo(col, row),
            SetForegroundColor(term_color(color)),
            SetAttribute(weight),
            Print(text),
            SetAttribute(Attribute::Reset),
            ResetColor
        );
        self.record(result);
    }
}

/// Renders the configuration panel as plain terminal lines.
#[derive(Default)]
pub struct PanelText {
    pub lines: Vec<String>,
}

impl ConfigPanel for PanelText {
    fn add_label(&mut self, text: &str, bold: bool) {
        let line = if bold {
            style(text).bold().to_string()
        } else {
            style(text).dim().to_string()
        };
        self.lines.push(line);
    }

    fn add_text_control(&mut self, name: &str, label: &str, value: &str) {
        self.lines
            .push(format!("{label} [{}]  ({})", style(value).bold(), style(name).dim()));
    }

    fn add_slider(&mut self, name: &str, label: &str, min: i32, max: i32, value: i32) {
        let range = (max - min).max(0);
        let span = range.max(1) as usize;
        let filled = ((value - min).clamp(0, range) as usize * SLIDER_WIDTH) / span;
        let bar = format!(
            "{}{}",
            "=".repeat(filled),
            "-".repeat(SLIDER_WIDTH - filled)
        );
        self.lines.push(format!(
            "{label} {min} [{bar}] {max}  {}  ({})",
            value.to_string().bold(),
            style(name).dim()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_cover_every_cell() {
        let surface = TerminalSurface::new(Vec::new(), 80, 24);
        assert_eq!(surface.bounds(), Rect::new(0, 0, 79, 23));
        assert_eq!(surface.bounds().size(), Size::new(79, 23));
    }

    #[test]
    fn text_measures_one_cell_per_char() {
        let surface = TerminalSurface::new(Vec::new(), 80, 24);
        let font = FontSpec::bold(2.4);
        assert_eq!(surface.measure_text("HAIKU", &font), Size::new(5, 1));
        assert_eq!(surface.measure_text("ŻÓŁW", &font), Size::new(4, 1));
    }

    #[test]
    fn draws_queued_text() {
        let mut surface = TerminalSurface::new(Vec::new(), 80, 24);
        surface.draw_text("HAIKU", Point::new(3, 5), Rgba::opaque(255, 0, 0));
        surface.present().unwrap();
        let written = String::from_utf8(surface.out.clone()).unwrap();
        assert!(written.contains("HAIKU"));
        // 1-based row/column in the escape sequence
        assert!(written.contains("\x1b[5;4H"));
    }

    #[test]
    fn skips_text_outside_the_screen() {
        let mut surface = TerminalSurface::new(Vec::new(), 80, 24);
        surface.draw_text("HAIKU", Point::new(-2, 5), Rgba::opaque(255, 0, 0));
        surface.draw_text("HAIKU", Point::new(2, 0), Rgba::opaque(255, 0, 0));
        surface.present().unwrap();
        assert!(surface.out.is_empty());
    }

    #[test]
    fn transparent_fill_is_a_no_op() {
        let mut surface = TerminalSurface::new(Vec::new(), 80, 24);
        let clear = Rgba { a: 0, ..Rgba::default() };
        surface.fill(surface.bounds(), clear, FillMode::Alpha);
        assert!(surface.out.is_empty());

        surface.fill(Rect::new(1, 1, 3, 2), Rgba::opaque(0, 0, 0), FillMode::Solid);
        let written = String::from_utf8(surface.out.clone()).unwrap();
        assert_eq!(written.matches("   ").count(), 2);
    }

    #[test]
    fn panel_lists_controls() {
        let mut panel = PanelText::default();
        panel.add_label("JustBounce", true);
        panel.add_text_control("text", "Text:", "HAIKU");
        panel.add_slider("speed", "Speed:", 500, 5000, 5000);
        assert_eq!(panel.lines.len(), 3);
        assert!(panel.lines[1].contains("HAIKU"));
        assert!(panel.lines[2].contains(&"=".repeat(SLIDER_WIDTH)));
    }

    #[test]
    fn inverted_slider_range_draws_empty_bar() {
        let mut panel = PanelText::default();
        panel.add_slider("speed", "Speed:", 5000, 500, 1000);
        panel.add_slider("speed", "Speed:", 700, 700, 700);
        assert_eq!(panel.lines.len(), 2);
        for line in &panel.lines {
            assert!(line.contains(&format!("[{}]", "-".repeat(SLIDER_WIDTH))));
        }
    }
}
