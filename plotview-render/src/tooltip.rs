//! Boxed text tooltip

use plotview_core::{Color, Coord2d, Result};

use crate::compositor::Surface2d;
use crate::overlay::TooltipRenderer;

/// A label in a filled, outlined box anchored at a screen position.
///
/// Text extents are estimated from fixed glyph metrics since glyphs are
/// rasterized later by the painter.
#[derive(Debug, Clone)]
pub struct TextTooltipRenderer {
    pub text: String,
    /// Top-left anchor in overlay pixels
    pub screen: Coord2d,
    pub text_color: Color,
    pub background: Color,
    pub border: Color,
    pub char_width: u32,
    pub line_height: u32,
    pub padding: u32,
}

impl TextTooltipRenderer {
    pub fn new(text: impl Into<String>, screen: Coord2d) -> Self {
        Self {
            text: text.into(),
            screen,
            text_color: Color::BLACK,
            background: Color::new(1.0, 1.0, 0.9, 0.9),
            border: Color::BLACK,
            char_width: 7,
            line_height: 12,
            padding: 3,
        }
    }

    /// Box size in pixels
    pub fn size(&self) -> (u32, u32) {
        let width = self.text.chars().count() as u32 * self.char_width + 2 * self.padding;
        let height = self.line_height + 2 * self.padding;
        (width, height)
    }
}

impl TooltipRenderer for TextTooltipRenderer {
    fn render(&self, g: &mut dyn Surface2d) -> Result<()> {
        let (width, height) = self.size();
        let x = self.screen.x.round() as i32;
        let y = self.screen.y.round() as i32;

        g.set_color(self.background);
        g.fill_rect(x, y, width, height);
        g.set_color(self.border);
        g.draw_rect(x, y, width, height);
        g.set_color(self.text_color);
        g.draw_string(
            &self.text,
            x + self.padding as i32,
            y + (self.padding + self.line_height) as i32,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::DrawableHandle;
    use crate::compositor::Overlay;

    #[test]
    fn test_render_draws_box_and_text() {
        let tooltip = TextTooltipRenderer::new("x=1.00", Coord2d::new(10.0, 20.0));
        assert_eq!(tooltip.size(), (48, 18));

        let mut overlay = Overlay::new(DrawableHandle(7));
        let mut g = overlay.create_graphics(100, 100);
        tooltip.render(&mut g).unwrap();
        g.dispose();

        assert_eq!(overlay.image().get_pixel(10, 20).0, [0, 0, 0, 255]);
        assert_ne!(overlay.image().get_pixel(12, 22).0[3], 0);
        assert_eq!(overlay.image().get_pixel(5, 5).0, [0, 0, 0, 0]);
        let run = &overlay.texts()[0];
        assert_eq!((run.text.as_str(), run.x, run.y), ("x=1.00", 13, 35));
    }
}
