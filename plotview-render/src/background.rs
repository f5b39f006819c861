//! Raster image drawn behind the scene

use image::RgbaImage;
use plotview_core::{Viewport, ViewportMode};

use crate::painter::Painter;

/// Background raster plus how it fills the viewport it is given
#[derive(Debug, Clone)]
pub struct BackgroundImage {
    image: RgbaImage,
    mode: ViewportMode,
}

impl BackgroundImage {
    pub fn new(image: RgbaImage, mode: ViewportMode) -> Self {
        Self { image, mode }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn mode(&self) -> ViewportMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ViewportMode) {
        self.mode = mode;
    }

    /// Rectangle the image occupies when rendered into `viewport`
    pub fn placement(&self, viewport: Viewport) -> Viewport {
        match self.mode {
            ViewportMode::StretchToFill => viewport,
            ViewportMode::RectangleNoStretch => viewport.centered(self.width(), self.height()),
            ViewportMode::Square => {
                let size = viewport.width.min(viewport.height);
                viewport.centered(size, size)
            }
        }
    }

    pub fn render(&self, painter: &mut dyn Painter, viewport: Viewport) {
        painter.draw_image(&self.image, self.placement(viewport));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stretch_uses_viewport_unchanged() {
        let bg = BackgroundImage::new(RgbaImage::new(16, 16), ViewportMode::StretchToFill);
        let vp = Viewport::new(0, 0, 800, 600);
        assert_eq!(bg.placement(vp), vp);
    }

    #[test]
    fn test_no_stretch_centers_native_size() {
        let bg = BackgroundImage::new(RgbaImage::new(200, 100), ViewportMode::RectangleNoStretch);
        assert_eq!(bg.placement(Viewport::full(800, 600)), Viewport::new(300, 250, 200, 100));
    }

    #[test]
    fn test_square_in_column() {
        let bg = BackgroundImage::new(RgbaImage::new(1, 1), ViewportMode::Square);
        assert_eq!(
            bg.placement(Viewport::new(400, 0, 400, 600)),
            Viewport::new(400, 100, 400, 400)
        );
    }
}
