//! Placement of the 3D viewport inside the canvas

use plotview_core::{Viewport, ViewportMode};
use serde::{Deserialize, Serialize};

/// Decides which rectangle of the canvas the 3D scene is projected into.
///
/// The result only drives the 3D projection. The overlay keeps drawing in
/// full-canvas coordinates and is stretched onto this rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportReconciler {
    /// Width over height used by [`ViewportMode::RectangleNoStretch`]
    pub aspect_ratio: f32,
}

impl ViewportReconciler {
    pub fn new(aspect_ratio: f32) -> Self {
        Self { aspect_ratio }
    }

    /// Viewport for a whole canvas
    pub fn reconcile(&self, canvas_width: u32, canvas_height: u32, mode: ViewportMode) -> Viewport {
        self.fit(Viewport::full(canvas_width, canvas_height), mode)
    }

    /// Viewport for a column of the canvas between fractional `left` and
    /// `right` bounds
    pub fn reconcile_column(
        &self,
        canvas_width: u32,
        canvas_height: u32,
        left: f32,
        right: f32,
        mode: ViewportMode,
    ) -> Viewport {
        self.fit(Viewport::column(canvas_width, canvas_height, left, right), mode)
    }

    fn fit(&self, area: Viewport, mode: ViewportMode) -> Viewport {
        match mode {
            ViewportMode::StretchToFill => area,
            ViewportMode::Square => {
                let size = area.width.min(area.height);
                area.centered(size, size)
            }
            ViewportMode::RectangleNoStretch => area.fit_ratio(self.aspect_ratio),
        }
    }
}

impl Default for ViewportReconciler {
    fn default() -> Self {
        Self::new(4.0 / 3.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stretch_returns_full_canvas() {
        let r = ViewportReconciler::default();
        for (w, h) in [(1, 1), (800, 600), (600, 800), (1920, 1080)] {
            assert_eq!(r.reconcile(w, h, ViewportMode::StretchToFill), Viewport::new(0, 0, w, h));
        }
    }

    #[test]
    fn test_square_is_centered() {
        let r = ViewportReconciler::default();
        assert_eq!(r.reconcile(800, 600, ViewportMode::Square), Viewport::new(100, 0, 600, 600));
        assert_eq!(r.reconcile(600, 800, ViewportMode::Square), Viewport::new(0, 100, 600, 600));
        assert_eq!(r.reconcile(801, 600, ViewportMode::Square), Viewport::new(100, 0, 600, 600));
    }

    #[test]
    fn test_fixed_ratio_rectangle() {
        let r = ViewportReconciler::new(2.0);
        assert_eq!(
            r.reconcile(800, 800, ViewportMode::RectangleNoStretch),
            Viewport::new(0, 200, 800, 400)
        );
    }

    #[test]
    fn test_column_square() {
        let r = ViewportReconciler::default();
        let vp = r.reconcile_column(800, 600, 0.5, 1.0, ViewportMode::Square);
        assert_eq!(vp, Viewport::new(400, 100, 400, 400));
    }

    #[test]
    fn test_zero_canvas_yields_empty_viewport() {
        let r = ViewportReconciler::default();
        assert!(!r.reconcile(0, 600, ViewportMode::Square).has_area());
    }
}
