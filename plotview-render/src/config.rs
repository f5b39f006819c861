//! View configuration

use plotview_core::{CameraMode, Color, ViewMode, ViewportMode};
use serde::{Deserialize, Serialize};

use crate::camera::{DEFAULT_MIN_RADIUS, STRETCH_RATIO};

/// Settings of a [`crate::View`].
///
/// Missing fields deserialize to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Margin added to the radius in top view
    pub stretch_ratio: f32,
    /// Radius used for scenes without extent
    pub min_radius: f32,
    /// How the 3D viewport sits in the canvas
    pub viewport_mode: ViewportMode,
    /// Width over height for [`ViewportMode::RectangleNoStretch`]
    pub viewport_aspect_ratio: f32,
    pub view_mode: ViewMode,
    pub camera_mode: CameraMode,
    pub axis_box_displayed: bool,
    /// Draw the axis' whole bounds as a wireframe, for debugging label fit
    pub display_axis_whole_bounds: bool,
    pub clear_color: Color,
    pub overlay_background: Color,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            stretch_ratio: STRETCH_RATIO,
            min_radius: DEFAULT_MIN_RADIUS,
            viewport_mode: ViewportMode::Square,
            viewport_aspect_ratio: 4.0 / 3.0,
            view_mode: ViewMode::Free,
            camera_mode: CameraMode::Perspective,
            axis_box_displayed: true,
            display_axis_whole_bounds: false,
            clear_color: Color::WHITE,
            overlay_background: Color::TRANSPARENT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: ViewConfig =
            serde_json::from_str(r#"{ "view_mode": "top", "viewport_mode": "stretch_to_fill" }"#)
                .unwrap();
        assert_eq!(config.view_mode, ViewMode::Top);
        assert_eq!(config.viewport_mode, ViewportMode::StretchToFill);
        assert_eq!(config.stretch_ratio, STRETCH_RATIO);
        assert!(config.axis_box_displayed);
    }
}
