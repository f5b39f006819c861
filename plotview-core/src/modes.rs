//! Camera positioning and projection modes

use serde::{Deserialize, Serialize};

/// Camera positioning policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Viewpoint follows user orbit state
    #[default]
    Free,
    /// Looking straight down the Z axis
    Top,
    /// Looking horizontally at the scene
    Profile,
}

/// Projection used when the camera is shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    Orthogonal,
    #[default]
    Perspective,
}
