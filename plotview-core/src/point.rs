//! Coordinate types and related functionality

use bytemuck::{Pod, Zeroable};
use nalgebra::{Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A model-space or screen-space 3D coordinate
pub type Coord3d = Point3<f32>;

/// A 2D coordinate in device pixels
pub type Coord2d = Point2<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// An RGBA color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

unsafe impl Pod for Color {}
unsafe impl Zeroable for Color {}

impl Color {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const MAGENTA: Self = Self::new(1.0, 0.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to 8-bit RGBA
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Multiply two vectors component-wise
pub fn scale_components(point: &Coord3d, scale: &Vector3f) -> Coord3d {
    Coord3d::new(point.x * scale.x, point.y * scale.y, point.z * scale.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_to_rgba8_clamps() {
        assert_eq!(Color::new(2.0, -1.0, 0.5, 1.0).to_rgba8(), [255, 0, 128, 255]);
        assert_eq!(Color::TRANSPARENT.to_rgba8(), [0, 0, 0, 0]);
    }
}
