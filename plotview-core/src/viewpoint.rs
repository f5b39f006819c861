//! Spherical viewpoint around the camera target

use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};

use serde::{Deserialize, Serialize};

use crate::modes::ViewMode;
use crate::point::Vector3f;

/// Eye position relative to the target, in polar form.
///
/// Angles are in radians; elevation is measured from the XY plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewPoint {
    pub azimuth: f32,
    pub elevation: f32,
    pub distance: f32,
}

impl ViewPoint {
    pub const DEFAULT_DISTANCE: f32 = 2000.0;

    pub fn new(azimuth: f32, elevation: f32, distance: f32) -> Self {
        Self {
            azimuth,
            elevation,
            distance,
        }
    }

    /// Offset from the target to the eye
    pub fn to_cartesian(&self) -> Vector3f {
        let (sa, ca) = self.azimuth.sin_cos();
        let (se, ce) = self.elevation.sin_cos();
        Vector3f::new(ce * ca, ce * sa, se) * self.distance
    }

    /// Viewpoint with the elevation forced by `mode`
    pub fn for_mode(&self, mode: ViewMode) -> Self {
        match mode {
            ViewMode::Free => *self,
            ViewMode::Top => Self::new(self.azimuth, FRAC_PI_2, self.distance),
            ViewMode::Profile => Self::new(self.azimuth, 0.0, self.distance),
        }
    }

    /// Up vector keeping the scene upright from this viewpoint.
    ///
    /// Z is up except at the poles, where it would be parallel to the line of
    /// sight; there the up vector lies in the XY plane, pointing away from
    /// the azimuth.
    pub fn up(&self) -> Vector3f {
        if (self.elevation.abs() - FRAC_PI_2).abs() <= 1e-4 {
            let sign = self.elevation.signum();
            let (sa, ca) = self.azimuth.sin_cos();
            Vector3f::new(-ca * sign, -sa * sign, 0.0)
        } else {
            Vector3f::z()
        }
    }

    /// Orbit by angular deltas, clamping elevation to the poles
    pub fn rotate(&mut self, d_azimuth: f32, d_elevation: f32) {
        self.azimuth += d_azimuth;
        self.elevation = (self.elevation + d_elevation).clamp(-FRAC_PI_2, FRAC_PI_2);
    }
}

impl Default for ViewPoint {
    fn default() -> Self {
        Self::new(FRAC_PI_3, FRAC_PI_3, Self::DEFAULT_DISTANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_to_cartesian_axes() {
        let v = ViewPoint::new(0.0, 0.0, 3.0).to_cartesian();
        assert_relative_eq!(v, Vector3f::new(3.0, 0.0, 0.0), epsilon = 1e-6);

        let v = ViewPoint::new(0.0, FRAC_PI_2, 2.0).to_cartesian();
        assert_relative_eq!(v, Vector3f::new(0.0, 0.0, 2.0), epsilon = 1e-6);
    }

    #[test]
    fn test_cartesian_length_is_distance() {
        let v = ViewPoint::new(1.2, -0.4, 7.5).to_cartesian();
        assert_relative_eq!(v.norm(), 7.5, epsilon = 1e-5);
    }

    #[test]
    fn test_top_mode_forces_pole_and_planar_up() {
        let vp = ViewPoint::default().for_mode(ViewMode::Top);
        assert_relative_eq!(vp.elevation, FRAC_PI_2);
        let up = vp.up();
        assert_relative_eq!(up.z, 0.0);
        assert_relative_eq!(up.norm(), 1.0, epsilon = 1e-6);
        assert!(up.cross(&vp.to_cartesian()).norm() > 0.0);
    }

    #[test]
    fn test_rotate_clamps_elevation() {
        let mut vp = ViewPoint::new(0.0, 1.0, 1.0);
        vp.rotate(0.5, 10.0);
        assert_relative_eq!(vp.azimuth, 0.5);
        assert_relative_eq!(vp.elevation, FRAC_PI_2);
    }
}
