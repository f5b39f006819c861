//! Homogeneous transforms used by the camera

use nalgebra::{Matrix4, Point3, Vector3, Vector4};
use serde::{Deserialize, Serialize};

/// A 4x4 homogeneous transformation (view, projection or their product)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub matrix: Matrix4<f32>,
}

impl Transform3D {
    /// Create an identity transformation
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Right-handed look-at view transform
    pub fn look_at(eye: &Point3<f32>, target: &Point3<f32>, up: &Vector3<f32>) -> Self {
        Self {
            matrix: Matrix4::look_at_rh(eye, target, up),
        }
    }

    /// Orthographic projection
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        Self {
            matrix: Matrix4::new_orthographic(left, right, bottom, top, near, far),
        }
    }

    /// Perspective projection with a vertical field of view in radians
    pub fn perspective(aspect: f32, fovy: f32, near: f32, far: f32) -> Self {
        Self {
            matrix: Matrix4::new_perspective(aspect, fovy, near, far),
        }
    }

    /// Create a non-uniform scaling transformation
    pub fn scaling(scale: Vector3<f32>) -> Self {
        Self {
            matrix: Matrix4::new_nonuniform_scaling(&scale),
        }
    }

    /// Apply the transformation to a homogeneous vector
    pub fn transform_homogeneous(&self, v: &Vector4<f32>) -> Vector4<f32> {
        self.matrix * v
    }

    /// Apply the transformation to a point, dividing by `w`.
    ///
    /// Returns `None` when the point maps to infinity.
    pub fn transform_point(&self, point: &Point3<f32>) -> Option<Point3<f32>> {
        let homogeneous = self.matrix * point.to_homogeneous();
        if homogeneous.w.abs() <= f32::EPSILON {
            return None;
        }
        Point3::from_homogeneous(homogeneous)
    }

    /// Compose this transformation with another (`self * other`)
    pub fn compose(self, other: Self) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Get the inverse transformation
    pub fn inverse(self) -> Option<Self> {
        self.matrix.try_inverse().map(|inv_matrix| Self {
            matrix: inv_matrix,
        })
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Transform3D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(rhs)
    }
}

impl From<Matrix4<f32>> for Transform3D {
    fn from(matrix: Matrix4<f32>) -> Self {
        Self { matrix }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scaling_then_inverse() {
        let t = Transform3D::scaling(Vector3::new(2.0, 4.0, 0.5));
        let p = t.transform_point(&Point3::new(1.0, 1.0, 1.0)).unwrap();
        assert_relative_eq!(p, Point3::new(2.0, 4.0, 0.5));

        let back = t.inverse().unwrap().transform_point(&p).unwrap();
        assert_relative_eq!(back, Point3::new(1.0, 1.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_look_at_puts_target_on_negative_z() {
        let view = Transform3D::look_at(
            &Point3::new(0.0, 0.0, 10.0),
            &Point3::origin(),
            &Vector3::y(),
        );
        let p = view.transform_point(&Point3::origin()).unwrap();
        assert_relative_eq!(p, Point3::new(0.0, 0.0, -10.0), epsilon = 1e-5);
    }

    #[test]
    fn test_singular_matrix_has_no_inverse() {
        let t = Transform3D::scaling(Vector3::new(1.0, 0.0, 1.0));
        assert!(t.inverse().is_none());
    }
}
