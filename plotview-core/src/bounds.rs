//! Axis-aligned bounding volumes

use serde::{Deserialize, Serialize};

use crate::point::{scale_components, Coord3d, Vector3f};

/// Axis-aligned box describing the extent of scene content.
///
/// The empty volume is a distinct state with no extent; every query on it
/// returns a neutral value (origin center, zero radius) rather than NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingVolume {
    extent: Option<(Coord3d, Coord3d)>,
}

impl BoundingVolume {
    /// Create the empty volume
    pub fn empty() -> Self {
        Self { extent: None }
    }

    /// Create a volume from two corners, in any order
    pub fn new(a: Coord3d, b: Coord3d) -> Self {
        let min = Coord3d::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z));
        let max = Coord3d::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z));
        Self {
            extent: Some((min, max)),
        }
    }

    /// Smallest volume containing all points
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Coord3d>,
    {
        points
            .into_iter()
            .fold(Self::empty(), |acc, p| acc.including(p))
    }

    pub fn is_empty(&self) -> bool {
        self.extent.is_none()
    }

    pub fn min(&self) -> Option<Coord3d> {
        self.extent.map(|(min, _)| min)
    }

    pub fn max(&self) -> Option<Coord3d> {
        self.extent.map(|(_, max)| max)
    }

    /// Grow the volume to include a point
    pub fn including(self, p: &Coord3d) -> Self {
        match self.extent {
            None => Self::new(*p, *p),
            Some((min, max)) => Self {
                extent: Some((
                    Coord3d::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z)),
                    Coord3d::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z)),
                )),
            },
        }
    }

    /// Smallest volume containing both volumes
    pub fn union(&self, other: &Self) -> Self {
        match (self.extent, other.extent) {
            (None, _) => *other,
            (_, None) => *self,
            (Some((min, max)), Some(_)) => other.including(&min).including(&max),
        }
    }

    /// Scale both corners component-wise.
    ///
    /// Negative factors flip an axis; the corners are re-ordered so the
    /// min <= max invariant holds.
    pub fn scale(&self, factors: &Vector3f) -> Self {
        match self.extent {
            None => *self,
            Some((min, max)) => Self::new(
                scale_components(&min, factors),
                scale_components(&max, factors),
            ),
        }
    }

    pub fn center(&self) -> Coord3d {
        match self.extent {
            None => Coord3d::origin(),
            Some((min, max)) => nalgebra::center(&min, &max),
        }
    }

    /// Per-axis extents (`max - min`)
    pub fn extents(&self) -> Vector3f {
        match self.extent {
            None => Vector3f::zeros(),
            Some((min, max)) => max - min,
        }
    }

    pub fn x_extent(&self) -> f32 {
        self.extents().x
    }

    pub fn y_extent(&self) -> f32 {
        self.extents().y
    }

    pub fn z_extent(&self) -> f32 {
        self.extents().z
    }

    /// Half the diagonal length
    pub fn radius(&self) -> f32 {
        self.extents().norm() / 2.0
    }

    /// True when the volume has no extent along any axis
    pub fn is_degenerate(&self) -> bool {
        self.radius() <= f32::EPSILON
    }

    /// The 8 corners of the box, empty if the volume is empty
    pub fn corners(&self) -> Vec<Coord3d> {
        let Some((min, max)) = self.extent else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(8);
        for &x in &[min.x, max.x] {
            for &y in &[min.y, max.y] {
                for &z in &[min.z, max.z] {
                    out.push(Coord3d::new(x, y, z));
                }
            }
        }
        out
    }
}

impl Default for BoundingVolume {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_center_radius_and_extents() {
        let b = BoundingVolume::new(Coord3d::new(-1.0, -2.0, 0.0), Coord3d::new(1.0, 2.0, 4.0));
        assert_relative_eq!(b.center(), Coord3d::new(0.0, 0.0, 2.0));
        assert_relative_eq!(b.x_extent(), 2.0);
        assert_relative_eq!(b.y_extent(), 4.0);
        assert_relative_eq!(b.z_extent(), 4.0);
        assert_relative_eq!(b.radius(), 3.0);
    }

    #[test]
    fn test_empty_volume_is_neutral() {
        let b = BoundingVolume::empty();
        assert!(b.is_empty());
        assert!(b.is_degenerate());
        assert_eq!(b.radius(), 0.0);
        assert_eq!(b.center(), Coord3d::origin());
        assert!(b.corners().is_empty());
    }

    #[test]
    fn test_union_with_empty_is_identity() {
        let b = BoundingVolume::new(Coord3d::new(0.0, 0.0, 0.0), Coord3d::new(1.0, 1.0, 1.0));
        assert_eq!(b.union(&BoundingVolume::empty()), b);
        assert_eq!(BoundingVolume::empty().union(&b), b);
    }

    #[test]
    fn test_union_spans_both() {
        let a = BoundingVolume::new(Coord3d::new(0.0, 0.0, 0.0), Coord3d::new(1.0, 1.0, 1.0));
        let b = BoundingVolume::new(Coord3d::new(-2.0, 0.5, 0.5), Coord3d::new(0.5, 3.0, 0.5));
        let u = a.union(&b);
        assert_eq!(u.min(), Some(Coord3d::new(-2.0, 0.0, 0.0)));
        assert_eq!(u.max(), Some(Coord3d::new(1.0, 3.0, 1.0)));
    }

    #[test]
    fn test_scale_keeps_min_below_max() {
        let b = BoundingVolume::new(Coord3d::new(1.0, 1.0, 1.0), Coord3d::new(2.0, 3.0, 4.0));
        let s = b.scale(&Vector3f::new(-1.0, 2.0, 0.5));
        assert_eq!(s.min(), Some(Coord3d::new(-2.0, 2.0, 0.5)));
        assert_eq!(s.max(), Some(Coord3d::new(-1.0, 6.0, 2.0)));
    }

    #[test]
    fn test_from_points() {
        let pts = [
            Coord3d::new(3.0, -1.0, 0.0),
            Coord3d::new(-3.0, 1.0, 2.0),
            Coord3d::new(0.0, 0.0, 1.0),
        ];
        let b = BoundingVolume::from_points(pts.iter());
        assert_eq!(b.min(), Some(Coord3d::new(-3.0, -1.0, 0.0)));
        assert_eq!(b.max(), Some(Coord3d::new(3.0, 1.0, 2.0)));
        assert_eq!(b.corners().len(), 8);
    }
}
