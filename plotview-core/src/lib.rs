//! Core data structures for plotview
//!
//! This crate provides the geometry shared by the camera and view pipeline:
//! coordinates, bounding volumes, device-pixel viewports, the spherical
//! viewpoint, positioning and projection modes, and the error type.

pub mod point;
pub mod bounds;
pub mod viewport;
pub mod viewpoint;
pub mod modes;
pub mod transform;
pub mod error;

pub use point::*;
pub use bounds::*;
pub use viewport::*;
pub use viewpoint::*;
pub use modes::*;
pub use transform::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix4, Point2, Point3, Vector3, Vector4};
