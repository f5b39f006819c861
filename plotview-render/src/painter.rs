//! Graphics backend contract
//!
//! The view never talks to a graphics API directly. A backend implements
//! [`Painter`] on top of whatever it drives (GL, wgpu, a software raster) and
//! the view issues the commands below in a fixed per-frame order.

use image::RgbaImage;
use nalgebra::Matrix4;
use plotview_core::{BoundingVolume, Color, Result, Viewport};

use crate::canvas::Canvas;

/// Which polygon faces a fill mode applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonFace {
    Front,
    Back,
    FrontAndBack,
}

/// How polygons are rasterized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonFill {
    Fill,
    Line,
    Point,
}

/// Matrix stack targeted by [`Painter::load_matrix`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixMode {
    Projection,
    ModelView,
}

/// Commands a graphics backend must support.
///
/// Every drawing command is only valid between [`Painter::make_current`] and
/// [`Painter::release`]; use [`crate::CurrentContext`] rather than calling
/// those two directly.
pub trait Painter {
    /// Make the graphics context for `canvas` current on this thread
    fn make_current(&mut self, canvas: &dyn Canvas) -> Result<()>;

    /// Release the current context
    fn release(&mut self);

    /// Clear color and depth buffers
    fn clear(&mut self, color: Color);

    fn viewport(&mut self, viewport: Viewport);

    fn polygon_mode(&mut self, face: PolygonFace, fill: PolygonFill);

    fn matrix_mode(&mut self, mode: MatrixMode);

    fn load_matrix(&mut self, matrix: &Matrix4<f32>);

    /// Draw a raster image stretched over `dest`
    fn draw_image(&mut self, image: &RgbaImage, dest: Viewport);

    /// Draw the edges of a box in model space
    fn draw_wireframe_box(&mut self, bounds: &BoundingVolume, color: Color);

    /// Draw text at a device-pixel position (bottom-left origin)
    fn draw_text(&mut self, text: &str, x: f32, y: f32, color: Color);
}
