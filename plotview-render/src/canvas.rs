//! Window surface the view renders into

/// Opaque identifier of a canvas' native drawable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawableHandle(pub u64);

/// A window surface owned by the windowing toolkit
pub trait Canvas {
    /// Render target width in device pixels
    fn renderer_width(&self) -> u32;

    /// Render target height in device pixels
    fn renderer_height(&self) -> u32;

    /// Native drawable the overlay compositor binds to
    fn drawable(&self) -> DrawableHandle;

    /// Size of the native drawable's surface, which may lag behind the
    /// renderer size during a resize
    fn surface_size(&self) -> (u32, u32) {
        (self.renderer_width(), self.renderer_height())
    }
}
