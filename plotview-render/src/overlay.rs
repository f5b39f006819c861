//! Tooltips and 2D renderers painted over the scene

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, error};
use plotview_core::{Color, Result, Viewport};

use crate::canvas::Canvas;
use crate::compositor::{Overlay, Surface2d};
use crate::painter::{Painter, PolygonFace, PolygonFill};

/// A tooltip draws itself at the position it already knows about
pub trait TooltipRenderer: Send + Sync {
    fn render(&self, g: &mut dyn Surface2d) -> Result<()>;
}

/// A free-form overlay renderer, given the full canvas size
pub trait Renderer2d: Send + Sync {
    fn paint(&self, g: &mut dyn Surface2d, width: u32, height: u32) -> Result<()>;
}

/// One entry of the overlay paint order
#[derive(Clone, Copy)]
pub enum OverlayLayer<'a> {
    Tooltip(&'a dyn TooltipRenderer),
    Renderer(&'a dyn Renderer2d),
}

impl OverlayLayer<'_> {
    /// Paint into `g`, which spans `width` x `height` canvas pixels
    pub fn paint(&self, g: &mut dyn Surface2d, width: u32, height: u32) -> Result<()> {
        match self {
            OverlayLayer::Tooltip(t) => t.render(g),
            OverlayLayer::Renderer(r) => r.paint(g, width, height),
        }
    }
}

#[derive(Default)]
struct Layers {
    tooltips: Vec<Arc<dyn TooltipRenderer>>,
    renderers: Vec<Arc<dyn Renderer2d>>,
}

impl Layers {
    fn is_empty(&self) -> bool {
        self.tooltips.is_empty() && self.renderers.is_empty()
    }

    /// Tooltips first, then renderers, each in insertion order
    fn iter(&self) -> impl Iterator<Item = OverlayLayer<'_>> {
        self.tooltips
            .iter()
            .map(|t| OverlayLayer::Tooltip(t.as_ref()))
            .chain(self.renderers.iter().map(|r| OverlayLayer::Renderer(r.as_ref())))
    }
}

/// Shared handle on the overlay's tooltip and renderer lists.
///
/// Clones refer to the same lists. Every mutation and the frame's paint pass
/// take the same lock, so a frame never sees a half-applied update.
#[derive(Clone, Default)]
pub struct OverlayHandle {
    layers: Arc<Mutex<Layers>>,
}

impl OverlayHandle {
    fn lock(&self) -> MutexGuard<'_, Layers> {
        self.layers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn clear_tooltips(&self) {
        self.lock().tooltips.clear();
    }

    /// Replace all tooltips with `tooltip`
    pub fn set_tooltip(&self, tooltip: Arc<dyn TooltipRenderer>) {
        let mut layers = self.lock();
        layers.tooltips.clear();
        layers.tooltips.push(tooltip);
    }

    pub fn add_tooltip(&self, tooltip: Arc<dyn TooltipRenderer>) {
        self.lock().tooltips.push(tooltip);
    }

    pub fn set_tooltips(&self, tooltips: Vec<Arc<dyn TooltipRenderer>>) {
        self.lock().tooltips = tooltips;
    }

    pub fn add_tooltips(&self, tooltips: Vec<Arc<dyn TooltipRenderer>>) {
        self.lock().tooltips.extend(tooltips);
    }

    /// Snapshot of the registered tooltips
    pub fn tooltips(&self) -> Vec<Arc<dyn TooltipRenderer>> {
        self.lock().tooltips.clone()
    }

    pub fn add_renderer_2d(&self, renderer: Arc<dyn Renderer2d>) {
        self.lock().renderers.push(renderer);
    }

    /// Remove `renderer`, matched by identity. Returns whether it was found.
    pub fn remove_renderer_2d(&self, renderer: &Arc<dyn Renderer2d>) -> bool {
        let mut layers = self.lock();
        let before = layers.renderers.len();
        layers.renderers.retain(|r| !Arc::ptr_eq(r, renderer));
        layers.renderers.len() != before
    }

    pub fn clear_renderers_2d(&self) {
        self.lock().renderers.clear();
    }

    /// Snapshot of the registered 2D renderers
    pub fn renderers_2d(&self) -> Vec<Arc<dyn Renderer2d>> {
        self.lock().renderers.clone()
    }

    /// Whether any tooltip or 2D renderer is registered
    pub fn has_content(&self) -> bool {
        !self.lock().is_empty()
    }
}

/// Full-canvas 2D layer of a view.
///
/// Owns the tooltip/renderer lists and the lazily created compositor.
pub struct OverlaySurface {
    handle: OverlayHandle,
    overlay: Option<Overlay>,
    background: Color,
}

impl OverlaySurface {
    pub fn new(background: Color) -> Self {
        Self {
            handle: OverlayHandle::default(),
            overlay: None,
            background,
        }
    }

    pub fn handle(&self) -> &OverlayHandle {
        &self.handle
    }

    /// The compositor, once a frame with overlay content created it
    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    /// Paint every layer and composite the result over `viewport`.
    ///
    /// Must run while the graphics context is current, after the scene.
    /// Returns immediately, touching nothing, when no layer is registered.
    /// Paint failures are logged and leave the frame intact.
    pub fn render(&mut self, painter: &mut dyn Painter, canvas: &dyn Canvas, viewport: Viewport) {
        let layers = self.handle.lock();
        if layers.is_empty() {
            return;
        }

        let overlay = self.overlay.get_or_insert_with(|| {
            debug!("creating overlay for drawable {:?}", canvas.drawable());
            Overlay::new(canvas.drawable())
        });

        painter.polygon_mode(PolygonFace::FrontAndBack, PolygonFill::Fill);
        painter.viewport(viewport);

        if !viewport.has_area() {
            return;
        }
        let (surface_w, surface_h) = canvas.surface_size();
        if surface_w == 0 || surface_h == 0 {
            return;
        }

        // Painted at canvas size, stretched onto the viewport by draw_all
        let (width, height) = (canvas.renderer_width(), canvas.renderer_height());
        let mut g = overlay.create_graphics(width, height);
        g.set_background(self.background);
        g.clear_rect(0, 0, width, height);

        let painted = layers.iter().try_for_each(|layer| layer.paint(&mut g, width, height));
        g.dispose();

        match painted {
            Ok(()) => {
                overlay.mark_dirty(0, 0, width, height);
                overlay.draw_all(painter, viewport);
            }
            Err(e) => error!("overlay paint failed: {e}"),
        }
    }

    /// Drop the 2D renderers and the compositor
    pub fn dispose(&mut self) {
        self.handle.clear_renderers_2d();
        self.overlay = None;
    }
}

impl Default for OverlaySurface {
    fn default() -> Self {
        Self::new(Color::TRANSPARENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{EventLog, RecordingRenderer2d, RecordingTooltip};

    #[test]
    fn test_clear_then_add_leaves_single_tooltip() {
        let log = EventLog::new();
        let handle = OverlayHandle::default();
        handle.add_tooltip(Arc::new(RecordingTooltip::new("a", log.clone())));
        handle.add_tooltip(Arc::new(RecordingTooltip::new("b", log.clone())));

        let t: Arc<dyn TooltipRenderer> = Arc::new(RecordingTooltip::new("t", log.clone()));
        handle.clear_tooltips();
        handle.add_tooltip(t.clone());

        let tooltips = handle.tooltips();
        assert_eq!(tooltips.len(), 1);
        assert!(Arc::ptr_eq(&tooltips[0], &t));
    }

    #[test]
    fn test_set_tooltip_replaces_all() {
        let log = EventLog::new();
        let handle = OverlayHandle::default();
        let tooltip = |name: &str| -> Arc<dyn TooltipRenderer> {
            Arc::new(RecordingTooltip::new(name, log.clone()))
        };
        handle.set_tooltips(vec![tooltip("a"), tooltip("b")]);
        handle.add_tooltips(vec![tooltip("c")]);
        assert_eq!(handle.tooltips().len(), 3);

        handle.set_tooltip(Arc::new(RecordingTooltip::new("d", log.clone())));
        assert_eq!(handle.tooltips().len(), 1);
    }

    #[test]
    fn test_remove_renderer_by_identity() {
        let log = EventLog::new();
        let handle = OverlayHandle::default();
        let a: Arc<dyn Renderer2d> = Arc::new(RecordingRenderer2d::new("same", log.clone()));
        let b: Arc<dyn Renderer2d> = Arc::new(RecordingRenderer2d::new("same", log.clone()));
        handle.add_renderer_2d(a.clone());
        handle.add_renderer_2d(b.clone());

        assert!(handle.remove_renderer_2d(&a));
        assert!(!handle.remove_renderer_2d(&a));
        let left = handle.renderers_2d();
        assert_eq!(left.len(), 1);
        assert!(Arc::ptr_eq(&left[0], &b));
    }

    #[test]
    fn test_handle_clones_share_lists() {
        let log = EventLog::new();
        let surface = OverlaySurface::default();
        let remote = surface.handle().clone();
        assert!(!surface.handle().has_content());

        remote.add_renderer_2d(Arc::new(RecordingRenderer2d::new("r", log)));
        assert!(surface.handle().has_content());
    }

    #[test]
    fn test_dispose_keeps_tooltips() {
        let log = EventLog::new();
        let mut surface = OverlaySurface::default();
        surface.handle().add_tooltip(Arc::new(RecordingTooltip::new("t", log.clone())));
        surface.handle().add_renderer_2d(Arc::new(RecordingRenderer2d::new("r", log)));
        surface.dispose();
        assert_eq!(surface.handle().tooltips().len(), 1);
        assert!(surface.handle().renderers_2d().is_empty());
        assert!(surface.overlay().is_none());
    }
}
