//! Recording test doubles for every collaborator of the view.
//!
//! All doubles write into one shared [`EventLog`], so the relative order of
//! painter commands, scene callbacks and overlay paints can be asserted.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use image::RgbaImage;
use nalgebra::Matrix4;
use plotview_core::{BoundingVolume, Color, Coord3d, Error, Result, Vector3f, Viewport};

use crate::camera::Camera;
use crate::canvas::{Canvas, DrawableHandle};
use crate::compositor::Surface2d;
use crate::overlay::{Renderer2d, TooltipRenderer};
use crate::painter::{MatrixMode, Painter, PolygonFace, PolygonFill};
use crate::scene::{AxisDecoration, LightSet, SceneGraph, SceneRenderer};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Acquire,
    Release,
    Clear(Color),
    Viewport(Viewport),
    PolygonMode(PolygonFace, PolygonFill),
    MatrixMode(MatrixMode),
    LoadMatrix,
    DrawImage { width: u32, height: u32, dest: Viewport },
    WireframeBox(Color),
    Text(String, f32, f32),
    Project,
    DrawScene,
    DrawCustom(String),
    AxisScale(Vector3f),
    DrawAxis,
    LightsDisabled,
    LightsEnabled,
    Tooltip(String),
    Renderer2d(String, u32, u32),
}

/// Shared, thread-safe list of events
#[derive(Debug, Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<Event>>>);

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Event>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push(&self, event: Event) {
        self.lock().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn count(&self, pred: impl Fn(&Event) -> bool) -> usize {
        self.lock().iter().filter(|e| pred(*e)).count()
    }

    /// Index of the first matching event
    pub fn position(&self, pred: impl Fn(&Event) -> bool) -> Option<usize> {
        self.lock().iter().position(pred)
    }
}

/// Painter that records every command
pub struct RecordingPainter {
    log: EventLog,
    /// Make the next `make_current` fail like a driver would
    pub fail_acquire: bool,
}

impl RecordingPainter {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            fail_acquire: false,
        }
    }
}

impl Painter for RecordingPainter {
    fn make_current(&mut self, _canvas: &dyn Canvas) -> Result<()> {
        if self.fail_acquire {
            return Err(Error::ContextUnavailable("driver refused context".to_string()));
        }
        self.log.push(Event::Acquire);
        Ok(())
    }

    fn release(&mut self) {
        self.log.push(Event::Release);
    }

    fn clear(&mut self, color: Color) {
        self.log.push(Event::Clear(color));
    }

    fn viewport(&mut self, viewport: Viewport) {
        self.log.push(Event::Viewport(viewport));
    }

    fn polygon_mode(&mut self, face: PolygonFace, fill: PolygonFill) {
        self.log.push(Event::PolygonMode(face, fill));
    }

    fn matrix_mode(&mut self, mode: MatrixMode) {
        self.log.push(Event::MatrixMode(mode));
    }

    fn load_matrix(&mut self, _matrix: &Matrix4<f32>) {
        self.log.push(Event::LoadMatrix);
    }

    fn draw_image(&mut self, image: &RgbaImage, dest: Viewport) {
        self.log.push(Event::DrawImage {
            width: image.width(),
            height: image.height(),
            dest,
        });
    }

    fn draw_wireframe_box(&mut self, _bounds: &BoundingVolume, color: Color) {
        self.log.push(Event::WireframeBox(color));
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, _color: Color) {
        self.log.push(Event::Text(text.to_string(), x, y));
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MockCanvas {
    pub width: u32,
    pub height: u32,
    pub surface: (u32, u32),
    pub handle: DrawableHandle,
}

impl MockCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            surface: (width, height),
            handle: DrawableHandle(1),
        }
    }
}

impl Canvas for MockCanvas {
    fn renderer_width(&self) -> u32 {
        self.width
    }

    fn renderer_height(&self) -> u32 {
        self.height
    }

    fn drawable(&self) -> DrawableHandle {
        self.handle
    }

    fn surface_size(&self) -> (u32, u32) {
        self.surface
    }
}

/// Scene graph with fixed bounds; projection stores the screen position of
/// the bounds' center
pub struct MockSceneGraph {
    log: EventLog,
    pub bounds: BoundingVolume,
    pub projected_center: Option<Coord3d>,
}

impl MockSceneGraph {
    pub fn new(bounds: BoundingVolume, log: EventLog) -> Self {
        Self {
            log,
            bounds,
            projected_center: None,
        }
    }
}

impl SceneGraph for MockSceneGraph {
    fn project(&mut self, camera: &Camera) {
        self.log.push(Event::Project);
        self.projected_center = camera.model_to_screen(&self.bounds.center()).ok();
    }

    fn draw(&mut self, _painter: &mut dyn Painter, _camera: &Camera) {
        self.log.push(Event::DrawScene);
    }

    fn bounds(&self) -> BoundingVolume {
        self.bounds
    }
}

pub struct MockAxis {
    log: EventLog,
    pub whole_bounds: BoundingVolume,
    pub scale: Vector3f,
}

impl MockAxis {
    pub fn new(whole_bounds: BoundingVolume, log: EventLog) -> Self {
        Self {
            log,
            whole_bounds,
            scale: Vector3f::new(1.0, 1.0, 1.0),
        }
    }
}

impl AxisDecoration for MockAxis {
    fn draw(&mut self, _painter: &mut dyn Painter, _camera: &Camera) {
        self.log.push(Event::DrawAxis);
    }

    fn whole_bounds(&self) -> BoundingVolume {
        self.whole_bounds
    }

    fn set_scale(&mut self, scale: Vector3f) {
        self.scale = scale;
        self.log.push(Event::AxisScale(scale));
    }
}

pub struct MockLights {
    log: EventLog,
    pub has_lights: bool,
}

impl MockLights {
    pub fn new(has_lights: bool, log: EventLog) -> Self {
        Self { log, has_lights }
    }
}

impl LightSet for MockLights {
    fn disable(&mut self, _painter: &mut dyn Painter) {
        self.log.push(Event::LightsDisabled);
    }

    fn enable_light_if_there_are_lights(&mut self, _painter: &mut dyn Painter) {
        if self.has_lights {
            self.log.push(Event::LightsEnabled);
        }
    }
}

pub struct RecordingSceneRenderer {
    name: String,
    log: EventLog,
}

impl RecordingSceneRenderer {
    pub fn new(name: &str, log: EventLog) -> Self {
        Self {
            name: name.to_string(),
            log,
        }
    }
}

impl SceneRenderer for RecordingSceneRenderer {
    fn draw(&mut self, _painter: &mut dyn Painter, _camera: &Camera) {
        self.log.push(Event::DrawCustom(self.name.clone()));
    }
}

/// Tooltip that records its paint and marks the top-left pixel
pub struct RecordingTooltip {
    name: String,
    log: EventLog,
}

impl RecordingTooltip {
    pub fn new(name: &str, log: EventLog) -> Self {
        Self {
            name: name.to_string(),
            log,
        }
    }
}

impl TooltipRenderer for RecordingTooltip {
    fn render(&self, g: &mut dyn Surface2d) -> Result<()> {
        self.log.push(Event::Tooltip(self.name.clone()));
        g.set_color(Color::BLACK);
        g.fill_rect(0, 0, 1, 1);
        Ok(())
    }
}

pub struct RecordingRenderer2d {
    name: String,
    log: EventLog,
}

impl RecordingRenderer2d {
    pub fn new(name: &str, log: EventLog) -> Self {
        Self {
            name: name.to_string(),
            log,
        }
    }
}

impl Renderer2d for RecordingRenderer2d {
    fn paint(&self, _g: &mut dyn Surface2d, width: u32, height: u32) -> Result<()> {
        self.log.push(Event::Renderer2d(self.name.clone(), width, height));
        Ok(())
    }
}

/// Renderer whose paint always fails
pub struct FailingRenderer2d {
    log: EventLog,
}

impl FailingRenderer2d {
    pub fn new(log: EventLog) -> Self {
        Self { log }
    }
}

impl Renderer2d for FailingRenderer2d {
    fn paint(&self, _g: &mut dyn Surface2d, width: u32, height: u32) -> Result<()> {
        self.log.push(Event::Renderer2d("failing".to_string(), width, height));
        Err(Error::Overlay("renderer failed".to_string()))
    }
}
