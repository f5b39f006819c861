//! Scene collaborators consumed by the view

use plotview_core::{BoundingVolume, Vector3f};

use crate::camera::Camera;
use crate::painter::Painter;

/// The scene graph: node definitions and their draw calls live behind this
pub trait SceneGraph {
    /// Compute screen-space representations of the content through the
    /// camera's committed matrices, without drawing
    fn project(&mut self, camera: &Camera);

    /// Issue draw calls for the content
    fn draw(&mut self, painter: &mut dyn Painter, camera: &Camera);

    /// Current extent of the content, unscaled
    fn bounds(&self) -> BoundingVolume;
}

/// Axis box, ticks and labels drawn around the scene
pub trait AxisDecoration {
    fn draw(&mut self, painter: &mut dyn Painter, camera: &Camera);

    /// Bounds of the decoration including its labels, as of the last draw
    fn whole_bounds(&self) -> BoundingVolume;

    fn set_scale(&mut self, scale: Vector3f);
}

/// Scene lighting
pub trait LightSet {
    fn disable(&mut self, painter: &mut dyn Painter);

    fn enable_light_if_there_are_lights(&mut self, painter: &mut dyn Painter);
}

/// Extra 3D drawing hooked after the scene graph
pub trait SceneRenderer {
    fn draw(&mut self, painter: &mut dyn Painter, camera: &Camera);
}

/// Lights for scenes that have none
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLights;

impl LightSet for NoLights {
    fn disable(&mut self, _painter: &mut dyn Painter) {}

    fn enable_light_if_there_are_lights(&mut self, _painter: &mut dyn Painter) {}
}

/// Everything the view reads to draw one chart
pub struct Scene {
    pub graph: Box<dyn SceneGraph>,
    pub lights: Box<dyn LightSet>,
    pub axis: Option<Box<dyn AxisDecoration>>,
    pub renderers: Vec<Box<dyn SceneRenderer>>,
}

impl Scene {
    pub fn new(graph: Box<dyn SceneGraph>) -> Self {
        Self {
            graph,
            lights: Box::new(NoLights),
            axis: None,
            renderers: Vec::new(),
        }
    }

    pub fn with_lights(mut self, lights: Box<dyn LightSet>) -> Self {
        self.lights = lights;
        self
    }

    pub fn with_axis(mut self, axis: Box<dyn AxisDecoration>) -> Self {
        self.axis = Some(axis);
        self
    }

    pub fn add_renderer(&mut self, renderer: Box<dyn SceneRenderer>) {
        self.renderers.push(renderer);
    }
}
