//! Per-frame orchestration of a chart view

use std::sync::Arc;

use image::RgbaImage;
use log::{debug, trace};
use plotview_core::{
    BoundingVolume, CameraMode, Color, Coord3d, Error, Result, Vector3f, ViewMode, ViewPoint,
    Viewport, ViewportMode,
};

use crate::background::BackgroundImage;
use crate::camera::Camera;
use crate::canvas::Canvas;
use crate::config::ViewConfig;
use crate::context::CurrentContext;
use crate::overlay::{OverlayHandle, OverlaySurface, Renderer2d, TooltipRenderer};
use crate::painter::{MatrixMode, Painter};
use crate::scene::Scene;
use crate::viewport::ViewportReconciler;

/// Everything one chart view keeps between frames.
///
/// A view is driven from a single rendering thread. Only the overlay lists,
/// reachable through [`View::overlay_handle`], may be touched from others.
pub struct View {
    config: ViewConfig,
    camera: Camera,
    reconciler: ViewportReconciler,
    viewpoint: ViewPoint,
    scaling: Vector3f,
    overlay: OverlaySurface,
    background: Option<BackgroundImage>,
}

impl View {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            camera: Camera::default(),
            reconciler: ViewportReconciler::new(config.viewport_aspect_ratio),
            viewpoint: ViewPoint::default(),
            scaling: Vector3f::new(1.0, 1.0, 1.0),
            overlay: OverlaySurface::new(config.overlay_background),
            background: None,
            config,
        }
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewpoint(&self) -> ViewPoint {
        self.viewpoint
    }

    pub fn set_viewpoint(&mut self, viewpoint: ViewPoint) {
        self.viewpoint = viewpoint;
    }

    /// Orbit the viewpoint; takes effect on the next frame
    pub fn rotate(&mut self, d_azimuth: f32, d_elevation: f32) {
        self.viewpoint.rotate(d_azimuth, d_elevation);
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.config.view_mode = mode;
    }

    pub fn set_camera_mode(&mut self, mode: CameraMode) {
        self.config.camera_mode = mode;
    }

    pub fn set_viewport_mode(&mut self, mode: ViewportMode) {
        self.config.viewport_mode = mode;
    }

    pub fn set_axis_box_displayed(&mut self, displayed: bool) {
        self.config.axis_box_displayed = displayed;
    }

    pub fn scaling(&self) -> Vector3f {
        self.scaling
    }

    /// Per-axis stretch applied to the scene bounds before fitting the camera
    pub fn set_scaling(&mut self, scaling: Vector3f) {
        self.scaling = scaling;
    }

    /// Rectangle of `canvas` the scene is projected into
    pub fn compute_viewport(&self, canvas: &dyn Canvas) -> Viewport {
        self.reconciler.reconcile(
            canvas.renderer_width(),
            canvas.renderer_height(),
            self.config.viewport_mode,
        )
    }

    /// Render one frame.
    ///
    /// Fails only when the graphics context cannot be acquired. The context
    /// is released before returning, whatever happens in between.
    pub fn render(
        &mut self,
        painter: &mut dyn Painter,
        canvas: &dyn Canvas,
        scene: &mut Scene,
    ) -> Result<()> {
        let mut ctx = CurrentContext::acquire(painter, canvas)?;
        let viewport = self.compute_viewport(canvas);
        trace!("rendering frame into {viewport:?}");

        self.measure_axis(&mut *ctx, scene, viewport)?;
        ctx.clear(self.config.clear_color);

        self.render_background(&mut *ctx, viewport);
        self.render_scene(&mut *ctx, scene, viewport)?;
        self.render_axis_box(&mut *ctx, scene);
        self.overlay.render(&mut *ctx, canvas, viewport);
        Ok(())
    }

    /// Project the scene through the last shot camera, without drawing
    pub fn project(
        &mut self,
        painter: &mut dyn Painter,
        canvas: &dyn Canvas,
        scene: &mut Scene,
    ) -> Result<()> {
        let _ctx = CurrentContext::acquire(painter, canvas)?;
        if !self.camera.is_shot() {
            return Err(Error::CameraNotShot);
        }
        scene.graph.project(&self.camera);
        Ok(())
    }

    /// Model point under a device pixel, at depth 0.
    ///
    /// `(x, y)` use the GL window convention: origin at the bottom-left of
    /// the canvas.
    pub fn project_mouse(
        &self,
        painter: &mut dyn Painter,
        canvas: &dyn Canvas,
        x: i32,
        y: i32,
    ) -> Result<Coord3d> {
        let _ctx = CurrentContext::acquire(painter, canvas)?;
        self.camera
            .screen_to_model(&Coord3d::new(x as f32, y as f32, 0.0))
    }

    /// Draw the background image, if any, into `viewport`
    pub fn render_background(&self, painter: &mut dyn Painter, viewport: Viewport) {
        if let Some(background) = &self.background {
            background.render(painter, viewport);
        }
    }

    /// Draw the background image into the canvas column between fractional
    /// `left` and `right` bounds
    pub fn render_background_span(
        &self,
        painter: &mut dyn Painter,
        canvas: &dyn Canvas,
        left: f32,
        right: f32,
    ) {
        let column = Viewport::column(
            canvas.renderer_width(),
            canvas.renderer_height(),
            left,
            right,
        );
        self.render_background(painter, column);
    }

    /// Set the background image, stretched to fill the viewport
    pub fn set_background_image(&mut self, image: RgbaImage) {
        self.background = Some(BackgroundImage::new(image, ViewportMode::StretchToFill));
    }

    pub fn clear_background_image(&mut self) {
        self.background = None;
    }

    pub fn background_image(&self) -> Option<&BackgroundImage> {
        self.background.as_ref()
    }

    /// The overlay surface and its compositor
    pub fn overlay(&self) -> &OverlaySurface {
        &self.overlay
    }

    /// Handle on the tooltip and renderer lists, usable from other threads
    pub fn overlay_handle(&self) -> OverlayHandle {
        self.overlay.handle().clone()
    }

    pub fn clear_tooltips(&self) {
        self.overlay.handle().clear_tooltips();
    }

    pub fn set_tooltip(&self, tooltip: Arc<dyn TooltipRenderer>) {
        self.overlay.handle().set_tooltip(tooltip);
    }

    pub fn add_tooltip(&self, tooltip: Arc<dyn TooltipRenderer>) {
        self.overlay.handle().add_tooltip(tooltip);
    }

    pub fn set_tooltips(&self, tooltips: Vec<Arc<dyn TooltipRenderer>>) {
        self.overlay.handle().set_tooltips(tooltips);
    }

    pub fn add_tooltips(&self, tooltips: Vec<Arc<dyn TooltipRenderer>>) {
        self.overlay.handle().add_tooltips(tooltips);
    }

    pub fn tooltips(&self) -> Vec<Arc<dyn TooltipRenderer>> {
        self.overlay.handle().tooltips()
    }

    pub fn add_renderer_2d(&self, renderer: Arc<dyn Renderer2d>) {
        self.overlay.handle().add_renderer_2d(renderer);
    }

    pub fn remove_renderer_2d(&self, renderer: &Arc<dyn Renderer2d>) -> bool {
        self.overlay.handle().remove_renderer_2d(renderer)
    }

    pub fn renderers_2d(&self) -> Vec<Arc<dyn Renderer2d>> {
        self.overlay.handle().renderers_2d()
    }

    /// Release the 2D renderers and the overlay compositor
    pub fn dispose(&mut self) {
        debug!("disposing view");
        self.overlay.dispose();
    }

    /// Shoot with the previous placement and draw the axis once so its label
    /// extents are part of its whole bounds. The following clear erases it.
    fn measure_axis(
        &mut self,
        painter: &mut dyn Painter,
        scene: &mut Scene,
        viewport: Viewport,
    ) -> Result<()> {
        if !self.config.axis_box_displayed {
            return Ok(());
        }
        let Some(axis) = scene.axis.as_mut() else {
            return Ok(());
        };
        self.camera.shoot(viewport, self.config.camera_mode);
        self.camera.apply(painter)?;
        axis.set_scale(self.scaling);
        axis.draw(painter, &self.camera);
        Ok(())
    }

    /// Bounds the camera is fitted to, before scaling
    fn scene_bounds(&self, scene: &Scene) -> BoundingVolume {
        let bounds = scene.graph.bounds();
        match (&scene.axis, self.config.axis_box_displayed) {
            (Some(axis), true) => bounds.union(&axis.whole_bounds()),
            _ => bounds,
        }
    }

    fn update_camera(
        &mut self,
        painter: &mut dyn Painter,
        scene: &Scene,
        viewport: Viewport,
    ) -> Result<()> {
        let bounds = self.scene_bounds(scene).scale(&self.scaling);
        let mode = self.config.view_mode;
        let viewpoint = self.viewpoint.for_mode(mode);

        self.camera.fit_to_bounds(
            &bounds,
            mode,
            &viewpoint,
            self.config.stretch_ratio,
            self.config.min_radius,
        );
        self.camera.shoot(viewport, self.config.camera_mode);
        self.camera.apply(painter)
    }

    fn render_scene(
        &mut self,
        painter: &mut dyn Painter,
        scene: &mut Scene,
        viewport: Viewport,
    ) -> Result<()> {
        self.update_camera(painter, scene, viewport)?;

        scene.graph.project(&self.camera);
        scene.graph.draw(painter, &self.camera);
        for renderer in &mut scene.renderers {
            renderer.draw(painter, &self.camera);
        }
        Ok(())
    }

    fn render_axis_box(&mut self, painter: &mut dyn Painter, scene: &mut Scene) {
        if !self.config.axis_box_displayed {
            return;
        }
        let Some(axis) = scene.axis.as_mut() else {
            return;
        };

        painter.matrix_mode(MatrixMode::ModelView);
        scene.lights.disable(painter);

        axis.set_scale(self.scaling);
        axis.draw(painter, &self.camera);
        if self.config.display_axis_whole_bounds {
            painter.draw_wireframe_box(&axis.whole_bounds(), Color::MAGENTA);
        }

        scene.lights.enable_light_if_there_are_lights(painter);
    }
}

impl Default for View {
    fn default() -> Self {
        Self::new(ViewConfig::default())
    }
}
