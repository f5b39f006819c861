//! Camera placement, projection and screen/model conversion

use bytemuck::{Pod, Zeroable};
use log::{trace, warn};
use nalgebra::{Matrix4, Vector4};
use plotview_core::{
    BoundingVolume, CameraMode, Coord3d, Error, Result, Transform3D, Vector3f, ViewMode,
    ViewPoint, Viewport,
};

use crate::painter::{MatrixMode, Painter};

/// Margin added around the scene in [`ViewMode::Top`] so axis labels fit
pub const STRETCH_RATIO: f32 = 0.1;

/// Radius used when the scene has no extent
pub const DEFAULT_MIN_RADIUS: f32 = 1.0;

/// Matrices committed by the last [`Camera::shoot`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub view: Transform3D,
    pub projection: Transform3D,
    pub viewport: Viewport,
    pub near: f32,
    pub far: f32,
}

/// Camera looking at the scene from a point on its rendering sphere.
///
/// The mutators only record state; matrices change on the next `shoot`.
#[derive(Debug, Clone)]
pub struct Camera {
    eye: Coord3d,
    target: Coord3d,
    up: Vector3f,
    projection_mode: CameraMode,
    rendering_sphere_radius: f32,
    viewport: Viewport,
    shot: Option<Shot>,
}

impl Camera {
    /// Create a new camera
    pub fn new(eye: Coord3d, target: Coord3d, up: Vector3f) -> Self {
        Self {
            eye,
            target,
            up,
            projection_mode: CameraMode::default(),
            rendering_sphere_radius: DEFAULT_MIN_RADIUS,
            viewport: Viewport::default(),
            shot: None,
        }
    }

    pub fn eye(&self) -> Coord3d {
        self.eye
    }

    pub fn target(&self) -> Coord3d {
        self.target
    }

    pub fn up(&self) -> Vector3f {
        self.up
    }

    pub fn rendering_sphere_radius(&self) -> f32 {
        self.rendering_sphere_radius
    }

    pub fn projection_mode(&self) -> CameraMode {
        self.projection_mode
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_eye(&mut self, eye: Coord3d) {
        self.eye = eye;
    }

    pub fn set_target(&mut self, target: Coord3d) {
        self.target = target;
    }

    pub fn set_up(&mut self, up: Vector3f) {
        self.up = up;
    }

    pub fn set_rendering_sphere_radius(&mut self, radius: f32) {
        self.rendering_sphere_radius = radius;
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Distance from the eye to the target
    pub fn distance(&self) -> f32 {
        (self.eye - self.target).norm()
    }

    /// The last committed matrices, if the camera has been shot
    pub fn shot(&self) -> Option<&Shot> {
        self.shot.as_ref()
    }

    pub fn is_shot(&self) -> bool {
        self.shot.is_some()
    }

    /// Fit the camera around `bounds`, looking from `viewpoint`.
    ///
    /// `viewpoint` must already carry the elevation imposed by `mode`.
    pub fn fit_to_bounds(
        &mut self,
        bounds: &BoundingVolume,
        mode: ViewMode,
        viewpoint: &ViewPoint,
        stretch_ratio: f32,
        min_radius: f32,
    ) {
        self.set_rendering_sphere_radius(rendering_radius(bounds, mode, stretch_ratio, min_radius));

        let target = bounds.center();
        self.set_target(target);
        self.set_eye(target + viewpoint.to_cartesian());
        self.set_up(viewpoint.up());
    }

    /// Compute and commit view and projection matrices for `viewport`
    pub fn shoot(&mut self, viewport: Viewport, mode: CameraMode) {
        self.viewport = viewport;
        self.projection_mode = mode;

        if self.distance() <= f32::EPSILON {
            warn!("camera eye coincides with target, pushing eye back along +Z");
            self.eye = self.target + Vector3f::z() * self.radius().max(DEFAULT_MIN_RADIUS);
        }

        let line_of_sight = self.target - self.eye;
        let up = if line_of_sight.cross(&self.up).norm() <= f32::EPSILON {
            // Any axis not parallel to the line of sight will do
            if line_of_sight.cross(&Vector3f::y()).norm() > f32::EPSILON {
                Vector3f::y()
            } else {
                Vector3f::x()
            }
        } else {
            self.up
        };

        let view = Transform3D::look_at(&self.eye, &self.target, &up);

        let radius = self.radius();
        let distance = self.distance();
        let aspect = viewport.aspect_ratio();

        let (projection, near, far) = match mode {
            CameraMode::Orthogonal => {
                let near = distance - 2.0 * radius;
                let far = distance + 2.0 * radius;
                let projection = Transform3D::orthographic(
                    -radius * aspect,
                    radius * aspect,
                    -radius,
                    radius,
                    near,
                    far,
                );
                (projection, near, far)
            }
            CameraMode::Perspective => {
                let fovy = 2.0 * (radius / distance).atan();
                let near = (distance - 2.0 * radius).max(distance * 1e-3);
                let far = distance + 2.0 * radius;
                (Transform3D::perspective(aspect, fovy, near, far), near, far)
            }
        };

        trace!(
            "camera shot: mode={:?} radius={} distance={} near={} far={} viewport={:?}",
            mode,
            radius,
            distance,
            near,
            far,
            viewport
        );

        self.shot = Some(Shot {
            view,
            projection,
            viewport,
            near,
            far,
        });
    }

    /// Load the committed matrices into the painter
    pub fn apply(&self, painter: &mut dyn Painter) -> Result<()> {
        let shot = self.shot.as_ref().ok_or(Error::CameraNotShot)?;
        painter.viewport(shot.viewport);
        painter.matrix_mode(MatrixMode::Projection);
        painter.load_matrix(&shot.projection.matrix);
        painter.matrix_mode(MatrixMode::ModelView);
        painter.load_matrix(&shot.view.matrix);
        Ok(())
    }

    /// Project a model point to device pixels.
    ///
    /// `z` of the result is the window depth in `[0, 1]`.
    pub fn model_to_screen(&self, point: &Coord3d) -> Result<Coord3d> {
        let shot = self.shot.as_ref().ok_or(Error::CameraNotShot)?;
        let clip = (shot.projection * shot.view).transform_homogeneous(&point.to_homogeneous());
        if clip.w.abs() <= f32::EPSILON {
            return Err(Error::SingularProjection);
        }
        let ndc = clip.xyz() / clip.w;
        let vp = &shot.viewport;
        Ok(Coord3d::new(
            vp.x as f32 + (ndc.x + 1.0) / 2.0 * vp.width as f32,
            vp.y as f32 + (ndc.y + 1.0) / 2.0 * vp.height as f32,
            (ndc.z + 1.0) / 2.0,
        ))
    }

    /// Inverse-project a device point (with window depth) to model space
    pub fn screen_to_model(&self, screen: &Coord3d) -> Result<Coord3d> {
        let shot = self.shot.as_ref().ok_or(Error::CameraNotShot)?;
        let vp = &shot.viewport;
        if !vp.has_area() {
            return Err(Error::InvalidData(format!("viewport {vp:?} has no area")));
        }
        let ndc = Vector4::new(
            (screen.x - vp.x as f32) / vp.width as f32 * 2.0 - 1.0,
            (screen.y - vp.y as f32) / vp.height as f32 * 2.0 - 1.0,
            screen.z * 2.0 - 1.0,
            1.0,
        );
        let inverse = (shot.projection * shot.view)
            .inverse()
            .ok_or(Error::SingularProjection)?;
        let model = inverse.transform_homogeneous(&ndc);
        if model.w.abs() <= f32::EPSILON {
            return Err(Error::SingularProjection);
        }
        Ok(Coord3d::from(model.xyz() / model.w))
    }

    /// GPU-ready packing of the committed matrices
    pub fn uniform(&self) -> Result<CameraUniform> {
        let shot = self.shot.as_ref().ok_or(Error::CameraNotShot)?;
        let view_proj: Matrix4<f32> = shot.projection.matrix * shot.view.matrix;
        Ok(CameraUniform {
            view_proj: view_proj.into(),
            view_pos: [self.eye.x, self.eye.y, self.eye.z],
            _padding: 0.0,
        })
    }

    fn radius(&self) -> f32 {
        if self.rendering_sphere_radius.is_finite() && self.rendering_sphere_radius > 0.0 {
            self.rendering_sphere_radius
        } else {
            DEFAULT_MIN_RADIUS
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        let viewpoint = ViewPoint::default();
        Self::new(
            Coord3d::origin() + viewpoint.to_cartesian(),
            Coord3d::origin(),
            viewpoint.up(),
        )
    }
}

/// Camera uniform data
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view_pos: [f32; 3],
    pub _padding: f32,
}

/// Rendering sphere radius fitting `bounds` for a view mode.
///
/// [`ViewMode::Top`] only considers the X/Y extents and inflates them by
/// `stretch_ratio`; other modes use the full 3D radius. Degenerate bounds
/// fall back to `min_radius`.
pub fn rendering_radius(
    bounds: &BoundingVolume,
    mode: ViewMode,
    stretch_ratio: f32,
    min_radius: f32,
) -> f32 {
    let radius = match mode {
        ViewMode::Top => {
            let radius = bounds.x_extent().max(bounds.y_extent()) / 2.0;
            radius + radius * stretch_ratio
        }
        ViewMode::Free | ViewMode::Profile => bounds.radius(),
    };

    if radius.is_finite() && radius > f32::EPSILON {
        radius
    } else {
        warn!("degenerate scene bounds {bounds:?}, using radius {min_radius}");
        min_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_box() -> BoundingVolume {
        BoundingVolume::new(Coord3d::new(-1.0, -1.0, -1.0), Coord3d::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_top_radius_uses_planar_extent_with_margin() {
        let bounds = BoundingVolume::new(Coord3d::new(0.0, 0.0, 0.0), Coord3d::new(10.0, 4.0, 30.0));
        let r = rendering_radius(&bounds, ViewMode::Top, STRETCH_RATIO, DEFAULT_MIN_RADIUS);
        assert_relative_eq!(r, 5.5, epsilon = 1e-6);
    }

    #[test]
    fn test_free_and_profile_radius_is_bounds_radius() {
        let bounds = BoundingVolume::new(Coord3d::new(0.0, 0.0, 0.0), Coord3d::new(10.0, 4.0, 3.0));
        for mode in [ViewMode::Free, ViewMode::Profile] {
            let r = rendering_radius(&bounds, mode, STRETCH_RATIO, DEFAULT_MIN_RADIUS);
            assert_eq!(r, bounds.radius());
        }
    }

    #[test]
    fn test_degenerate_bounds_fall_back_to_min_radius() {
        let point = BoundingVolume::new(Coord3d::new(1.0, 2.0, 3.0), Coord3d::new(1.0, 2.0, 3.0));
        assert_eq!(rendering_radius(&point, ViewMode::Free, STRETCH_RATIO, 2.5), 2.5);
        assert_eq!(
            rendering_radius(&BoundingVolume::empty(), ViewMode::Top, STRETCH_RATIO, 2.5),
            2.5
        );
    }

    #[test]
    fn test_projection_before_shoot_fails() {
        let camera = Camera::default();
        assert!(matches!(
            camera.screen_to_model(&Coord3d::new(1.0, 1.0, 0.0)),
            Err(Error::CameraNotShot)
        ));
        assert!(matches!(
            camera.model_to_screen(&Coord3d::origin()),
            Err(Error::CameraNotShot)
        ));
        assert!(camera.uniform().is_err());
    }

    #[test]
    fn test_fit_places_eye_on_viewpoint() {
        let mut camera = Camera::default();
        let viewpoint = ViewPoint::new(0.0, 0.0, 20.0);
        camera.fit_to_bounds(&unit_box(), ViewMode::Free, &viewpoint, STRETCH_RATIO, 1.0);

        assert_eq!(camera.target(), Coord3d::origin());
        assert_relative_eq!(camera.eye(), Coord3d::new(20.0, 0.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(camera.rendering_sphere_radius(), 3f32.sqrt(), epsilon = 1e-6);
    }

    #[test]
    fn test_target_projects_to_viewport_center() {
        let mut camera = Camera::new(Coord3d::new(0.0, 0.0, 10.0), Coord3d::origin(), Vector3f::y());
        camera.set_rendering_sphere_radius(2.0);
        let viewport = Viewport::new(100, 50, 400, 400);

        for mode in [CameraMode::Orthogonal, CameraMode::Perspective] {
            camera.shoot(viewport, mode);
            let s = camera.model_to_screen(&Coord3d::origin()).unwrap();
            assert_relative_eq!(s.x, 300.0, epsilon = 1e-3);
            assert_relative_eq!(s.y, 250.0, epsilon = 1e-3);
            assert!(s.z > 0.0 && s.z < 1.0);
        }
    }

    #[test]
    fn test_perspective_sphere_fits_vertically() {
        let mut camera = Camera::new(Coord3d::new(0.0, 0.0, 10.0), Coord3d::origin(), Vector3f::y());
        camera.set_rendering_sphere_radius(2.0);
        camera.shoot(Viewport::full(200, 200), CameraMode::Perspective);

        let shot = camera.shot().unwrap();
        assert_relative_eq!(shot.near, 6.0, epsilon = 1e-5);
        assert_relative_eq!(shot.far, 14.0, epsilon = 1e-5);
    }

    #[test]
    fn test_orthogonal_edge_maps_to_viewport_edge() {
        let mut camera = Camera::new(Coord3d::new(0.0, 0.0, 10.0), Coord3d::origin(), Vector3f::y());
        camera.set_rendering_sphere_radius(2.0);
        camera.shoot(Viewport::full(400, 200), CameraMode::Orthogonal);

        // aspect 2 => horizontal half-width is 2 * radius
        let s = camera.model_to_screen(&Coord3d::new(4.0, 2.0, 0.0)).unwrap();
        assert_relative_eq!(s.x, 400.0, epsilon = 1e-3);
        assert_relative_eq!(s.y, 200.0, epsilon = 1e-3);
    }

    #[test]
    fn test_shoot_recovers_from_eye_on_target() {
        let mut camera = Camera::new(Coord3d::origin(), Coord3d::origin(), Vector3f::z());
        camera.shoot(Viewport::full(100, 100), CameraMode::Perspective);
        assert!(camera.distance() > 0.0);
        let shot = camera.shot().unwrap();
        assert!(shot.view.matrix.iter().all(|v| v.is_finite()));
        assert!(shot.projection.matrix.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_uniform_matches_shot() {
        let mut camera = Camera::new(Coord3d::new(0.0, 0.0, 5.0), Coord3d::origin(), Vector3f::y());
        camera.shoot(Viewport::full(64, 64), CameraMode::Orthogonal);
        let uniform = camera.uniform().unwrap();
        assert_eq!(uniform.view_pos, [0.0, 0.0, 5.0]);
        assert_eq!(bytemuck::bytes_of(&uniform).len(), 80);
    }
}
