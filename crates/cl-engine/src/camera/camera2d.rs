use glam::{Mat4, Vec2, Vec3};

use super::{CameraUniform, Viewport};

/// Orthographic 2D camera with a pannable position.
///
/// Move operations only touch `position`; matrices are refreshed by
/// [`compute_proj`](Self::compute_proj) and [`compute_view`](Self::compute_view),
/// which the frame loop calls after applying that frame's input.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera2D {
    position: Vec2,
    speed: f32,
    zoom: f32,
    viewport: Viewport,
    projection: Mat4,
    view: Mat4,
}

impl Camera2D {
    /// World units travelled per unit of move delta.
    pub const DEFAULT_SPEED: f32 = 1.0;

    pub const MIN_ZOOM: f32 = 0.05;
    pub const MAX_ZOOM: f32 = 32.0;

    const NEAR: f32 = -1.0;
    const FAR: f32 = 1.0;

    /// Creates a camera at the origin with identity matrices.
    pub fn new() -> Self {
        Self {
            position: Vec2::ZERO,
            speed: Self::DEFAULT_SPEED,
            zoom: 1.0,
            viewport: Viewport::default(),
            projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
        }
    }

    /// Sets the move speed (world units per unit of delta).
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Viewport used by the last [`compute_proj`](Self::compute_proj) call.
    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Sets the zoom factor, clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    ///
    /// Non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f32) {
        if !zoom.is_finite() {
            return;
        }
        self.zoom = zoom.clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
    }

    /// Multiplies the zoom factor. Non-positive or non-finite factors are ignored.
    pub fn zoom_by(&mut self, factor: f32) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        self.set_zoom(self.zoom * factor);
    }

    /// Pans along +X by `delta * speed`.
    pub fn move_right(&mut self, delta: f32) {
        self.position.x += delta * self.speed;
    }

    /// Pans along +Y by `delta * speed`.
    pub fn move_up(&mut self, delta: f32) {
        self.position.y += delta * self.speed;
    }

    /// Recomputes the orthographic projection for a viewport in pixels.
    ///
    /// Each dimension is clamped to at least 1, so a zero height behaves like a
    /// height of 1 rather than producing NaN/Inf.
    pub fn compute_proj(&mut self, viewport_width: i32, viewport_height: i32) {
        self.viewport = Viewport::clamped(viewport_width, viewport_height);

        let half_h = 1.0 / self.zoom;
        let half_w = self.viewport.aspect() * half_h;

        self.projection =
            Mat4::orthographic_rh(-half_w, half_w, -half_h, half_h, Self::NEAR, Self::FAR);
    }

    /// Recomputes the view matrix as a translation by `-position`.
    pub fn compute_view(&mut self) {
        self.view = Mat4::from_translation(Vec3::new(-self.position.x, -self.position.y, 0.0));
    }

    /// Recomputes both matrices.
    pub fn update(&mut self, viewport_width: i32, viewport_height: i32) {
        self.compute_proj(viewport_width, viewport_height);
        self.compute_view();
    }

    #[inline]
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    #[inline]
    pub fn view(&self) -> Mat4 {
        self.view
    }

    /// Projection as a column-major array.
    pub fn projection_cols(&self) -> [f32; 16] {
        self.projection.to_cols_array()
    }

    /// View as a column-major array.
    pub fn view_cols(&self) -> [f32; 16] {
        self.view.to_cols_array()
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            projection: self.projection.to_cols_array_2d(),
            view: self.view.to_cols_array_2d(),
        }
    }

    /// Maps a world-space point to normalized device coordinates using the
    /// current matrices.
    pub fn world_to_ndc(&self, world: Vec2) -> Vec2 {
        (self.projection * self.view)
            .project_point3(world.extend(0.0))
            .truncate()
    }
}

impl Default for Camera2D {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() <= EPS
    }

    fn all_finite(m: Mat4) -> bool {
        m.to_cols_array().iter().all(|v| v.is_finite())
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn new_camera_is_at_origin_with_identity_matrices() {
        let cam = Camera2D::new();
        assert_eq!(cam.position(), Vec2::ZERO);
        assert_eq!(cam.view(), Mat4::IDENTITY);
        assert_eq!(cam.projection(), Mat4::IDENTITY);
    }

    #[test]
    fn new_camera_view_stays_identity_after_compute() {
        let mut cam = Camera2D::new();
        cam.compute_view();
        assert_eq!(cam.view(), Mat4::IDENTITY);
    }

    // ── movement ──────────────────────────────────────────────────────────

    #[test]
    fn moves_are_additive() {
        let mut split = Camera2D::new();
        split.move_right(0.5);
        split.move_right(0.25);

        let mut single = Camera2D::new();
        single.move_right(0.75);

        assert_eq!(split.position(), single.position());
    }

    #[test]
    fn moves_are_additive_with_inexact_deltas() {
        let mut split = Camera2D::new().with_speed(0.37);
        split.move_up(0.1);
        split.move_up(0.2);

        let mut single = Camera2D::new().with_speed(0.37);
        single.move_up(0.1 + 0.2);

        assert!(approx(split.position().y, single.position().y));
    }

    #[test]
    fn moves_scale_by_speed() {
        let mut cam = Camera2D::new().with_speed(2.0);
        cam.move_right(-1.5);
        cam.move_up(0.25);
        assert_eq!(cam.position(), Vec2::new(-3.0, 0.5));
    }

    #[test]
    fn moves_do_not_touch_matrices() {
        let mut cam = Camera2D::new();
        cam.move_right(3.0);
        assert_eq!(cam.view(), Mat4::IDENTITY);
        cam.compute_view();
        assert_eq!(cam.view().w_axis.x, -3.0);
    }

    // ── projection ────────────────────────────────────────────────────────

    #[test]
    fn scenario_800x600_after_moves() {
        let mut cam = Camera2D::new();
        cam.move_right(1.0);
        cam.move_up(-1.0);
        cam.compute_proj(800, 600);
        cam.compute_view();

        let t = cam.view().w_axis;
        assert_eq!((t.x, t.y), (-1.0, 1.0));

        let p = cam.projection();
        assert!(approx(p.x_axis.x / p.y_axis.y, 600.0 / 800.0));
        assert!(approx(p.y_axis.y, 1.0));
    }

    #[test]
    fn zero_height_matches_height_of_one() {
        let mut zero = Camera2D::new();
        zero.compute_proj(800, 0);

        let mut one = Camera2D::new();
        one.compute_proj(800, 1);

        assert!(all_finite(zero.projection()));
        assert_eq!(zero.projection(), one.projection());
        assert_eq!(zero.viewport(), Viewport::clamped(800, 1));
    }

    #[test]
    fn fully_degenerate_viewport_is_finite() {
        let mut cam = Camera2D::new();
        cam.compute_proj(0, 0);
        assert!(all_finite(cam.projection()));
        cam.compute_proj(-10, -10);
        assert!(all_finite(cam.projection()));
    }

    #[test]
    fn recompute_is_bit_identical() {
        let mut cam = Camera2D::new().with_speed(0.3);
        cam.move_right(1.7);
        cam.move_up(-4.1);
        cam.update(1280, 720);
        let (p0, v0) = (cam.projection_cols(), cam.view_cols());

        cam.update(1280, 720);
        let (p1, v1) = (cam.projection_cols(), cam.view_cols());

        assert_eq!(p0.map(f32::to_bits), p1.map(f32::to_bits));
        assert_eq!(v0.map(f32::to_bits), v1.map(f32::to_bits));
    }

    #[test]
    fn visible_extents_follow_aspect_and_zoom() {
        let mut cam = Camera2D::new();
        cam.set_position(Vec2::new(5.0, -2.0));
        cam.set_zoom(2.0);
        cam.update(400, 200);

        // Camera centre lands at the centre of the screen.
        let c = cam.world_to_ndc(Vec2::new(5.0, -2.0));
        assert!(approx(c.x, 0.0) && approx(c.y, 0.0));

        // aspect 2, zoom 2 => half extents (1.0, 0.5).
        let corner = cam.world_to_ndc(Vec2::new(6.0, -1.5));
        assert!(approx(corner.x, 1.0) && approx(corner.y, 1.0));
    }

    #[test]
    fn depth_of_plane_maps_inside_wgpu_range() {
        let mut cam = Camera2D::new();
        cam.update(640, 480);
        let z = cam.projection().project_point3(Vec3::ZERO).z;
        assert!((0.0..=1.0).contains(&z));
    }

    // ── zoom ──────────────────────────────────────────────────────────────

    #[test]
    fn zoom_is_clamped() {
        let mut cam = Camera2D::new();
        cam.set_zoom(1000.0);
        assert_eq!(cam.zoom(), Camera2D::MAX_ZOOM);
        cam.set_zoom(0.0);
        assert_eq!(cam.zoom(), Camera2D::MIN_ZOOM);
    }

    #[test]
    fn zoom_by_ignores_invalid_factors() {
        let mut cam = Camera2D::new();
        cam.zoom_by(0.0);
        cam.zoom_by(-2.0);
        cam.zoom_by(f32::NAN);
        assert_eq!(cam.zoom(), 1.0);
        cam.zoom_by(1.5);
        assert_eq!(cam.zoom(), 1.5);
    }

    // ── uniform ───────────────────────────────────────────────────────────

    #[test]
    fn uniform_is_column_major() {
        let mut cam = Camera2D::new();
        cam.move_right(2.0);
        cam.update(100, 100);

        let u = cam.uniform();
        assert_eq!(u.view[3][0], -2.0);
        assert_eq!(bytemuck::bytes_of(&u).len() as u64, CameraUniform::SIZE);
        assert_eq!(CameraUniform::SIZE, 128);
    }
}
