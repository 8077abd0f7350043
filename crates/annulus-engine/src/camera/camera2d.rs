use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};

/// Orthographic 2D camera following a target.
///
/// `fov` is the visible world-space height. The visible width follows the
/// framebuffer aspect ratio.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera2d {
    pub center: Vec2,
    pub fov: f32,
    pub target_center: Vec2,
    pub target_fov: f32,
}

impl Camera2d {
    pub fn new(fov: f32) -> Self {
        Self {
            center: Vec2::ZERO,
            fov,
            target_center: Vec2::ZERO,
            target_fov: fov,
        }
    }

    /// Moves the camera towards its targets.
    ///
    /// The step fraction is `min(dt, 1)`, so a one-second frame snaps onto the target.
    pub fn update(&mut self, dt: f32) {
        let k = dt.clamp(0.0, 1.0);
        self.center += (self.target_center - self.center) * k;
        self.fov += (self.target_fov - self.fov) * k;
    }

    /// Snaps the camera onto its targets.
    pub fn snap(&mut self) {
        self.center = self.target_center;
        self.fov = self.target_fov;
    }

    /// World -> camera space.
    #[inline]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(-self.center.extend(0.0))
    }

    /// Camera space -> clip space for a framebuffer of the given size (physical px).
    pub fn projection_matrix(&self, framebuffer_size: Vec2) -> Mat4 {
        let size = framebuffer_size.max(Vec2::ONE);
        let aspect = size.x / size.y;
        Mat4::from_scale(Vec3::new(2.0 / (self.fov * aspect), 2.0 / self.fov, 1.0))
    }

    /// `(projection, view)` pair uploaded to the camera uniform.
    #[inline]
    pub fn uniforms(&self, framebuffer_size: Vec2) -> (Mat4, Mat4) {
        (self.projection_matrix(framebuffer_size), self.view_matrix())
    }

    /// Maps a world position to framebuffer pixels (origin bottom-left, +Y up).
    pub fn world_to_screen(&self, framebuffer_size: Vec2, world: Vec2) -> Vec2 {
        let clip = self.projection_matrix(framebuffer_size)
            * self.view_matrix()
            * world.extend(0.0).extend(1.0);
        let ndc = clip.xy() / clip.w;
        (ndc + Vec2::ONE) * 0.5 * framebuffer_size
    }

    /// Inverse of [`world_to_screen`](Self::world_to_screen).
    pub fn screen_to_world(&self, framebuffer_size: Vec2, screen: Vec2) -> Vec2 {
        let ndc = screen / framebuffer_size.max(Vec2::ONE) * 2.0 - Vec2::ONE;
        let inv = (self.projection_matrix(framebuffer_size) * self.view_matrix()).inverse();
        let world = inv * ndc.extend(0.0).extend(1.0);
        world.xy() / world.w
    }
}

impl Default for Camera2d {
    fn default() -> Self {
        Self::new(20.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    const FB: Vec2 = Vec2::new(800.0, 400.0);

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).abs().max_element() < 1e-3
    }

    fn to_clip(cam: &Camera2d, p: Vec2) -> Vec4 {
        let (proj, view) = cam.uniforms(FB);
        proj * view * Vec4::new(p.x, p.y, 0.0, 1.0)
    }

    #[test]
    fn center_maps_to_ndc_origin() {
        let mut cam = Camera2d::new(10.0);
        cam.center = Vec2::new(3.0, -7.0);
        let clip = to_clip(&cam, cam.center);
        assert!(close(clip.xy(), Vec2::ZERO));
    }

    #[test]
    fn fov_is_visible_height() {
        let cam = Camera2d::new(10.0);
        let top = to_clip(&cam, Vec2::new(0.0, 5.0));
        assert!((top.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn width_follows_aspect() {
        // 2:1 framebuffer, fov 10 -> visible width 20.
        let cam = Camera2d::new(10.0);
        let right = to_clip(&cam, Vec2::new(10.0, 0.0));
        assert!((right.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_framebuffer_is_floored() {
        let cam = Camera2d::new(10.0);
        let m = cam.projection_matrix(Vec2::ZERO);
        assert!(m.is_finite());
    }

    #[test]
    fn screen_roundtrip() {
        let mut cam = Camera2d::new(12.0);
        cam.center = Vec2::new(1.5, 2.5);
        let world = Vec2::new(-4.0, 6.0);
        let screen = cam.world_to_screen(FB, world);
        assert!(close(cam.screen_to_world(FB, screen), world));
    }

    #[test]
    fn world_to_screen_origin_is_bottom_left() {
        let cam = Camera2d::new(10.0);
        assert!(close(cam.world_to_screen(FB, Vec2::new(-10.0, -5.0)), Vec2::ZERO));
        assert!(close(cam.world_to_screen(FB, Vec2::ZERO), FB * 0.5));
    }

    #[test]
    fn update_approaches_target() {
        let mut cam = Camera2d::new(20.0);
        cam.target_center = Vec2::new(10.0, 0.0);
        cam.target_fov = 30.0;

        cam.update(0.5);
        assert!(close(cam.center, Vec2::new(5.0, 0.0)));
        assert!((cam.fov - 25.0).abs() < 1e-6);

        // Large steps are clamped to a full snap.
        cam.update(4.0);
        assert_eq!(cam.center, cam.target_center);
        assert_eq!(cam.fov, cam.target_fov);
    }

    #[test]
    fn snap_jumps_to_targets() {
        let mut cam = Camera2d::new(20.0);
        cam.target_center = Vec2::new(-1.0, 2.0);
        cam.target_fov = 5.0;
        cam.snap();
        assert_eq!(cam.center, Vec2::new(-1.0, 2.0));
        assert_eq!(cam.fov, 5.0);
    }
}
