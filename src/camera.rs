use glam::{Mat4, Vec3};

/// A perspective camera for the shared scene.
///
/// There is exactly one of these, living on the
/// [`RenderContext`](crate::RenderContext). Scenes move it around freely;
/// the scene manager puts it back to the baseline pose before every switch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    /// Width over height of the drawing surface.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            forward: Vec3::NEG_Z,
            up: Vec3::Y,
            fov: std::f32::consts::FRAC_PI_3,
            aspect: 16.0 / 9.0,
            near: 0.05,
            far: 200.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(mut self, position: impl Into<Vec3>) -> Self {
        self.position = position.into();
        self
    }

    pub fn looking_at(mut self, target: impl Into<Vec3>) -> Self {
        self.look_at(target);
        self
    }

    pub fn with_fov(mut self, fov_degrees: f32) -> Self {
        self.fov = fov_degrees.to_radians();
        self
    }

    /// Point the camera at a world-space target.
    ///
    /// Targets coincident with the camera position leave the orientation alone.
    pub fn look_at(&mut self, target: impl Into<Vec3>) {
        let dir = (target.into() - self.position).normalize_or_zero();
        if dir != Vec3::ZERO {
            self.forward = dir;
        }
    }

    /// Orient the camera from FPS-style yaw/pitch angles (yaw 0 looks down -Z).
    pub fn set_yaw_pitch(&mut self, yaw: f32, pitch: f32) {
        self.forward = Vec3::new(
            -yaw.sin() * pitch.cos(),
            pitch.sin(),
            -yaw.cos() * pitch.cos(),
        )
        .normalize_or_zero();
    }

    pub fn set_fov_degrees(&mut self, fov_degrees: f32) {
        self.fov = fov_degrees.to_radians();
    }

    pub fn fov_degrees(&self) -> f32 {
        self.fov.to_degrees()
    }

    pub fn right(&self) -> Vec3 {
        self.forward.cross(self.up).normalize_or_zero()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect.max(f32::EPSILON), self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn look_at_points_forward_at_target() {
        let mut camera = Camera::new().at([0.0, 1.6, 3.0]);
        camera.look_at([0.0, 1.6, 0.0]);
        assert!((camera.forward - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn look_at_self_keeps_orientation() {
        let mut camera = Camera::new().at([1.0, 2.0, 3.0]);
        let before = camera.forward;
        camera.look_at([1.0, 2.0, 3.0]);
        assert_eq!(camera.forward, before);
    }

    #[test]
    fn yaw_turns_left_for_positive_angles() {
        let mut camera = Camera::new();
        camera.set_yaw_pitch(std::f32::consts::FRAC_PI_2, 0.0);
        assert!((camera.forward - Vec3::NEG_X).length() < 1e-5);
    }
}
