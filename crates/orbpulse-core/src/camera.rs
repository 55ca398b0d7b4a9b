//! Perspective camera that drifts after the pointer.
//!
//! The camera never owns a window or canvas; the frontend feeds it the
//! viewport size on resize and a pointer offset on every pointer move.

use crate::constants::*;
use glam::{Mat4, Vec2, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::from_array(CAMERA_START),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: CAMERA_FOVY_DEGREES.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// One fixed-step exponential approach toward `(x, -y, eye.z)`, then
    /// re-aim at the scene origin. Frame-rate dependent on purpose.
    pub fn ease_toward(&mut self, pointer: Vec2) {
        self.eye.x += (pointer.x - self.eye.x) * CAMERA_EASING;
        self.eye.y += (-pointer.y - self.eye.y) * CAMERA_EASING;
        self.target = Vec3::ZERO;
    }
}

/// Pointer position relative to the viewport center, in pixels / 100.
#[inline]
pub fn pointer_offset(client_x: f32, client_y: f32, viewport_w: f32, viewport_h: f32) -> Vec2 {
    Vec2::new(
        (client_x - viewport_w / 2.0) / POINTER_OFFSET_DIVISOR,
        (client_y - viewport_h / 2.0) / POINTER_OFFSET_DIVISOR,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_offset_is_centered_and_scaled() {
        assert_eq!(pointer_offset(400.0, 300.0, 800.0, 600.0), Vec2::ZERO);
        assert_eq!(pointer_offset(600.0, 100.0, 800.0, 600.0), Vec2::new(2.0, -2.0));
    }

    #[test]
    fn easing_moves_five_percent_and_keeps_depth() {
        let mut cam = Camera::default();
        cam.ease_toward(Vec2::new(2.0, -2.0));
        assert!((cam.eye.x - (6.0 + (2.0 - 6.0) * 0.05)).abs() < 1e-6);
        assert!((cam.eye.y - (8.0 + (2.0 - 8.0) * 0.05)).abs() < 1e-6);
        assert_eq!(cam.eye.z, 14.0);
        assert_eq!(cam.target, Vec3::ZERO);
    }

    #[test]
    fn easing_converges_on_pointer() {
        let mut cam = Camera::default();
        for _ in 0..600 {
            cam.ease_toward(Vec2::new(1.0, 3.0));
        }
        assert!((cam.eye.x - 1.0).abs() < 1e-3);
        assert!((cam.eye.y + 3.0).abs() < 1e-3);
    }

    #[test]
    fn zero_sized_viewport_keeps_aspect() {
        let mut cam = Camera::default();
        cam.set_viewport(1600.0, 800.0);
        assert_eq!(cam.aspect, 2.0);
        cam.set_viewport(0.0, 800.0);
        assert_eq!(cam.aspect, 2.0);
    }
}
