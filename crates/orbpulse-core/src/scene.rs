use crate::camera::{pointer_offset, Camera};
use crate::uniforms::{logo_size_ratio, LogoMotion};
use glam::{Mat4, Vec2, Vec3};

/// Transform of the logo quad once its texture has resolved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogoState {
    pub rotation_z: f32,
    pub scale: f32,
}

impl LogoState {
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale(Vec3::splat(self.scale)) * Mat4::from_rotation_z(self.rotation_z)
    }
}

/// Camera plus the spatial state of both meshes. The orb itself never moves;
/// its deformation happens in the vertex shader.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub camera: Camera,
    pointer: Vec2,
    logo: Option<LogoState>,
}

impl Scene {
    pub fn new(viewport_w: f32, viewport_h: f32) -> Self {
        let mut scene = Self::default();
        scene.camera.set_viewport(viewport_w, viewport_h);
        scene
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn set_pointer(&mut self, client_x: f32, client_y: f32, viewport_w: f32, viewport_h: f32) {
        self.pointer = pointer_offset(client_x, client_y, viewport_w, viewport_h);
    }

    pub fn ease_camera(&mut self) {
        self.camera.ease_toward(self.pointer);
    }

    pub fn orb_model_matrix(&self) -> Mat4 {
        Mat4::IDENTITY
    }

    /// Called once the logo texture is on the GPU.
    pub fn attach_logo(&mut self, logo_size: f32) {
        if self.logo.is_none() {
            self.logo = Some(LogoState {
                rotation_z: 0.0,
                scale: logo_size_ratio(logo_size),
            });
        }
    }

    pub fn logo(&self) -> Option<&LogoState> {
        self.logo.as_ref()
    }

    pub fn has_logo(&self) -> bool {
        self.logo.is_some()
    }

    /// No-op while the logo is absent.
    pub fn apply_logo_motion(&mut self, motion: LogoMotion) {
        if let Some(logo) = &mut self.logo {
            logo.rotation_z = motion.rotation_z;
            logo.scale = motion.scale;
        }
    }

    /// Immediate rescale from the panel; the next frame folds the audio term back in.
    pub fn set_logo_size(&mut self, logo_size: f32) {
        if let Some(logo) = &mut self.logo {
            logo.scale = logo_size_ratio(logo_size);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uniforms::logo_motion;

    #[test]
    fn logo_updates_are_noops_without_texture() {
        let mut scene = Scene::new(800.0, 600.0);
        scene.apply_logo_motion(logo_motion(1.0, 40.0, 2.5));
        scene.set_logo_size(5.0);
        assert!(scene.logo().is_none());
    }

    #[test]
    fn attached_logo_follows_motion() {
        let mut scene = Scene::new(800.0, 600.0);
        scene.attach_logo(2.5);
        assert_eq!(scene.logo().map(|l| l.scale), Some(1.0));
        scene.apply_logo_motion(LogoMotion {
            rotation_z: 0.05,
            scale: 1.2,
        });
        let logo = scene.logo().copied().unwrap();
        assert_eq!(logo.rotation_z, 0.05);
        assert_eq!(logo.scale, 1.2);
        let corner = logo.model_matrix().transform_point3(Vec3::new(1.0, 0.0, 0.0));
        assert!((corner.length() - 1.2).abs() < 1e-5);
    }
}
