//! Application state and the per-frame tick.

use crate::audio::LoudnessSource;
use crate::fullscreen::FullscreenState;
use crate::params::AnimationParameters;
use crate::scene::Scene;
use crate::toolbar::ToolbarState;
use crate::uniforms::{logo_motion, MaterialBlock, UniformBus};
use glam::Mat4;

/// Viewport size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BloomSettings {
    pub threshold: f32,
    pub strength: f32,
    pub radius: f32,
}

impl BloomSettings {
    pub fn from_params(params: &AnimationParameters) -> Self {
        Self {
            threshold: params.threshold,
            strength: params.strength,
            radius: params.radius,
        }
    }
}

/// Everything the renderer needs for one frame, already packed for upload.
#[derive(Clone, Copy, Debug)]
pub struct FrameState {
    pub view_proj: Mat4,
    pub orb: MaterialBlock,
    /// `None` until the logo texture has resolved.
    pub logo: Option<MaterialBlock>,
    pub bloom: BloomSettings,
}

pub trait FrameRenderer {
    fn render(&mut self, frame: &FrameState) -> anyhow::Result<()>;
}

/// Renderer that draws nothing; used before the GPU is ready and in tests.
#[derive(Default)]
pub struct NullRenderer;

impl FrameRenderer for NullRenderer {
    fn render(&mut self, _frame: &FrameState) -> anyhow::Result<()> {
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct AppState {
    pub params: AnimationParameters,
    pub uniforms: UniformBus,
    pub scene: Scene,
    pub toolbar: ToolbarState,
    pub fullscreen: FullscreenState,
    pub viewport: Viewport,
}

impl AppState {
    pub fn new(viewport_w: f32, viewport_h: f32) -> Self {
        let params = AnimationParameters::default();
        Self {
            uniforms: UniformBus::new(&params),
            toolbar: ToolbarState::new(params.toolbar_visible),
            params,
            scene: Scene::new(viewport_w, viewport_h),
            fullscreen: FullscreenState::default(),
            viewport: Viewport {
                width: viewport_w,
                height: viewport_h,
            },
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport { width, height };
        self.scene.camera.set_viewport(width, height);
    }

    /// The logo texture resolved: create the logo and seed its uniforms.
    pub fn attach_logo(&mut self) {
        if self.scene.has_logo() {
            return;
        }
        self.scene.attach_logo(self.params.logo_size);
        self.uniforms.set_logo_color(self.params.color());
        self.uniforms.logo.opacity = self.params.logo_opacity;
        log::info!("[logo] attached at size {}", self.params.logo_size);
    }

    /// Advance one frame in fixed order: clock, loudness, uniforms, logo
    /// transform, camera, render. Returns the frame's frequency.
    /// A render failure is logged and does not stop the caller's loop.
    pub fn tick<L, R>(&mut self, elapsed_sec: f32, source: &mut L, renderer: &mut R) -> f32
    where
        L: LoudnessSource + ?Sized,
        R: FrameRenderer + ?Sized,
    {
        let loudness = source.sample_loudness();
        let logo_present = self.scene.has_logo();
        let frequency = self.uniforms.update(elapsed_sec, loudness, &self.params, logo_present);
        if logo_present {
            let motion = logo_motion(elapsed_sec, frequency, self.params.logo_size);
            self.scene.apply_logo_motion(motion);
        }
        self.scene.ease_camera();

        let frame = self.frame_state();
        if let Err(e) = renderer.render(&frame) {
            log::error!("[render] frame failed: {:?}", e);
        }
        frequency
    }

    pub fn frame_state(&self) -> FrameState {
        let view_proj = self.scene.camera.view_projection();
        FrameState {
            view_proj,
            orb: self.uniforms.main.pack(view_proj, self.scene.orb_model_matrix()),
            logo: self
                .scene
                .logo()
                .map(|logo| self.uniforms.logo.pack(view_proj, logo.model_matrix())),
            bloom: BloomSettings::from_params(&self.params),
        }
    }
}
