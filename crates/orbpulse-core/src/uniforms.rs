use crate::constants::*;
use crate::params::AnimationParameters;
use glam::Mat4;

/// Per-material animated parameters consumed by the orb and logo shaders.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShaderUniforms {
    pub time: f32,
    pub frequency: f32,
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub opacity: f32,
}

impl ShaderUniforms {
    fn from_color([red, green, blue]: [f32; 3], opacity: f32) -> Self {
        Self {
            time: 0.0,
            frequency: 0.0,
            red,
            green,
            blue,
            opacity,
        }
    }

    /// Pack into the std140-compatible block bound at `@group(0) @binding(0)`.
    pub fn pack(&self, view_proj: Mat4, model: Mat4) -> MaterialBlock {
        MaterialBlock {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            time: self.time,
            frequency: self.frequency,
            red: self.red,
            green: self.green,
            blue: self.blue,
            opacity: self.opacity,
            _pad: [0.0; 2],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialBlock {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub time: f32,
    pub frequency: f32,
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub opacity: f32,
    pub _pad: [f32; 2],
}

/// Fallback waveform used whenever no microphone is listening.
#[inline]
pub fn idle_frequency(elapsed_sec: f32) -> f32 {
    elapsed_sec.sin() * IDLE_FREQUENCY_AMPLITUDE + IDLE_FREQUENCY_OFFSET
}

#[inline]
pub fn listening_frequency(loudness: f32, sensitivity: f32) -> f32 {
    loudness * sensitivity
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogoMotion {
    pub rotation_z: f32,
    pub scale: f32,
}

/// Size ratio relative to the quad's build size.
#[inline]
pub fn logo_size_ratio(logo_size: f32) -> f32 {
    logo_size / DEFAULT_LOGO_SIZE
}

/// Audio-driven wobble and pulse for the logo quad.
pub fn logo_motion(time: f32, frequency: f32, logo_size: f32) -> LogoMotion {
    LogoMotion {
        rotation_z: (time * LOGO_ROTATION_RATE).sin() * LOGO_ROTATION_AMPLITUDE,
        scale: (1.0 + frequency / LOGO_SCALE_DIVISOR) * logo_size_ratio(logo_size),
    }
}

/// Two uniform sets kept in lockstep; `main` owns the color.
#[derive(Clone, Debug)]
pub struct UniformBus {
    pub main: ShaderUniforms,
    pub logo: ShaderUniforms,
}

impl UniformBus {
    pub fn new(params: &AnimationParameters) -> Self {
        Self {
            main: ShaderUniforms::from_color(params.color(), 1.0),
            logo: ShaderUniforms::from_color(params.color(), params.logo_opacity),
        }
    }

    /// Recompute time/frequency and copy them plus the current color into
    /// both sets. The logo set is left untouched while no logo exists.
    /// Returns the frequency for this frame.
    pub fn update(
        &mut self,
        elapsed_sec: f32,
        loudness: Option<f32>,
        params: &AnimationParameters,
        logo_present: bool,
    ) -> f32 {
        let frequency = match loudness {
            Some(l) => listening_frequency(l, params.sensitivity),
            None => idle_frequency(elapsed_sec),
        };
        self.main.time = elapsed_sec;
        self.main.frequency = frequency;
        self.set_color(params.color());
        if logo_present {
            self.logo.time = self.main.time;
            self.logo.frequency = self.main.frequency;
            self.logo.red = self.main.red;
            self.logo.green = self.main.green;
            self.logo.blue = self.main.blue;
            self.logo.opacity = params.logo_opacity;
        }
        frequency
    }

    pub fn set_color(&mut self, [red, green, blue]: [f32; 3]) {
        self.main.red = red;
        self.main.green = green;
        self.main.blue = blue;
    }

    pub fn set_logo_color(&mut self, [red, green, blue]: [f32; 3]) {
        self.logo.red = red;
        self.logo.green = green;
        self.logo.blue = blue;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn material_block_matches_wgsl_layout() {
        // two mat4x4<f32> + eight scalars, 16-byte aligned
        assert_eq!(std::mem::size_of::<MaterialBlock>(), 160);
        assert_eq!(std::mem::size_of::<MaterialBlock>() % 16, 0);
    }

    #[test]
    fn idle_frequency_stays_in_band() {
        let mut t = 0.0_f32;
        while t < 50.0 {
            let f = idle_frequency(t);
            assert!((0.0..=20.0).contains(&f), "t={t} f={f}");
            t += 0.037;
        }
        assert!((idle_frequency(0.0) - 10.0).abs() < 1e-6);
        let period = std::f32::consts::TAU;
        assert!((idle_frequency(1.3) - idle_frequency(1.3 + period)).abs() < 1e-4);
    }

    #[test]
    fn idle_frequency_is_continuous() {
        let dt = 1e-3;
        let mut t = 0.0_f32;
        while t < 10.0 {
            // slope is bounded by the amplitude
            assert!((idle_frequency(t + dt) - idle_frequency(t)).abs() <= IDLE_FREQUENCY_AMPLITUDE * dt * 1.01);
            t += 0.1;
        }
    }

    #[test]
    fn listening_frequency_scales_loudness() {
        for l in [0.0_f32, 1.0, 40.0, 127.5, 255.0] {
            for s in [0.1_f32, 1.0, 1.5, 5.0] {
                assert_eq!(listening_frequency(l, s), l * s);
            }
        }
    }

    #[test]
    fn logo_motion_matches_response_curve() {
        let m = logo_motion(0.0, 0.0, DEFAULT_LOGO_SIZE);
        assert_eq!(m.rotation_z, 0.0);
        assert_eq!(m.scale, 1.0);

        let m = logo_motion(std::f32::consts::PI, 250.0, DEFAULT_LOGO_SIZE);
        assert!((m.rotation_z - 0.1).abs() < 1e-6);
        assert!((m.scale - 1.5).abs() < 1e-6);

        let m = logo_motion(0.0, 0.0, 5.0);
        assert!((m.scale - 2.0).abs() < 1e-6);
    }

    #[test]
    fn update_skips_logo_until_present() {
        let params = AnimationParameters::default();
        let mut bus = UniformBus::new(&params);
        let before = bus.logo;
        bus.update(2.0, Some(10.0), &params, false);
        assert_eq!(bus.logo, before);
        assert_eq!(bus.main.frequency, 15.0);
        bus.update(2.5, Some(10.0), &params, true);
        assert_eq!(bus.logo.frequency, 15.0);
        assert_eq!(bus.logo.time, 2.5);
    }
}
