use std::time::Duration;

// Shared animation/interaction tuning constants used by the web frontend.

// Idle animation: frequency = sin(t) * AMPLITUDE + OFFSET, range [0, 20]
pub const IDLE_FREQUENCY_AMPLITUDE: f32 = 10.0;
pub const IDLE_FREQUENCY_OFFSET: f32 = 10.0;

// Logo motion
pub const LOGO_ROTATION_RATE: f32 = 0.5; // rad/s fed into sin()
pub const LOGO_ROTATION_AMPLITUDE: f32 = 0.1; // radians about the view axis
pub const LOGO_SCALE_DIVISOR: f32 = 500.0; // scale = 1 + frequency / divisor
pub const DEFAULT_LOGO_SIZE: f32 = 2.5; // quad side; logoSize is relative to this

// Camera
pub const CAMERA_FOVY_DEGREES: f32 = 45.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
pub const CAMERA_START: [f32; 3] = [6.0, 8.0, 14.0];
pub const CAMERA_EASING: f32 = 0.05; // fraction of the remaining distance per frame
pub const POINTER_OFFSET_DIVISOR: f32 = 100.0; // pixels per world unit of pointer offset

// Main mesh
pub const ORB_RADIUS: f32 = 4.0;
pub const ORB_DETAIL: u32 = 30;

// Toolbar
pub const TOOLBAR_REVEAL_MARGIN_PX: f32 = 100.0;
pub const TOOLBAR_AUTO_HIDE_DELAY: Duration = Duration::from_millis(3000);
pub const TOOLBAR_VISIBLE_OPACITY: &str = "1";
pub const HINT_VISIBLE_OPACITY: &str = "0.3";
pub const HIDDEN_OPACITY: &str = "0";

// Audio
pub const ANALYSER_FFT_SIZE: u32 = 256;
pub const ERROR_MESSAGE_DURATION: Duration = Duration::from_millis(5000);
