pub mod app;
pub mod audio;
pub mod camera;
pub mod constants;
pub mod error;
pub mod fullscreen;
pub mod geometry;
pub mod input;
pub mod panel;
pub mod params;
pub mod scene;
pub mod toolbar;
pub mod uniforms;

pub use app::*;
pub use audio::*;
pub use camera::*;
pub use constants::*;
pub use error::*;
pub use fullscreen::*;
pub use input::*;
pub use params::*;
pub use scene::*;
pub use toolbar::*;
pub use uniforms::*;

// Shaders bundled as string constants
pub static ORB_WGSL: &str = include_str!("../shaders/orb.wgsl");
pub static LOGO_WGSL: &str = include_str!("../shaders/logo.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");
