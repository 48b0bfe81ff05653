pub mod config;
pub mod constants;
pub mod error;
pub mod frame;
pub mod game;
pub mod mesh;
pub mod pose;
pub mod scene;
pub mod stereo;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static PREVIEW_WGSL: &str = include_str!("../shaders/preview.wgsl");

pub use config::*;
pub use constants::*;
pub use error::*;
pub use frame::*;
pub use game::*;
pub use mesh::*;
pub use pose::*;
pub use scene::*;
pub use stereo::*;
