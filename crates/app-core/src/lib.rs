pub mod animate;
pub mod camera;
pub mod constants;
pub mod ease;
pub mod geometry;
pub mod progress;
pub mod sampler;
pub mod scene;
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use animate::*;
pub use camera::*;
pub use constants::*;
pub use ease::*;
pub use geometry::*;
pub use progress::*;
pub use sampler::*;
pub use scene::*;
