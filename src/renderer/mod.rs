//! WebGPU rendering module
//!
//! Sprite masks are drawn as one quad per horizontal pixel run, so the
//! screen shows exactly the pixels that collide.

pub mod canvas;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use canvas::{HudState, SceneCanvas};
pub use pipeline::RenderState;
pub use vertex::Vertex;
