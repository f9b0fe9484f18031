//! WebGPU rendering module
//!
//! Top-down view of the slope built from colored quads.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::{Camera, scene_vertices};
pub use vertex::Vertex;
