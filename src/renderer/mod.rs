//! WebGPU rendering module
//!
//! Replays a `DisplayList` as flat-coloured triangles. Text commands are
//! not rasterized here; the web layer mirrors them into a DOM overlay.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::{Tessellation, tessellate};
pub use vertex::{CanvasTransform, Vertex};
