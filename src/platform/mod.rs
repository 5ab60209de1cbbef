//! Platform glue
//!
//! The browser build wires a canvas, keyboard listeners and
//! `requestAnimationFrame` to the frame driver. Native builds have no
//! platform layer; `main.rs` steps frames itself.

#[cfg(target_arch = "wasm32")]
pub mod web;
