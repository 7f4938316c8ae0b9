//! Rendering module
//!
//! The simulation draws through the [`Surface`] trait. Hosts supply the
//! implementation: a canvas 2D context in the browser, a [`CommandBuffer`]
//! everywhere else.

pub mod shapes;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use surface::{AngleRange, Color, CommandBuffer, DrawCommand, Surface};
