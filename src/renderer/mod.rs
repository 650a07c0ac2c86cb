//! Canvas 2D rendering module
//!
//! Read-only view of the simulation: draws the player, obstacles and items
//! each frame with neon gradients.

pub mod canvas;

pub use canvas::CanvasRenderer;
