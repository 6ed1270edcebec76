//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, wires them to the GPU layer, and
//! holds the window placement rules (monitor choice, fullscreen save/restore).

mod fullscreen;
mod geometry;
pub mod monitor;
mod runtime;

pub use fullscreen::{FullscreenChange, FullscreenController, FullscreenMode};
pub use geometry::{best_monitor, MonitorRect, WindowGeometry};
pub use runtime::{Runtime, RuntimeConfig};
