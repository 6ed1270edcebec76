//! Contracts between the platform runtime and the sandbox.
//!
//! The runtime owns winit and wgpu; an [`App`] only ever sees them through
//! the contexts defined here.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, StartCtx, WindowCtx};
