//! The sandbox loop: module lifecycle, reload and frame ordering.

mod app;
mod lifecycle;

pub use app::SandboxApp;
pub use lifecycle::{LoopPhase, Sandbox};
