//! Module registration and per-run frame callbacks.
//!
//! A module is a named init function. Setup code registers modules on a
//! [`ModuleRegistry`]; the sandbox runs them, and each one appends render
//! passes, UI panels and cleanups to the shared [`FrameRegistry`].

mod frame;
mod registry;

pub use frame::{Cleanup, FrameMark, FrameRegistry, RenderPass, UiPanel};
pub use registry::{InitReport, ModuleInit, ModuleRegistry};
