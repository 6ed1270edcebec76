//! gabagool engine crate.
//!
//! Owns the platform + GPU runtime, the module/frame registries and the
//! sandbox loop that ties them together. The studio binary only supplies
//! modules.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod config;
pub mod module;
pub mod paint;
pub mod render;
pub mod sandbox;
pub mod state;
pub mod ui;
