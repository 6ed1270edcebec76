//! Input subsystem.
//!
//! Public API is platform-agnostic. The runtime translates winit keyboard
//! events through `platform` and feeds them into the `KeyMap` held by
//! [`State`](crate::state::State).

mod keymap;
pub mod platform;
mod types;

pub use keymap::KeyMap;
pub use types::{Key, KeyEvent, KeyState, Modifiers};
