//! Platform event translation.

mod winit;

pub use self::winit::{map_modifiers, translate_key_event};
