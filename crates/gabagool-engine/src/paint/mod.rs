//! Color handling for clears and UI.

mod color;

pub use color::Color;
