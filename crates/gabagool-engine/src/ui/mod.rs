//! egui integration: input from winit, painting through wgpu.

mod layer;

pub use layer::{UiFrame, UiLayer};
