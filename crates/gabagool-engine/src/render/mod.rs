//! GPU rendering helpers.
//!
//! Render passes receive a [`RenderCtx`] and a [`RenderTarget`] each frame and
//! own their GPU resources. Pipelines are built through the [`shader`]
//! helpers so compile and link failures come back as errors instead of
//! wgpu's uncaptured-error panic.

mod ctx;
pub mod shader;

pub use ctx::{RenderCtx, RenderTarget};
pub use shader::{compile_shader, link_program, Program, ProgramDesc, Shader, ShaderError};
