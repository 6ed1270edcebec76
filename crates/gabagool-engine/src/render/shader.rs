//! Shader compilation and program linking.
//!
//! "Compile" creates a WGSL shader module; "link" builds a render pipeline from
//! a vertex and a fragment module. Both run inside a validation error scope so
//! a bad shader surfaces as a [`ShaderError`] for the calling module.
//!
//! All handles release their GPU object on drop.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("failed to compile shader module `{label}`:\n{message}")]
    Compile { label: String, message: String },

    #[error("failed to link program `{label}`:\n{message}")]
    Link { label: String, message: String },
}

/// A compiled WGSL module.
#[derive(Debug)]
pub struct Shader {
    label: String,
    module: wgpu::ShaderModule,
}

impl Shader {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn module(&self) -> &wgpu::ShaderModule {
        &self.module
    }
}

/// Compiles WGSL source into a shader module.
pub fn compile_shader(device: &wgpu::Device, label: &str, source: &str) -> Result<Shader, ShaderError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    if let Some(err) = pollster::block_on(device.pop_error_scope()) {
        return Err(ShaderError::Compile {
            label: label.to_string(),
            message: err.to_string(),
        });
    }

    log::debug!("compiled shader `{label}`");
    Ok(Shader {
        label: label.to_string(),
        module,
    })
}

/// Everything needed to link a vertex + fragment pair into a [`Program`].
pub struct ProgramDesc<'a> {
    pub label: &'a str,
    pub vertex: &'a Shader,
    pub vertex_entry: &'a str,
    pub fragment: &'a Shader,
    pub fragment_entry: &'a str,
    pub vertex_buffers: &'a [wgpu::VertexBufferLayout<'a>],
    pub target_format: wgpu::TextureFormat,
    pub blend: Option<wgpu::BlendState>,
    pub topology: wgpu::PrimitiveTopology,
}

/// A linked render pipeline.
#[derive(Debug)]
pub struct Program {
    label: String,
    target_format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
}

impl Program {
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The color format the pipeline was linked against. A surface format
    /// change requires relinking.
    pub fn target_format(&self) -> wgpu::TextureFormat {
        self.target_format
    }

    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    /// Binds the pipeline on `pass`.
    pub fn bind(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
    }
}

/// Links a vertex and a fragment shader into a render pipeline.
pub fn link_program(device: &wgpu::Device, desc: &ProgramDesc<'_>) -> Result<Program, ShaderError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(desc.label),
        bind_group_layouts: &[],
        ..Default::default()
    });

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(desc.label),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: desc.vertex.module(),
            entry_point: Some(desc.vertex_entry),
            compilation_options: Default::default(),
            buffers: desc.vertex_buffers,
        },
        fragment: Some(wgpu::FragmentState {
            module: desc.fragment.module(),
            entry_point: Some(desc.fragment_entry),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: desc.target_format,
                blend: desc.blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: desc.topology,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    });

    if let Some(err) = pollster::block_on(device.pop_error_scope()) {
        return Err(ShaderError::Link {
            label: desc.label.to_string(),
            message: err.to_string(),
        });
    }

    log::debug!(
        "linked program `{}` ({} + {})",
        desc.label,
        desc.vertex.label(),
        desc.fragment.label()
    );
    Ok(Program {
        label: desc.label.to_string(),
        target_format: desc.target_format,
        pipeline,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_name_the_failing_object() {
        let err = ShaderError::Compile {
            label: "background triangle".into(),
            message: "expected `;`".into(),
        };
        let text = err.to_string();
        assert!(text.contains("compile shader module `background triangle`"));
        assert!(text.ends_with("expected `;`"));

        let err = ShaderError::Link { label: "p".into(), message: "entry point missing".into() };
        assert!(err.to_string().starts_with("failed to link program `p`"));
    }
}
