//! One red triangle drawn under the UI.

use std::cell::RefCell;
use std::rc::Rc;

use bytemuck::{Pod, Zeroable};
use gabagool_engine::module::FrameRegistry;
use gabagool_engine::render::{
    compile_shader, link_program, Program, ProgramDesc, RenderCtx, RenderTarget, ShaderError,
};
use gabagool_engine::state::State;
use wgpu::util::DeviceExt;

const SHADER_SRC: &str = include_str!("shaders/triangle.wgsl");

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
}

const VERTICES: [Vertex; 3] = [
    Vertex { position: [-0.5, -0.5, 0.0] },
    Vertex { position: [0.5, -0.5, 0.0] },
    Vertex { position: [0.0, 0.5, 0.0] },
];

const VERTEX_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &wgpu::vertex_attr_array![0 => Float32x3],
};

struct Triangle {
    program: Program,
    vertices: wgpu::Buffer,
}

impl Triangle {
    fn build(ctx: &RenderCtx<'_>) -> Result<Self, ShaderError> {
        let shader = compile_shader(ctx.device, "background triangle", SHADER_SRC)?;
        let program = link_program(
            ctx.device,
            &ProgramDesc {
                label: "background triangle",
                vertex: &shader,
                vertex_entry: "vs_main",
                fragment: &shader,
                fragment_entry: "fs_main",
                vertex_buffers: &[VERTEX_LAYOUT],
                target_format: ctx.surface_format,
                blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                topology: wgpu::PrimitiveTopology::TriangleList,
            },
        )?;

        let vertices = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("background triangle vbo"),
            contents: bytemuck::cast_slice(&VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Ok(Self { program, vertices })
    }

    fn draw(&self, target: &mut RenderTarget<'_>) {
        let mut pass = target.begin_load_pass("background triangle");
        self.program.bind(&mut pass);
        pass.set_vertex_buffer(0, self.vertices.slice(..));
        pass.draw(0..VERTICES.len() as u32, 0..1);
    }
}

/// GPU side of the module. Built on the first frame because init has no
/// device; dropped by the cleanup.
#[derive(Default)]
enum Slot {
    #[default]
    Pending,
    Ready(Triangle),
    /// Build failed for this surface format; not retried until it changes.
    Failed(wgpu::TextureFormat),
}

impl Slot {
    fn ensure(&mut self, ctx: &RenderCtx<'_>) -> Option<&Triangle> {
        let stale = match self {
            Slot::Pending => true,
            Slot::Ready(t) => t.program.target_format() != ctx.surface_format,
            Slot::Failed(format) => *format != ctx.surface_format,
        };

        if stale {
            *self = match Triangle::build(ctx) {
                Ok(t) => {
                    log::debug!("background: triangle ready ({:?})", ctx.surface_format);
                    Slot::Ready(t)
                }
                Err(e) => {
                    log::error!("background: {e}");
                    Slot::Failed(ctx.surface_format)
                }
            };
        }

        match self {
            Slot::Ready(t) => Some(t),
            _ => None,
        }
    }
}

pub fn init(frame: &mut FrameRegistry, _state: &mut State) -> anyhow::Result<()> {
    let slot = Rc::new(RefCell::new(Slot::default()));

    let pass_slot = Rc::clone(&slot);
    frame.add_render_pass(move |ctx, target, _state| {
        if let Some(triangle) = pass_slot.borrow_mut().ensure(ctx) {
            triangle.draw(target);
        }
    });

    frame.add_cleanup(move || {
        if matches!(slot.replace(Slot::Pending), Slot::Ready(_)) {
            log::debug!("background: released triangle");
        }
    });

    Ok(())
}
