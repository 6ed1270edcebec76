use winit::event::WindowEvent;
use winit::window::Window;

use crate::device::Gpu;
use crate::render::{RenderCtx, RenderTarget};

/// Tessellated egui output waiting to be painted.
pub struct UiFrame {
    primitives: Vec<egui::ClippedPrimitive>,
    textures: egui::TexturesDelta,
}

/// egui context plus its winit input adapter and wgpu painter.
pub struct UiLayer {
    ctx: egui::Context,
    input: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

impl UiLayer {
    pub fn new(window: &Window, gpu: &Gpu<'_>) -> Self {
        let ctx = egui::Context::default();
        let input = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let renderer = egui_wgpu::Renderer::new(
            gpu.device(),
            gpu.surface_format(),
            egui_wgpu::RendererOptions::default(),
        );
        log::debug!("ui layer ready (format={:?})", gpu.surface_format());

        Self { ctx, input, renderer }
    }

    pub fn context(&self) -> &egui::Context {
        &self.ctx
    }

    /// Feeds a window event to egui. Returns `true` when egui consumed it.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.input.on_window_event(window, event).consumed
    }

    /// Whether a text field currently has keyboard focus.
    pub fn wants_keyboard(&self) -> bool {
        self.ctx.wants_keyboard_input()
    }

    /// Runs one egui pass with `build` and tessellates the result.
    pub fn run<F>(&mut self, window: &Window, mut build: F) -> UiFrame
    where
        F: FnMut(&egui::Context),
    {
        let raw_input = self.input.take_egui_input(window);
        let output = self.ctx.run(raw_input, |ctx| build(ctx));
        self.input.handle_platform_output(window, output.platform_output);

        UiFrame {
            primitives: self.ctx.tessellate(output.shapes, output.pixels_per_point),
            textures: output.textures_delta,
        }
    }

    /// Paints `frame` over whatever the target already holds.
    pub fn paint(&mut self, rctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, frame: UiFrame) {
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [rctx.size.width, rctx.size.height],
            pixels_per_point: rctx.scale_factor,
        };

        for (id, delta) in &frame.textures.set {
            self.renderer.update_texture(rctx.device, rctx.queue, *id, delta);
        }

        // No paint callbacks are registered, so there are no extra command
        // buffers to submit.
        let _ = self.renderer.update_buffers(
            rctx.device,
            rctx.queue,
            &mut *target.encoder,
            &frame.primitives,
            &screen,
        );

        {
            let pass = target.begin_load_pass("gabagool ui");
            // egui-wgpu wants a RenderPass<'static>.
            let mut pass = pass.forget_lifetime();
            self.renderer.render(&mut pass, &frame.primitives, &screen);
        }

        for id in &frame.textures.free {
            self.renderer.free_texture(id);
        }
    }
}
