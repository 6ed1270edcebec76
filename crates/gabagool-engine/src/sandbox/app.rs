use anyhow::Result;
use winit::event::{ElementState, WindowEvent};
use winit::window::Window;

use crate::core::{App, AppControl, FrameCtx, StartCtx};
use crate::input::platform::{map_modifiers, translate_key_event};
use crate::module::ModuleRegistry;
use crate::ui::UiLayer;
use crate::window::monitor;

use super::lifecycle::{LoopPhase, Sandbox};

type UiSetup = Box<dyn FnOnce(&egui::Context)>;

/// [`App`] that drives a [`Sandbox`] inside the runtime window.
pub struct SandboxApp {
    sandbox: Sandbox,
    ui: Option<UiLayer>,
    ui_setup: Option<UiSetup>,
}

impl SandboxApp {
    pub fn new(modules: ModuleRegistry) -> Self {
        Self {
            sandbox: Sandbox::new(modules),
            ui: None,
            ui_setup: None,
        }
    }

    /// Runs `setup` on the egui context once it exists (fonts, visuals).
    pub fn with_ui_setup(mut self, setup: impl FnOnce(&egui::Context) + 'static) -> Self {
        self.ui_setup = Some(Box::new(setup));
        self
    }
}

impl App for SandboxApp {
    fn on_start(&mut self, ctx: &mut StartCtx<'_, '_>) -> Result<()> {
        let ui = UiLayer::new(ctx.window.window, ctx.gpu);
        if let Some(setup) = self.ui_setup.take() {
            setup(ui.context());
        }
        self.ui = Some(ui);

        self.sandbox.state_mut().set_window_geometry(ctx.window.geometry());

        let report = self.sandbox.init_modules();
        if !report.all_succeeded() {
            log::warn!(
                "{} module(s) failed to initialize: {}",
                report.failed.len(),
                report.failed.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>().join(", ")
            );
        }
        Ok(())
    }

    fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> AppControl {
        let consumed = match self.ui.as_mut() {
            Some(ui) => ui.on_window_event(window, event),
            None => false,
        };
        let typing = self.ui.as_ref().is_some_and(UiLayer::wants_keyboard);
        let state = self.sandbox.state_mut();

        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                // Releases always go through so keys never stick.
                if !(consumed && typing) || event.state == ElementState::Released {
                    state.keys.apply(translate_key_event(event));
                }
            }
            WindowEvent::ModifiersChanged(m) => state.keys.set_modifiers(map_modifiers(m.state())),
            WindowEvent::Focused(false) => state.keys.release_all(),
            WindowEvent::Moved(_) | WindowEvent::Resized(_) => {
                state.set_window_geometry(monitor::window_geometry(window));
            }
            _ => {}
        }

        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Self { sandbox, ui, .. } = self;
        let Some(ui) = ui.as_mut() else {
            return AppControl::Continue;
        };

        sandbox.state_mut().frame = ctx.time.into();
        sandbox.begin_frame();

        let current = ctx.window.geometry();
        if let Some(change) = sandbox.state_mut().take_fullscreen_change(current) {
            log::info!("fullscreen: {:?}", change);
            ctx.window.apply_fullscreen(change);
        }

        let ui_frame = ui.run(ctx.window.window, |egui_ctx| sandbox.run_ui(egui_ctx));

        let clear = sandbox.state().clear();
        if ctx.render(clear, |rctx, target| {
            sandbox.run_render(rctx, target);
            ui.paint(rctx, target, ui_frame);
        }) == AppControl::Exit
        {
            return AppControl::Exit;
        }

        match sandbox.end_frame() {
            LoopPhase::ShuttingDown => AppControl::Exit,
            LoopPhase::Running | LoopPhase::ReloadRequested => AppControl::Continue,
        }
    }

    fn on_exit(&mut self) {
        self.sandbox.shutdown();
    }
}
