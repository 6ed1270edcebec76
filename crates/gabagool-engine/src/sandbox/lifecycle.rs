use std::fmt;

use crate::module::{FrameRegistry, InitReport, ModuleRegistry};
use crate::render::{RenderCtx, RenderTarget};
use crate::state::State;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopPhase {
    Running,
    ReloadRequested,
    ShuttingDown,
}

impl fmt::Display for LoopPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LoopPhase::Running => "running",
            LoopPhase::ReloadRequested => "reload requested",
            LoopPhase::ShuttingDown => "shutting down",
        })
    }
}

/// Module lifecycle and per-frame orchestration, independent of the window.
///
/// Frame order: [`begin_frame`](Self::begin_frame), [`run_ui`](Self::run_ui),
/// [`run_render`](Self::run_render), present, then
/// [`end_frame`](Self::end_frame), which snapshots keys and performs a queued
/// reload.
pub struct Sandbox {
    modules: ModuleRegistry,
    frame: FrameRegistry,
    state: State,
    phase: LoopPhase,
    reloads: u32,
}

impl Sandbox {
    pub fn new(modules: ModuleRegistry) -> Self {
        Self::with_state(modules, State::new())
    }

    pub fn with_state(modules: ModuleRegistry, state: State) -> Self {
        Self {
            modules,
            frame: FrameRegistry::new(),
            state,
            phase: LoopPhase::Running,
            reloads: 0,
        }
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    pub fn frame(&self) -> &FrameRegistry {
        &self.frame
    }

    pub fn modules(&self) -> &ModuleRegistry {
        &self.modules
    }

    /// Completed reloads since start.
    pub fn reloads(&self) -> u32 {
        self.reloads
    }

    /// First module pass. Call once before the first frame.
    pub fn init_modules(&mut self) -> InitReport {
        self.modules.run_all(&mut self.frame, &mut self.state)
    }

    /// Reacts to hotkeys and to close requests made since the last frame.
    pub fn begin_frame(&mut self) {
        self.state.handle_hotkeys();
        if self.state.close_requested() {
            self.phase = LoopPhase::ShuttingDown;
        }
    }

    pub fn run_ui(&mut self, ctx: &egui::Context) {
        self.frame.run_ui_panels(ctx, &mut self.state);
    }

    pub fn run_render(&mut self, rctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        self.frame.run_render_passes(rctx, target, &self.state);
    }

    /// Finishes the frame and returns the phase the loop continues in.
    pub fn end_frame(&mut self) -> LoopPhase {
        self.state.keys.end_frame();

        if self.state.close_requested() {
            self.phase = LoopPhase::ShuttingDown;
        }
        if self.phase == LoopPhase::ShuttingDown {
            return self.phase;
        }

        if self.state.queue_reload {
            self.phase = LoopPhase::ReloadRequested;
            self.reload();
        }
        self.phase
    }

    /// Tears down every module's contributions and runs the modules again.
    pub fn reload(&mut self) -> InitReport {
        log::info!("reloading {} module(s)", self.modules.len());
        self.state.queue_reload = false;

        let released = self.frame.run_cleanups();
        self.frame.clear();
        log::debug!("ran {released} cleanup(s) before reload");

        let report = self.modules.run_all(&mut self.frame, &mut self.state);
        self.reloads += 1;
        if self.phase == LoopPhase::ReloadRequested {
            self.phase = LoopPhase::Running;
        }
        report
    }

    /// Runs outstanding cleanups and drops every callback. Idempotent.
    pub fn shutdown(&mut self) {
        self.phase = LoopPhase::ShuttingDown;
        let released = self.frame.run_cleanups();
        self.frame.clear();
        if released > 0 {
            log::info!("shutdown: ran {released} cleanup(s)");
        }
    }
}

impl Drop for Sandbox {
    fn drop(&mut self) {
        self.shutdown();
    }
}
