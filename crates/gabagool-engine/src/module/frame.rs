use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::render::{RenderCtx, RenderTarget};
use crate::state::State;

/// Draws into the frame after it was cleared, in registration order.
pub type RenderPass = Box<dyn FnMut(&RenderCtx<'_>, &mut RenderTarget<'_>, &State)>;

/// Builds egui windows/areas for the frame.
pub type UiPanel = Box<dyn FnMut(&egui::Context, &mut State)>;

/// Releases whatever a module acquired. Runs at most once.
pub type Cleanup = Box<dyn FnOnce()>;

/// Lengths of the three lists at one point in time. See
/// [`FrameRegistry::mark`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct FrameMark {
    render_passes: usize,
    ui_panels: usize,
    cleanups: usize,
}

impl FrameMark {
    pub fn render_passes(&self) -> usize {
        self.render_passes
    }

    pub fn ui_panels(&self) -> usize {
        self.ui_panels
    }

    pub fn cleanups(&self) -> usize {
        self.cleanups
    }
}

/// Per-run contributions of every module.
///
/// Three ordered lists; callbacks run in the order they were added. There is
/// no single-item removal: lists are cleared wholesale on reload and dropped on
/// shutdown.
#[derive(Default)]
pub struct FrameRegistry {
    render_passes: Vec<RenderPass>,
    ui_panels: Vec<UiPanel>,
    cleanups: Vec<Cleanup>,
}

impl FrameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_render_pass<F>(&mut self, pass: F)
    where
        F: FnMut(&RenderCtx<'_>, &mut RenderTarget<'_>, &State) + 'static,
    {
        self.render_passes.push(Box::new(pass));
    }

    pub fn add_ui_panel<F>(&mut self, panel: F)
    where
        F: FnMut(&egui::Context, &mut State) + 'static,
    {
        self.ui_panels.push(Box::new(panel));
    }

    pub fn add_cleanup<F>(&mut self, cleanup: F)
    where
        F: FnOnce() + 'static,
    {
        self.cleanups.push(Box::new(cleanup));
    }

    pub fn render_pass_count(&self) -> usize {
        self.render_passes.len()
    }

    pub fn ui_panel_count(&self) -> usize {
        self.ui_panels.len()
    }

    pub fn cleanup_count(&self) -> usize {
        self.cleanups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.render_passes.is_empty() && self.ui_panels.is_empty() && self.cleanups.is_empty()
    }

    pub fn run_ui_panels(&mut self, ctx: &egui::Context, state: &mut State) {
        for panel in &mut self.ui_panels {
            panel(ctx, state);
        }
    }

    pub fn run_render_passes(&mut self, rctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, state: &State) {
        for pass in &mut self.render_passes {
            pass(rctx, target, state);
        }
    }

    /// Drains and runs every cleanup in registration order.
    ///
    /// A panicking cleanup is logged and the rest still run. The list is
    /// empty afterwards, so a second call does nothing. Returns how many
    /// cleanups completed without panicking.
    pub fn run_cleanups(&mut self) -> usize {
        let cleanups = std::mem::take(&mut self.cleanups);
        let mut completed = 0;
        for (i, cleanup) in cleanups.into_iter().enumerate() {
            match panic::catch_unwind(AssertUnwindSafe(cleanup)) {
                Ok(()) => completed += 1,
                Err(payload) => {
                    log::error!("cleanup #{i} panicked: {}", panic_message(payload.as_ref()));
                }
            }
        }
        completed
    }

    pub fn mark(&self) -> FrameMark {
        FrameMark {
            render_passes: self.render_passes.len(),
            ui_panels: self.ui_panels.len(),
            cleanups: self.cleanups.len(),
        }
    }

    /// Removes everything added after `mark` and returns it, leaving `self`
    /// as it was when the mark was taken.
    pub(crate) fn split_off(&mut self, mark: FrameMark) -> FrameRegistry {
        FrameRegistry {
            render_passes: self.render_passes.split_off(mark.render_passes.min(self.render_passes.len())),
            ui_panels: self.ui_panels.split_off(mark.ui_panels.min(self.ui_panels.len())),
            cleanups: self.cleanups.split_off(mark.cleanups.min(self.cleanups.len())),
        }
    }

    /// Drops every callback. Cleanups that have not run are dropped unrun;
    /// call [`run_cleanups`](Self::run_cleanups) first.
    pub fn clear(&mut self) {
        self.render_passes.clear();
        self.ui_panels.clear();
        self.cleanups.clear();
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic payload"
    }
}

impl std::fmt::Debug for FrameRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameRegistry")
            .field("render_passes", &self.render_passes.len())
            .field("ui_panels", &self.ui_panels.len())
            .field("cleanups", &self.cleanups.len())
            .finish()
    }
}
