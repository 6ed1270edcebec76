use anyhow::Result;
use winit::event::WindowEvent;
use winit::window::Window;

use super::ctx::{FrameCtx, StartCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by [`Runtime`](crate::window::Runtime).
pub trait App {
    /// Called once the window and GPU exist, before the first frame. An error
    /// aborts the runtime.
    fn on_start(&mut self, ctx: &mut StartCtx<'_, '_>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Called for every window event, before the runtime handles it.
    fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> AppControl {
        let _ = (window, event);
        AppControl::Continue
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called once when the loop ends, while the GPU device is still alive.
    fn on_exit(&mut self) {}
}
