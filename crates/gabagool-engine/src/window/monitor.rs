//! winit side of window placement: geometry queries, monitor choice and
//! fullscreen transitions.

use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::monitor::{MonitorHandle, VideoModeHandle};
use winit::window::{Fullscreen, Window};

use super::fullscreen::{FullscreenChange, FullscreenMode};
use super::geometry::{best_monitor, MonitorRect, WindowGeometry};

/// Outer position and inner size of `window`.
///
/// Platforms without a window position (Wayland) report the origin.
pub fn window_geometry(window: &Window) -> WindowGeometry {
    let pos = window.outer_position().unwrap_or_default();
    let size = window.inner_size();
    WindowGeometry::new(pos.x, pos.y, size.width, size.height)
}

fn monitor_rect(monitor: &MonitorHandle) -> MonitorRect {
    let pos = monitor.position();
    let size = monitor.size();
    MonitorRect::new(pos.x, pos.y, size.width, size.height)
}

/// The monitor the window overlaps the most, else the one winit reports as
/// current.
pub fn current_monitor(window: &Window) -> Option<MonitorHandle> {
    let monitors: Vec<MonitorHandle> = window.available_monitors().collect();
    let rects: Vec<MonitorRect> = monitors.iter().map(monitor_rect).collect();

    best_monitor(&window_geometry(window), &rects)
        .map(|i| monitors[i].clone())
        .or_else(|| window.current_monitor())
}

/// Largest resolution, then highest refresh rate.
fn best_video_mode(monitor: &MonitorHandle) -> Option<VideoModeHandle> {
    monitor.video_modes().max_by_key(|mode| {
        let size = mode.size();
        (
            size.width as u64 * size.height as u64,
            mode.refresh_rate_millihertz(),
        )
    })
}

pub fn apply_fullscreen(window: &Window, change: FullscreenChange) {
    match change {
        FullscreenChange::Enter(FullscreenMode::Borderless) => {
            let monitor = current_monitor(window);
            log::info!(
                "entering borderless fullscreen on {}",
                monitor.as_ref().and_then(|m| m.name()).unwrap_or_else(|| "<unknown monitor>".into())
            );
            window.set_fullscreen(Some(Fullscreen::Borderless(monitor)));
        }
        FullscreenChange::Enter(FullscreenMode::Fullscreen) => {
            let mode = current_monitor(window).as_ref().and_then(best_video_mode);
            match mode {
                Some(mode) => {
                    log::info!(
                        "entering fullscreen at {}x{} @ {} mHz",
                        mode.size().width,
                        mode.size().height,
                        mode.refresh_rate_millihertz()
                    );
                    window.set_fullscreen(Some(Fullscreen::Exclusive(mode)));
                }
                None => {
                    log::warn!("no exclusive video mode available; using borderless fullscreen");
                    window.set_fullscreen(Some(Fullscreen::Borderless(None)));
                }
            }
        }
        FullscreenChange::Enter(FullscreenMode::Windowed) | FullscreenChange::Exit => {
            window.set_fullscreen(None);
        }
        FullscreenChange::Restore(geo) => {
            window.set_fullscreen(None);
            window.set_outer_position(PhysicalPosition::new(geo.x, geo.y));
            let _ = window.request_inner_size(PhysicalSize::new(geo.width, geo.height));
            log::info!("restored window to {}x{} at ({}, {})", geo.width, geo.height, geo.x, geo.y);
        }
    }
}
