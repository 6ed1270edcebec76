//! Fullscreen mode bookkeeping.
//!
//! Kept free of winit so the save/restore rules are testable; the runtime
//! turns a [`FullscreenChange`] into window calls.

use std::fmt;

use super::geometry::WindowGeometry;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum FullscreenMode {
    #[default]
    Windowed,
    /// Exclusive fullscreen using the monitor's video mode.
    Fullscreen,
    /// Undecorated window covering the monitor.
    Borderless,
}

impl fmt::Display for FullscreenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FullscreenMode::Windowed => "windowed",
            FullscreenMode::Fullscreen => "fullscreen",
            FullscreenMode::Borderless => "borderless",
        })
    }
}

/// What the runtime has to do to the window.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FullscreenChange {
    Enter(FullscreenMode),
    /// Leave fullscreen and put the window back where it was.
    Restore(WindowGeometry),
    /// Leave fullscreen without a saved geometry (fullscreen at startup).
    Exit,
}

/// Current fullscreen mode plus the windowed geometry to restore.
#[derive(Debug, Default, Clone)]
pub struct FullscreenController {
    mode: FullscreenMode,
    saved: Option<WindowGeometry>,
}

impl FullscreenController {
    pub fn mode(&self) -> FullscreenMode {
        self.mode
    }

    pub fn saved_geometry(&self) -> Option<WindowGeometry> {
        self.saved
    }

    /// Moves to `target`.
    ///
    /// `current` is the window geometry right now; it is saved when leaving
    /// windowed mode. Switching between the two fullscreen kinds keeps the
    /// geometry saved before the first switch.
    pub fn apply(&mut self, target: FullscreenMode, current: WindowGeometry) -> Option<FullscreenChange> {
        if target == self.mode {
            return None;
        }

        let change = match (self.mode, target) {
            (FullscreenMode::Windowed, mode) => {
                self.saved = Some(current);
                FullscreenChange::Enter(mode)
            }
            (_, FullscreenMode::Windowed) => match self.saved.take() {
                Some(geometry) => FullscreenChange::Restore(geometry),
                None => FullscreenChange::Exit,
            },
            (_, mode) => FullscreenChange::Enter(mode),
        };

        self.mode = target;
        Some(change)
    }

    /// The hotkey behavior: windowed ↔ `mode`. From the other fullscreen kind
    /// it goes back to windowed.
    pub fn toggle(&mut self, mode: FullscreenMode, current: WindowGeometry) -> Option<FullscreenChange> {
        let target = if self.mode == FullscreenMode::Windowed {
            mode
        } else {
            FullscreenMode::Windowed
        };
        self.apply(target, current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: WindowGeometry = WindowGeometry::new(120, 80, 800, 600);
    const SCREEN: WindowGeometry = WindowGeometry::new(0, 0, 1920, 1080);

    #[test]
    fn double_toggle_restores_original_geometry() {
        let mut fs = FullscreenController::default();

        let first = fs.toggle(FullscreenMode::Borderless, START);
        assert_eq!(first, Some(FullscreenChange::Enter(FullscreenMode::Borderless)));
        assert_eq!(fs.saved_geometry(), Some(START));

        // While fullscreen the window reports the monitor rect.
        let second = fs.toggle(FullscreenMode::Borderless, SCREEN);
        assert_eq!(second, Some(FullscreenChange::Restore(START)));
        assert_eq!(fs.mode(), FullscreenMode::Windowed);
        assert_eq!(fs.saved_geometry(), None);
    }

    #[test]
    fn switching_fullscreen_kinds_keeps_first_saved_geometry() {
        let mut fs = FullscreenController::default();
        fs.apply(FullscreenMode::Fullscreen, START);
        let change = fs.apply(FullscreenMode::Borderless, SCREEN);

        assert_eq!(change, Some(FullscreenChange::Enter(FullscreenMode::Borderless)));
        assert_eq!(fs.saved_geometry(), Some(START));
        assert_eq!(
            fs.apply(FullscreenMode::Windowed, SCREEN),
            Some(FullscreenChange::Restore(START))
        );
    }

    #[test]
    fn applying_current_mode_is_a_no_op() {
        let mut fs = FullscreenController::default();
        assert_eq!(fs.apply(FullscreenMode::Windowed, START), None);

        fs.apply(FullscreenMode::Borderless, START);
        assert_eq!(fs.apply(FullscreenMode::Borderless, SCREEN), None);
        assert_eq!(fs.saved_geometry(), Some(START));
    }

    #[test]
    fn toggle_from_other_fullscreen_kind_goes_windowed() {
        let mut fs = FullscreenController::default();
        fs.apply(FullscreenMode::Fullscreen, START);
        assert_eq!(
            fs.toggle(FullscreenMode::Borderless, SCREEN),
            Some(FullscreenChange::Restore(START))
        );
    }
}
