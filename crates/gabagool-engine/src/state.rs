//! Shared sandbox state.
//!
//! One `State` lives for the whole process. It is handed by `&mut` to every
//! module init and every UI panel, and by `&` to render passes. Requests that
//! need the window (close, fullscreen) are buffered here and applied by the
//! runtime after the callbacks return.

use std::fmt;

use crate::input::{Key, KeyMap};
use crate::paint::Color;
use crate::time::FrameTime;
use crate::window::{FullscreenChange, FullscreenController, FullscreenMode, WindowGeometry};

pub const DEFAULT_CLEAR_COLOR: [f32; 4] = [0.01, 0.01, 0.01, 1.0];

/// Key that toggles borderless fullscreen.
pub const FULLSCREEN_HOTKEY: Key = Key::F11;

/// Key that closes the window.
pub const CLOSE_HOTKEY: Key = Key::Escape;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum FullscreenRequest {
    Set(FullscreenMode),
    Toggle(FullscreenMode),
}

/// Per-frame numbers the overlay displays.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FrameStats {
    pub frame_index: u64,
    pub dt: f32,
    pub fps: f32,
}

impl From<FrameTime> for FrameStats {
    fn from(t: FrameTime) -> Self {
        Self {
            frame_index: t.frame_index,
            dt: t.dt,
            fps: t.fps,
        }
    }
}

#[derive(Debug, Clone)]
pub struct State {
    /// Straight-alpha RGBA clear color.
    pub clear_color: [f32; 4],
    pub display_debug: bool,
    /// Set by UI to tear down and re-run every module after this frame.
    pub queue_reload: bool,
    pub keys: KeyMap,
    pub frame: FrameStats,

    fullscreen: FullscreenController,
    fullscreen_request: Option<FullscreenRequest>,
    close_requested: bool,
    window_geometry: WindowGeometry,
}

impl Default for State {
    fn default() -> Self {
        Self {
            clear_color: DEFAULT_CLEAR_COLOR,
            display_debug: false,
            queue_reload: false,
            keys: KeyMap::default(),
            frame: FrameStats::default(),
            fullscreen: FullscreenController::default(),
            fullscreen_request: None,
            close_requested: false,
            window_geometry: WindowGeometry::default(),
        }
    }
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    /// Premultiplied clear color for the frame.
    pub fn clear(&self) -> Color {
        Color::from_straight_array(self.clear_color)
    }

    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    pub fn fullscreen_mode(&self) -> FullscreenMode {
        self.fullscreen.mode()
    }

    /// Asks for `mode`; applied at the start of the next frame.
    pub fn request_fullscreen(&mut self, mode: FullscreenMode) {
        self.fullscreen_request = Some(FullscreenRequest::Set(mode));
    }

    /// Asks for windowed ↔ `mode`; applied at the start of the next frame.
    pub fn toggle_fullscreen(&mut self, mode: FullscreenMode) {
        self.fullscreen_request = Some(FullscreenRequest::Toggle(mode));
    }

    /// Consumes a pending fullscreen request against the window's current
    /// geometry and returns what the window has to do.
    pub fn take_fullscreen_change(&mut self, current: WindowGeometry) -> Option<FullscreenChange> {
        match self.fullscreen_request.take()? {
            FullscreenRequest::Set(mode) => self.fullscreen.apply(mode, current),
            FullscreenRequest::Toggle(mode) => self.fullscreen.toggle(mode, current),
        }
    }

    pub fn saved_geometry(&self) -> Option<WindowGeometry> {
        self.fullscreen.saved_geometry()
    }

    /// Last geometry reported by the window.
    pub fn window_geometry(&self) -> WindowGeometry {
        self.window_geometry
    }

    pub fn set_window_geometry(&mut self, geometry: WindowGeometry) {
        self.window_geometry = geometry;
    }

    /// Reacts to the built-in hotkeys. Called once per frame after input was
    /// polled.
    pub fn handle_hotkeys(&mut self) {
        if self.keys.pressed(CLOSE_HOTKEY) {
            self.request_close();
        }
        if self.keys.pressed(FULLSCREEN_HOTKEY) {
            self.toggle_fullscreen(FullscreenMode::Borderless);
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.clear_color;
        let geo = self.window_geometry;
        writeln!(f, "clear color: ({r:.3}, {g:.3}, {b:.3}, {a:.3})")?;
        writeln!(f, "window: {}x{} at ({}, {})", geo.width, geo.height, geo.x, geo.y)?;
        writeln!(f, "fullscreen: {}", self.fullscreen.mode())?;
        if let Some(saved) = self.fullscreen.saved_geometry() {
            writeln!(
                f,
                "saved window: {}x{} at ({}, {})",
                saved.width, saved.height, saved.x, saved.y
            )?;
        }
        writeln!(f, "frame: #{} ({:.2} ms)", self.frame.frame_index, self.frame.dt * 1000.0)?;
        writeln!(f, "reload queued: {}", self.queue_reload)?;

        let held = self.keys.held();
        if held.is_empty() {
            write!(f, "keys: -")
        } else {
            let names: Vec<String> = held.iter().map(Key::to_string).collect();
            write!(f, "keys: {}", names.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{KeyEvent, KeyState};

    fn tap(state: &mut State, key: Key) {
        state.keys.apply(KeyEvent { key, state: KeyState::Pressed, repeat: false });
        state.handle_hotkeys();
        state.keys.end_frame();
    }

    #[test]
    fn hotkey_toggle_twice_restores_geometry() {
        let mut state = State::new();
        let original = WindowGeometry::new(40, 60, 800, 600);

        tap(&mut state, FULLSCREEN_HOTKEY);
        let change = state.take_fullscreen_change(original);
        assert_eq!(change, Some(FullscreenChange::Enter(FullscreenMode::Borderless)));
        assert_eq!(state.saved_geometry(), Some(original));

        state.keys.apply(KeyEvent { key: FULLSCREEN_HOTKEY, state: KeyState::Released, repeat: false });
        state.keys.end_frame();
        tap(&mut state, FULLSCREEN_HOTKEY);
        let change = state.take_fullscreen_change(WindowGeometry::new(0, 0, 1920, 1080));
        assert_eq!(change, Some(FullscreenChange::Restore(original)));
        assert_eq!(state.fullscreen_mode(), FullscreenMode::Windowed);
    }

    #[test]
    fn held_hotkey_toggles_once() {
        let mut state = State::new();
        tap(&mut state, FULLSCREEN_HOTKEY);
        assert!(state.take_fullscreen_change(WindowGeometry::default()).is_some());

        // Still held: no new request.
        state.handle_hotkeys();
        assert!(state.take_fullscreen_change(WindowGeometry::default()).is_none());
    }

    #[test]
    fn escape_requests_close() {
        let mut state = State::new();
        assert!(!state.close_requested());
        tap(&mut state, CLOSE_HOTKEY);
        assert!(state.close_requested());
    }

    #[test]
    fn quick_tap_toggles_fullscreen() {
        let mut state = State::new();
        state.keys.apply(KeyEvent { key: FULLSCREEN_HOTKEY, state: KeyState::Pressed, repeat: false });
        state.keys.apply(KeyEvent { key: FULLSCREEN_HOTKEY, state: KeyState::Released, repeat: false });
        state.handle_hotkeys();
        assert_eq!(
            state.take_fullscreen_change(WindowGeometry::default()),
            Some(FullscreenChange::Enter(FullscreenMode::Borderless))
        );
    }

    #[test]
    fn request_is_consumed_once() {
        let mut state = State::new();
        state.request_fullscreen(FullscreenMode::Fullscreen);
        assert!(state.take_fullscreen_change(WindowGeometry::default()).is_some());
        assert!(state.take_fullscreen_change(WindowGeometry::default()).is_none());
    }

    #[test]
    fn debug_dump_lists_held_keys() {
        let mut state = State::new();
        state.keys.apply(KeyEvent { key: Key::W, state: KeyState::Pressed, repeat: false });
        let dump = state.to_string();
        assert!(dump.contains("fullscreen: windowed"));
        assert!(dump.contains("keys: W"));
    }
}
