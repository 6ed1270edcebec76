use std::collections::{HashMap, HashSet};

use super::types::{Key, KeyEvent, KeyState, Modifiers};

/// Polled keyboard state with a one-frame history.
///
/// `current` is updated as events arrive; `previous` is the snapshot taken by
/// [`KeyMap::end_frame`]. A key is "pressed" in a frame only on the
/// released → down transition, however long it is held afterwards.
///
/// Transitions are latched until `end_frame`, so a tap whose press and
/// release both arrive within one frame still reports `pressed` and
/// `released` for that frame.
#[derive(Debug, Default, Clone)]
pub struct KeyMap {
    current: HashMap<Key, bool>,
    previous: HashMap<Key, bool>,
    went_down: HashSet<Key>,
    went_up: HashSet<Key>,
    modifiers: Modifiers,
}

impl KeyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a key transition. Auto-repeat events leave the map unchanged.
    pub fn apply(&mut self, event: KeyEvent) {
        if event.repeat {
            return;
        }
        let down = event.state == KeyState::Pressed;
        let was = self.is_down(event.key);
        if down && !was {
            self.went_down.insert(event.key);
        } else if !down && was {
            self.went_up.insert(event.key);
        }
        self.current.insert(event.key, down);
    }

    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// True while the key is held.
    pub fn is_down(&self, key: Key) -> bool {
        self.current.get(&key).copied().unwrap_or(false)
    }

    /// True if the key was held when the previous frame ended.
    pub fn was_down(&self, key: Key) -> bool {
        self.previous.get(&key).copied().unwrap_or(false)
    }

    /// True only in the frame the key went down.
    pub fn pressed(&self, key: Key) -> bool {
        self.went_down.contains(&key)
    }

    /// True only in the frame the key came up.
    pub fn released(&self, key: Key) -> bool {
        self.went_up.contains(&key)
    }

    /// Keys currently held, sorted for stable output.
    pub fn held(&self) -> Vec<Key> {
        let mut keys: Vec<Key> = self
            .current
            .iter()
            .filter_map(|(k, down)| down.then_some(*k))
            .collect();
        keys.sort();
        keys
    }

    /// Snapshots the current state as the previous frame.
    pub fn end_frame(&mut self) {
        self.previous.clone_from(&self.current);
        self.went_down.clear();
        self.went_up.clear();
    }

    /// Marks every key released. Used on focus loss so keys do not stick.
    pub fn release_all(&mut self) {
        for (key, down) in self.current.iter_mut() {
            if *down {
                self.went_up.insert(*key);
            }
            *down = false;
        }
        self.modifiers = Modifiers::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: Key) -> KeyEvent {
        KeyEvent { key, state: KeyState::Pressed, repeat: false }
    }

    fn release(key: Key) -> KeyEvent {
        KeyEvent { key, state: KeyState::Released, repeat: false }
    }

    #[test]
    fn held_key_is_pressed_once() {
        let mut keys = KeyMap::new();

        // frame K
        keys.apply(press(Key::F11));
        assert!(keys.pressed(Key::F11));
        keys.end_frame();

        // frame K+1, still held (OS repeat)
        keys.apply(KeyEvent { key: Key::F11, state: KeyState::Pressed, repeat: true });
        assert!(keys.is_down(Key::F11));
        assert!(!keys.pressed(Key::F11));
        keys.end_frame();

        // frame K+2, no events
        assert!(!keys.pressed(Key::F11));
    }

    #[test]
    fn release_is_reported_once() {
        let mut keys = KeyMap::new();
        keys.apply(press(Key::A));
        keys.end_frame();

        keys.apply(release(Key::A));
        assert!(keys.released(Key::A));
        assert!(!keys.pressed(Key::A));
        keys.end_frame();

        assert!(!keys.released(Key::A));
    }

    #[test]
    fn tap_within_one_frame_is_still_pressed() {
        let mut keys = KeyMap::new();
        keys.apply(press(Key::Escape));
        keys.apply(release(Key::Escape));
        assert!(!keys.is_down(Key::Escape));
        assert!(keys.pressed(Key::Escape));
        assert!(keys.released(Key::Escape));

        keys.end_frame();
        assert!(!keys.pressed(Key::Escape));
        assert!(!keys.released(Key::Escape));
    }

    #[test]
    fn repeat_does_not_re_press() {
        let mut keys = KeyMap::new();
        keys.apply(KeyEvent { key: Key::F11, state: KeyState::Pressed, repeat: true });
        assert!(!keys.pressed(Key::F11));
        assert!(!keys.is_down(Key::F11));
    }

    #[test]
    fn release_all_clears_held_keys() {
        let mut keys = KeyMap::new();
        keys.apply(press(Key::W));
        keys.apply(press(Key::Shift));
        assert_eq!(keys.held(), vec![Key::Shift, Key::W]);

        keys.release_all();
        assert!(keys.held().is_empty());
    }

    #[test]
    fn unknown_keys_never_pressed() {
        let keys = KeyMap::new();
        assert!(!keys.is_down(Key::Escape));
        assert!(!keys.pressed(Key::Unknown(42)));
    }
}
