//! Keyboard latch
//!
//! The host forwards raw key events; the engine reads them once per frame.
//! Two read modes:
//! - `is_pressed`: level-triggered, true every frame the key is held
//! - `consume_key`: edge-triggered, true once per press-and-release cycle

const KEY_COUNT: usize = 8;

/// Logical keys the engine listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Fire,
    Confirm,
    /// Toggle fast-fire mode
    FastFire,
    /// Clear the swarm
    Nuke,
}

impl Key {
    pub const ALL: [Key; KEY_COUNT] = [
        Key::Left,
        Key::Right,
        Key::Up,
        Key::Down,
        Key::Fire,
        Key::Confirm,
        Key::FastFire,
        Key::Nuke,
    ];

    /// Map a DOM `KeyboardEvent.key` value to a logical key
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => return Some(Key::Left),
            "ArrowRight" => return Some(Key::Right),
            "ArrowUp" => return Some(Key::Up),
            "ArrowDown" => return Some(Key::Down),
            " " | "Spacebar" => return Some(Key::Fire),
            "Enter" => return Some(Key::Confirm),
            _ => {}
        }
        match key.to_ascii_lowercase().as_str() {
            "a" => Some(Key::Left),
            "d" => Some(Key::Right),
            "w" => Some(Key::Up),
            "s" => Some(Key::Down),
            "f" => Some(Key::FastFire),
            "n" => Some(Key::Nuke),
            _ => None,
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Held and just-pressed state for every logical key
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    held: [bool; KEY_COUNT],
    pressed: [bool; KEY_COUNT],
    /// Held across a `clear_keys`; ignored until the next key-up
    suppressed: [bool; KEY_COUNT],
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down. Returns true if the key is whitelisted, in which
    /// case the host should suppress the default browser action.
    pub fn on_key_down(&mut self, key: &str) -> bool {
        let Some(key) = Key::from_dom_key(key) else {
            return false;
        };
        self.press(key);
        true
    }

    /// Record a key-up. Same return contract as `on_key_down`.
    pub fn on_key_up(&mut self, key: &str) -> bool {
        let Some(key) = Key::from_dom_key(key) else {
            return false;
        };
        self.release(key);
        true
    }

    pub fn press(&mut self, key: Key) {
        let i = key.index();
        if self.suppressed[i] {
            return;
        }
        // Auto-repeat keydowns must not re-arm the edge flag
        if !self.held[i] {
            self.pressed[i] = true;
        }
        self.held[i] = true;
    }

    pub fn release(&mut self, key: Key) {
        let i = key.index();
        self.held[i] = false;
        self.suppressed[i] = false;
    }

    #[inline]
    pub fn is_pressed(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    /// True once per physical press; clears the flag on read
    pub fn consume_key(&mut self, key: Key) -> bool {
        std::mem::take(&mut self.pressed[key.index()])
    }

    /// Drop pending presses on a screen change. Keys still held stay dead
    /// until released, so auto-repeat cannot fake a fresh press.
    pub fn clear_keys(&mut self) {
        for i in 0..KEY_COUNT {
            self.suppressed[i] |= self.held[i];
        }
        self.held = [false; KEY_COUNT];
        self.pressed = [false; KEY_COUNT];
    }

    /// Forget everything, suppression included (key-ups were lost)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitelist() {
        let mut input = InputLatch::new();
        assert!(input.on_key_down("ArrowLeft"));
        assert!(input.on_key_down("F"));
        assert!(!input.on_key_down("Tab"));
        assert!(!input.on_key_up("Escape"));
        assert!(input.is_pressed(Key::Left));
        assert!(input.is_pressed(Key::FastFire));
    }

    #[test]
    fn test_level_triggered() {
        let mut input = InputLatch::new();
        input.on_key_down(" ");
        for _ in 0..3 {
            assert!(input.is_pressed(Key::Fire));
        }
        input.on_key_up(" ");
        assert!(!input.is_pressed(Key::Fire));
    }

    #[test]
    fn test_edge_triggered_once_per_press() {
        let mut input = InputLatch::new();
        input.on_key_down("ArrowDown");
        assert!(input.consume_key(Key::Down));
        assert!(!input.consume_key(Key::Down));

        // Auto-repeat while held does not re-arm
        input.on_key_down("ArrowDown");
        assert!(!input.consume_key(Key::Down));

        input.on_key_up("ArrowDown");
        input.on_key_down("ArrowDown");
        assert!(input.consume_key(Key::Down));
    }

    #[test]
    fn test_tap_between_frames_still_registers() {
        let mut input = InputLatch::new();
        input.on_key_down("Enter");
        input.on_key_up("Enter");
        assert!(!input.is_pressed(Key::Confirm));
        assert!(input.consume_key(Key::Confirm));
    }

    #[test]
    fn test_clear_keys() {
        let mut input = InputLatch::new();
        input.on_key_down("n");
        input.on_key_down("ArrowRight");
        input.clear_keys();
        assert!(!input.is_pressed(Key::Right));
        assert!(!input.consume_key(Key::Nuke));
    }

    #[test]
    fn test_held_key_stays_dead_after_clear_until_released() {
        let mut input = InputLatch::new();
        input.on_key_down(" ");
        input.clear_keys();

        // Browser auto-repeat for the same physical press
        input.on_key_down(" ");
        assert!(!input.is_pressed(Key::Fire));
        assert!(!input.consume_key(Key::Fire));

        input.on_key_up(" ");
        input.on_key_down(" ");
        assert!(input.is_pressed(Key::Fire));
        assert!(input.consume_key(Key::Fire));
    }

    #[test]
    fn test_reset_forgets_suppression() {
        let mut input = InputLatch::new();
        input.on_key_down("ArrowLeft");
        input.clear_keys();
        input.reset();
        input.on_key_down("ArrowLeft");
        assert!(input.is_pressed(Key::Left));
    }
}
