//! Keyboard input handling
//!
//! Tracks which keys are held and turns them into a velocity. Event plumbing
//! lives in the platform layer; this module only sees key names.

use std::collections::HashSet;

use glam::Vec2;

/// Logical game keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Reset,
}

impl Key {
    /// Names bound to each key, lowercase (WASD and arrows are equivalent)
    pub fn bindings(&self) -> &'static [&'static str] {
        match self {
            Key::Up => &["w", "arrowup"],
            Key::Down => &["s", "arrowdown"],
            Key::Left => &["a", "arrowleft"],
            Key::Right => &["d", "arrowright"],
            Key::Reset => &["r"],
        }
    }

    /// Map a key name (any case) to a game key
    pub fn from_name(name: &str) -> Option<Key> {
        match name.to_lowercase().as_str() {
            "w" | "arrowup" => Some(Key::Up),
            "s" | "arrowdown" => Some(Key::Down),
            "a" | "arrowleft" => Some(Key::Left),
            "d" | "arrowright" => Some(Key::Right),
            "r" => Some(Key::Reset),
            _ => None,
        }
    }
}

/// What a key press asks the game to do beyond moving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Movement state changed; recompute velocity
    Move,
    /// Put the game back to its initial state
    Reset,
}

/// Held-key state, updated synchronously from key events
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Lowercased names of game keys currently held
    held: HashSet<String>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a key press; `None` for keys the game doesn't use
    pub fn key_down(&mut self, name: &str) -> Option<InputAction> {
        let key = Key::from_name(name)?;
        self.held.insert(name.to_lowercase());
        Some(match key {
            Key::Reset => InputAction::Reset,
            _ => InputAction::Move,
        })
    }

    /// Register a key release; `None` for keys the game doesn't use
    pub fn key_up(&mut self, name: &str) -> Option<InputAction> {
        Key::from_name(name)?;
        self.held.remove(&name.to_lowercase());
        Some(InputAction::Move)
    }

    /// True if any binding of `key` is held
    pub fn is_held(&self, key: Key) -> bool {
        key.bindings().iter().any(|name| self.held.contains(*name))
    }

    /// Forget every held key
    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Velocity for the held keys at `speed` pixels per frame
    ///
    /// Down wins over up and right over left when both are held. Diagonals
    /// are scaled by 1/√2 so they are no faster than straight moves.
    pub fn velocity(&self, speed: f32) -> Vec2 {
        let mut vel = Vec2::ZERO;

        if self.is_held(Key::Up) {
            vel.y = -speed;
        }
        if self.is_held(Key::Down) {
            vel.y = speed;
        }
        if self.is_held(Key::Left) {
            vel.x = -speed;
        }
        if self.is_held(Key::Right) {
            vel.x = speed;
        }

        if vel.x != 0.0 && vel.y != 0.0 {
            vel /= std::f32::consts::SQRT_2;
        }
        vel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PLAYER_SPEED;

    fn held(keys: &[&str]) -> InputState {
        let mut input = InputState::new();
        for key in keys {
            input.key_down(key);
        }
        input
    }

    #[test]
    fn test_no_keys_no_velocity() {
        assert_eq!(InputState::new().velocity(PLAYER_SPEED), Vec2::ZERO);
    }

    #[test]
    fn test_axial_directions() {
        assert_eq!(held(&["w"]).velocity(3.0), Vec2::new(0.0, -3.0));
        assert_eq!(held(&["ArrowDown"]).velocity(3.0), Vec2::new(0.0, 3.0));
        assert_eq!(held(&["a"]).velocity(3.0), Vec2::new(-3.0, 0.0));
        assert_eq!(held(&["ArrowRight"]).velocity(3.0), Vec2::new(3.0, 0.0));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(held(&["W"]).velocity(3.0), held(&["w"]).velocity(3.0));
        assert_eq!(held(&["ARROWLEFT"]).velocity(3.0), Vec2::new(-3.0, 0.0));
    }

    #[test]
    fn test_diagonal_speed_matches_axial_speed() {
        for keys in [["w", "d"], ["arrowup", "arrowleft"], ["s", "a"], ["S", "ArrowRight"]] {
            let vel = held(&keys).velocity(PLAYER_SPEED);
            assert!(vel.x != 0.0 && vel.y != 0.0);
            assert!((vel.length() - PLAYER_SPEED).abs() < 1e-5, "{keys:?}: {vel}");
        }
    }

    #[test]
    fn test_opposite_keys_later_direction_wins() {
        assert_eq!(held(&["w", "s"]).velocity(3.0), Vec2::new(0.0, 3.0));
        assert_eq!(held(&["d", "a"]).velocity(3.0), Vec2::new(3.0, 0.0));
    }

    #[test]
    fn test_release_one_binding_keeps_the_other() {
        let mut input = held(&["w", "ArrowUp"]);
        input.key_up("ArrowUp");
        assert!(input.is_held(Key::Up));
        input.key_up("W");
        assert!(!input.is_held(Key::Up));
        assert_eq!(input.velocity(3.0), Vec2::ZERO);
    }

    #[test]
    fn test_actions() {
        let mut input = InputState::new();
        assert_eq!(input.key_down("d"), Some(InputAction::Move));
        assert_eq!(input.key_down("R"), Some(InputAction::Reset));
        assert_eq!(input.key_down("Shift"), None);
        assert_eq!(input.key_up("x"), None);
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut input = held(&["w", "d"]);
        input.clear();
        assert_eq!(input.velocity(3.0), Vec2::ZERO);
    }
}
