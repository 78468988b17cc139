//! Keyboard input accumulation
//!
//! Key events are queued by the platform layer and drained once per frame.
//! The accumulator keeps the set of currently held arrow keys and turns it
//! into a paddle velocity.

use std::collections::HashSet;

use glam::IVec2;

/// Directional keys the demo reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Map a browser `KeyboardEvent.key` name to a direction
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" | "Up" => Some(Direction::Up),
            "ArrowDown" | "Down" => Some(Direction::Down),
            "ArrowLeft" | "Left" => Some(Direction::Left),
            "ArrowRight" | "Right" => Some(Direction::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// A single press or release of a directional key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Direction,
    pub state: KeyState,
}

impl KeyEvent {
    pub const fn pressed(key: Direction) -> Self {
        Self {
            key,
            state: KeyState::Pressed,
        }
    }

    pub const fn released(key: Direction) -> Self {
        Self {
            key,
            state: KeyState::Released,
        }
    }
}

/// Set of currently held directional keys
#[derive(Debug, Clone, Default)]
pub struct InputAccumulator {
    held: HashSet<Direction>,
}

impl InputAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event. Presses and releases are idempotent.
    pub fn apply(&mut self, event: KeyEvent) {
        match event.state {
            KeyState::Pressed => {
                self.held.insert(event.key);
            }
            KeyState::Released => {
                self.held.remove(&event.key);
            }
        }
    }

    /// Apply every event queued since the last frame
    pub fn drain<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = KeyEvent>,
    {
        for event in events {
            self.apply(event);
        }
    }

    /// Forget all held keys (window lost focus, releases will never arrive)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, key: Direction) -> bool {
        self.held.contains(&key)
    }

    pub fn is_idle(&self) -> bool {
        self.held.is_empty()
    }

    /// Raw directional intent on both axes. Right beats Left, Down beats Up.
    pub fn intent(&self, speed: i32) -> IVec2 {
        let mut v = IVec2::ZERO;
        if self.is_held(Direction::Left) {
            v.x = -speed;
        }
        if self.is_held(Direction::Right) {
            v.x = speed;
        }
        if self.is_held(Direction::Up) {
            v.y = -speed;
        }
        if self.is_held(Direction::Down) {
            v.y = speed;
        }
        v
    }

    /// Paddle velocity for this frame
    pub fn paddle_velocity(&self, speed: i32) -> IVec2 {
        // The paddle only moves horizontally. Up/Down are tracked in `intent`
        // but never reach the paddle; enabling them is a gameplay change.
        let v = IVec2::new(self.intent(speed).x, 0);
        normalize_diagonal(v)
    }
}

/// Keep diagonal speed equal to axial speed.
///
/// When both components are nonzero each is divided by √2 and truncated
/// toward zero, so `(5, 5)` becomes `(3, 3)`.
pub fn normalize_diagonal(v: IVec2) -> IVec2 {
    if v.x != 0 && v.y != 0 {
        let s = std::f64::consts::SQRT_2;
        IVec2::new((v.x as f64 / s) as i32, (v.y as f64 / s) as i32)
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(Direction::from_key_name("ArrowLeft"), Some(Direction::Left));
        assert_eq!(Direction::from_key_name("Right"), Some(Direction::Right));
        assert_eq!(Direction::from_key_name("ArrowUp"), Some(Direction::Up));
        assert_eq!(Direction::from_key_name("a"), None);
        assert_eq!(Direction::from_key_name(" "), None);
    }

    #[test]
    fn test_press_and_release() {
        let mut input = InputAccumulator::new();
        input.apply(KeyEvent::pressed(Direction::Left));
        assert_eq!(input.paddle_velocity(5), IVec2::new(-5, 0));

        input.apply(KeyEvent::released(Direction::Left));
        assert_eq!(input.paddle_velocity(5), IVec2::ZERO);
        assert!(input.is_idle());
    }

    #[test]
    fn test_repeated_press_does_not_desync() {
        // Two presses then one release must leave the key up
        let mut input = InputAccumulator::new();
        input.drain([
            KeyEvent::pressed(Direction::Right),
            KeyEvent::pressed(Direction::Right),
            KeyEvent::released(Direction::Right),
        ]);
        assert!(!input.is_held(Direction::Right));

        // A stray release of an unheld key is a no-op
        input.apply(KeyEvent::released(Direction::Left));
        assert!(!input.is_held(Direction::Left));
    }

    #[test]
    fn test_right_wins_over_left() {
        let mut input = InputAccumulator::new();
        input.drain([
            KeyEvent::pressed(Direction::Right),
            KeyEvent::pressed(Direction::Left),
        ]);
        assert_eq!(input.paddle_velocity(5), IVec2::new(5, 0));
    }

    #[test]
    fn test_vertical_keys_never_move_paddle() {
        let mut input = InputAccumulator::new();
        input.drain([
            KeyEvent::pressed(Direction::Up),
            KeyEvent::pressed(Direction::Left),
        ]);
        assert_eq!(input.intent(5), IVec2::new(-5, -5));
        // Only the horizontal part is applied, so no diagonal scaling either
        assert_eq!(input.paddle_velocity(5), IVec2::new(-5, 0));

        input.apply(KeyEvent::released(Direction::Left));
        input.apply(KeyEvent::pressed(Direction::Down));
        assert_eq!(input.paddle_velocity(5), IVec2::ZERO);
    }

    #[test]
    fn test_normalize_diagonal() {
        assert_eq!(normalize_diagonal(IVec2::new(5, 5)), IVec2::new(3, 3));
        assert_eq!(normalize_diagonal(IVec2::new(-5, 5)), IVec2::new(-3, 3));
        assert_eq!(normalize_diagonal(IVec2::new(5, -5)), IVec2::new(3, -3));
        assert_eq!(normalize_diagonal(IVec2::new(5, 0)), IVec2::new(5, 0));
        assert_eq!(normalize_diagonal(IVec2::ZERO), IVec2::ZERO);
    }

    #[test]
    fn test_normalize_matches_raw_over_sqrt2() {
        for raw in [-100, -7, -5, 1, 5, 14, 100] {
            let v = normalize_diagonal(IVec2::new(raw, raw));
            let expected = (raw as f64 / std::f64::consts::SQRT_2) as i32;
            assert_eq!(v, IVec2::new(expected, expected));
        }
    }

    #[test]
    fn test_release_all() {
        let mut input = InputAccumulator::new();
        input.drain([
            KeyEvent::pressed(Direction::Right),
            KeyEvent::pressed(Direction::Up),
        ]);
        input.release_all();
        assert!(input.is_idle());
        assert_eq!(input.intent(5), IVec2::ZERO);
    }
}
