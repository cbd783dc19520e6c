//! Input model
//!
//! Directional keys are polled as held state; everything else arrives as a
//! discrete event drained once per tick.

use std::collections::VecDeque;

use glam::Vec2;

/// One of the four movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Which movement keys are currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldKeys {
    pub fn is_held(&self, dir: Direction) -> bool {
        match dir {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn set(&mut self, dir: Direction, held: bool) {
        match dir {
            Direction::Up => self.up = held,
            Direction::Down => self.down = held,
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }

    /// Per-tick displacement for the held keys.
    ///
    /// Each key contributes `step` on its own axis and contributions simply
    /// add up, so diagonals cover more ground than a single axis.
    pub fn movement(&self, step: f32) -> Vec2 {
        let mut delta = Vec2::ZERO;
        if self.up {
            delta.y -= step;
        }
        if self.down {
            delta.y += step;
        }
        if self.left {
            delta.x -= step;
        }
        if self.right {
            delta.x += step;
        }
        delta
    }
}

/// Discrete input/window events
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Window close or equivalent
    Quit,
    /// Pointer moved to a playfield position
    PointerMoved(Vec2),
    /// Primary (left) button went down
    PrimaryPressed,
}

/// Source of held-key state and queued events for the game loop
pub trait InputSource {
    /// Current held movement keys
    fn held(&self) -> HeldKeys;

    /// Take every event queued since the last call, oldest first
    fn drain_events(&mut self) -> Vec<InputEvent>;
}

/// In-memory input buffer
///
/// The window layer writes into it as OS events arrive; the game loop drains
/// it at the start of each tick.
#[derive(Debug, Default)]
pub struct QueuedInput {
    held: HeldKeys,
    events: VecDeque<InputEvent>,
}

impl QueuedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, dir: Direction) {
        self.held.set(dir, true);
    }

    pub fn release(&mut self, dir: Direction) {
        self.held.set(dir, false);
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    /// Number of events waiting to be drained
    pub fn pending(&self) -> usize {
        self.events.len()
    }
}

impl InputSource for QueuedInput {
    fn held(&self) -> HeldKeys {
        self.held
    }

    fn drain_events(&mut self) -> Vec<InputEvent> {
        self.events.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_single_axis() {
        let keys = HeldKeys {
            up: true,
            ..Default::default()
        };
        assert_eq!(keys.movement(2.0), Vec2::new(0.0, -2.0));
    }

    #[test]
    fn test_movement_diagonal_not_normalized() {
        let keys = HeldKeys {
            down: true,
            right: true,
            ..Default::default()
        };
        let delta = keys.movement(2.0);
        assert_eq!(delta, Vec2::new(2.0, 2.0));
        assert!(delta.length() > 2.0);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let keys = HeldKeys {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(keys.movement(2.0), Vec2::ZERO);
    }

    #[test]
    fn test_queued_input_drains_in_order() {
        let mut input = QueuedInput::new();
        input.push(InputEvent::PointerMoved(Vec2::new(1.0, 2.0)));
        input.push(InputEvent::PrimaryPressed);
        input.press(Direction::Left);

        assert_eq!(input.pending(), 2);
        assert_eq!(
            input.drain_events(),
            vec![
                InputEvent::PointerMoved(Vec2::new(1.0, 2.0)),
                InputEvent::PrimaryPressed
            ]
        );
        assert_eq!(input.pending(), 0);
        assert!(input.held().is_held(Direction::Left));

        input.release(Direction::Left);
        assert!(!input.held().is_held(Direction::Left));
    }
}
