//! Direction sign tracking.
//!
//! Each axis of a kinetic model has a sign in {-1, 0, 1} telling which of its two opposing
//! directions drives the motion. The newest press always wins, and releasing it falls back
//! to the opposite direction if that one is still held.
use rmk_pointer_types::mouse_action::MouseAction;

use crate::state::MouseActionStates;

/// The four actions that drive a kinetic model.
///
/// `up` and `left` map to a negative sign, `down` and `right` to a positive one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisDirections {
    pub up: MouseAction,
    pub down: MouseAction,
    pub left: MouseAction,
    pub right: MouseAction,
}

impl AxisDirections {
    pub const MOVE: Self = Self {
        up: MouseAction::MoveUp,
        down: MouseAction::MoveDown,
        left: MouseAction::MoveLeft,
        right: MouseAction::MoveRight,
    };

    /// Wheel reports count upwards, so scrolling up is the positive vertical direction
    pub const SCROLL: Self = Self {
        up: MouseAction::ScrollDown,
        down: MouseAction::ScrollUp,
        left: MouseAction::ScrollLeft,
        right: MouseAction::ScrollRight,
    };

    pub fn any_active(&self, states: &MouseActionStates) -> bool {
        states.is_active(self.up) || states.is_active(self.down) || states.is_active(self.left) || states.is_active(self.right)
    }

    /// Whether any of the directions is held by more than one key
    pub fn any_double_pressed(&self, states: &MouseActionStates) -> bool {
        states.count(self.up) > 1 || states.count(self.down) > 1 || states.count(self.left) > 1 || states.count(self.right) > 1
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirectionSigns {
    pub horizontal: i8,
    pub vertical: i8,
}

impl DirectionSigns {
    /// Give a just pressed direction precedence on its axis.
    ///
    /// Returns false if the action doesn't belong to `directions`.
    pub fn activate(&mut self, directions: &AxisDirections, action: MouseAction) -> bool {
        if action == directions.up {
            self.vertical = -1;
        } else if action == directions.down {
            self.vertical = 1;
        } else if action == directions.left {
            self.horizontal = -1;
        } else if action == directions.right {
            self.horizontal = 1;
        } else {
            return false;
        }
        true
    }

    /// Re-evaluate both signs after releases.
    ///
    /// A sign whose direction is no longer held flips to the opposite direction if that one is
    /// held, otherwise it becomes 0.
    pub fn update(&mut self, directions: &AxisDirections, states: &MouseActionStates) {
        update_one(&mut self.horizontal, -1, directions.left, directions.right, states);
        update_one(&mut self.horizontal, 1, directions.right, directions.left, states);
        update_one(&mut self.vertical, -1, directions.up, directions.down, states);
        update_one(&mut self.vertical, 1, directions.down, directions.up, states);
    }

    pub fn is_diagonal(&self) -> bool {
        self.horizontal != 0 && self.vertical != 0
    }
}

fn update_one(sign: &mut i8, expected: i8, released: MouseAction, other: MouseAction, states: &MouseActionStates) {
    if *sign == expected && !states.is_active(released) {
        *sign = if states.is_active(other) { -expected } else { 0 };
    }
}
