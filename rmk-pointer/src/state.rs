//! Activation counters of logical mouse actions.
use rmk_pointer_types::mouse_action::{MOUSE_ACTION_COUNT, MouseAction};
use rmk_pointer_types::mouse_button::MouseButtons;

/// Activation counters of every [`MouseAction`], in two copies.
///
/// Key transitions write the `toggled` copy. The owner of the pointer tick latches `toggled`
/// into `active` at one fixed point before the tick, so a whole tick sees one consistent
/// snapshot.
#[derive(Clone, Debug, Default)]
pub struct MouseActionStates {
    toggled: [u8; MOUSE_ACTION_COUNT],
    active: [u8; MOUSE_ACTION_COUNT],
}

impl MouseActionStates {
    pub const fn new() -> Self {
        Self {
            toggled: [0; MOUSE_ACTION_COUNT],
            active: [0; MOUSE_ACTION_COUNT],
        }
    }

    /// Increment or decrement the toggled counter of an action.
    ///
    /// Activation also bumps the active counter, so an action pressed during this cycle is seen
    /// by the current tick. Counters never go below zero.
    pub fn toggle(&mut self, action: MouseAction, activate: bool) {
        let i = action.index();
        if activate {
            self.toggled[i] = self.toggled[i].saturating_add(1);
            self.active[i] = self.active[i].saturating_add(1);
        } else {
            self.toggled[i] = self.toggled[i].saturating_sub(1);
        }
    }

    /// Copy the toggled counters into the active snapshot
    pub fn latch(&mut self) {
        self.active = self.toggled;
    }

    /// Activation count of an action in the active snapshot
    pub fn count(&self, action: MouseAction) -> u8 {
        self.active[action.index()]
    }

    pub fn is_active(&self, action: MouseAction) -> bool {
        self.count(action) > 0
    }

    pub fn toggled_count(&self, action: MouseAction) -> u8 {
        self.toggled[action.index()]
    }

    /// Buttons held in the active snapshot
    pub fn buttons(&self) -> MouseButtons {
        const CLICKS: [MouseAction; 8] = [
            MouseAction::LeftClick,
            MouseAction::MiddleClick,
            MouseAction::RightClick,
            MouseAction::Button4,
            MouseAction::Button5,
            MouseAction::Button6,
            MouseAction::Button7,
            MouseAction::Button8,
        ];
        let mut buttons = MouseButtons::new();
        for action in CLICKS {
            if self.is_active(action) {
                if let Some(button) = MouseButtons::from_action(action) {
                    buttons |= button;
                }
            }
        }
        buttons
    }
}
