use postcard::experimental::max_size::MaxSize;
use rmk_pointer_types::mouse_action::MouseAction;
use serde::{Deserialize, Serialize};

/// Press or release of a key bound to a mouse action
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, MaxSize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseActionEvent {
    pub action: MouseAction,
    pub pressed: bool,
}

impl MouseActionEvent {
    pub const fn press(action: MouseAction) -> Self {
        Self { action, pressed: true }
    }

    pub const fn release(action: MouseAction) -> Self {
        Self { action, pressed: false }
    }

    /// Decode a raw action code from the keymap, unknown codes are dropped
    pub fn from_raw(code: u8, pressed: bool) -> Option<Self> {
        match MouseAction::from_repr(code) {
            Some(action) => Some(Self { action, pressed }),
            None => {
                warn!("Unknown mouse action code: {}", code);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_raw_codes() {
        assert_eq!(
            MouseActionEvent::from_raw(3, true),
            Some(MouseActionEvent::press(MouseAction::MoveUp))
        );
        assert_eq!(
            MouseActionEvent::from_raw(17, false),
            Some(MouseActionEvent::release(MouseAction::Button8))
        );
        assert_eq!(MouseActionEvent::from_raw(18, true), None);
    }
}
