//! Mouse button bitmask as it appears in the HID mouse report.
use core::ops::{BitOr, BitOrAssign};

use bitfield_struct::bitfield;
use serde::{Deserialize, Serialize};

use crate::mouse_action::MouseAction;

#[bitfield(u8, order = Lsb, defmt = cfg(feature = "defmt"))]
#[derive(Eq, PartialEq, Serialize, Deserialize)]
pub struct MouseButtons {
    #[bits(1)]
    pub left: bool,
    #[bits(1)]
    pub right: bool,
    #[bits(1)]
    pub middle: bool,
    #[bits(1)]
    pub button4: bool,
    #[bits(1)]
    pub button5: bool,
    #[bits(1)]
    pub button6: bool,
    #[bits(1)]
    pub button7: bool,
    #[bits(1)]
    pub button8: bool,
}

impl ::postcard::experimental::max_size::MaxSize for MouseButtons {
    const POSTCARD_MAX_SIZE: usize = 1usize;
}

impl BitOr for MouseButtons {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.into_bits() | rhs.into_bits())
    }
}

impl BitOrAssign for MouseButtons {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

impl MouseButtons {
    pub const LEFT: Self = Self::new().with_left(true);
    pub const RIGHT: Self = Self::new().with_right(true);
    pub const MIDDLE: Self = Self::new().with_middle(true);
    pub const BUTTON4: Self = Self::new().with_button4(true);
    pub const BUTTON5: Self = Self::new().with_button5(true);
    pub const BUTTON6: Self = Self::new().with_button6(true);
    pub const BUTTON7: Self = Self::new().with_button7(true);
    pub const BUTTON8: Self = Self::new().with_button8(true);

    /// The button driven by a click action, `None` for movement and modifier actions
    pub const fn from_action(action: MouseAction) -> Option<Self> {
        match action {
            MouseAction::LeftClick => Some(Self::LEFT),
            MouseAction::MiddleClick => Some(Self::MIDDLE),
            MouseAction::RightClick => Some(Self::RIGHT),
            MouseAction::Button4 => Some(Self::BUTTON4),
            MouseAction::Button5 => Some(Self::BUTTON5),
            MouseAction::Button6 => Some(Self::BUTTON6),
            MouseAction::Button7 => Some(Self::BUTTON7),
            MouseAction::Button8 => Some(Self::BUTTON8),
            _ => None,
        }
    }

    pub const fn is_empty(self) -> bool {
        self.into_bits() == 0
    }
}
