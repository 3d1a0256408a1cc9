//! Logical mouse actions.
//!
//! Every action owns one activation counter in the pointer pipeline. Counters allow stacked
//! activation, e.g. two physical keys bound to the same action, which is also how a
//! "double press" is detected.
use serde::{Deserialize, Serialize};
use strum::{EnumCount, EnumIter, FromRepr};

/// Number of logical mouse actions, i.e. the length of an activation counter array
pub const MOUSE_ACTION_COUNT: usize = <MouseAction as EnumCount>::COUNT;

#[repr(u8)]
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, FromRepr, EnumCount, EnumIter,
)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MouseAction {
    LeftClick = 0,
    MiddleClick,
    RightClick,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    ScrollUp,
    ScrollDown,
    ScrollLeft,
    ScrollRight,
    Accelerate,
    Decelerate,
    Button4,
    Button5,
    Button6,
    Button7,
    Button8,
}

impl ::postcard::experimental::max_size::MaxSize for MouseAction {
    const POSTCARD_MAX_SIZE: usize = 1usize;
}

impl MouseAction {
    /// Index of the action in an activation counter array
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn is_move(self) -> bool {
        matches!(
            self,
            MouseAction::MoveUp | MouseAction::MoveDown | MouseAction::MoveLeft | MouseAction::MoveRight
        )
    }

    pub const fn is_scroll(self) -> bool {
        matches!(
            self,
            MouseAction::ScrollUp | MouseAction::ScrollDown | MouseAction::ScrollLeft | MouseAction::ScrollRight
        )
    }
}
