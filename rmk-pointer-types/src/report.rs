use serde::{Deserialize, Serialize};

use crate::mouse_button::MouseButtons;

/// Pointer report produced once per tick.
///
/// `wheel_y` is the vertical wheel, positive scrolls up. `wheel_x` is the horizontal wheel (pan).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(postcard::experimental::max_size::MaxSize)]
pub struct PointerReport {
    pub buttons: MouseButtons,
    pub x: i8,
    pub y: i8,
    pub wheel_x: i8,
    pub wheel_y: i8,
}

impl PointerReport {
    /// Whether the report carries neither motion nor pressed buttons
    pub fn is_idle(&self) -> bool {
        self.buttons.is_empty() && self.x == 0 && self.y == 0 && self.wheel_x == 0 && self.wheel_y == 0
    }
}
