use serde::{Deserialize, Serialize};
use strum::FromRepr;

/// Arrow keys emitted by the key cluster module, valued by their HID usage id
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, FromRepr)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(postcard::experimental::max_size::MaxSize)]
pub enum ArrowKey {
    /// `Right Arrow`
    Right = 0x4F,
    /// `Left Arrow`
    Left = 0x50,
    /// `Down Arrow`
    Down = 0x51,
    /// `Up Arrow`
    Up = 0x52,
}

impl ArrowKey {
    pub const fn hid_code(self) -> u8 {
        self as u8
    }
}
