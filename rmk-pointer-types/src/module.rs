use serde::{Deserialize, Serialize};
use strum::FromRepr;

/// Kind of a pointing module attached to the keyboard
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, FromRepr)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(postcard::experimental::max_size::MaxSize)]
pub enum ModuleKind {
    /// Directional key cluster, its motion is turned into arrow key taps
    KeyCluster = 0,
    /// Touchpad, reports through its own event record
    Touchpad,
    /// Trackball, speed shaped
    Trackball,
    /// Trackpoint, passed through unshaped
    Trackpoint,
}
