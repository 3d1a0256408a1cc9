use serde::{Deserialize, Serialize};
use strum::FromRepr;

/// Layers of the keyboard.
///
/// The pointer pipeline only looks at the active layer to decide whether relative motion from
/// pointing modules moves the cursor or scrolls.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRepr)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(postcard::experimental::max_size::MaxSize)]
pub enum LayerId {
    #[default]
    Base = 0,
    Mod,
    Fn,
    Mouse,
}
