//! Pointer input pipeline for RMK keyboards.
//!
//! Mouse keys, trackball, trackpoint, touchpad and key cluster modules are merged into one
//! mouse report per tick. See [`pointer::MouseController`] for the pipeline and
//! [`task::PointerTask`] for the embassy task driving it.
//!
//! ## Feature flags
#![doc = document_features::document_features!()]
#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
mod fmt;

pub mod channel;
pub mod config;
pub mod display;
pub mod event;
pub mod hid;
pub mod pointer;
pub mod state;
pub mod task;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
pub use rmk_pointer_types as types;

pub type RawMutex = CriticalSectionRawMutex;

/// Capacity of the mouse action channel
pub const MOUSE_ACTION_CHANNEL_SIZE: usize = 16;
/// Capacity of the report channel
pub const REPORT_CHANNEL_SIZE: usize = 16;
/// Maximum number of attached pointing modules
pub const MAX_MODULES: usize = 4;
