//! # RMK Pointer Types
//!
//! Plain data types shared between the pointer pipeline and the rest of the firmware.
//!
//! ## Modules
//!
//! - [`mouse_action`] - Logical mouse actions bound to keys (movement, scrolling, modifiers, clicks)
//! - [`mouse_button`] - HID mouse button bitmask
//! - [`keycode`] - Arrow key codes emitted by the key cluster
//! - [`layer`] - Layer ids which select move/scroll semantics
//! - [`module`] - Kinds of attachable pointing modules
//! - [`report`] - The outgoing pointer report
//!
//! Drivers and key handlers only need this crate, `rmk-pointer` depends on it for everything
//! that crosses a task boundary.

#![cfg_attr(not(test), no_std)]

pub mod keycode;
pub mod layer;
pub mod module;
pub mod mouse_action;
pub mod mouse_button;
pub mod report;
