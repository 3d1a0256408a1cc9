//! Exposed channels which connect key handlers, the pointer task and the HID writer

use embassy_sync::channel::Channel;
pub use embassy_sync::{blocking_mutex, channel};

use crate::event::MouseActionEvent;
use crate::hid::Report;
use crate::{MOUSE_ACTION_CHANNEL_SIZE, REPORT_CHANNEL_SIZE, RawMutex};

/// Channel for mouse action key transitions, from key handlers to the pointer task
pub static MOUSE_ACTION_CHANNEL: Channel<RawMutex, MouseActionEvent, MOUSE_ACTION_CHANNEL_SIZE> = Channel::new();
/// Channel for reports from the pointer task to the hid writer
pub static POINTER_REPORT_CHANNEL: Channel<RawMutex, Report, REPORT_CHANNEL_SIZE> = Channel::new();

/// Send a mouse action transition, waiting if the channel is full
pub async fn send_mouse_action(event: MouseActionEvent) {
    MOUSE_ACTION_CHANNEL.send(event).await;
}

/// Send a mouse action transition from a non-async context.
///
/// Returns false and drops the event if the channel is full.
pub fn try_send_mouse_action(event: MouseActionEvent) -> bool {
    if MOUSE_ACTION_CHANNEL.try_send(event).is_err() {
        warn!("Mouse action channel full, dropping {:?}", event);
        return false;
    }
    true
}
