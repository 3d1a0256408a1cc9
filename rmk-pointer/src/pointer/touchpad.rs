//! Touchpad adapter.
use embassy_time::Instant;
use postcard::experimental::max_size::MaxSize;
use rmk_pointer_types::mouse_button::MouseButtons;
use serde::{Deserialize, Serialize};

use super::report::{MotionSum, ReportAccumulator};
use super::shaping::{CurveModeEvent, SpeedEstimate, SpeedShaper};
use crate::config::TouchpadConfig;

/// Event record of the touchpad, written by the touchpad driver between ticks
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, MaxSize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchpadEvents {
    /// Relative motion since the last tick
    pub x: i16,
    pub y: i16,
    /// Accumulated two-finger scroll in touchpad units
    pub wheel_x: i16,
    pub wheel_y: i16,
    /// Latched until consumed
    pub single_tap: bool,
    /// Latched until consumed
    pub two_finger_tap: bool,
    /// Held while the driver keeps it set
    pub tap_and_hold: bool,
}

pub struct TouchpadAdapter {
    config: TouchpadConfig,
}

impl TouchpadAdapter {
    pub fn new(config: TouchpadConfig) -> Self {
        Self { config }
    }

    /// Consume the touchpad record.
    ///
    /// Motion is speed shaped into `sum`, whole wheel ticks and tap buttons go straight to the
    /// report. Consumed fields are cleared, wheel remainders are kept in the record.
    pub fn process(
        &mut self,
        events: &mut TouchpadEvents,
        shaper: &mut SpeedShaper,
        speed: &mut SpeedEstimate,
        now: Instant,
        sum: &mut MotionSum,
        report: &mut ReportAccumulator,
    ) -> Option<CurveModeEvent> {
        let (x, y, curve_event) = shaper.shape(speed, events.x, events.y, now);
        sum.add(x, y);
        events.x = 0;
        events.y = 0;

        let divisor = self.config.scroll_divisor.max(1);
        let wheel_x = events.wheel_x / divisor;
        if wheel_x != 0 {
            report.wheel_x = report.wheel_x.saturating_add(wheel_x);
            events.wheel_x %= divisor;
        }
        let wheel_y = events.wheel_y / divisor;
        if wheel_y != 0 {
            report.wheel_y = report.wheel_y.saturating_sub(wheel_y);
            events.wheel_y %= divisor;
        }

        if events.single_tap {
            report.buttons |= MouseButtons::LEFT;
            events.single_tap = false;
        }
        if events.two_finger_tap {
            report.buttons |= MouseButtons::RIGHT;
            events.two_finger_tap = false;
        }
        if events.tap_and_hold {
            report.buttons |= MouseButtons::LEFT;
        }

        curve_event
    }
}
