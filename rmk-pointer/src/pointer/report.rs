//! Assembly of the outgoing pointer report.
use rmk_pointer_types::mouse_button::MouseButtons;
use rmk_pointer_types::report::PointerReport;

/// Report fields of the current tick, kept wide until the report is finished
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReportAccumulator {
    pub buttons: MouseButtons,
    pub x: i16,
    pub y: i16,
    pub wheel_x: i16,
    pub wheel_y: i16,
}

impl ReportAccumulator {
    /// Clamp into the HID report ranges
    pub fn finish(&self) -> PointerReport {
        PointerReport {
            buttons: self.buttons,
            x: clamp_i8(self.x),
            y: clamp_i8(self.y),
            wheel_x: clamp_i8(self.wheel_x),
            wheel_y: clamp_i8(self.wheel_y),
        }
    }
}

fn clamp_i8(v: i16) -> i8 {
    v.clamp(i8::MIN as i16, i8::MAX as i16) as i8
}

/// Floating accumulator of relative motion from pointing modules.
///
/// Only whole units leave the accumulator, the fraction is carried to the next tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotionSum {
    pub x: f32,
    pub y: f32,
}

impl MotionSum {
    pub fn add(&mut self, x: f32, y: f32) {
        self.x += x;
        self.y += y;
    }

    /// Move the whole part of the accumulated motion into the report.
    ///
    /// With `scroll_divisor` the motion is scaled down and reported on the wheels, the vertical
    /// wheel inverted. The carried fraction is kept in unscaled units.
    pub fn flush(&mut self, scroll_divisor: Option<f32>, report: &mut ReportAccumulator) {
        match scroll_divisor {
            Some(divisor) => {
                let (x_frac, x_int) = libm::modff(self.x / divisor);
                let (y_frac, y_int) = libm::modff(self.y / divisor);
                report.wheel_x = report.wheel_x.saturating_add(x_int as i16);
                report.wheel_y = report.wheel_y.saturating_sub(y_int as i16);
                self.x = x_frac * divisor;
                self.y = y_frac * divisor;
            }
            None => {
                let (x_frac, x_int) = libm::modff(self.x);
                let (y_frac, y_int) = libm::modff(self.y);
                report.x = report.x.saturating_add(x_int as i16);
                report.y = report.y.saturating_add(y_int as i16);
                self.x = x_frac;
                self.y = y_frac;
            }
        }
    }
}
