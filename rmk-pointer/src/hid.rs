//! HID reports produced by the pointer task.
use rmk_pointer_types::keycode::ArrowKey;
use rmk_pointer_types::report::PointerReport;
use usbd_hid::descriptor::generator_prelude::*;
use usbd_hid::descriptor::{BufferOverflow, MouseReport};

/// KeyboardReport describes a report and its companion descriptor that can be
/// used to send keyboard button presses to a host and receive the status of the
/// keyboard LEDs.
#[gen_hid_descriptor(
    (collection = APPLICATION, usage_page = GENERIC_DESKTOP, usage = KEYBOARD) = {
        (usage_page = KEYBOARD, usage_min = 0xE0, usage_max = 0xE7) = {
            #[packed_bits = 8] #[item_settings(data,variable,absolute)] modifier=input;
        };
        (usage_min = 0x00, usage_max = 0xFF) = {
            #[item_settings(constant,variable,absolute)] reserved=input;
        };
        (usage_page = LEDS, usage_min = 0x01, usage_max = 0x05) = {
            #[packed_bits = 5] #[item_settings(data,variable,absolute)] leds=output;
        };
        (usage_page = KEYBOARD, usage_min = 0x00, usage_max = 0xDD) = {
            #[item_settings(data,array,absolute)] keycodes=input;
        };
    }
)]
#[derive(Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardReport {
    pub modifier: u8,
    pub reserved: u8,
    pub leds: u8,
    pub keycodes: [u8; 6],
}

impl KeyboardReport {
    /// Report holding the given arrow keys, keys past the sixth are dropped
    pub fn with_arrow_keys(keys: &[ArrowKey]) -> Self {
        let mut report = Self::default();
        if keys.len() > report.keycodes.len() {
            warn!("Too many arrow keys in one report: {}", keys.len());
        }
        for (slot, key) in report.keycodes.iter_mut().zip(keys) {
            *slot = key.hid_code();
        }
        report
    }
}

pub enum Report {
    /// Normal keyboard hid report, carrying synthetic arrow keys
    KeyboardReport(KeyboardReport),
    /// Mouse hid report
    MouseReport(MouseReport),
}

impl AsInputReport for Report {
    fn serialize(&self, buffer: &mut [u8]) -> Result<usize, BufferOverflow> {
        match self {
            Report::KeyboardReport(r) => r.serialize(buffer),
            Report::MouseReport(r) => r.serialize(buffer),
        }
    }
}

/// Convert a pointer report into the boot mouse report, the horizontal wheel goes to `pan`
pub fn mouse_report(report: &PointerReport) -> MouseReport {
    MouseReport {
        buttons: report.buttons.into_bits(),
        x: report.x,
        y: report.y,
        wheel: report.wheel_y,
        pan: report.wheel_x,
    }
}

impl From<PointerReport> for Report {
    fn from(report: PointerReport) -> Self {
        Report::MouseReport(mouse_report(&report))
    }
}
