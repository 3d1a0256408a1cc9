use std::cell::RefCell;
use std::rc::Rc;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::channel::Channel;
use embassy_time::Instant;
use rmk_pointer::config::PointerConfig;
use rmk_pointer::display::StatusDisplay;
use rmk_pointer::event::MouseActionEvent;
use rmk_pointer::hid::Report;
use rmk_pointer::pointer::TickOutput;
use rmk_pointer::task::{PointerInputs, PointerTask, SharedPointerInputs};
use rmk_pointer::types::mouse_action::MouseAction;
use rmk_pointer::{MOUSE_ACTION_CHANNEL_SIZE, REPORT_CHANNEL_SIZE, RawMutex};

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

pub type ActionChannel = Channel<RawMutex, MouseActionEvent, MOUSE_ACTION_CHANNEL_SIZE>;
pub type ReportChannel = Channel<RawMutex, Report, REPORT_CHANNEL_SIZE>;

/// Display recording every label written to it
#[derive(Clone, Default)]
pub struct RecordingDisplay {
    pub texts: Rc<RefCell<Vec<(u8, String)>>>,
}

impl StatusDisplay for RecordingDisplay {
    fn set_text(&mut self, slot: u8, text: &str) {
        self.texts.borrow_mut().push((slot, text.to_string()));
    }
}

/// Mouse report fields as `(buttons, x, y, wheel, pan)`
pub type MouseFields = (u8, i8, i8, i8, i8);

/// Pointer task wired to private channels, with a manually advanced clock
pub struct Bench {
    pub task: PointerTask<'static, RecordingDisplay>,
    pub display: RecordingDisplay,
    pub inputs: &'static SharedPointerInputs,
    pub actions: &'static ActionChannel,
    pub reports: &'static ReportChannel,
    pub now_ms: u64,
}

impl Bench {
    pub fn new(config: PointerConfig) -> Self {
        let inputs: &'static SharedPointerInputs = Box::leak(Box::new(Mutex::new(RefCell::new(PointerInputs::new()))));
        let actions: &'static ActionChannel = Box::leak(Box::new(Channel::new()));
        let reports: &'static ReportChannel = Box::leak(Box::new(Channel::new()));
        let display = RecordingDisplay::default();
        let mut task = PointerTask::with_channels(
            &config,
            inputs,
            display.clone(),
            actions.receiver(),
            reports.sender(),
        );
        let now_ms = 1000;
        task.start(Instant::from_millis(now_ms));
        Self {
            task,
            display,
            inputs,
            actions,
            reports,
            now_ms,
        }
    }

    pub fn press(&self, action: MouseAction) {
        assert!(self.actions.try_send(MouseActionEvent::press(action)).is_ok());
    }

    pub fn release(&self, action: MouseAction) {
        assert!(self.actions.try_send(MouseActionEvent::release(action)).is_ok());
    }

    pub fn tick(&mut self, elapsed_ms: u64) -> TickOutput {
        self.now_ms += elapsed_ms;
        self.task.step(Instant::from_millis(self.now_ms))
    }

    pub fn with_inputs<R>(&self, f: impl FnOnce(&mut PointerInputs) -> R) -> R {
        self.inputs.lock(|inputs| f(&mut inputs.borrow_mut()))
    }

    pub fn drain_reports(&self) -> Vec<Report> {
        let mut reports = Vec::new();
        while let Ok(report) = self.reports.try_receive() {
            reports.push(report);
        }
        reports
    }

    pub fn drain_mouse_reports(&self) -> Vec<MouseFields> {
        self.drain_reports().iter().filter_map(mouse_fields).collect()
    }

    pub fn drain_keyboard_reports(&self) -> Vec<[u8; 6]> {
        self.drain_reports()
            .iter()
            .filter_map(|report| match report {
                Report::KeyboardReport(report) => Some(report.keycodes),
                _ => None,
            })
            .collect()
    }
}

pub fn mouse_fields(report: &Report) -> Option<MouseFields> {
    match report {
        Report::MouseReport(r) => Some((r.buttons, r.x, r.y, r.wheel, r.pan)),
        _ => None,
    }
}
