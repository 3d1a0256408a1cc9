//! The embassy task which drives the pointer pipeline.
use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::channel::{Receiver, Sender};
use embassy_time::{Duration, Instant, Ticker};
use heapless::Vec;
use rmk_pointer_types::layer::LayerId;

use crate::channel::{MOUSE_ACTION_CHANNEL, POINTER_REPORT_CHANNEL};
use crate::config::PointerConfig;
use crate::display::StatusDisplay;
use crate::event::MouseActionEvent;
use crate::hid::{KeyboardReport, Report};
use crate::pointer::module::ModuleState;
use crate::pointer::touchpad::TouchpadEvents;
use crate::pointer::{MouseController, TickInput, TickOutput};
use crate::state::MouseActionStates;
use crate::{MAX_MODULES, MOUSE_ACTION_CHANNEL_SIZE, REPORT_CHANNEL_SIZE, RawMutex};

#[allow(async_fn_in_trait)]
pub trait Runnable {
    async fn run(&mut self) -> !;
}

/// Inputs written by the drivers of the pointing hardware and by the layer logic
#[derive(Clone, Debug, Default)]
pub struct PointerInputs {
    pub touchpad: TouchpadEvents,
    pub touchpad_connected: bool,
    pub modules: Vec<ModuleState, MAX_MODULES>,
    pub active_layer: LayerId,
}

impl PointerInputs {
    pub const fn new() -> Self {
        Self {
            touchpad: TouchpadEvents {
                x: 0,
                y: 0,
                wheel_x: 0,
                wheel_y: 0,
                single_tap: false,
                two_finger_tap: false,
                tap_and_hold: false,
            },
            touchpad_connected: false,
            modules: Vec::new(),
            active_layer: LayerId::Base,
        }
    }
}

/// `PointerInputs` shared between drivers and the pointer task
pub type SharedPointerInputs = Mutex<RawMutex, RefCell<PointerInputs>>;

pub type MouseActionReceiver<'a> = Receiver<'a, RawMutex, MouseActionEvent, MOUSE_ACTION_CHANNEL_SIZE>;
pub type ReportSender<'a> = Sender<'a, RawMutex, Report, REPORT_CHANNEL_SIZE>;

pub struct PointerTask<'a, D: StatusDisplay> {
    controller: MouseController,
    states: MouseActionStates,
    inputs: &'a SharedPointerInputs,
    display: D,
    events: MouseActionReceiver<'a>,
    reports: ReportSender<'a>,
    tick_interval: Duration,
    /// Whether the last mouse report carried anything, so that an idle report follows it
    mouse_reported: bool,
    /// Whether the last keyboard report held arrow keys
    arrows_reported: bool,
}

impl<'a, D: StatusDisplay> PointerTask<'a, D> {
    /// Create the task on the global channels
    pub fn new(config: &PointerConfig, inputs: &'a SharedPointerInputs, display: D) -> Self {
        Self::with_channels(
            config,
            inputs,
            display,
            MOUSE_ACTION_CHANNEL.receiver(),
            POINTER_REPORT_CHANNEL.sender(),
        )
    }

    pub fn with_channels(
        config: &PointerConfig,
        inputs: &'a SharedPointerInputs,
        display: D,
        events: MouseActionReceiver<'a>,
        reports: ReportSender<'a>,
    ) -> Self {
        Self {
            controller: MouseController::new(config),
            states: MouseActionStates::new(),
            inputs,
            display,
            events,
            reports,
            tick_interval: config.tick_interval,
            mouse_reported: false,
            arrows_reported: false,
        }
    }

    pub fn controller(&self) -> &MouseController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut MouseController {
        &mut self.controller
    }

    pub fn states(&self) -> &MouseActionStates {
        &self.states
    }

    /// Start the tick clock at `now`
    pub fn start(&mut self, now: Instant) {
        self.controller.reset_clock(now);
    }

    /// Run one tick at `now` and publish its reports.
    ///
    /// The snapshot is latched before pending events are applied. A press is seen by this tick
    /// even if its release is already queued, the release takes effect on the next tick.
    pub fn step(&mut self, now: Instant) -> TickOutput {
        self.states.latch();
        while let Ok(event) = self.events.try_receive() {
            trace!("Mouse action {:?} pressed: {}", event.action, event.pressed);
            self.controller
                .toggle_mouse_state(&mut self.states, event.action, event.pressed);
        }

        let controller = &mut self.controller;
        let states = &self.states;
        let output = self.inputs.lock(|inputs| {
            let mut inputs = inputs.borrow_mut();
            let PointerInputs {
                touchpad,
                touchpad_connected,
                modules,
                active_layer,
            } = &mut *inputs;
            controller.process_tick(TickInput {
                now,
                states,
                touchpad: (*touchpad_connected).then_some(touchpad),
                modules: modules.as_mut_slice(),
                active_layer: *active_layer,
            })
        });

        for event in output.curve_events.iter() {
            self.display.set_text(event.slot, event.text());
        }

        let idle = output.report.is_idle();
        if !idle || self.mouse_reported {
            self.publish(output.report.into());
        }
        self.mouse_reported = !idle;

        if !output.arrow_keys.is_empty() {
            self.publish(Report::KeyboardReport(KeyboardReport::with_arrow_keys(&output.arrow_keys)));
            self.arrows_reported = true;
        } else if self.arrows_reported {
            self.publish(Report::KeyboardReport(KeyboardReport::default()));
            self.arrows_reported = false;
        }

        output
    }

    fn publish(&self, report: Report) {
        if self.reports.try_send(report).is_err() {
            warn!("Pointer report channel full, dropping report");
        }
    }
}

impl<D: StatusDisplay> Runnable for PointerTask<'_, D> {
    async fn run(&mut self) -> ! {
        info!("Pointer task started, tick {}ms", self.tick_interval.as_millis());
        self.start(Instant::now());
        let mut ticker = Ticker::every(self.tick_interval);
        loop {
            ticker.next().await;
            self.step(Instant::now());
        }
    }
}
