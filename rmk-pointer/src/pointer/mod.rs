//! The pointer pipeline.
//!
//! [`MouseController`] runs once per tick. It advances the two kinetic models of mouse keys,
//! folds in touchpad and module motion, and produces one [`PointerReport`] plus the arrow keys
//! emitted by the key cluster.
//!
//! ```text
//!  MouseActionStates ──► move axis ───┐
//!                    └─► scroll axis ─┤
//!  TouchpadEvents ──► touchpad ──┐    ├──► report
//!  ModuleState[] ──► modules ────┴► MotionSum ─┘
//! ```
pub mod direction;
pub mod kinetic;
pub mod module;
pub mod report;
pub mod shaping;
pub mod touchpad;

use embassy_time::Instant;
use heapless::Vec;
use rmk_pointer_types::keycode::ArrowKey;
use rmk_pointer_types::layer::LayerId;
use rmk_pointer_types::mouse_action::MouseAction;
use rmk_pointer_types::report::PointerReport;

use self::kinetic::KineticAxis;
use self::module::{MAX_ARROW_KEYS, ModuleState, RelativeModuleAdapter};
use self::report::{MotionSum, ReportAccumulator};
use self::shaping::{CurveModeEvent, SpeedEstimate, SpeedShaper};
use self::touchpad::{TouchpadAdapter, TouchpadEvents};
use crate::config::PointerConfig;
use crate::state::MouseActionStates;

/// Everything one tick reads, captured by the caller before the tick
pub struct TickInput<'a> {
    pub now: Instant,
    /// Latched activation counters
    pub states: &'a MouseActionStates,
    /// Touchpad record, `None` while the touchpad is disconnected
    pub touchpad: Option<&'a mut TouchpadEvents>,
    pub modules: &'a mut [ModuleState],
    pub active_layer: LayerId,
}

/// Result of one tick
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TickOutput {
    pub report: PointerReport,
    /// Arrow keys to put into this cycle's keyboard report
    pub arrow_keys: Vec<ArrowKey, MAX_ARROW_KEYS>,
    /// Speed curve switches for the status display
    pub curve_events: Vec<CurveModeEvent, 2>,
}

pub struct MouseController {
    config: PointerConfig,
    move_axis: KineticAxis,
    scroll_axis: KineticAxis,
    shaper: SpeedShaper,
    /// Speed of all shaped sources, touchpad and trackball feed the same estimate
    speed: SpeedEstimate,
    touchpad: TouchpadAdapter,
    modules: RelativeModuleAdapter,
    sum: MotionSum,
    last_tick: Instant,
}

impl MouseController {
    pub fn new(config: &PointerConfig) -> Self {
        Self {
            config: config.clone(),
            move_axis: KineticAxis::new_move(config.move_axis),
            scroll_axis: KineticAxis::new_scroll(config.scroll_axis),
            shaper: SpeedShaper::new(config.speed_shaping),
            speed: SpeedEstimate::new(),
            touchpad: TouchpadAdapter::new(config.touchpad),
            modules: RelativeModuleAdapter::new(config.key_cluster),
            sum: MotionSum::default(),
            last_tick: Instant::MIN,
        }
    }

    /// Start measuring tick time from `now`
    pub fn reset_clock(&mut self, now: Instant) {
        self.last_tick = now;
    }

    pub fn move_axis(&self) -> &KineticAxis {
        &self.move_axis
    }

    pub fn scroll_axis(&self) -> &KineticAxis {
        &self.scroll_axis
    }

    pub fn shaper(&self) -> &SpeedShaper {
        &self.shaper
    }

    pub fn speed(&self) -> &SpeedEstimate {
        &self.speed
    }

    /// Fractional relative motion carried to the next tick
    pub fn carried_motion(&self) -> MotionSum {
        self.sum
    }

    /// Set the speed shaping parameters
    pub fn set_exp_driver_params(&mut self, min_coef: f32, mid_speed: f32, mid_coef: f32) {
        self.shaper.set_params(min_coef, mid_speed, mid_coef);
    }

    pub fn set_compensate_diagonal_speed(&mut self, enabled: bool) {
        self.config.compensate_diagonal_speed = enabled;
    }

    /// Called on key down of a mouse action, the newest direction takes precedence on its axis
    pub fn activate_direction_signs(&mut self, action: MouseAction) {
        if action.is_move() {
            self.move_axis.activate_direction(action);
        } else if action.is_scroll() {
            self.scroll_axis.activate_direction(action);
        }
    }

    /// Press or release a mouse action
    pub fn toggle_mouse_state(&mut self, states: &mut MouseActionStates, action: MouseAction, activate: bool) {
        states.toggle(action, activate);
        if activate {
            self.activate_direction_signs(action);
        }
    }

    /// Run one tick
    pub fn process_tick(&mut self, input: TickInput<'_>) -> TickOutput {
        let TickInput {
            now,
            states,
            touchpad,
            modules,
            active_layer,
        } = input;
        let elapsed_ms = now.saturating_duration_since(self.last_tick).as_millis().min(u32::MAX as u64) as u32;
        self.last_tick = now;

        let mut output = TickOutput::default();
        let mut report = ReportAccumulator::default();

        self.move_axis.process(elapsed_ms, states, self.config.compensate_diagonal_speed);
        (report.x, report.y) = self.move_axis.take_output();

        self.scroll_axis.process(elapsed_ms, states, self.config.compensate_diagonal_speed);
        (report.wheel_x, report.wheel_y) = self.scroll_axis.take_output();

        let mut motion_changed = false;
        if let Some(events) = touchpad {
            motion_changed = true;
            let event = self
                .touchpad
                .process(events, &mut self.shaper, &mut self.speed, now, &mut self.sum, &mut report);
            if let Some(event) = event {
                let _ = output.curve_events.push(event);
            }
        }

        motion_changed |= self.modules.process(
            modules,
            &mut self.shaper,
            &mut self.speed,
            now,
            &mut self.sum,
            &mut output.arrow_keys,
            &mut output.curve_events,
        );

        if motion_changed {
            let divisor = self
                .config
                .is_scroll_layer(active_layer)
                .then_some(self.config.scroll_speed_divisor);
            self.sum.flush(divisor, &mut report);
        }

        report.buttons |= states.buttons();
        output.report = report.finish();
        output
    }
}
