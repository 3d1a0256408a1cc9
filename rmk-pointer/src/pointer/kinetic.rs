//! Kinetic model of mouse keys.
//!
//! Held direction keys set a target speed, the current speed ramps towards it, and the
//! integrated distance is emitted as whole pixels (or wheel ticks) while the fractional part
//! is carried over to the next tick.
use rmk_pointer_types::mouse_action::MouseAction;

use super::direction::{AxisDirections, DirectionSigns};
use crate::config::KineticAxisConfig;
use crate::state::MouseActionStates;

/// 1/√2, applied to the distance of diagonal motion
const DIAGONAL_COMPENSATION: f32 = core::f32::consts::FRAC_1_SQRT_2;

/// Speed tier selected by modifiers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpeedTier {
    #[default]
    Normal,
    Accelerated,
    Decelerated,
}

/// State of one kinetic model, there's one for cursor movement and one for scrolling
#[derive(Clone, Debug)]
pub struct KineticAxis {
    config: KineticAxisConfig,
    directions: AxisDirections,
    is_scroll: bool,
    pub(crate) signs: DirectionSigns,
    current_speed: f32,
    target_speed: f32,
    x_sum: f32,
    y_sum: f32,
    x_out: i16,
    y_out: i16,
    was_active: bool,
    prev_tier: SpeedTier,
}

impl KineticAxis {
    pub fn new_move(config: KineticAxisConfig) -> Self {
        Self::new(config, AxisDirections::MOVE, false)
    }

    pub fn new_scroll(config: KineticAxisConfig) -> Self {
        Self::new(config, AxisDirections::SCROLL, true)
    }

    fn new(config: KineticAxisConfig, directions: AxisDirections, is_scroll: bool) -> Self {
        Self {
            config,
            directions,
            is_scroll,
            signs: DirectionSigns::default(),
            current_speed: 0.0,
            target_speed: 0.0,
            x_sum: 0.0,
            y_sum: 0.0,
            x_out: 0,
            y_out: 0,
            was_active: false,
            prev_tier: SpeedTier::Normal,
        }
    }

    pub fn directions(&self) -> &AxisDirections {
        &self.directions
    }

    pub fn signs(&self) -> DirectionSigns {
        self.signs
    }

    /// Current speed in pixels (or wheel ticks) per second
    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    pub fn target_speed(&self) -> f32 {
        self.target_speed
    }

    pub fn is_active(&self) -> bool {
        self.was_active
    }

    /// Give a just pressed direction precedence, returns false if the action isn't ours
    pub fn activate_direction(&mut self, action: MouseAction) -> bool {
        self.signs.activate(&self.directions, action)
    }

    /// Advance the model by `elapsed_ms`.
    ///
    /// The integer output is available through [`KineticAxis::take_output`] until the next call.
    pub fn process(&mut self, elapsed_ms: u32, states: &MouseActionStates, compensate_diagonal: bool) {
        let scale = self.config.unit_scale;
        let initial_speed = scale * self.config.initial_speed;
        let acceleration = scale * self.config.acceleration;
        let decelerated_speed = scale * self.config.decelerated_speed;
        let base_speed = scale * self.config.base_speed;
        let accelerated_speed = scale * self.config.accelerated_speed;
        let elapsed_s = elapsed_ms as f32 / 1000.0;

        let decelerate = states.is_active(MouseAction::Decelerate);
        if !self.was_active && !decelerate {
            self.current_speed = initial_speed;
        }

        let is_active = self.directions.any_active(states);
        let double_pressed = self.directions.any_double_pressed(states);

        let mut tier = SpeedTier::Normal;
        if states.is_active(MouseAction::Accelerate) || double_pressed {
            self.target_speed = accelerated_speed;
            tier = SpeedTier::Accelerated;
        } else if decelerate {
            self.target_speed = decelerated_speed;
            tier = SpeedTier::Decelerated;
        } else if is_active {
            self.target_speed = base_speed;
        }

        // Modifier changes take effect immediately, without ramping
        if tier == SpeedTier::Accelerated || (self.was_active && is_active && self.prev_tier != tier) {
            self.current_speed = self.target_speed;
        }

        if is_active {
            let step = acceleration * elapsed_s;
            if self.current_speed < self.target_speed {
                self.current_speed = (self.current_speed + step).min(self.target_speed);
            } else {
                self.current_speed = (self.current_speed - step).max(self.target_speed);
            }
            self.current_speed = self.current_speed.max(0.0);

            self.integrate(elapsed_s, states, compensate_diagonal);
        } else {
            self.current_speed = 0.0;
            self.x_out = 0;
            self.y_out = 0;
        }

        self.prev_tier = tier;
        self.was_active = is_active;
    }

    fn integrate(&mut self, elapsed_s: f32, states: &MouseActionStates, compensate_diagonal: bool) {
        let starting = self.is_scroll && !self.was_active;
        if starting {
            self.x_sum = 0.0;
            self.y_sum = 0.0;
        }

        self.signs.update(&self.directions, states);

        let mut distance = self.current_speed * elapsed_s;
        if compensate_diagonal && self.signs.is_diagonal() {
            distance *= DIAGONAL_COMPENSATION;
        }

        self.x_sum += distance * self.signs.horizontal as f32;
        self.y_sum += distance * self.signs.vertical as f32;

        let (x_frac, x_int) = libm::modff(self.x_sum);
        self.x_sum = x_frac;
        self.x_out = x_int as i16;

        let (y_frac, y_int) = libm::modff(self.y_sum);
        self.y_sum = y_frac;
        self.y_out = y_int as i16;

        // A scroll that starts from rest is felt immediately instead of waiting for a full tick
        if starting {
            if self.x_out == 0 && self.signs.horizontal != 0 {
                self.x_out = self.signs.horizontal as i16;
                self.x_sum = 0.0;
            }
            if self.y_out == 0 && self.signs.vertical != 0 {
                self.y_out = self.signs.vertical as i16;
                self.y_sum = 0.0;
            }
        }

        debug_assert!(libm::fabsf(self.x_sum) < 1.0 && libm::fabsf(self.y_sum) < 1.0);
    }

    /// Take the integer output of the last tick, leaving zeros behind
    pub fn take_output(&mut self) -> (i16, i16) {
        let out = (self.x_out, self.y_out);
        self.x_out = 0;
        self.y_out = 0;
        out
    }

    /// Fractional distance carried to the next tick
    pub fn remainder(&self) -> (f32, f32) {
        (self.x_sum, self.y_sum)
    }
}
