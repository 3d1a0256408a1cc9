//! Speed shaping of relative pointing sensors.
//!
//! The sensor speed is estimated in pixels per second and mapped through a non-linear curve to a
//! multiplier, so that slow motion is damped and fast motion amplified.
use embassy_time::Instant;

use crate::config::{CurveMode, CurveSelection, SpeedShapingConfig};

/// Moving estimate of the motion speed of one sensor
#[derive(Clone, Copy, Debug)]
pub struct SpeedEstimate {
    speed_per_s: f32,
    last_update: Instant,
}

impl Default for SpeedEstimate {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeedEstimate {
    pub const fn new() -> Self {
        Self {
            speed_per_s: 0.0,
            last_update: Instant::MIN,
        }
    }

    /// Estimated speed in pixels per second
    pub fn speed_per_s(&self) -> f32 {
        self.speed_per_s
    }

    /// Feed a motion sample. Zero samples leave the estimate untouched.
    pub fn update(&mut self, dx: i16, dy: i16, now: Instant, weight_factor: f32) {
        if dx == 0 && dy == 0 {
            return;
        }
        let elapsed_ms = now.saturating_duration_since(self.last_update).as_millis().max(1) as f32;
        let distance = libm::hypotf(dx as f32, dy as f32);
        let sample = distance * 1000.0 / elapsed_ms;
        self.speed_per_s = self.speed_per_s * (1.0 - weight_factor) + sample * weight_factor;
        self.last_update = now;
    }
}

/// Emitted when the active speed curve changes, for the status display
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CurveModeEvent {
    pub slot: u8,
    pub mode: CurveMode,
}

impl CurveModeEvent {
    pub fn text(&self) -> &'static str {
        self.mode.label()
    }
}

/// Maps a speed estimate to a motion multiplier
#[derive(Clone, Debug)]
pub struct SpeedShaper {
    config: SpeedShapingConfig,
    last_mode: CurveMode,
}

impl SpeedShaper {
    pub fn new(config: SpeedShapingConfig) -> Self {
        Self {
            config,
            last_mode: CurveMode::Linear,
        }
    }

    pub fn config(&self) -> &SpeedShapingConfig {
        &self.config
    }

    /// Set `min_coef`, `mid_speed` and `mid_coef` at runtime
    pub fn set_params(&mut self, min_coef: f32, mid_speed: f32, mid_coef: f32) {
        self.config.set_exp_driver_params(min_coef, mid_speed, mid_coef);
    }

    /// Curve used at `now`
    pub fn mode_at(&self, now: Instant) -> CurveMode {
        match self.config.curve {
            CurveSelection::Fixed(mode) => mode,
            CurveSelection::Alternating => {
                let period = self.config.curve_switch_period.as_millis().max(1);
                if (now.as_millis() / period) % 2 == 0 {
                    CurveMode::Linear
                } else {
                    CurveMode::SquareRoot
                }
            }
        }
    }

    /// Multiplier for the estimated speed.
    ///
    /// Linear and square root curves are not clamped to `max_coef`.
    pub fn coefficient(&mut self, estimate: &SpeedEstimate, now: Instant) -> (f32, Option<CurveModeEvent>) {
        let mode = self.mode_at(now);
        let event = if mode != self.last_mode {
            debug!("Speed curve switched to {:?}", mode);
            self.last_mode = mode;
            Some(CurveModeEvent {
                slot: self.config.display_slot,
                mode,
            })
        } else {
            None
        };
        (self.evaluate(mode, estimate.speed_per_s()), event)
    }

    /// Feed a motion sample into `estimate` and return the shaped motion
    pub fn shape(
        &mut self,
        estimate: &mut SpeedEstimate,
        dx: i16,
        dy: i16,
        now: Instant,
    ) -> (f32, f32, Option<CurveModeEvent>) {
        estimate.update(dx, dy, now, self.config.weight_factor);
        let (coef, event) = self.coefficient(estimate, now);
        (coef * dx as f32, coef * dy as f32, event)
    }

    fn evaluate(&self, mode: CurveMode, speed_per_s: f32) -> f32 {
        let c = &self.config;
        let normalized = speed_per_s / c.mid_speed;
        match mode {
            CurveMode::Linear => c.min_coef + normalized * (c.mid_coef - c.min_coef),
            CurveMode::SquareRoot => 2.0 * c.min_coef * libm::powf(normalized, c.mid_coef - c.min_coef),
            CurveMode::Exponential => libm::powf(c.exp_base(), normalized + c.exp_shift()).min(c.max_coef),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(mode: CurveMode) -> SpeedShaper {
        SpeedShaper::new(SpeedShapingConfig {
            curve: CurveSelection::Fixed(mode),
            ..Default::default()
        })
    }

    /// Estimate after moving `px` pixels within `ms` milliseconds
    fn estimate_of(px: i16, ms: u64) -> SpeedEstimate {
        let mut estimate = SpeedEstimate::new();
        estimate.update(1, 0, Instant::from_millis(1000), 1.0);
        estimate.update(px, 0, Instant::from_millis(1000 + ms), 1.0);
        estimate
    }

    #[test]
    fn estimate_replaces_with_full_weight() {
        let mut estimate = SpeedEstimate::new();
        estimate.update(3, 4, Instant::from_millis(100), 1.0);
        assert_eq!(estimate.speed_per_s(), 50.0);
        estimate.update(0, 0, Instant::from_millis(105), 1.0);
        assert_eq!(estimate.speed_per_s(), 50.0);
        estimate.update(6, 8, Instant::from_millis(110), 1.0);
        assert_eq!(estimate.speed_per_s(), 1000.0);
    }

    #[test]
    fn estimate_blends_with_partial_weight() {
        let mut estimate = SpeedEstimate::new();
        estimate.update(10, 0, Instant::from_millis(10), 0.5);
        assert_eq!(estimate.speed_per_s(), 500.0);
        estimate.update(20, 0, Instant::from_millis(20), 0.5);
        assert_eq!(estimate.speed_per_s(), 1250.0);
    }

    #[test]
    fn estimate_survives_zero_elapsed_time() {
        let mut estimate = SpeedEstimate::new();
        estimate.update(1, 0, Instant::from_millis(50), 1.0);
        estimate.update(2, 0, Instant::from_millis(50), 1.0);
        assert_eq!(estimate.speed_per_s(), 2000.0);
    }

    #[test]
    fn linear_curve() {
        let mut shaper = fixed(CurveMode::Linear);
        let now = Instant::from_millis(2000);
        assert_eq!(shaper.coefficient(&SpeedEstimate::new(), now).0, 0.5);
        assert_eq!(shaper.coefficient(&estimate_of(3000, 1000), now).0, 1.0);
        // Above the nominal ceiling the linear curve keeps growing
        let (coef, _) = shaper.coefficient(&estimate_of(30000, 500), now);
        assert!(coef > shaper.config().max_coef);
    }

    #[test]
    fn square_root_curve() {
        let mut shaper = fixed(CurveMode::SquareRoot);
        let now = Instant::from_millis(2000);
        assert_eq!(shaper.coefficient(&SpeedEstimate::new(), now).0, 0.0);
        assert_eq!(shaper.coefficient(&estimate_of(3000, 1000), now).0, 1.0);
        let (coef, _) = shaper.coefficient(&estimate_of(12000, 1000), now);
        assert!((coef - 2.0).abs() < 1e-5);
    }

    #[test]
    fn exponential_curve_is_clamped() {
        let mut shaper = fixed(CurveMode::Exponential);
        let now = Instant::from_millis(2000);
        assert!((shaper.coefficient(&SpeedEstimate::new(), now).0 - 0.5).abs() < 1e-6);
        assert!((shaper.coefficient(&estimate_of(3000, 1000), now).0 - 1.0).abs() < 1e-5);
        assert_eq!(shaper.coefficient(&estimate_of(30000, 500), now).0, 8.0);
    }

    #[test]
    fn alternating_curve_emits_events_on_switch() {
        let mut shaper = SpeedShaper::new(SpeedShapingConfig::default());
        let estimate = SpeedEstimate::new();

        assert_eq!(shaper.coefficient(&estimate, Instant::from_millis(100)).1, None);
        let (_, event) = shaper.coefficient(&estimate, Instant::from_millis(16384));
        assert_eq!(
            event,
            Some(CurveModeEvent {
                slot: 3,
                mode: CurveMode::SquareRoot
            })
        );
        assert_eq!(shaper.coefficient(&estimate, Instant::from_millis(20000)).1, None);
        let (_, event) = shaper.coefficient(&estimate, Instant::from_millis(32768));
        assert_eq!(event.map(|e| e.text()), Some("LIN"));
    }

    #[test]
    fn shape_scales_both_axes() {
        let mut shaper = fixed(CurveMode::Linear);
        let mut estimate = SpeedEstimate::new();
        // 30 px in 10 ms is 3000 px/s, shaped 1:1
        let (x, y, _) = shaper.shape(&mut estimate, 18, -24, Instant::from_millis(10));
        assert_eq!((x, y), (18.0, -24.0));
        let (x, y, _) = shaper.shape(&mut estimate, 0, 0, Instant::from_millis(20));
        assert_eq!((x, y), (0.0, 0.0));
    }

    #[test]
    fn params_update_derived_constants() {
        let mut shaper = fixed(CurveMode::Linear);
        shaper.set_params(0.25, 1000.0, 1.0);
        let now = Instant::from_millis(2000);
        // 0.25 + 1.0 * 0.75
        assert_eq!(shaper.coefficient(&estimate_of(1000, 1000), now).0, 1.0);
        assert!((shaper.config().exp_base() - 4.0).abs() < 1e-6);
    }
}
