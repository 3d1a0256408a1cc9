use embassy_time::Duration;
use heapless::Vec;
use rmk_pointer_types::layer::LayerId;

/// The config struct of the pointer pipeline.
///
/// All tunables live here, the pipeline itself never persists them.
#[derive(Clone, Debug)]
pub struct PointerConfig {
    /// Kinetic constants of mouse-key cursor movement
    pub move_axis: KineticAxisConfig,
    /// Kinetic constants of mouse-key scrolling
    pub scroll_axis: KineticAxisConfig,
    pub speed_shaping: SpeedShapingConfig,
    pub touchpad: TouchpadConfig,
    pub key_cluster: KeyClusterConfig,
    /// Relative motion is divided by this value before it's reported as wheel ticks
    pub scroll_speed_divisor: f32,
    /// Divide the travelled distance by √2 when moving diagonally
    pub compensate_diagonal_speed: bool,
    /// Layers on which relative motion of pointing modules scrolls instead of moving the cursor
    pub scroll_layers: Vec<LayerId, 4>,
    /// Period of the pointer tick
    pub tick_interval: Duration,
}

impl Default for PointerConfig {
    fn default() -> Self {
        let mut scroll_layers = Vec::new();
        let _ = scroll_layers.push(LayerId::Mouse);
        let _ = scroll_layers.push(LayerId::Fn);
        Self {
            move_axis: KineticAxisConfig::default_move(),
            scroll_axis: KineticAxisConfig::default_scroll(),
            speed_shaping: SpeedShapingConfig::default(),
            touchpad: TouchpadConfig::default(),
            key_cluster: KeyClusterConfig::default(),
            scroll_speed_divisor: 8.0,
            compensate_diagonal_speed: false,
            scroll_layers,
            tick_interval: Duration::from_millis(1),
        }
    }
}

impl PointerConfig {
    pub fn is_scroll_layer(&self, layer: LayerId) -> bool {
        self.scroll_layers.contains(&layer)
    }
}

/// Kinetic constants of one mouse-key axis pair.
///
/// Speeds are given in "units" and multiplied by `unit_scale` to get pixels (or wheel ticks)
/// per second. `acceleration` is in units per second squared.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KineticAxisConfig {
    pub unit_scale: f32,
    /// Speed at which the motion starts
    pub initial_speed: f32,
    pub acceleration: f32,
    /// Target speed while the decelerate modifier is held
    pub decelerated_speed: f32,
    /// Target speed without any modifier
    pub base_speed: f32,
    /// Target speed while the accelerate modifier or a double press is held
    pub accelerated_speed: f32,
}

impl KineticAxisConfig {
    pub const fn default_move() -> Self {
        Self {
            unit_scale: 25.0,
            initial_speed: 5.0,
            acceleration: 35.0,
            decelerated_speed: 10.0,
            base_speed: 40.0,
            accelerated_speed: 80.0,
        }
    }

    pub const fn default_scroll() -> Self {
        Self {
            unit_scale: 1.0,
            initial_speed: 20.0,
            acceleration: 20.0,
            decelerated_speed: 10.0,
            base_speed: 20.0,
            accelerated_speed: 50.0,
        }
    }
}

/// Which speed curve the speed shaper uses
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CurveMode {
    /// `min + v * (mid - min)`
    Linear,
    /// `2 * min * v ^ (mid - min)`
    SquareRoot,
    /// `exp_base ^ (v + exp_shift)`, clamped to `max_coef`
    Exponential,
}

impl CurveMode {
    /// Short label shown on the status display
    pub const fn label(self) -> &'static str {
        match self {
            CurveMode::Linear => "LIN",
            CurveMode::SquareRoot => "SRT",
            CurveMode::Exponential => "EXP",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurveSelection {
    /// Alternate between linear and square root curves, switching every `curve_switch_period`
    Alternating,
    /// Always use the given curve
    Fixed(CurveMode),
}

/// Config of the non-linear speed shaping applied to trackball and touchpad motion
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedShapingConfig {
    /// Multiplier applied at 0 px/s
    pub min_coef: f32,
    /// Speed (px/s) which is scaled 1:1 with `mid_coef`
    pub mid_speed: f32,
    pub mid_coef: f32,
    /// Ceiling of the exponential curve
    pub max_coef: f32,
    /// Weight of a new sample in the speed estimate, 1.0 replaces the estimate
    pub weight_factor: f32,
    pub curve: CurveSelection,
    pub curve_switch_period: Duration,
    /// Status display slot which shows the active curve
    pub display_slot: u8,
    pub(crate) exp_base: f32,
    pub(crate) exp_shift: f32,
}

impl Default for SpeedShapingConfig {
    fn default() -> Self {
        let mut config = Self {
            min_coef: 0.5,
            mid_speed: 3000.0,
            mid_coef: 1.0,
            max_coef: 8.0,
            weight_factor: 1.0,
            curve: CurveSelection::Alternating,
            curve_switch_period: Duration::from_millis(16384),
            display_slot: 3,
            exp_base: 2.0,
            exp_shift: -1.0,
        };
        config.set_exp_driver_params(0.5, 3000.0, 1.0);
        config
    }
}

impl SpeedShapingConfig {
    /// Set the shaping parameters and recompute the derived exponential constants
    pub fn set_exp_driver_params(&mut self, min_coef: f32, mid_speed: f32, mid_coef: f32) {
        self.min_coef = min_coef;
        self.mid_speed = mid_speed;
        self.mid_coef = mid_coef;
        self.exp_base = mid_coef / min_coef;
        self.exp_shift = libm::logf(min_coef) / libm::logf(self.exp_base);
    }

    pub fn exp_base(&self) -> f32 {
        self.exp_base
    }

    pub fn exp_shift(&self) -> f32 {
        self.exp_shift
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TouchpadConfig {
    /// Touchpad wheel units per reported wheel tick
    pub scroll_divisor: i16,
}

impl Default for TouchpadConfig {
    fn default() -> Self {
        Self { scroll_divisor: 8 }
    }
}

/// Hysteresis of the key cluster to arrow key conversion
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyClusterConfig {
    /// Accumulated motion which emits an arrow key on the axis that fired last.
    /// The other axis needs twice as much.
    pub threshold: i8,
    /// Accumulated motion is dropped after this much inactivity
    pub inactivity_timeout: Duration,
}

impl Default for KeyClusterConfig {
    fn default() -> Self {
        Self {
            threshold: 1,
            inactivity_timeout: Duration::from_millis(500),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exp_constants_follow_params() {
        let mut config = SpeedShapingConfig::default();
        assert!((config.exp_base() - 2.0).abs() < 1e-6);
        assert!((config.exp_shift() + 1.0).abs() < 1e-6);

        config.set_exp_driver_params(0.25, 2000.0, 1.0);
        assert_eq!(config.mid_speed, 2000.0);
        assert!((config.exp_base() - 4.0).abs() < 1e-6);
        assert!((config.exp_shift() + 1.0).abs() < 1e-6);
    }

    #[test]
    fn default_scroll_layers() {
        let config = PointerConfig::default();
        assert!(config.is_scroll_layer(LayerId::Mouse));
        assert!(config.is_scroll_layer(LayerId::Fn));
        assert!(!config.is_scroll_layer(LayerId::Base));
        assert_eq!(config.scroll_speed_divisor, 8.0);
    }

    #[test]
    fn curve_labels() {
        assert_eq!(CurveMode::Linear.label(), "LIN");
        assert_eq!(CurveMode::SquareRoot.label(), "SRT");
        assert_eq!(CurveMode::Exponential.label(), "EXP");
    }
}
