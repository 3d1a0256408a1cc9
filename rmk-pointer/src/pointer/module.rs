//! Relative motion from attached pointing modules.
//!
//! Trackball and trackpoint deltas are summed into the shared motion accumulator, the
//! trackball after speed shaping. The key cluster is a tiny directional pad whose motion is
//! turned into arrow key taps.
use embassy_time::Instant;
use heapless::Vec;
use postcard::experimental::max_size::MaxSize;
use rmk_pointer_types::keycode::ArrowKey;
use rmk_pointer_types::module::ModuleKind;
use serde::{Deserialize, Serialize};

use super::report::MotionSum;
use super::shaping::{CurveModeEvent, SpeedEstimate, SpeedShaper};
use crate::config::KeyClusterConfig;

/// Maximum number of arrow keys one tick can emit, the size of a boot keyboard report
pub const MAX_ARROW_KEYS: usize = 6;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, MaxSize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PointerDelta {
    pub x: i16,
    pub y: i16,
}

/// State of one attached module, written by the module driver
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModuleState {
    pub kind: ModuleKind,
    /// Motion since the last tick, zeroed by the pointer tick
    pub pointer_delta: PointerDelta,
    /// Number of pointer reports the module produced, zero if the module is not a pointer
    pub pointer_count: u8,
}

impl ModuleState {
    pub const fn new(kind: ModuleKind) -> Self {
        Self {
            kind,
            pointer_delta: PointerDelta { x: 0, y: 0 },
            pointer_count: 0,
        }
    }

    pub fn is_pointer(&self) -> bool {
        self.pointer_count > 0
    }
}

/// Axis on which the key cluster emitted its last arrow key
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ClusterAxis {
    None,
    Horizontal,
    Vertical,
}

/// Converts key cluster motion into arrow keys with hysteresis
struct KeyCluster {
    config: KeyClusterConfig,
    x: i8,
    y: i8,
    last_axis: ClusterAxis,
    last_update: Option<Instant>,
}

impl KeyCluster {
    fn new(config: KeyClusterConfig) -> Self {
        Self {
            config,
            x: 0,
            y: 0,
            last_axis: ClusterAxis::None,
            last_update: None,
        }
    }

    fn reset(&mut self) {
        self.x = 0;
        self.y = 0;
        self.last_axis = ClusterAxis::None;
    }

    fn process(&mut self, delta: PointerDelta, now: Instant, keys: &mut Vec<ArrowKey, MAX_ARROW_KEYS>) {
        if delta.x != 0 || delta.y != 0 {
            let stale = match self.last_update {
                Some(last) => now.saturating_duration_since(last) > self.config.inactivity_timeout,
                None => true,
            };
            if stale {
                trace!("Key cluster inactive, dropping accumulated motion");
                self.reset();
            }
            self.last_update = Some(now);
        }

        self.x = self.x.saturating_add(delta.x.clamp(i8::MIN as i16, i8::MAX as i16) as i8);
        self.y = self.y.saturating_add(delta.y.clamp(i8::MIN as i16, i8::MAX as i16) as i8);

        if self.fires(self.x, ClusterAxis::Horizontal) {
            self.emit(ArrowKey::Right, ClusterAxis::Horizontal, keys);
        }
        if self.fires(self.x.saturating_neg(), ClusterAxis::Horizontal) {
            self.emit(ArrowKey::Left, ClusterAxis::Horizontal, keys);
        }
        if self.fires(self.y, ClusterAxis::Vertical) {
            self.emit(ArrowKey::Down, ClusterAxis::Vertical, keys);
        }
        if self.fires(self.y.saturating_neg(), ClusterAxis::Vertical) {
            self.emit(ArrowKey::Up, ClusterAxis::Vertical, keys);
        }
    }

    /// Continuing on the last axis needs the threshold, a fresh axis twice as much
    fn fires(&self, value: i8, axis: ClusterAxis) -> bool {
        let threshold = self.config.threshold;
        (value >= threshold && self.last_axis == axis) || value >= threshold.saturating_mul(2)
    }

    fn emit(&mut self, key: ArrowKey, axis: ClusterAxis, keys: &mut Vec<ArrowKey, MAX_ARROW_KEYS>) {
        debug!("Key cluster emits {:?}", key);
        if keys.push(key).is_err() {
            warn!("Arrow key report full, dropping {:?}", key);
        }
        self.x = 0;
        self.y = 0;
        self.last_axis = axis;
    }
}

/// Routes the deltas of all attached modules
pub struct RelativeModuleAdapter {
    key_cluster: KeyCluster,
}

impl RelativeModuleAdapter {
    pub fn new(config: KeyClusterConfig) -> Self {
        Self {
            key_cluster: KeyCluster::new(config),
        }
    }

    /// Consume the deltas of all pointer modules.
    ///
    /// Returns whether any module contributed this tick. Hardware reports y downwards, so
    /// vertical motion of trackball and trackpoint is inverted.
    pub fn process(
        &mut self,
        modules: &mut [ModuleState],
        shaper: &mut SpeedShaper,
        speed: &mut SpeedEstimate,
        now: Instant,
        sum: &mut MotionSum,
        keys: &mut Vec<ArrowKey, MAX_ARROW_KEYS>,
        curve_events: &mut Vec<CurveModeEvent, 2>,
    ) -> bool {
        let mut changed = false;
        for module in modules.iter_mut().filter(|m| m.is_pointer()) {
            changed = true;
            let delta = module.pointer_delta;
            match module.kind {
                ModuleKind::KeyCluster => self.key_cluster.process(delta, now, keys),
                // Touchpad motion arrives through its own event record
                ModuleKind::Touchpad => {}
                ModuleKind::Trackball => {
                    let (x, y, event) = shaper.shape(speed, delta.x, delta.y, now);
                    if let Some(event) = event {
                        let _ = curve_events.push(event);
                    }
                    sum.add(x, -y);
                }
                ModuleKind::Trackpoint => sum.add(delta.x as f32, -(delta.y as f32)),
            }
            module.pointer_delta = PointerDelta::default();
        }
        changed
    }
}
