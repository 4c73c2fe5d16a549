//! Emulated printer state
//!
//! Holds the heater setpoints the temperature commands read and write, plus
//! the noise source that makes reported temperatures wander like a real
//! thermistor.

use crate::config::EmulatorConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Heater setpoints of the emulated printer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceState {
    /// Extruder target temperature
    pub extruder_target: i32,
    /// Bed target temperature, `None` when no heated bed is installed
    pub bed_target: Option<i32>,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self {
            extruder_target: printer_emulator_protocol::device::DEFAULT_EXTRUDER_TARGET,
            bed_target: None,
        }
    }
}

impl DeviceState {
    /// Initial state from the emulator configuration
    pub fn from_config(config: &EmulatorConfig) -> Self {
        Self {
            extruder_target: config.extruder_target,
            bed_target: config.bed_target,
        }
    }

    /// Whether a heated bed is reported
    pub fn has_bed(&self) -> bool {
        self.bed_target.is_some()
    }

    pub fn set_extruder_target(&mut self, target: i32) {
        self.extruder_target = target;
    }

    /// Setting a bed target installs the bed
    pub fn set_bed_target(&mut self, target: i32) {
        self.bed_target = Some(target);
    }
}

/// Random offset added to every reported temperature
#[derive(Debug)]
pub struct SensorNoise {
    rng: StdRng,
    half_width: i32,
}

impl SensorNoise {
    /// Noise in `[-half_width, half_width)`, seeded for reproducible runs
    pub fn new(half_width: i32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng,
            half_width: half_width.max(0),
        }
    }

    /// Draw a fresh offset
    pub fn sample(&mut self) -> i32 {
        if self.half_width == 0 {
            return 0;
        }
        self.rng.random_range(-self.half_width..self.half_width)
    }
}
