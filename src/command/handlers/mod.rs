//! Command handlers for the supported command families

mod checksum;
mod dwell;
mod echo;
mod firmware;
mod pacing;
mod position;
mod sd_card;
mod temperature;

pub use checksum::handle_checksum_line;
pub use dwell::handle_dwell;
pub use echo::handle_echo;
pub use firmware::{handle_report_firmware, FIRMWARE_REPORT};
pub use pacing::{handle_run_fast, handle_run_slow};
pub use position::{handle_report_position, POSITION_REPORT};
pub use sd_card::{handle_init_sd_card, handle_list_sd_card};
pub use temperature::{handle_report_temperature, handle_set_bed, handle_set_extruder};

use crate::device::{DeviceState, SensorNoise};

/// Context passed to command handlers
#[derive(Debug)]
pub struct HandlerContext<'a> {
    pub state: &'a mut DeviceState,
    pub noise: &'a mut SensorNoise,
    pub run_slow: &'a mut bool,
}

#[cfg(test)]
pub(crate) mod testing {
    use super::HandlerContext;
    use crate::device::{DeviceState, SensorNoise};

    /// Owned pieces a handler context borrows from
    pub struct Fixture {
        pub state: DeviceState,
        pub noise: SensorNoise,
        pub run_slow: bool,
    }

    impl Fixture {
        pub fn new() -> Self {
            Self {
                state: DeviceState::default(),
                noise: SensorNoise::new(2, Some(1)),
                run_slow: false,
            }
        }

        pub fn ctx(&mut self) -> HandlerContext<'_> {
            HandlerContext {
                state: &mut self.state,
                noise: &mut self.noise,
                run_slow: &mut self.run_slow,
            }
        }
    }
}
