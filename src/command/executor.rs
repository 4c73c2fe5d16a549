//! Command executor - normalizes and dispatches incoming lines

use super::dispatch::{CommandKind, DispatchTable};
use super::handlers::{self, HandlerContext};
use crate::config::EmulatorConfig;
use crate::device::{DeviceState, SensorNoise};
use printer_emulator_protocol::{command_key, normalize, strip_line_endings, Normalized, OK};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Result of running a handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Send this text back
    Reply(String),
    /// Send this text back once `duration` has passed
    Wait { reply: String, duration: Duration },
    /// The command could not be parsed; state was left alone
    Malformed { reason: String },
}

/// What the emulation loop should write, and when
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub text: String,
    /// Hold the response back this long before writing it
    pub delay: Option<Duration>,
}

/// Owns the device state and answers one command at a time
pub struct CommandExecutor {
    table: DispatchTable,
    state: DeviceState,
    noise: SensorNoise,
    run_slow: bool,
    slow_delay: Duration,
    verify_checksums: bool,
}

impl CommandExecutor {
    /// Create a new command executor with the standard dispatch table
    pub fn new(config: &EmulatorConfig) -> Self {
        Self::with_table(DispatchTable::standard(), config)
    }

    /// Create an executor around a custom dispatch table
    pub fn with_table(table: DispatchTable, config: &EmulatorConfig) -> Self {
        debug!("Dispatch table holds {} commands", table.len());
        Self {
            table,
            state: DeviceState::from_config(config),
            noise: SensorNoise::new(config.jitter, config.seed),
            run_slow: config.run_slow,
            slow_delay: config.slow_delay,
            verify_checksums: config.verify_checksums,
        }
    }

    /// Get the current device state
    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// Whether responses are currently delayed
    pub fn run_slow(&self) -> bool {
        self.run_slow
    }

    /// Answer one received line
    ///
    /// Never fails: anything that cannot be understood is acknowledged with `ok`.
    pub fn execute(&mut self, raw_line: &str) -> Response {
        let line = strip_line_endings(raw_line);

        let result = match normalize(&line) {
            Ok(normalized) => {
                if self.verify_checksums {
                    check_frame(&normalized);
                }
                self.dispatch(normalized.payload())
            }
            Err(e) => CommandResult::Malformed {
                reason: format!("line {:?}: {}", line, e),
            },
        };

        let (text, wait) = match result {
            CommandResult::Reply(text) => (text, None),
            CommandResult::Wait { reply, duration } => (reply, Some(duration)),
            CommandResult::Malformed { reason } => {
                warn!("Malformed command, state unchanged: {}", reason);
                (OK.to_string(), None)
            }
        };

        debug!("Response: {:?}", text);

        Response {
            text,
            delay: self.response_delay(wait),
        }
    }

    /// Look up the key and run the matching handler
    fn dispatch(&mut self, command: &str) -> CommandResult {
        let key = command_key(command);

        let Some(kind) = self.table.lookup(key) else {
            info!("Command {} not found", command);
            return CommandResult::Reply(OK.into());
        };

        if kind == CommandKind::ReportTemperature {
            debug!("Received: {}", command);
        } else {
            info!("Received: {}", command);
        }

        let mut ctx = HandlerContext {
            state: &mut self.state,
            noise: &mut self.noise,
            run_slow: &mut self.run_slow,
        };

        match kind {
            CommandKind::ReportTemperature => handlers::handle_report_temperature(&mut ctx, command),
            CommandKind::ReportPosition => handlers::handle_report_position(&mut ctx, command),
            CommandKind::ReportFirmware => handlers::handle_report_firmware(&mut ctx, command),
            CommandKind::SetExtruderTemperature => handlers::handle_set_extruder(&mut ctx, command),
            CommandKind::SetBedTemperature => handlers::handle_set_bed(&mut ctx, command),
            CommandKind::Echo => handlers::handle_echo(&mut ctx, command),
            CommandKind::ChecksumLine => handlers::handle_checksum_line(&mut ctx, command),
            CommandKind::Dwell => handlers::handle_dwell(&mut ctx, command),
            CommandKind::ListSdCard => handlers::handle_list_sd_card(&mut ctx, command),
            CommandKind::InitSdCard => handlers::handle_init_sd_card(&mut ctx, command),
            CommandKind::RunSlow => handlers::handle_run_slow(&mut ctx, command),
            CommandKind::RunFast => handlers::handle_run_fast(&mut ctx, command),
        }
    }

    /// Handler wait plus the slow-mode latency, if any
    fn response_delay(&self, wait: Option<Duration>) -> Option<Duration> {
        let slow = self.run_slow.then_some(self.slow_delay);
        match (wait, slow) {
            (Some(wait), Some(slow)) => Some(wait + slow),
            (wait, slow) => wait.or(slow),
        }
    }
}

/// Warn about a declared checksum that does not match the line
fn check_frame(normalized: &Normalized) {
    if let Normalized::Framed(frame) = normalized {
        if !frame.checksum_matches() {
            warn!(
                "Checksum mismatch on line {:?}: declared {:?}, computed {}",
                frame.line_number,
                frame.checksum,
                frame.computed_checksum()
            );
        }
    }
}
