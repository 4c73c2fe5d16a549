//! Configuration for the emulator
//!
//! Handles:
//! - Command-line argument parsing
//! - Transport selection (serial device or TCP listener)
//! - Emulated device defaults

use anyhow::{bail, Result};
use clap::Parser;
use printer_emulator_protocol::{device, serial};
use std::time::Duration;

/// Command-line arguments for the printer emulator
#[derive(Debug, Parser)]
#[command(name = "printer-emulator")]
#[command(about = "Emulates a Marlin 3D printer on a serial port")]
#[command(version)]
pub struct Args {
    /// Serial device to answer on (e.g. /dev/ttyS1 or one end of a socat pty pair)
    #[arg(required_unless_present = "tcp")]
    pub port: Option<String>,

    /// Add an artificial delay before every response
    #[arg(long)]
    pub slow: bool,

    /// Serve a single TCP client at this address instead of a serial device
    #[arg(long, conflicts_with = "port", value_name = "ADDR")]
    pub tcp: Option<String>,

    /// Serial baud rate
    #[arg(long, default_value_t = serial::BAUD_RATE)]
    pub baud: u32,

    /// How long a read may block before polling again
    #[arg(long, default_value_t = serial::READ_TIMEOUT_MS)]
    pub read_timeout_ms: u64,

    /// Delay added to each response in slow mode
    #[arg(long, default_value_t = serial::SLOW_DELAY_MS)]
    pub slow_delay_ms: u64,

    /// Extruder target temperature at startup
    #[arg(long, default_value_t = device::DEFAULT_EXTRUDER_TARGET, allow_negative_numbers = true)]
    pub extruder_temp: i32,

    /// Bed target temperature at startup; no bed is installed when omitted
    #[arg(long, allow_negative_numbers = true)]
    pub bed_temp: Option<i32>,

    /// Half-width of the temperature noise band
    #[arg(long, default_value_t = device::DEFAULT_JITTER)]
    pub jitter: i32,

    /// Seed for the temperature noise, for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log a warning when a line's checksum does not match
    #[arg(long)]
    pub verify_checksums: bool,
}

/// Where the emulator listens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportConfig {
    /// Serial device (e.g. "/dev/ttyUSB0")
    Serial { path: String, baud: u32 },
    /// TCP listener (e.g. "127.0.0.1:5000")
    Tcp { address: String },
}

/// Behaviour of the emulated printer
#[derive(Debug, Clone)]
pub struct EmulatorConfig {
    /// Start in slow mode
    pub run_slow: bool,
    /// Delay applied to each response in slow mode
    pub slow_delay: Duration,
    /// Bound on a single blocking read
    pub read_timeout: Duration,
    /// Initial extruder target temperature
    pub extruder_target: i32,
    /// Initial bed target temperature, `None` for no bed
    pub bed_target: Option<i32>,
    /// Half-width of the temperature noise band
    pub jitter: i32,
    /// Seed for the noise generator
    pub seed: Option<u64>,
    /// Compare declared and computed checksums
    pub verify_checksums: bool,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            run_slow: false,
            slow_delay: Duration::from_millis(serial::SLOW_DELAY_MS),
            read_timeout: Duration::from_millis(serial::READ_TIMEOUT_MS),
            extruder_target: device::DEFAULT_EXTRUDER_TARGET,
            bed_target: None,
            jitter: device::DEFAULT_JITTER,
            seed: None,
            verify_checksums: false,
        }
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub transport: TransportConfig,
    pub emulator: EmulatorConfig,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        if args.jitter < 0 {
            bail!("Jitter must not be negative (got {})", args.jitter);
        }

        let transport = match (args.tcp, args.port) {
            (Some(address), _) => TransportConfig::Tcp { address },
            (None, Some(path)) => TransportConfig::Serial {
                path,
                baud: args.baud,
            },
            (None, None) => bail!("Either a serial port or --tcp must be given"),
        };

        Ok(Config {
            transport,
            emulator: EmulatorConfig {
                run_slow: args.slow,
                slow_delay: Duration::from_millis(args.slow_delay_ms),
                read_timeout: Duration::from_millis(args.read_timeout_ms),
                extruder_target: args.extruder_temp,
                bed_target: args.bed_temp,
                jitter: args.jitter,
                seed: args.seed,
                verify_checksums: args.verify_checksums,
            },
        })
    }
}
