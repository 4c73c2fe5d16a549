//! Printer Emulator Protocol
//!
//! This crate provides the wire-level pieces of the Marlin-style serial
//! protocol spoken by the emulator: byte stream line framing, checksum line
//! normalization, command key extraction and parameter parsing.

pub mod codec;
pub mod line;
pub mod params;
pub mod state_machine;

pub use codec::{CodecError, LineDecoder};
pub use line::{
    checksum, command_key, normalize, parse_checksum_frame, strip_line_endings, ChecksumFrame,
    FrameError, Normalized,
};
pub use params::{integer_after, number_after, ParamError};

/// Acknowledgment sent after every command
pub const OK: &str = "ok\n";

/// Protocol line terminator
pub const LINE_TERMINATOR: char = '\n';

/// Marker that starts a line-numbered, checksummed command
pub const LINE_NUMBER_MARKER: char = 'N';

/// Marker that separates the payload from its checksum
pub const CHECKSUM_MARKER: char = '*';

/// Serial link defaults
pub mod serial {
    /// Baud rate Marlin boards talk at
    pub const BAUD_RATE: u32 = 250_000;

    /// How long a single read may block before the loop polls again
    pub const READ_TIMEOUT_MS: u64 = 1000;

    /// Artificial latency added to every response in slow mode
    pub const SLOW_DELAY_MS: u64 = 20;
}

/// Emulated device defaults
pub mod device {
    /// Extruder target temperature at power-on
    pub const DEFAULT_EXTRUDER_TARGET: i32 = 210;

    /// Half-width of the sensor noise band, reported values fall in [-w, w)
    pub const DEFAULT_JITTER: i32 = 2;
}
