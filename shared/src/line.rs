//! Command line normalization
//!
//! Turns a raw received line into the bare command payload:
//! - line terminators are dropped wherever they appear
//! - `N<seq> <payload>*<checksum>` framing is unwrapped
//!
//! The checksum is parsed and exposed but never enforced here.

use crate::{CHECKSUM_MARKER, LINE_NUMBER_MARKER};
use thiserror::Error;

/// Ways a line-numbered command can be malformed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("no space between line number and payload")]
    MissingPayload,

    #[error("no '*' checksum marker")]
    MissingChecksum,

    #[error("checksum marker at byte {marker} comes before the payload at byte {payload}")]
    ChecksumBeforePayload { marker: usize, payload: usize },
}

/// A line-numbered command split into its parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumFrame<'a> {
    /// Declared line number, `None` if it is not a number
    pub line_number: Option<u64>,
    /// Command text between the first space and the checksum marker
    pub payload: &'a str,
    /// Declared checksum, `None` if it is not a byte value
    pub checksum: Option<u8>,
    /// Everything the checksum covers (the line up to the marker)
    pub covered: &'a str,
}

impl ChecksumFrame<'_> {
    /// Checksum computed over the covered text
    pub fn computed_checksum(&self) -> u8 {
        checksum(self.covered)
    }

    /// Whether the declared checksum matches the covered text
    pub fn checksum_matches(&self) -> bool {
        self.checksum == Some(self.computed_checksum())
    }
}

/// Result of normalizing a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized<'a> {
    /// Plain command, no line-number framing
    Bare(&'a str),
    /// Command unwrapped from `N<seq> <payload>*<checksum>`
    Framed(ChecksumFrame<'a>),
}

impl<'a> Normalized<'a> {
    /// The command text to dispatch on
    pub fn payload(&self) -> &'a str {
        match self {
            Normalized::Bare(payload) => *payload,
            Normalized::Framed(frame) => frame.payload,
        }
    }
}

/// Remove every `\r` and `\n` from a raw line, joining the fragments
pub fn strip_line_endings(raw: &str) -> String {
    raw.split(['\r', '\n']).collect()
}

/// Marlin line checksum: XOR of every byte
pub fn checksum(text: &str) -> u8 {
    text.bytes().fold(0, |acc, b| acc ^ b)
}

/// Split `N<seq> <payload>*<checksum>` into its parts
pub fn parse_checksum_frame(line: &str) -> Result<ChecksumFrame<'_>, FrameError> {
    let space = line.find(' ').ok_or(FrameError::MissingPayload)?;
    let marker = line.find(CHECKSUM_MARKER).ok_or(FrameError::MissingChecksum)?;
    if marker <= space {
        return Err(FrameError::ChecksumBeforePayload {
            marker,
            payload: space + 1,
        });
    }

    let number = line
        .strip_prefix(LINE_NUMBER_MARKER)
        .map_or(&line[..space], |rest| &rest[..space - 1]);

    Ok(ChecksumFrame {
        line_number: number.trim().parse().ok(),
        payload: &line[space + 1..marker],
        checksum: line[marker + 1..].trim().parse().ok(),
        covered: &line[..marker],
    })
}

/// Unwrap line-number framing if the line carries it
///
/// `line` must already have its terminators stripped.
pub fn normalize(line: &str) -> Result<Normalized<'_>, FrameError> {
    if line.starts_with(LINE_NUMBER_MARKER) {
        parse_checksum_frame(line).map(Normalized::Framed)
    } else {
        Ok(Normalized::Bare(line))
    }
}

/// Dispatch key: everything up to the first space
pub fn command_key(payload: &str) -> &str {
    payload.split_once(' ').map_or(payload, |(key, _)| key)
}
