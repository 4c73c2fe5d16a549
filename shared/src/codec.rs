//! Newline-delimited codec for serial framing
//!
//! Hosts send one command per line:
//! ```text
//! [ N bytes: command text ][ '\n' ]
//! ```
//!
//! Bytes arrive in arbitrary chunks, so partial lines are buffered until the
//! terminator shows up.

use bytes::{Buf, BytesMut};
use thiserror::Error;

/// Longest line accepted before the buffered bytes are thrown away
pub const MAX_LINE_LENGTH: usize = 4096;

/// Errors that can occur while splitting the byte stream into lines
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CodecError {
    #[error("Line too long: {0} bytes without a terminator (max: {MAX_LINE_LENGTH})")]
    LineTooLong(usize),
}

/// Try to split one terminated line off the front of a buffer
///
/// Returns:
/// - `Some(line)` with the terminator still attached
/// - `None` if no terminator has arrived yet
pub fn decode(buf: &mut BytesMut) -> Option<String> {
    let end = buf.iter().position(|&b| b == b'\n')?;
    let line = buf.split_to(end + 1);
    Some(String::from_utf8_lossy(&line).into_owned())
}

/// Decoder state machine for streaming decoding
#[derive(Debug, Default)]
pub struct LineDecoder {
    /// Partial line data being accumulated
    buffer: BytesMut,
    /// Set after an overlong line, until its terminator is skipped
    discarding: bool,
}

impl LineDecoder {
    /// Create a new line decoder
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::with_capacity(MAX_LINE_LENGTH),
            discarding: false,
        }
    }

    /// Add data to the decoder buffer
    pub fn extend(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Try to decode the next line from the buffer
    ///
    /// Call this repeatedly until it returns `Ok(None)` to drain all complete lines.
    /// An overlong line is reported once and the rest of it is skipped.
    pub fn decode_next(&mut self) -> Result<Option<String>, CodecError> {
        if self.discarding {
            match self.buffer.iter().position(|&b| b == b'\n') {
                Some(end) => {
                    self.buffer.advance(end + 1);
                    self.discarding = false;
                }
                None => {
                    self.buffer.clear();
                    return Ok(None);
                }
            }
        }

        if let Some(line) = decode(&mut self.buffer) {
            return Ok(Some(line));
        }

        if self.buffer.len() > MAX_LINE_LENGTH {
            let len = self.buffer.len();
            self.buffer.clear();
            self.discarding = true;
            return Err(CodecError::LineTooLong(len));
        }

        Ok(None)
    }

    /// Get the current buffer length (for debugging)
    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_single_line() {
        let mut buf = BytesMut::from(&b"M105\n"[..]);
        assert_eq!(decode(&mut buf).as_deref(), Some("M105\n"));
        assert!(buf.is_empty(), "buffer should be empty after decode");
    }

    #[test]
    fn test_partial_decode() {
        let mut buf = BytesMut::from(&b"M10"[..]);
        assert!(decode(&mut buf).is_none(), "should return None for partial data");

        // Buffer should be unchanged (data not consumed)
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn test_line_decoder_reassembles_chunks() {
        let mut decoder = LineDecoder::new();

        decoder.extend(b"M104 S2");
        assert!(decoder.decode_next().expect("decode error").is_none());

        decoder.extend(b"20\r\nM1");
        let line = decoder
            .decode_next()
            .expect("decode error")
            .expect("should have line");
        assert_eq!(line, "M104 S220\r\n");
        assert_eq!(decoder.buffer_len(), 2);
    }

    #[test]
    fn test_multiple_lines() {
        let mut decoder = LineDecoder::new();
        decoder.extend(b"M105\nM114\n");

        assert_eq!(decoder.decode_next().unwrap().as_deref(), Some("M105\n"));
        assert_eq!(decoder.decode_next().unwrap().as_deref(), Some("M114\n"));
        assert!(decoder.decode_next().unwrap().is_none());
    }

    #[test]
    fn test_line_too_long_is_skipped() {
        let mut decoder = LineDecoder::new();
        decoder.extend(&vec![b'G'; MAX_LINE_LENGTH + 1]);

        let result = decoder.decode_next();
        assert!(matches!(result, Err(CodecError::LineTooLong(_))));
        assert_eq!(decoder.buffer_len(), 0);

        // Tail of the oversized line is dropped, the next line survives
        decoder.extend(b"GGGG\nM105\n");
        assert_eq!(decoder.decode_next().unwrap().as_deref(), Some("M105\n"));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut decoder = LineDecoder::new();
        decoder.extend(&[b'A', 0xff, b'\n']);
        let line = decoder.decode_next().unwrap().unwrap();
        assert!(line.starts_with('A'));
        assert!(line.ends_with('\n'));
    }
}
