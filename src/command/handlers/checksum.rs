//! Checksum line handler (N)
//!
//! Normalization unwraps framed lines before dispatch, so this only sees a
//! payload that itself starts with a bare `N ` token. Its `*` was already
//! consumed by the outer frame, so the usual input is `N <payload>` with no
//! checksum; a full `N<seq> <payload>*<checksum>` frame is unwrapped as well.

use super::HandlerContext;
use crate::command::CommandResult;
use printer_emulator_protocol::{parse_checksum_frame, FrameError};

/// Handle N - answer with the unwrapped payload
pub fn handle_checksum_line(_ctx: &mut HandlerContext, command: &str) -> CommandResult {
    match parse_checksum_frame(command) {
        Ok(frame) => CommandResult::Reply(format!("{}\n", frame.payload)),
        Err(FrameError::MissingChecksum) => match command.split_once(' ') {
            Some((_, payload)) => CommandResult::Reply(format!("{}\n", payload)),
            None => CommandResult::Malformed {
                reason: format!("checksum line {:?}: {}", command, FrameError::MissingPayload),
            },
        },
        Err(e) => CommandResult::Malformed {
            reason: format!("checksum line {:?}: {}", command, e),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::handlers::testing::Fixture;

    #[test]
    fn test_framed_payload_returned() {
        let mut fixture = Fixture::new();
        let result = handle_checksum_line(&mut fixture.ctx(), "N M105*12");
        assert_eq!(result, CommandResult::Reply("M105\n".into()));
    }

    #[test]
    fn test_payload_without_checksum_returned() {
        let mut fixture = Fixture::new();
        let result = handle_checksum_line(&mut fixture.ctx(), "N M105");
        assert_eq!(result, CommandResult::Reply("M105\n".into()));
    }

    #[test]
    fn test_missing_payload_is_malformed() {
        let mut fixture = Fixture::new();
        let result = handle_checksum_line(&mut fixture.ctx(), "NM105");
        assert!(matches!(result, CommandResult::Malformed { .. }));
    }
}
