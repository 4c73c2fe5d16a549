//! Dwell handler (G4)

use super::HandlerContext;
use crate::command::CommandResult;
use printer_emulator_protocol::{number_after, ParamError, OK};
use std::time::Duration;
use tracing::debug;

/// Handle G4 - hold the acknowledgment for `S` seconds or `P` milliseconds
pub fn handle_dwell(_ctx: &mut HandlerContext, command: &str) -> CommandResult {
    let seconds = match number_after(command, 'S') {
        Ok(seconds) => seconds,
        Err(ParamError::Missing(_)) => match number_after(command, 'P') {
            Ok(millis) => millis / 1000.0,
            Err(ParamError::Missing(_)) => 0.0,
            Err(e) => return malformed(e),
        },
        Err(e) => return malformed(e),
    };

    if seconds <= 0.0 {
        return CommandResult::Reply(OK.into());
    }

    let duration = match Duration::try_from_secs_f64(seconds) {
        Ok(duration) => duration,
        Err(e) => {
            return CommandResult::Malformed {
                reason: format!("dwell time {}: {}", seconds, e),
            }
        }
    };
    debug!("  [G4] Dwelling for {:?}", duration);

    CommandResult::Wait {
        reply: OK.into(),
        duration,
    }
}

fn malformed(e: ParamError) -> CommandResult {
    CommandResult::Malformed {
        reason: format!("dwell time: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::handlers::testing::Fixture;

    #[test]
    fn test_dwell_seconds() {
        let mut fixture = Fixture::new();
        let result = handle_dwell(&mut fixture.ctx(), "G4 S2");
        assert_eq!(
            result,
            CommandResult::Wait {
                reply: "ok\n".into(),
                duration: Duration::from_secs(2),
            }
        );
    }

    #[test]
    fn test_dwell_millis() {
        let mut fixture = Fixture::new();
        let result = handle_dwell(&mut fixture.ctx(), "G4 P250");
        assert_eq!(
            result,
            CommandResult::Wait {
                reply: "ok\n".into(),
                duration: Duration::from_millis(250),
            }
        );
    }

    #[test]
    fn test_dwell_without_time() {
        let mut fixture = Fixture::new();
        assert_eq!(
            handle_dwell(&mut fixture.ctx(), "G4"),
            CommandResult::Reply("ok\n".into())
        );
        assert_eq!(
            handle_dwell(&mut fixture.ctx(), "G4 S-3"),
            CommandResult::Reply("ok\n".into())
        );
    }

    #[test]
    fn test_dwell_out_of_range() {
        let mut fixture = Fixture::new();
        let result = handle_dwell(&mut fixture.ctx(), "G4 S1e30");
        assert!(matches!(result, CommandResult::Malformed { .. }));
    }

    #[test]
    fn test_dwell_garbage() {
        let mut fixture = Fixture::new();
        let result = handle_dwell(&mut fixture.ctx(), "G4 Sx");
        assert!(matches!(result, CommandResult::Malformed { .. }));
    }
}
