//! Position report handler (M114)

use super::HandlerContext;
use crate::command::CommandResult;

/// Fixed position block; the emulator does not track motion
pub const POSITION_REPORT: &str =
    "X:0.00 Y:0.00 Z0.00 E:0.00 Count X: 0.00 Y:0.00 Z:0.00\nok\n";

/// Handle M114 - report current position
pub fn handle_report_position(_ctx: &mut HandlerContext, _command: &str) -> CommandResult {
    CommandResult::Reply(POSITION_REPORT.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::handlers::testing::Fixture;

    #[test]
    fn test_position_is_idempotent() {
        let mut fixture = Fixture::new();
        let first = handle_report_position(&mut fixture.ctx(), "M114");
        let second = handle_report_position(&mut fixture.ctx(), "M114");
        assert_eq!(first, second);
        assert_eq!(first, CommandResult::Reply(POSITION_REPORT.into()));
        assert!(POSITION_REPORT.ends_with("\nok\n"));
    }
}
