//! Echo handler (A)

use super::HandlerContext;
use crate::command::CommandResult;

/// Handle A - send the command straight back
pub fn handle_echo(_ctx: &mut HandlerContext, command: &str) -> CommandResult {
    CommandResult::Reply(format!("{}\n", command))
}
