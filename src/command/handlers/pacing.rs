//! Response pacing handlers (SLOW, FAST)

use super::HandlerContext;
use crate::command::CommandResult;
use printer_emulator_protocol::OK;
use tracing::info;

/// Handle SLOW - start delaying responses
pub fn handle_run_slow(ctx: &mut HandlerContext, _command: &str) -> CommandResult {
    *ctx.run_slow = true;
    info!("  [SLOW] Responses are now delayed");
    CommandResult::Reply(OK.into())
}

/// Handle FAST - answer immediately again
pub fn handle_run_fast(ctx: &mut HandlerContext, _command: &str) -> CommandResult {
    *ctx.run_slow = false;
    info!("  [FAST] Responses are no longer delayed");
    CommandResult::Reply(OK.into())
}
