//! Temperature command handlers (M105, M104/M109, M140/M190)

use super::HandlerContext;
use crate::command::CommandResult;
use printer_emulator_protocol::{integer_after, OK};

/// Handle M105 - report heater temperatures
///
/// Reports look like `ok T:211` or `ok T:211 B:59`; each value is the target
/// plus a fresh noise sample, clamped to the `i32` range.
pub fn handle_report_temperature(ctx: &mut HandlerContext, _command: &str) -> CommandResult {
    let extruder = ctx.state.extruder_target.saturating_add(ctx.noise.sample());

    let report = match ctx.state.bed_target {
        Some(bed) => format!("ok T:{} B:{}\n", extruder, bed.saturating_add(ctx.noise.sample())),
        None => format!("ok T:{}\n", extruder),
    };

    CommandResult::Reply(report)
}

/// Handle M104/M109 - set extruder target
pub fn handle_set_extruder(ctx: &mut HandlerContext, command: &str) -> CommandResult {
    match integer_after(command, 'S') {
        Ok(target) => {
            ctx.state.set_extruder_target(target);
            CommandResult::Reply(OK.into())
        }
        Err(e) => CommandResult::Malformed {
            reason: format!("extruder temperature: {}", e),
        },
    }
}

/// Handle M140/M190 - set bed target
pub fn handle_set_bed(ctx: &mut HandlerContext, command: &str) -> CommandResult {
    match integer_after(command, 'S') {
        Ok(target) => {
            ctx.state.set_bed_target(target);
            CommandResult::Reply(OK.into())
        }
        Err(e) => CommandResult::Malformed {
            reason: format!("bed temperature: {}", e),
        },
    }
}
