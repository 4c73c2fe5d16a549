//! Firmware identification handler (M115)

use super::HandlerContext;
use crate::command::CommandResult;

/// Identification string a Marlin board answers M115 with
pub const FIRMWARE_REPORT: &str = "FIRMWARE_NAME:Marlin V1; Sprinter/grbl mashup for gen6 \
FIRMWARE_URL:https://github.com/MarlinFirmware/Marlin \
PROTOCOL_VERSION:1.0 \
MACHINE_TYPE:Framelis v1 \
EXTRUDER_COUNT:1 \
UUID:155f84b5-d4d7-46f4-9432-667e6876f37a\nok\n";

/// Handle M115 - report firmware
pub fn handle_report_firmware(_ctx: &mut HandlerContext, _command: &str) -> CommandResult {
    CommandResult::Reply(FIRMWARE_REPORT.into())
}
