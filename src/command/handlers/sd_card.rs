//! SD card handlers (M20, M21)

use super::HandlerContext;
use crate::command::CommandResult;
use printer_emulator_protocol::OK;

/// Files the emulated card pretends to hold
const SD_CARD_FILES: [&str; 2] = ["Item 1.gcode", "Item 2.gcode"];

/// Handle M20 - list SD card
pub fn handle_list_sd_card(_ctx: &mut HandlerContext, _command: &str) -> CommandResult {
    let mut listing = String::from("Begin file list\n");
    for file in SD_CARD_FILES {
        listing.push_str(file);
        listing.push('\n');
    }
    listing.push_str("End file list\n");
    listing.push_str(OK);

    CommandResult::Reply(listing)
}

/// Handle M21 - init SD card
pub fn handle_init_sd_card(_ctx: &mut HandlerContext, _command: &str) -> CommandResult {
    CommandResult::Reply(OK.into())
}
