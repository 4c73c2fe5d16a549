//! Command execution for the emulated printer
//!
//! This module handles:
//! - Normalizing received lines and extracting the dispatch key
//! - Looking the key up in the dispatch table
//! - Running the selected handler against the device state
//! - Turning handler results into protocol responses

mod dispatch;
mod executor;
pub mod handlers;

pub use dispatch::{CommandKind, DispatchTable};
pub use executor::{CommandExecutor, CommandResult, Response};
