//! Command implementations for mrsync.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod doctor;
mod preview;
mod sync;

use crate::cli::Command;
use crate::error::Result;

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution. Each command
/// is routed to its handler function.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Sync(args) => sync::cmd_sync(args),
        Command::Preview(args) => preview::cmd_preview(args),
        Command::Doctor => doctor::cmd_doctor(),
    }
}
