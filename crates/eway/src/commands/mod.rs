//! Command dispatch: bridges CLI args -> portal calls -> output formatting.

pub mod account;
pub mod admin;
pub mod buy;
pub mod config_cmd;
pub mod quote;
pub mod routes;
pub mod util;
pub mod verify;

use eway_core::Portal;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, portal: &Portal, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Register(args) => account::register(portal, args, global).await,
        Command::Login => account::login(portal, global).await,
        Command::Logout => account::logout(portal, global).await,
        Command::Profile => account::profile(portal, global).await,
        Command::Buy(args) => buy::handle(portal, args, global).await,
        Command::Admin(args) => admin::handle(portal, args, global).await,
        // Handled before a portal is built
        Command::Routes(_)
        | Command::Quote(_)
        | Command::Verify(_)
        | Command::Export(_)
        | Command::Config(_)
        | Command::Completions(_) => Err(CliError::Validation {
            field: "command".into(),
            reason: "this command does not use the backend".into(),
        }),
    }
}
