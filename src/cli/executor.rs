//! Dispatches parsed CLI commands to their handlers.

use super::handlers::{MigrateCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::Settings;
use crate::error::{AppError, AppResult};

/// What the caller should do once a command has run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Boot the HTTP server with the merged settings
    StartServer,
    /// The command finished; exit
    Done,
}

pub async fn execute_command(cli: &Cli, settings: &Settings) -> AppResult<CommandOutcome> {
    cli.validate().map_err(|reason| AppError::Validation {
        field: "cli_arguments".to_string(),
        reason,
    })?;

    match &cli.command {
        Some(Commands::Serve { dry_run: true, .. }) => {
            ServeCommandHandler::new(settings.clone()).validate_only()?;
            Ok(CommandOutcome::Done)
        }
        Some(Commands::Serve { .. }) | None => Ok(CommandOutcome::StartServer),
        Some(Commands::Migrate { dry_run, rollback }) => {
            MigrateCommandHandler::new(settings.clone())
                .execute(*dry_run, *rollback)
                .await?;
            Ok(CommandOutcome::Done)
        }
    }
}
