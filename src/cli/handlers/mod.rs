//! Handlers for the `serve --dry-run` and `migrate` commands.

pub mod migrate;
pub mod serve;

pub use migrate::MigrateCommandHandler;
pub use serve::ServeCommandHandler;
