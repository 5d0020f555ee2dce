use clap::Parser;

use community_api::cli::{self, Cli, CommandOutcome};
use community_api::config::Environment;
use community_api::logger::init_logger;
use community_api::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = cli::load_and_merge_config(&cli)?;
    init_logger(&settings.logger)?;

    let environment = cli.env.map(Environment::from).unwrap_or_else(Environment::from_env);

    match cli::execute_command(&cli, &settings).await {
        Ok(CommandOutcome::StartServer) => Server::new(settings, environment).run().await,
        Ok(CommandOutcome::Done) => Ok(()),
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            Err(e.into())
        }
    }
}
