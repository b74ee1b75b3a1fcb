use anyhow::Result;
use clap::Parser;

use skillchat::app::{run_ask_mode, run_repl_mode, run_skills_mode};
use skillchat::{setup_from_cli, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Set up application configuration from CLI
    let config = setup_from_cli(&cli)?;

    match &cli.command {
        Some(Commands::Skills) => run_skills_mode(&cli, config).await,
        Some(Commands::Ask { message, skill }) => {
            run_ask_mode(&cli, config, message, skill.as_deref()).await
        }
        None => run_repl_mode(&cli, config).await,
    }
}
