//! assistant-bot: entry point. Loads `.env`, parses the CLI and runs the bot.

use anyhow::Result;
use assistant_bot::{run_assistant, AssistantConfig, Cli, Commands};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = AssistantConfig::load(token)?;
            run_assistant(config).await
        }
    }
}
