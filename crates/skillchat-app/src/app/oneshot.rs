use anyhow::{anyhow, bail, Result};
use colored::Colorize;
use std::sync::Arc;

use skillchat_api::HttpApiClient;
use skillchat_chat::{ChatController, SendOutcome};

use crate::cli::Cli;
use crate::config::AppConfig;

fn build_controller(cli: &Cli, config: AppConfig) -> ChatController {
    let api = Arc::new(HttpApiClient::new(&config.api_url).with_verbose(cli.verbose));
    let mut controller = ChatController::new(api, config.settings);
    if let Some(temperature) = cli.temperature {
        controller.set_temperature(temperature);
    }
    if let Some(max_tokens) = cli.max_tokens {
        controller.set_max_tokens(max_tokens);
    }
    controller
}

/// `skillchat-cli skills`: list the catalog and exit.
pub async fn run_skills_mode(cli: &Cli, config: AppConfig) -> Result<()> {
    let mut controller = build_controller(cli, config);

    if !controller.has_credential() {
        bail!("no API key configured; run the REPL and save one with /key sk-ant-...");
    }

    controller
        .refresh_skills()
        .await
        .map_err(|e| anyhow!("failed to fetch skills: {}", e.notice()))?;

    if controller.catalog().is_empty() {
        println!("No skills found for this credential.");
        return Ok(());
    }

    println!("{}", "🎯 Available skills:".bright_cyan());
    for skill in controller.catalog().skills() {
        println!("  {}  {}", skill.label().bold(), skill.id.bright_black());
        if let Some(ref description) = skill.description {
            println!("      {}", description.bright_black());
        }
    }
    Ok(())
}

/// `skillchat-cli ask <message>`: send a single turn, print the reply and
/// usage, and exit.
pub async fn run_ask_mode(
    cli: &Cli,
    config: AppConfig,
    message: &str,
    skill: Option<&str>,
) -> Result<()> {
    let mut controller = build_controller(cli, config);

    if let Some(skill_id) = skill {
        controller
            .refresh_skills()
            .await
            .map_err(|e| anyhow!("failed to fetch skills: {}", e.notice()))?;
        controller
            .select_skill(skill_id)
            .map_err(|e| anyhow!(e.notice()))?;
    }

    match controller.send(message).await {
        SendOutcome::Completed { reply, usage } => {
            println!("{}", reply);
            eprintln!(
                "{}",
                format!(
                    "📊 Input: {} | Output: {} tokens",
                    usage.input_tokens, usage.output_tokens
                )
                .bright_black()
            );
            Ok(())
        }
        SendOutcome::Failed { notice } => bail!(notice),
        SendOutcome::NeedsCredential => {
            bail!("no API key configured; run the REPL and save one with /key sk-ant-...")
        }
        SendOutcome::EmptyMessage => bail!("message is empty"),
        SendOutcome::Busy => Ok(()),
    }
}
