use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::Path;
use std::sync::Arc;

use skillchat_api::HttpApiClient;
use skillchat_chat::{AttachOutcome, ChatController, SendOutcome};
use skillchat_types::API_KEY_PREFIX;

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::logger::ConversationLogger;

/// Print a local system notice and mirror it into the conversation log.
async fn system_notice(logger: &mut Option<ConversationLogger>, session_id: &str, text: &str) {
    println!("{}", text.bright_black());
    if let Some(logger) = logger {
        logger.log(session_id, "system", text).await;
    }
}

fn print_help() {
    println!("{}", "Commands:".bright_cyan());
    println!("  /key <sk-ant-...>       - Save your API key");
    println!("  /default-skill [id]     - Save (or clear) the default skill");
    println!("  /skills                 - Refresh and list available skills");
    println!("  /skill <id|none>        - Select a skill for subsequent turns");
    println!("  /attach <path>...       - Upload files and stage them for the next message");
    println!("  /detach <filename>      - Remove a staged attachment");
    println!("  /attachments            - List staged attachments");
    println!("  /temperature <float>    - Set the sampling temperature");
    println!("  /max-tokens <int>       - Set the response token budget");
    println!("  /stats                  - Show session statistics");
    println!("  /export                 - Download the transcript as markdown");
    println!("  /clear                  - Start a fresh session (asks for confirmation)");
    println!("  exit | quit             - Leave");
}

/// Run interactive REPL mode
pub async fn run_repl_mode(cli: &Cli, config: AppConfig) -> Result<()> {
    println!(
        "{}",
        "🤖 Skillchat - chat with a skills-enabled assistant"
            .bright_cyan()
            .bold()
    );
    println!(
        "{}",
        format!("Working directory: {}", config.work_dir.display()).bright_black()
    );
    println!(
        "{}",
        format!("Service: {}", config.api_url).bright_black()
    );
    println!(
        "{}",
        "Type 'exit' or 'quit' to leave, or '/help' for commands\n".bright_black()
    );

    let api = Arc::new(HttpApiClient::new(&config.api_url).with_verbose(cli.verbose));
    let mut controller = ChatController::new(api, config.settings);

    if let Some(temperature) = cli.temperature {
        controller.set_temperature(temperature);
    }
    if let Some(max_tokens) = cli.max_tokens {
        controller.set_max_tokens(max_tokens);
    }

    // Initialize logger (async) - logs go into the working directory
    let mut logger = match ConversationLogger::new(&config.work_dir).await {
        Ok(l) => Some(l),
        Err(e) => {
            eprintln!("Logging disabled: {}", e);
            None
        }
    };

    if !controller.has_credential() {
        println!(
            "{}",
            format!(
                "⚙️  No API key configured. Save one with /key {}... to get started.",
                API_KEY_PREFIX
            )
            .yellow()
        );
    } else {
        if let Err(e) = controller.refresh_skills().await {
            let session_id = controller.session().id().to_string();
            system_notice(
                &mut logger,
                &session_id,
                &format!(
                    "Failed to load skills: {}. Check your API key with /key.",
                    e.notice()
                ),
            )
            .await;
        }
        if let Some(ref skill_id) = cli.skill {
            if let Err(e) = controller.select_skill(skill_id) {
                eprintln!("{} {}", "⚠️".yellow(), e.notice());
            }
        }
    }

    let mut rl = DefaultEditor::new()?;

    loop {
        let skill_indicator = match controller.catalog().selected() {
            Some(skill) => format!("[{}]", skill.name),
            None => "[no skill]".to_string(),
        };
        let readline = rl.readline(&format!(
            "{} {} ",
            skill_indicator.bright_magenta(),
            "You:".bright_green().bold()
        ));

        match readline {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                if line == "exit" || line == "quit" {
                    println!("{}", "Goodbye!".bright_cyan());
                    break;
                }

                rl.add_history_entry(line)?;

                if line == "/help" {
                    print_help();
                    continue;
                }

                if let Some(value) = line.strip_prefix("/key ") {
                    match controller.save_api_key(value) {
                        Ok(()) => {
                            println!("{}", "✓ Settings saved successfully!".green());
                            // Reload skills with the new API key
                            if let Err(e) = controller.refresh_skills().await {
                                let session_id = controller.session().id().to_string();
                                system_notice(
                                    &mut logger,
                                    &session_id,
                                    &format!("Failed to load skills: {}", e.notice()),
                                )
                                .await;
                            }
                        }
                        Err(e) => eprintln!("{} {}", "❌".bright_red(), e),
                    }
                    continue;
                }

                if line == "/default-skill" || line.starts_with("/default-skill ") {
                    let value = line.strip_prefix("/default-skill").unwrap_or("").trim();
                    match controller.save_default_skill(value) {
                        Ok(()) => {
                            if value.is_empty() {
                                println!("{}", "✓ Default skill cleared.".green());
                            } else {
                                println!("{}", format!("✓ Default skill set to {}.", value).green());
                            }
                        }
                        Err(e) => eprintln!("{} {}", "❌".bright_red(), e),
                    }
                    continue;
                }

                if line == "/skills" {
                    if let Err(e) = controller.refresh_skills().await {
                        let session_id = controller.session().id().to_string();
                        system_notice(
                            &mut logger,
                            &session_id,
                            &format!("Failed to load skills: {}", e.notice()),
                        )
                        .await;
                        continue;
                    }
                    if !controller.has_credential() {
                        println!(
                            "{}",
                            "No API key configured; the catalog is empty. Save one with /key."
                                .bright_black()
                        );
                        continue;
                    }
                    if controller.catalog().is_empty() {
                        println!("{}", "No skills found for this credential.".bright_black());
                        continue;
                    }
                    println!("{}", "🎯 Available skills:".bright_cyan());
                    for skill in controller.catalog().skills() {
                        let marker = if controller.catalog().selected_id() == Some(skill.id.as_str()) {
                            "▸"
                        } else {
                            " "
                        };
                        println!(
                            "  {} {}  {}",
                            marker,
                            skill.label().bold(),
                            skill.id.bright_black()
                        );
                        if let Some(ref description) = skill.description {
                            println!("      {}", description.bright_black());
                        }
                    }
                    continue;
                }

                if let Some(id) = line.strip_prefix("/skill ") {
                    let id = id.trim();
                    if id == "none" {
                        controller.clear_skill();
                        println!("{}", "✓ Skill cleared; using the standard assistant.".green());
                    } else {
                        match controller.select_skill(id) {
                            Ok(()) => println!("{}", format!("✓ Skill selected: {}", id).green()),
                            Err(e) => eprintln!("{} {}", "❌".bright_red(), e.notice()),
                        }
                    }
                    continue;
                }

                if let Some(paths) = line.strip_prefix("/attach ") {
                    for token in paths.split_whitespace() {
                        match controller.attach(Path::new(token)).await {
                            AttachOutcome::Staged { filename } => {
                                println!("{} {}", "📎".bright_green(), format!("Attached {}", filename));
                            }
                            AttachOutcome::Failed { notice } => {
                                let session_id = controller.session().id().to_string();
                                system_notice(&mut logger, &session_id, &notice).await;
                            }
                        }
                    }
                    continue;
                }

                if let Some(filename) = line.strip_prefix("/detach ") {
                    if controller.remove_attachment(filename.trim()) {
                        println!("{}", format!("✓ Removed {}", filename.trim()).green());
                    } else {
                        println!("{}", format!("No staged attachment named {}", filename.trim()).bright_black());
                    }
                    continue;
                }

                if line == "/attachments" {
                    if controller.attachments().is_empty() {
                        println!("{}", "No attachments staged.".bright_black());
                    } else {
                        for attachment in controller.attachments().pending() {
                            println!("  📎 {}", attachment.filename);
                        }
                    }
                    continue;
                }

                if let Some(value) = line.strip_prefix("/temperature ") {
                    match value.trim().parse::<f64>() {
                        Ok(temperature) => {
                            controller.set_temperature(temperature);
                            println!("{}", format!("✓ Temperature set to {}", temperature).green());
                        }
                        Err(_) => {
                            eprintln!("{} Invalid temperature: '{}'", "❌".bright_red(), value.trim())
                        }
                    }
                    continue;
                }

                if let Some(value) = line.strip_prefix("/max-tokens ") {
                    match value.trim().parse::<u32>() {
                        Ok(max_tokens) if max_tokens > 0 => {
                            controller.set_max_tokens(max_tokens);
                            println!("{}", format!("✓ Max tokens set to {}", max_tokens).green());
                        }
                        _ => eprintln!("{} Invalid max tokens: '{}'", "❌".bright_red(), value.trim()),
                    }
                    continue;
                }

                if line == "/stats" {
                    let stats = controller.session().stats();
                    println!(
                        "{} Messages: {} | Tokens: {} | Session: {}",
                        "📊".bright_black(),
                        stats.message_count,
                        stats.total_tokens,
                        controller.session().id().bright_black()
                    );
                    continue;
                }

                if line == "/export" {
                    match controller.export().await {
                        Ok(document) => {
                            let target = config.work_dir.join(&document.filename);
                            match std::fs::write(&target, &document.markdown) {
                                Ok(()) => {
                                    let session_id = controller.session().id().to_string();
                                    system_notice(
                                        &mut logger,
                                        &session_id,
                                        &format!("Chat exported to {}", target.display()),
                                    )
                                    .await;
                                }
                                Err(e) => {
                                    eprintln!("{} Failed to write export: {}", "❌".bright_red(), e)
                                }
                            }
                        }
                        Err(e) => {
                            let session_id = controller.session().id().to_string();
                            system_notice(
                                &mut logger,
                                &session_id,
                                &format!("Failed to export chat: {}", e.notice()),
                            )
                            .await;
                        }
                    }
                    continue;
                }

                if line == "/clear" {
                    // Any interruption counts as declining
                    let answer = match rl.readline("Clear all messages? This cannot be undone. [y/N] ") {
                        Ok(answer) => answer,
                        Err(_) => continue,
                    };
                    let answer = answer.trim().to_lowercase();
                    if answer == "y" || answer == "yes" {
                        let notice = controller.clear();
                        let session_id = controller.session().id().to_string();
                        system_notice(&mut logger, &session_id, &notice).await;
                    }
                    continue;
                }

                if line.starts_with('/') {
                    println!("{}", "Unknown command. Type /help for the list.".bright_black());
                    continue;
                }

                // A plain line is a chat turn
                if let Some(logger) = &mut logger {
                    logger.log(controller.session().id(), "user", line).await;
                }

                println!("{}", "⏳ Awaiting response...".bright_black());

                match controller.send(line).await {
                    SendOutcome::Completed { reply, usage } => {
                        if let Some(logger) = &mut logger {
                            logger.log(controller.session().id(), "assistant", &reply).await;
                        }
                        println!("\n{} {}\n", "Assistant:".bright_blue().bold(), reply);
                        let stats = controller.session().stats();
                        println!(
                            "{} Input: {} | Output: {} | Session: {} messages, {} tokens",
                            "📊".bright_black(),
                            usage.input_tokens.to_string().bright_black(),
                            usage.output_tokens.to_string().bright_black(),
                            stats.message_count.to_string().cyan(),
                            stats.total_tokens.to_string().cyan()
                        );
                    }
                    SendOutcome::Failed { notice } => {
                        let session_id = controller.session().id().to_string();
                        system_notice(&mut logger, &session_id, &notice).await;
                    }
                    SendOutcome::NeedsCredential => {
                        println!(
                            "{}",
                            format!("⚙️  Please save your API key first: /key {}...", API_KEY_PREFIX)
                                .yellow()
                        );
                    }
                    SendOutcome::Busy => {
                        println!(
                            "{}",
                            "A request is already awaiting a response; try again once it settles."
                                .bright_black()
                        );
                    }
                    SendOutcome::EmptyMessage => {}
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".bright_black());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_cyan());
                break;
            }
            Err(err) => {
                eprintln!("{} {}", "Error:".bright_red().bold(), err);
                break;
            }
        }
    }

    // Graceful shutdown of logger (flush & close)
    if let Some(logger) = &mut logger {
        logger.shutdown().await;
    }

    Ok(())
}
