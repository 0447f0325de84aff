//! Main chat loop orchestration.
//!
//! Health check, welcome banner, then an input loop that sends each line to
//! the relay under one session id, with slash commands for local control.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use anos_core::context::ASSISTANT_NAME;
use anos_types::chat::TurnRole;

use crate::client::{
    validate_input, ChatClient, InputRejection, SendState, MAX_MESSAGE_CHARS, SEND_FAILED,
};

use super::banner::{print_welcome_banner, status_label};
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};

fn prompt_for(online: bool) -> String {
    if online {
        format!("  {} ", style("You >").green().bold())
    } else {
        format!("  {} ", style("offline >").red().bold())
    }
}

fn thinking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(spinner_style);
    }
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

async fn print_history(client: &ChatClient) {
    match client.history().await {
        Ok(turns) if turns.is_empty() => {
            println!("\n  {}\n", style("No messages yet.").dim());
        }
        Ok(turns) => {
            println!();
            for turn in &turns {
                let label = match turn.role {
                    TurnRole::User => style("You".to_string()).green(),
                    TurnRole::Assistant => style(ASSISTANT_NAME.to_string()).cyan(),
                };
                println!(
                    "  {} {} {}",
                    style(turn.timestamp.format("%H:%M").to_string()).dim(),
                    label.bold(),
                    turn.text
                );
            }
            println!();
        }
        Err(e) => {
            warn!(error = %e, "Failed to fetch history");
            println!("\n  {} {}\n", style("!").red().bold(), SEND_FAILED);
        }
    }
}

/// Run the interactive chat loop against the relay at `server`.
pub async fn run_chat_loop(server: &str) -> anyhow::Result<()> {
    let client = ChatClient::new(server);
    let mut online = client.health().await;

    print_welcome_banner(client.base_url(), client.session_id(), online);

    let (mut chat_input, _writer) = ChatInput::new(prompt_for(online))
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        let text = match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Message(text) => text,
        };

        if let Some(cmd) = commands::parse(&text) {
            match cmd {
                ChatCommand::Help => commands::print_help(),
                ChatCommand::Clear => {
                    chat_input.clear();
                    print_welcome_banner(client.base_url(), client.session_id(), online);
                    if let Err(e) = client.clear().await {
                        warn!(error = %e, "Failed to clear server-side history");
                    }
                }
                ChatCommand::History => print_history(&client).await,
                ChatCommand::Status => {
                    online = client.health().await;
                    chat_input.update_prompt(&prompt_for(online));
                    println!("\n  {}\n", status_label(online));
                }
                ChatCommand::Exit => {
                    println!("\n  {}", style("Session ended.").dim());
                    break;
                }
                ChatCommand::Unknown(name) => {
                    println!(
                        "\n  {} Unknown command: {}. Type /help for available commands.\n",
                        style("?").yellow().bold(),
                        style(name).dim()
                    );
                }
            }
            continue;
        }

        let state = SendState::for_input(&text, online);
        let message = match validate_input(&text) {
            Ok(message) => message,
            Err(InputRejection::Empty) => continue,
            Err(InputRejection::TooLong { chars }) => {
                println!(
                    "\n  {} Message is {chars} characters; the limit is {MAX_MESSAGE_CHARS}.\n",
                    style("!").yellow().bold()
                );
                continue;
            }
        };

        let Some(state) = state.begin_send() else {
            println!(
                "\n  {} Server is offline. Use /status to check again.\n",
                style("!").red().bold()
            );
            continue;
        };
        debug!(?state, chars = message.chars().count(), "Sending message");

        let spinner = thinking_spinner();
        let outcome = client.send(message).await;
        spinner.finish_and_clear();

        match outcome {
            Ok(reply) => {
                println!("\n  {} {}\n", style(ASSISTANT_NAME).cyan().bold(), reply.reply.trim());
            }
            Err(e) => {
                warn!(error = %e, "Chat request failed");
                println!("\n  {} {}\n", style("!").red().bold(), SEND_FAILED);
                online = client.health().await;
                chat_input.update_prompt(&prompt_for(online));
            }
        }
        debug!(state = ?state.finish(), "Send finished");
    }

    Ok(())
}
