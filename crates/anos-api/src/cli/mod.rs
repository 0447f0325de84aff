//! CLI command definitions for the `anos` binary.
//!
//! `anos serve` runs the relay, `anos chat` talks to a running relay from
//! the terminal.

pub mod chat;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use anos_infra::config::DEFAULT_CONFIG_FILE;

/// Chat relay for Google Gemini with per-session memory.
#[derive(Parser)]
#[command(name = "anos", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also export spans to stdout through OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Default log directive for the chosen verbosity.
    ///
    /// The terminal client stays quiet unless asked, so logs do not land in
    /// the middle of the conversation.
    pub fn log_directive(&self) -> &'static str {
        let interactive = matches!(self.command, Commands::Chat { .. });
        match self.verbose {
            0 if self.quiet => "error",
            0 if interactive => "warn",
            0 => "info",
            1 => "info,anos_api=debug,anos_core=debug,anos_infra=debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP relay.
    Serve {
        /// Port to listen on (overrides config and PORT).
        #[arg(long, short)]
        port: Option<u16>,

        /// Host to bind to (overrides config and HOST).
        #[arg(long)]
        host: Option<String>,

        /// Path to the TOML config file.
        #[arg(long, short, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },

    /// Chat with a running relay from the terminal.
    Chat {
        /// Base URL of the relay.
        #[arg(long, short, env = "ANOS_SERVER", default_value = "http://localhost:3000")]
        server: String,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_flags() {
        let cli = Cli::try_parse_from([
            "anos",
            "serve",
            "--port",
            "8080",
            "--host",
            "127.0.0.1",
        ])
        .unwrap();
        match cli.command {
            Commands::Serve { port, host, config } => {
                assert_eq!(port, Some(8080));
                assert_eq!(host.as_deref(), Some("127.0.0.1"));
                assert_eq!(config, PathBuf::from(DEFAULT_CONFIG_FILE));
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_log_directive_by_verbosity() {
        let serve = Cli::try_parse_from(["anos", "serve"]).unwrap();
        assert_eq!(serve.log_directive(), "info");

        let quiet = Cli::try_parse_from(["anos", "-q", "serve"]).unwrap();
        assert_eq!(quiet.log_directive(), "error");

        let chat = Cli::try_parse_from(["anos", "chat", "--server", "http://x"]).unwrap();
        assert_eq!(chat.log_directive(), "warn");

        let loud = Cli::try_parse_from(["anos", "-vv", "serve"]).unwrap();
        assert_eq!(loud.log_directive(), "trace");
    }
}
