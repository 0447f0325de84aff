//! Anos relay server and terminal chat client.
//!
//! Binary name: `anos`
//!
//! Parses CLI arguments, sets up tracing, then either serves the HTTP relay
//! or runs the interactive terminal client against one.

mod cli;
mod client;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;
use tracing::info;

use anos_infra::config::load_with_env;
use anos_observe::tracing_setup::{init_tracing, shutdown_tracing};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need tracing or state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "anos", &mut std::io::stdout());
        return Ok(());
    }

    init_tracing(cli.log_directive(), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { port, host, config } => {
            let mut app_config = load_with_env(&config).await?;
            if let Some(port) = port {
                app_config.port = port;
            }
            if let Some(host) = host {
                app_config.host = host;
            }

            let addr = app_config.listen_addr();
            let state = AppState::init(app_config);
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            info!(
                addr = %addr,
                model = %state.config.model,
                provider = state.relay.provider_name(),
                "Relay listening"
            );
            if !cli.quiet {
                println!(
                    "  {} Anos AI Server listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            info!("Server stopped");
        }

        Commands::Chat { server } => {
            cli::chat::loop_runner::run_chat_loop(&server).await?;
        }

        Commands::Completions { .. } => unreachable!("handled in main"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
