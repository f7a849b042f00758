//! Noah CLI and HTTP server entry point.
//!
//! Binary name: `noah`
//!
//! Parses CLI arguments, sets up tracing and configuration, then either
//! serves the chat API or runs one of the client commands against it.

mod cli;
mod client;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;
use noah_infra::config::{load_app_config, process_env, resolve_data_dir};
use noah_observe::tracing_setup::{TracingOptions, init_tracing, shutdown_tracing};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need tracing or config
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "noah", &mut std::io::stdout());
        return Ok(());
    }

    // Interactive commands keep log lines out of the conversation
    let default_level = match cli.command {
        Commands::Serve { .. } => None,
        _ => Some("warn"),
    };
    init_tracing(&TracingOptions {
        verbosity: cli.verbose,
        quiet: cli.quiet,
        json: cli.json,
        otel: process_env("NOAH_OTEL").is_some_and(|v| v == "1" || v == "true"),
        default_level,
    })
    .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    let data_dir = resolve_data_dir(process_env);
    let mut config = load_app_config(&data_dir, cli.config.as_deref(), process_env).await;

    let result = match cli.command {
        Commands::Serve { host, port, db } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if db.is_some() {
                config.server.database_url = db;
            }
            cli::serve::serve(config, &data_dir, cli.quiet).await
        }

        Commands::Chat { server } => {
            let server_url = server.unwrap_or(config.client.server_url);
            cli::chat::loop_runner::run_chat_loop(&server_url, &data_dir).await
        }

        Commands::History { session_id, server } => {
            let server_url = server.unwrap_or(config.client.server_url);
            cli::history::print_history(&server_url, &session_id, cli.json).await
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    };

    shutdown_tracing();
    result
}
