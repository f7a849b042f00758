//! `noah serve`: run the HTTP chat server until Ctrl+C or SIGTERM.

use std::path::Path;
use std::time::Duration;

use console::style;
use noah_infra::config::{process_env, resolve_api_key};
use noah_infra::llm::create_provider;
use noah_types::config::AppConfig;
use tracing::{error, info};

use crate::http::router::build_router;
use crate::state::AppState;

pub async fn serve(config: AppConfig, data_dir: &Path, quiet: bool) -> anyhow::Result<()> {
    let api_key = resolve_api_key(&config.llm, process_env)?;
    let provider = create_provider(&config.llm, api_key)?;
    let timeout = Duration::from_secs(config.llm.timeout_secs);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::init(config, data_dir, provider).await?;
    let pool = state.db_pool.clone();

    let generator = state.chat_service.generator();
    info!(
        provider = generator.provider_name(),
        model = generator.model(),
        ?timeout,
        "Reply generator configured"
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "Server listening");

    if !quiet {
        println!();
        println!(
            "  {} Noah is listening on {}",
            style("⚡").bold(),
            style(format!("http://{addr}")).cyan()
        );
        println!("  {}", style("Press Ctrl+C to stop").dim());
    }

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Server stopped");
    if !quiet {
        println!("\n  Server stopped.");
    }
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
///
/// A signal handler that cannot be installed never fires; the other one
/// still can.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
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
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}
