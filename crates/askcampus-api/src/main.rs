//! AskCampus CLI and REST API entry point.
//!
//! Binary name: `askcampus`
//!
//! Parses CLI arguments, initializes the database and chat service, then
//! either starts the relay HTTP server or runs the terminal chat client.

mod cli;
mod client;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,askcampus=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "askcampus", &mut std::io::stdout());
        return Ok(());
    }

    match cli.command {
        Commands::Serve { bind } => {
            let state = AppState::init().await?;
            let addr = bind.unwrap_or_else(|| state.config.bind_addr.clone());

            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} AskCampus relay listening on {}",
                console::style("⚡").bold(),
                console::style(format!("http://{addr}")).cyan()
            );
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            tracing::info!(
                addr = %addr,
                model = %state.config.model,
                db = %state.data_dir.join("askcampus.db").display(),
                "starting relay"
            );

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            println!("\n  Server stopped.");
        }

        Commands::Chat { server } => {
            let data_dir = askcampus_infra::config::resolve_data_dir();
            client::run_chat_loop(&server, &data_dir).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
