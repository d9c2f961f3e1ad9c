use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tokio::signal;

use crate::config::Config;
use crate::utils::cli::Args;
use crate::utils::state::AppState;

mod api;
mod config;
mod domain;
mod error;
mod service;
mod storage;
mod utils;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();
    let args = Args::parse();
    let config = validate_config(&args).await;

    let state = Arc::new(AppState::new(config));
    let app = api::create_router(state.clone());

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", state.config.host, state.config.port))
            .await?;
    println!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    println!("Shutting down...");
}

/// Resolves the command line into a `Config`, creating the blob container
/// root when missing. Exits with the collected errors if the environment
/// cannot be used.
async fn validate_config(args: &Args) -> Config {
    let mut validation_errors = Vec::new();

    if args.storage != "MEMORY" {
        let root_dir = Path::new(&args.root);
        match tokio::fs::metadata(root_dir).await {
            Ok(meta) => {
                if !meta.is_dir() {
                    validation_errors.push(format!(
                        "TASKBOX_ROOTDIR `{}` exists but is not a directory",
                        args.root,
                    ));
                }
            }
            Err(_) => {
                if let Err(e) = tokio::fs::create_dir_all(root_dir).await {
                    validation_errors.push(format!(
                        "TASKBOX_ROOTDIR `{}` cannot be created: {e}",
                        args.root,
                    ));
                }
            }
        }
    }

    if !validation_errors.is_empty() {
        eprintln!("{}", validation_errors.join("\n"));
        std::process::exit(1);
    }

    Config {
        host: args.host.clone(),
        port: args.port,
        storage_typ: args.storage.clone(),
        root_dir: args.root.clone(),
        public_url: args.url.clone(),
    }
}
