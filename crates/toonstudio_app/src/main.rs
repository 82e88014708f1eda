// SPDX-License-Identifier: MIT OR Apache-2.0
//! toonstudio - cartoon movie editor.
//!
//! Headless front end for the keyframe timeline:
//! - Movie projects saved as RON
//! - Scripted edits with full undo/redo
//! - Character catalog loading
//! - Frame manifests for an external video encoder
//!
//! ## Architecture
//!
//! All movie state lives in `toonstudio_timeline`. This binary wraps it in
//! an editing session that records undo history, and exposes the session
//! through a small CLI.

mod cli;
mod commands;
mod config;
mod history;
mod manifest;
mod project;
mod session;

use clap::Parser;
use cli::Cli;
use config::AppConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn init_tracing(filter: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => {
            init_tracing(&config.log_filter);
            config
        }
        Err(e) => {
            init_tracing(config::DEFAULT_LOG_FILTER);
            tracing::error!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    tracing::debug!("Starting toonstudio v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = cli.run(&config) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
