mod chat_repl;
mod cli;
mod messenger_repl;
mod terminal_view;

use std::path::Path;
use std::process::ExitCode;

use studybuddy_config::{PreferenceStore, StudyBuddyConfig};
use tracing_subscriber::EnvFilter;

use crate::cli::Command;

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    // Config decides the default log level, so load it before logging is up
    // and report the outcome afterwards.
    let loaded = match args.config.as_deref() {
        Some(path) => studybuddy_config::toml_loader::load_from_path(Path::new(path)),
        None => studybuddy_config::load_config(),
    };
    let (config, load_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (StudyBuddyConfig::default(), Some(e)),
    };

    let directive = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.directive().to_string());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directive)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("StudyBuddy v{} starting...", env!("CARGO_PKG_VERSION"));
    match load_error {
        Some(e) => tracing::warn!("Config load failed, using defaults: {e}"),
        None => tracing::info!("Config loaded (api: {})", config.api.base_url),
    }

    let outcome = match args.command.unwrap_or(Command::Chat { api_base: None }) {
        Command::Chat { api_base } => {
            let prefs = PreferenceStore::default_location().unwrap_or_else(|| {
                tracing::warn!("No data directory, keeping preferences next to the binary");
                PreferenceStore::new("studybuddy-preferences.json")
            });
            chat_repl::run(&config, api_base, prefs).await
        }
        Command::Messenger => messenger_repl::run(&config.messenger).await,
    };

    match outcome {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
