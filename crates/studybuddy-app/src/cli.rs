use clap::{Parser, Subcommand};

/// StudyBuddy: a study-schedule assistant and a demo messenger for the terminal.
#[derive(Parser, Debug)]
#[command(name = "studybuddy", version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Log filter directive override (e.g. `studybuddy=debug`).
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Chat with the study-schedule assistant (default).
    Chat {
        /// API base URL, overriding `api.base_url` from the config.
        #[arg(long)]
        api_base: Option<String>,
    },
    /// Demo messenger with simulated replies.
    Messenger,
}

pub fn parse() -> Args {
    Args::parse()
}
