//! CLI interface module
//!
//! The command-line front end acting as the presentation layer.

pub mod commands;

use std::fmt;

use crate::cli::{Commands, ConfigCommands};
use crate::errors::PocketlinkError;
use crate::services::Session;
use crate::state::AppState;
use commands::{
    click_link, config_generate, create_bulk, create_link, export_links, list_links, open_link,
    resolve_link,
};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    ParseError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<PocketlinkError> for CliError {
    fn from(err: PocketlinkError) -> Self {
        if err.is_user_error() {
            CliError::CommandError(err.to_string())
        } else {
            CliError::StorageError(err.to_string())
        }
    }
}

/// Commands that work without opening the store.
pub fn run_standalone_command(cmd: &Commands) -> Option<Result<(), CliError>> {
    match cmd {
        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => Some(config_generate(output_path.clone(), *force)),
        _ => None,
    }
}

/// Run a CLI command from clap-parsed input
pub fn run_cli_command(
    cmd: Commands,
    session: &Session,
    state: &mut AppState,
) -> Result<(), CliError> {
    match cmd {
        Commands::Create {
            original_url,
            code,
            validity,
        } => create_link(session, state, original_url, code, validity),

        Commands::Bulk { file_path } => create_bulk(session, state, file_path),

        Commands::Resolve { shortcode } => resolve_link(session, &shortcode),

        Commands::Open { shortcode } => open_link(session, state, &shortcode),

        Commands::Click {
            shortcode,
            source,
            location,
        } => click_link(session, state, &shortcode, source, location),

        Commands::List { json } => list_links(session, state, json),

        Commands::Export { file_path } => export_links(session, file_path),

        Commands::Config { action } => match action {
            ConfigCommands::Generate { output_path, force } => config_generate(output_path, force),
        },
    }
}
