//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// pocketlink - local-first URL shortener
#[derive(Parser)]
#[command(name = "pocketlink")]
#[command(version)]
#[command(about = "A local-first URL shortener with expiring links and click tracking", long_about = None)]
pub struct Cli {
    /// Configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Shorten a URL
    Create {
        /// Absolute URL to shorten
        original_url: String,

        /// Custom shortcode (used verbatim)
        #[arg(long)]
        code: Option<String>,

        /// Minutes until the link expires (default from config, 30)
        #[arg(long, allow_negative_numbers = true)]
        validity: Option<i64>,
    },

    /// Shorten every row of a CSV file (original_url,custom_shortcode,validity_minutes)
    Bulk {
        /// Input file path
        file_path: String,
    },

    /// Show where a shortcode points without counting a click
    Resolve {
        shortcode: String,
    },

    /// Follow a shortcode: resolve it and record a click
    Open {
        shortcode: String,
    },

    /// Record a click without checking expiry
    Click {
        shortcode: String,

        #[arg(long)]
        source: Option<String>,

        #[arg(long)]
        location: Option<String>,
    },

    /// List all short URLs, newest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export all short URLs to a CSV file
    Export {
        /// Output file path (default: timestamped name)
        file_path: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Force overwrite
        #[arg(long)]
        force: bool,
    },
}
