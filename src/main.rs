use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use tracing::{debug, info};

use pocketlink::cli::Cli;
use pocketlink::config::{get_config, init_config};
use pocketlink::interfaces::cli::{run_cli_command, run_standalone_command};
use pocketlink::log_sink::EventLogger;
use pocketlink::services::{Session, ShortenerService, ShortenerSettings};
use pocketlink::state::AppState;
use pocketlink::storage::StorageFactory;
use pocketlink::system::init_logging;

// 事件日志退出前最多等待的时间
const EVENT_FLUSH_TIMEOUT: Duration = Duration::from_secs(3);

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_config(cli.config.as_deref());

    if let Some(result) = run_standalone_command(&cli.command) {
        return match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{}", e.format_colored());
                ExitCode::FAILURE
            }
        };
    }

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = get_config();
    let _guard = init_logging(&config.logging);

    let store = StorageFactory::create_record_store(&config.storage)?;
    info!("Using storage backend: {}", store.backend_name());

    let settings = ShortenerSettings::from_config(&config.shortener)?;
    let events = EventLogger::from_config(&config.logging);
    let service = ShortenerService::new(store, events.clone(), settings);
    let session = Session::new(Arc::new(service));
    let mut state = AppState::with_events(events.clone());

    let result = run_cli_command(cli.command, &session, &mut state);

    if !events.flush(EVENT_FLUSH_TIMEOUT) {
        debug!("Event log did not drain before exit");
    }

    Ok(match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            ExitCode::FAILURE
        }
    })
}
