use tracing::{debug, error, info, warn};

use super::{LogLevel, LogOutcome, LogSink};

pub const EVENT_TARGET: &str = "pocketlink::events";

/// Writes events to the tracing subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn log(&self, level: LogLevel, source: &str, message: &str) -> LogOutcome {
        match level {
            LogLevel::Error => error!(target: EVENT_TARGET, source, "{}", message),
            LogLevel::Warning => warn!(target: EVENT_TARGET, source, "{}", message),
            LogLevel::Info => info!(target: EVENT_TARGET, source, "{}", message),
            LogLevel::Debug => debug!(target: EVENT_TARGET, source, "{}", message),
        }
        LogOutcome::console(true)
    }
}
