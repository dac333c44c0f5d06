//! Fire-and-forget event logging
//!
//! Operations report `(level, source, message)` events to a [`LogSink`].
//! Sinks never fail towards the caller: an unreachable or disabled remote
//! endpoint degrades to console output.
//!
//! - [`ConsoleSink`]: emits through `tracing`
//! - [`RemoteSink`]: console echo plus an optional HTTP POST
//! - [`EventLogger`]: non-blocking handle driving a sink from a worker thread

mod console;
mod dispatcher;
mod remote;

pub use console::ConsoleSink;
pub use dispatcher::EventLogger;
pub use remote::RemoteSink;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogLevel {
    Error,
    Info,
    Warning,
    Debug,
}

/// Where an event actually ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SinkKind {
    Console,
    Remote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogOutcome {
    pub success: bool,
    pub source: SinkKind,
}

impl LogOutcome {
    pub fn console(success: bool) -> Self {
        Self {
            success,
            source: SinkKind::Console,
        }
    }

    pub fn remote() -> Self {
        Self {
            success: true,
            source: SinkKind::Remote,
        }
    }
}

/// Logging collaborator. Implementations must not panic or block for long.
pub trait LogSink: Send + Sync {
    fn log(&self, level: LogLevel, source: &str, message: &str) -> LogOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_level_names() {
        let names: Vec<String> = LogLevel::iter().map(|l| l.to_string()).collect();
        assert_eq!(names, vec!["error", "info", "warning", "debug"]);
        assert_eq!(LogLevel::from_str("WARNING").unwrap(), LogLevel::Warning);
        assert!(LogLevel::from_str("fatal").is_err());
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_string(&LogOutcome::console(false)).unwrap();
        assert_eq!(json, r#"{"success":false,"source":"console"}"#);
        let json = serde_json::to_string(&LogOutcome::remote()).unwrap();
        assert_eq!(json, r#"{"success":true,"source":"remote"}"#);
    }
}
