use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::Serialize;
use tracing::warn;
use ureq::Agent;

use super::{ConsoleSink, LogLevel, LogOutcome, LogSink};
use crate::config::RemoteLogConfig;

#[derive(Serialize)]
struct RemotePayload<'a> {
    stack: &'a str,
    level: &'a str,
    package: &'a str,
    message: &'a str,
}

/// Console echo plus a JSON POST to a logging endpoint when enabled.
pub struct RemoteSink {
    endpoint: String,
    stack: String,
    enabled: AtomicBool,
    agent: Agent,
    console: ConsoleSink,
}

impl RemoteSink {
    pub fn new(endpoint: &str, stack: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();

        Self {
            endpoint: endpoint.to_string(),
            stack: stack.to_string(),
            enabled: AtomicBool::new(false),
            agent,
            console: ConsoleSink,
        }
    }

    pub fn from_config(config: &RemoteLogConfig) -> Self {
        let sink = Self::new(
            &config.endpoint,
            &config.stack,
            Duration::from_secs(config.timeout_secs),
        );
        sink.set_enabled(config.enabled);
        sink
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    fn post(&self, level: LogLevel, source: &str, message: &str) -> Result<(), ureq::Error> {
        let payload = RemotePayload {
            stack: &self.stack,
            level: level.as_ref(),
            package: source,
            message,
        };
        self.agent.post(&self.endpoint).send_json(&payload)?;
        Ok(())
    }
}

impl LogSink for RemoteSink {
    fn log(&self, level: LogLevel, source: &str, message: &str) -> LogOutcome {
        self.console.log(level, source, message);

        if !self.is_enabled() {
            return LogOutcome::console(true);
        }

        match self.post(level, source, message) {
            Ok(()) => LogOutcome::remote(),
            Err(e) => {
                warn!(
                    "Logging endpoint \"{}\" not available, using console only: {}",
                    self.endpoint, e
                );
                LogOutcome::console(false)
            }
        }
    }
}
