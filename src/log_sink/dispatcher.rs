use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, SendError, Sender};
use tracing::warn;

use super::{ConsoleSink, LogLevel, LogSink, RemoteSink};
use crate::config::LoggingConfig;

struct LogEntry {
    level: LogLevel,
    source: String,
    message: String,
}

enum Envelope {
    Entry(LogEntry),
    Flush(Sender<()>),
}

/// Cloneable, non-blocking handle to a sink running on a worker thread.
///
/// `log` never blocks and never reports failure. When the worker is gone
/// (spawn failure, sink panic) events are written to the console inline.
#[derive(Clone)]
pub struct EventLogger {
    tx: Sender<Envelope>,
}

impl EventLogger {
    pub fn spawn(sink: Arc<dyn LogSink>) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();

        let spawned = thread::Builder::new()
            .name("pocketlink-events".to_string())
            .spawn(move || run_worker(sink, rx));
        if let Err(e) = spawned {
            warn!("Failed to start event log worker, using console only: {}", e);
        }

        Self { tx }
    }

    /// Console + optional remote sink per `[logging.remote]`.
    pub fn from_config(config: &LoggingConfig) -> Self {
        Self::spawn(Arc::new(RemoteSink::from_config(&config.remote)))
    }

    pub fn console() -> Self {
        Self::spawn(Arc::new(ConsoleSink))
    }

    pub fn log(&self, level: LogLevel, source: &str, message: impl Into<String>) {
        let entry = LogEntry {
            level,
            source: source.to_string(),
            message: message.into(),
        };

        if let Err(SendError(Envelope::Entry(entry))) = self.tx.send(Envelope::Entry(entry)) {
            ConsoleSink.log(entry.level, &entry.source, &entry.message);
        }
    }

    pub fn error(&self, source: &str, message: impl Into<String>) {
        self.log(LogLevel::Error, source, message);
    }

    pub fn warning(&self, source: &str, message: impl Into<String>) {
        self.log(LogLevel::Warning, source, message);
    }

    pub fn info(&self, source: &str, message: impl Into<String>) {
        self.log(LogLevel::Info, source, message);
    }

    pub fn debug(&self, source: &str, message: impl Into<String>) {
        self.log(LogLevel::Debug, source, message);
    }

    /// Wait until every event queued before this call reached the sink.
    ///
    /// Returns `false` on timeout. With no worker there is nothing to wait for.
    pub fn flush(&self, timeout: Duration) -> bool {
        let (ack_tx, ack_rx) = crossbeam_channel::bounded(1);
        if self.tx.send(Envelope::Flush(ack_tx)).is_err() {
            return true;
        }
        ack_rx.recv_timeout(timeout).is_ok()
    }
}

fn run_worker(sink: Arc<dyn LogSink>, rx: Receiver<Envelope>) {
    for envelope in rx.iter() {
        match envelope {
            Envelope::Entry(entry) => {
                let result = catch_unwind(AssertUnwindSafe(|| {
                    sink.log(entry.level, &entry.source, &entry.message)
                }));
                if result.is_err() {
                    ConsoleSink.log(entry.level, &entry.source, &entry.message);
                }
            }
            Envelope::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
}
