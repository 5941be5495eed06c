//! Access log shipping service
//!
//! Request handlers hand entries to a bounded channel and never wait on the
//! collector. A background task drains the channel in arrival order and
//! sends each entry once; overflow and send failures are counted and logged.

use serde::Serialize;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tokio::sync::mpsc::{self, error::TrySendError};
use utoipa::ToSchema;

use crate::{
    config::CollectorConfig,
    gelf::{self, GelfError, GelfMessage, GelfTransport, Level},
    models::LogEntry,
};

pub const SHORT_MESSAGE: &str = "Endpoint accessed";

#[derive(Default)]
struct Counters {
    sent: AtomicU64,
    failed: AtomicU64,
    dropped: AtomicU64,
}

/// Point-in-time view of the shipping counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct AccessLogStats {
    /// Whether entries are being shipped to a collector
    pub enabled: bool,
    pub sent: u64,
    pub failed: u64,
    /// Entries discarded because the queue was full
    pub dropped: u64,
}

#[derive(Clone)]
pub struct AccessLogService {
    sender: Option<mpsc::Sender<LogEntry>>,
    counters: Arc<Counters>,
}

impl AccessLogService {
    /// Connect to the configured collector and start shipping.
    ///
    /// An unreachable collector is fatal only with `strict_startup`;
    /// otherwise the service starts without shipping.
    pub async fn start(config: &CollectorConfig) -> Result<Self, GelfError> {
        if !config.enabled {
            tracing::info!("Access log shipping disabled by configuration");
            return Ok(Self::disabled());
        }

        match gelf::connect(config).await {
            Ok(transport) => {
                tracing::info!(
                    "Shipping access logs to {} over {:?}",
                    config.endpoint(),
                    config.transport
                );
                Ok(Self::spawn(transport, config))
            }
            Err(e) if config.strict_startup => Err(e),
            Err(e) => {
                tracing::warn!(
                    "Collector {} unreachable, running without access log shipping: {}",
                    config.endpoint(),
                    e
                );
                Ok(Self::disabled())
            }
        }
    }

    /// Start the background shipper over an already opened transport
    pub fn spawn(transport: Box<dyn GelfTransport>, config: &CollectorConfig) -> Self {
        let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
        let counters = Arc::new(Counters::default());

        let shipper = Shipper {
            transport,
            host: config.host.clone(),
            level: Level::from_u8(config.level),
            counters: counters.clone(),
        };
        tokio::spawn(shipper.run(rx));

        Self {
            sender: Some(tx),
            counters,
        }
    }

    /// A service that only traces entries locally
    pub fn disabled() -> Self {
        Self {
            sender: None,
            counters: Arc::new(Counters::default()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }

    /// Queue an entry for the collector without waiting
    pub fn record(&self, entry: LogEntry) {
        let Some(sender) = &self.sender else {
            tracing::debug!(endpoint = %entry.endpoint, method = %entry.method, ip = %entry.ip, "access");
            return;
        };

        match sender.try_send(entry) {
            Ok(()) => {}
            Err(TrySendError::Full(entry)) => {
                let dropped = self.counters.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                tracing::warn!(
                    "Access log queue full, dropping entry {} ({} dropped so far)",
                    entry.id,
                    dropped
                );
            }
            Err(TrySendError::Closed(entry)) => {
                self.counters.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::warn!("Access log shipper stopped, dropping entry {}", entry.id);
            }
        }
    }

    pub fn stats(&self) -> AccessLogStats {
        AccessLogStats {
            enabled: self.is_enabled(),
            sent: self.counters.sent.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
            dropped: self.counters.dropped.load(Ordering::Relaxed),
        }
    }
}

/// Build the GELF message describing one request
pub fn to_gelf(entry: &LogEntry, host: &str, level: Level) -> GelfMessage {
    GelfMessage::new(host, SHORT_MESSAGE)
        .full_message(entry.to_string())
        .timestamp(entry.timestamp.timestamp())
        .level(level)
        .extra("Endpoint", entry.endpoint.clone())
        .extra("Method", entry.method.clone())
        .extra("IP", entry.ip.clone())
}

struct Shipper {
    transport: Box<dyn GelfTransport>,
    host: String,
    level: Level,
    counters: Arc<Counters>,
}

impl Shipper {
    async fn run(mut self, mut rx: mpsc::Receiver<LogEntry>) {
        while let Some(entry) = rx.recv().await {
            let message = to_gelf(&entry, &self.host, self.level);
            match self.transport.send(&message).await {
                Ok(()) => {
                    self.counters.sent.fetch_add(1, Ordering::Relaxed);
                }
                Err(e) => {
                    self.counters.failed.fetch_add(1, Ordering::Relaxed);
                    tracing::error!("Error sending access log to collector: {}", e);
                }
            }
        }
        tracing::info!("Access log shipper stopped");
    }
}
