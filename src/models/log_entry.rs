//! Access log entry model

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Metadata captured for one inbound request
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub id: Uuid,
    /// Route pattern that matched (`/book/:id`), not the resolved path
    pub endpoint: String,
    pub method: String,
    pub ip: String,
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    /// Create an entry stamped with a fresh id and the current time
    pub fn new(endpoint: impl Into<String>, method: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            endpoint: endpoint.into(),
            method: method.into(),
            ip: ip.into(),
            timestamp: Utc::now(),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "ID: {} | Endpoint: {} | Method: {} | IP: {} | Timestamp: {}",
            self.id,
            self.endpoint,
            self.method,
            self.ip,
            self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        )
    }
}

/// Normalize a client address for logging; the IPv6 loopback reads as `localhost`
pub fn normalize_ip(ip: &str) -> String {
    if ip == "::1" {
        "localhost".to_string()
    } else {
        ip.to_string()
    }
}
