//! GELF 1.1 message

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use super::GelfError;

pub const GELF_VERSION: &str = "1.1";

/// Syslog severity carried in the `level` field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Level {
    Emergency = 0,
    Alert = 1,
    Critical = 2,
    Error = 3,
    Warning = 4,
    Notice = 5,
    Informational = 6,
    Debug = 7,
}

impl Level {
    /// Clamp a raw syslog number into a severity
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => Level::Emergency,
            1 => Level::Alert,
            2 => Level::Critical,
            3 => Level::Error,
            4 => Level::Warning,
            5 => Level::Notice,
            6 => Level::Informational,
            _ => Level::Debug,
        }
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

/// A GELF message as written on the wire
#[derive(Debug, Clone, Serialize)]
pub struct GelfMessage {
    pub version: &'static str,
    pub host: String,
    pub short_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_message: Option<String>,
    /// Seconds since the unix epoch
    pub timestamp: i64,
    pub level: Level,
    /// Additional fields, already prefixed with `_`
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl GelfMessage {
    pub fn new(host: impl Into<String>, short_message: impl Into<String>) -> Self {
        Self {
            version: GELF_VERSION,
            host: host.into(),
            short_message: short_message.into(),
            full_message: None,
            timestamp: chrono::Utc::now().timestamp(),
            level: Level::Alert,
            extra: BTreeMap::new(),
        }
    }

    pub fn full_message(mut self, full_message: impl Into<String>) -> Self {
        self.full_message = Some(full_message.into());
        self
    }

    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Add an additional field. The `_` prefix is added here; `id` is
    /// reserved by GELF and keys outside `[A-Za-z0-9_.-]` are skipped.
    pub fn extra(mut self, key: &str, value: impl Into<String>) -> Self {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));
        if valid && key != "id" {
            self.extra.insert(format!("_{}", key), value.into());
        } else {
            tracing::debug!("Skipping invalid GELF additional field {:?}", key);
        }
        self
    }

    /// Serialize to the JSON payload shared by every transport
    pub fn to_bytes(&self) -> Result<Vec<u8>, GelfError> {
        Ok(serde_json::to_vec(self)?)
    }
}
