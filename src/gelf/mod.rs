//! GELF (Graylog Extended Log Format) client
//!
//! This module provides the GELF 1.1 message model, UDP chunking and the
//! TCP/UDP transports used to ship access log entries to a collector.

pub mod chunk;
pub mod message;
pub mod transport;

pub use message::{GelfMessage, Level};
pub use transport::{connect, GelfTransport, TcpTransport, Transport, UdpTransport};

use thiserror::Error;

/// Errors raised while talking to a GELF collector
#[derive(Error, Debug)]
pub enum GelfError {
    #[error("collector I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode GELF message: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("collector address {0} did not resolve")]
    Unresolved(String),

    #[error("chunk size {0} does not exceed the 12-byte chunk header")]
    ChunkSize(usize),

    #[error("GELF message of {size} bytes needs more than {max} chunks")]
    TooLarge { size: usize, max: usize },
}
