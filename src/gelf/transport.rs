//! Network transports for GELF messages

use async_trait::async_trait;
use serde::Deserialize;
use std::{
    io,
    net::{Ipv4Addr, Ipv6Addr, SocketAddr},
    time::Duration,
};
use tokio::{
    io::AsyncWriteExt,
    net::{lookup_host, TcpStream, UdpSocket},
};

use super::{chunk, GelfError, GelfMessage};
use crate::config::CollectorConfig;

/// Upper bound on dialling the collector, so an unreachable host cannot stall startup
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Wire transport towards the collector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    Tcp,
    Udp,
}

/// Sends one GELF message per call
#[async_trait]
pub trait GelfTransport: Send {
    async fn send(&mut self, message: &GelfMessage) -> Result<(), GelfError>;
}

/// Open the transport described by `config`
pub async fn connect(config: &CollectorConfig) -> Result<Box<dyn GelfTransport>, GelfError> {
    let endpoint = config.endpoint();
    Ok(match config.transport {
        Transport::Tcp => Box::new(TcpTransport::connect(&endpoint).await?),
        Transport::Udp => Box::new(UdpTransport::connect(&endpoint).await?),
    })
}

/// GELF over TCP: each message is a JSON document terminated by a NUL byte
pub struct TcpTransport {
    endpoint: String,
    stream: Option<TcpStream>,
}

impl TcpTransport {
    pub async fn connect(endpoint: &str) -> Result<Self, GelfError> {
        let stream = dial(endpoint).await?;
        Ok(Self {
            endpoint: endpoint.to_string(),
            stream: Some(stream),
        })
    }
}

async fn dial(endpoint: &str) -> Result<TcpStream, GelfError> {
    let stream = tokio::time::timeout(CONNECT_TIMEOUT, TcpStream::connect(endpoint))
        .await
        .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, format!("connecting to {}", endpoint)))??;
    stream.set_nodelay(true)?;
    Ok(stream)
}

#[async_trait]
impl GelfTransport for TcpTransport {
    async fn send(&mut self, message: &GelfMessage) -> Result<(), GelfError> {
        let mut frame = message.to_bytes()?;
        frame.push(0);

        // A connection dropped by an earlier failure is dialled again once, here
        let mut stream = match self.stream.take() {
            Some(stream) => stream,
            None => dial(&self.endpoint).await?,
        };

        stream.write_all(&frame).await?;
        self.stream = Some(stream);
        Ok(())
    }
}

/// GELF over UDP, chunked when a message exceeds one datagram
pub struct UdpTransport {
    socket: UdpSocket,
    chunk_size: usize,
}

impl UdpTransport {
    pub async fn connect(endpoint: &str) -> Result<Self, GelfError> {
        let target = lookup_host(endpoint)
            .await?
            .next()
            .ok_or_else(|| GelfError::Unresolved(endpoint.to_string()))?;

        let local = if target.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        };
        let socket = UdpSocket::bind(local).await?;
        socket.connect(target).await?;

        Ok(Self {
            socket,
            chunk_size: chunk::DEFAULT_CHUNK_SIZE,
        })
    }

    /// Use datagrams of at most `chunk_size` bytes, header included
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Result<Self, GelfError> {
        if chunk_size <= chunk::CHUNK_HEADER_LEN {
            return Err(GelfError::ChunkSize(chunk_size));
        }
        self.chunk_size = chunk_size;
        Ok(self)
    }
}

#[async_trait]
impl GelfTransport for UdpTransport {
    async fn send(&mut self, message: &GelfMessage) -> Result<(), GelfError> {
        let payload = message.to_bytes()?;
        let message_id: [u8; 8] = rand::random();
        for datagram in chunk::chunk(&payload, self.chunk_size, message_id)? {
            self.socket.send(&datagram).await?;
        }
        Ok(())
    }
}
