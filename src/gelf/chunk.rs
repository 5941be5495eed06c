//! GELF UDP chunking
//!
//! Payloads larger than one datagram are split into chunks, each prefixed
//! with a 12-byte header: the magic bytes `0x1e 0x0f`, an 8-byte message id,
//! the chunk sequence number and the total chunk count.

use super::GelfError;

pub const CHUNK_MAGIC: [u8; 2] = [0x1e, 0x0f];
pub const CHUNK_HEADER_LEN: usize = 12;
pub const MAX_CHUNKS: usize = 128;
/// Datagram size that stays below common WAN MTUs
pub const DEFAULT_CHUNK_SIZE: usize = 1420;

/// Split `payload` into datagrams of at most `chunk_size` bytes.
///
/// A payload that fits in one datagram is sent unchunked. `chunk_size` must
/// exceed the chunk header length.
pub fn chunk(payload: &[u8], chunk_size: usize, message_id: [u8; 8]) -> Result<Vec<Vec<u8>>, GelfError> {
    if chunk_size <= CHUNK_HEADER_LEN {
        return Err(GelfError::ChunkSize(chunk_size));
    }

    if payload.len() <= chunk_size {
        return Ok(vec![payload.to_vec()]);
    }

    let body_size = chunk_size - CHUNK_HEADER_LEN;
    let count = payload.len().div_ceil(body_size);
    if count > MAX_CHUNKS {
        return Err(GelfError::TooLarge {
            size: payload.len(),
            max: MAX_CHUNKS,
        });
    }

    let datagrams = payload
        .chunks(body_size)
        .enumerate()
        .map(|(sequence, body)| {
            let mut datagram = Vec::with_capacity(CHUNK_HEADER_LEN + body.len());
            datagram.extend_from_slice(&CHUNK_MAGIC);
            datagram.extend_from_slice(&message_id);
            datagram.push(sequence as u8);
            datagram.push(count as u8);
            datagram.extend_from_slice(body);
            datagram
        })
        .collect();

    Ok(datagrams)
}
