//! Access log middleware
//!
//! Builds a `LogEntry` for every request on the book routes and queues it
//! for the collector before the handler runs.

use axum::{
    extract::{ConnectInfo, MatchedPath, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;

use crate::{
    models::{log_entry::normalize_ip, LogEntry},
    AppState,
};

pub async fn access_log(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_default();
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let ip = client_ip(request.headers(), peer);

    let entry = LogEntry::new(endpoint, request.method().as_str(), ip);
    state.services.access_log.record(entry);

    next.run(request).await
}

/// Resolve the caller address: proxy headers first, then the TCP peer
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .or_else(|| headers.get("x-real-ip").and_then(|v| v.to_str().ok()))
        .map(str::trim)
        .filter(|v| !v.is_empty());

    match (forwarded, peer) {
        (Some(ip), _) => normalize_ip(ip),
        (None, Some(addr)) => normalize_ip(&addr.ip().to_string()),
        (None, None) => "unknown".to_string(),
    }
}
