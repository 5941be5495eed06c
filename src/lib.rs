//! Bookshelf book catalog server
//!
//! A small REST JSON API over an in-memory collection of books. Every
//! request on the book routes is reported to a GELF collector.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod gelf;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    pub fn new(config: AppConfig, services: services::Services) -> Self {
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
