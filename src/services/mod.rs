//! Business logic services

pub mod access_log;
pub mod books;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
    pub access_log: access_log::AccessLogService,
}

impl Services {
    /// Create all services over the given repository and access log shipper
    pub fn new(repository: Repository, access_log: access_log::AccessLogService) -> Self {
        Self {
            books: books::BooksService::new(repository),
            access_log,
        }
    }
}
