//! Data models for Bookshelf

pub mod book;
pub mod log_entry;

pub use book::Book;
pub use log_entry::LogEntry;
