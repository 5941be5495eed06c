//! Repository layer over the in-memory record store

pub mod books;

use crate::models::Book;

/// Main repository struct holding every store
#[derive(Clone)]
pub struct Repository {
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a repository whose book store starts with `books`
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books: books::BooksRepository::new(books),
        }
    }

    /// Create a repository holding the startup seed records
    pub fn seeded() -> Self {
        Self::new(Book::seed())
    }
}
