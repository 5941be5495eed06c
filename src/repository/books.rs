//! In-memory book store
//!
//! Books live in an ordered `Vec` behind a single `RwLock`. Lookups scan
//! from the front and only ever address the first record carrying an id.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::Book,
};

pub const BOOK_NOT_FOUND: &str = "Book not found";

#[derive(Clone, Default)]
pub struct BooksRepository {
    books: Arc<RwLock<Vec<Book>>>,
}

impl BooksRepository {
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books: Arc::new(RwLock::new(books)),
        }
    }

    /// Snapshot of every book, in store order
    pub async fn list(&self) -> Vec<Book> {
        self.books.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.books.read().await.is_empty()
    }

    /// First book whose id equals `id`
    pub async fn get(&self, id: &str) -> AppResult<Book> {
        self.books
            .read()
            .await
            .iter()
            .find(|book| book.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))
    }

    /// Append a book as given, id included
    pub async fn create(&self, book: Book) -> Book {
        self.books.write().await.push(book.clone());
        book
    }

    /// Overwrite the first book matching `id` with `data`, keeping `id`.
    ///
    /// A missing record is reported before a bad body, and a bad body never
    /// touches the stored record.
    pub async fn update(&self, id: &str, data: AppResult<Book>) -> AppResult<Book> {
        let mut books = self.books.write().await;
        let slot = books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))?;

        let mut book = data?;
        book.id = id.to_string();
        *slot = book.clone();
        Ok(book)
    }

    /// Remove the first book matching `id`, if any, and return what remains
    pub async fn delete(&self, id: &str) -> Vec<Book> {
        let mut books = self.books.write().await;
        if let Some(index) = books.iter().position(|book| book.id == id) {
            books.remove(index);
        }
        books.clone()
    }
}
