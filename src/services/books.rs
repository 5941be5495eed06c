//! Books service

use crate::{error::AppResult, models::Book, repository::Repository};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> Vec<Book> {
        self.repository.books.list().await
    }

    pub async fn count(&self) -> usize {
        self.repository.books.len().await
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Book> {
        self.repository.books.get(id).await
    }

    pub async fn create(&self, book: Book) -> Book {
        let book = self.repository.books.create(book).await;
        tracing::debug!("Created book {:?}", book.id);
        book
    }

    /// Full overwrite of the first matching book; fields missing from the
    /// body end up empty and the id always stays `id`.
    pub async fn update(&self, id: &str, data: AppResult<Book>) -> AppResult<Book> {
        self.repository.books.update(id, data).await
    }

    /// Remove the first matching book and return the remaining ones.
    /// Deleting an unknown id leaves the store untouched.
    pub async fn delete(&self, id: &str) -> Vec<Book> {
        self.repository.books.delete(id).await
    }
}
