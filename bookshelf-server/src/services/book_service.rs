use bookshelf_data::Entity;
use tracing::{debug, info};

use crate::error::BookError;
use crate::models::Book;
use crate::repository::BookRepository;

/// Business rules over a book store: ids are assigned on create, and
/// reads, updates and deletes of an unknown id fail with
/// [`BookError::NotFound`].
#[derive(Clone)]
pub struct BookService<R> {
    repository: R,
}

impl<R: BookRepository> BookService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub async fn get_all_books(&self) -> Result<Vec<Book>, BookError> {
        let books = self.repository.find_all().await?;
        debug!(count = books.len(), "listed books");
        Ok(books)
    }

    pub async fn get_book_by_id(&self, id: i64) -> Result<Book, BookError> {
        debug!(book_id = id, "fetching book");
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(BookError::NotFound(id))
    }

    /// Persist a new book. Any id carried by `request` is discarded.
    pub async fn create_book(&self, request: Book) -> Result<Book, BookError> {
        let book = self.repository.save(request.without_id()).await?;
        info!(book_id = ?book.id, title = %book.title, "book created");
        Ok(book)
    }

    /// Replace every field of book `id` with those of `request`.
    pub async fn update_book(&self, id: i64, request: Book) -> Result<Book, BookError> {
        self.get_book_by_id(id).await?;
        let book = self.repository.save(request.with_id(id)).await?;
        info!(book_id = id, "book updated");
        Ok(book)
    }

    pub async fn delete_book(&self, id: i64) -> Result<(), BookError> {
        self.get_book_by_id(id).await?;
        self.repository.delete_by_id(id).await?;
        info!(book_id = id, "book deleted");
        Ok(())
    }
}
