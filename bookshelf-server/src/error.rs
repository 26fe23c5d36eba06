use bookshelf_core::HttpError;
use bookshelf_data::DataError;

/// Failures surfaced by [`BookService`](crate::services::BookService).
#[derive(Debug)]
pub enum BookError {
    NotFound(i64),
    Store(DataError),
}

impl std::fmt::Display for BookError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookError::NotFound(id) => write!(f, "Book {id} not found"),
            BookError::Store(err) => write!(f, "Book store failure: {err}"),
        }
    }
}

impl std::error::Error for BookError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BookError::Store(err) => Some(err),
            BookError::NotFound(_) => None,
        }
    }
}

impl From<DataError> for BookError {
    fn from(err: DataError) -> Self {
        BookError::Store(err)
    }
}

impl From<BookError> for HttpError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::NotFound(_) => HttpError::NotFound(err.to_string()),
            BookError::Store(e) => HttpError::from(e),
        }
    }
}
