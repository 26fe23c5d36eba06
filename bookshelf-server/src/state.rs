use crate::repository::BookRepository;
use crate::services::BookService;

#[derive(Clone)]
pub struct AppState<R> {
    pub book_service: BookService<R>,
}

impl<R: BookRepository> AppState<R> {
    pub fn new(repository: R) -> Self {
        Self {
            book_service: BookService::new(repository),
        }
    }
}

