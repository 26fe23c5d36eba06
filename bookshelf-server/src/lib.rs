//! # bookshelf-server
//!
//! CRUD over book records. [`BookController`] maps HTTP onto
//! [`BookService`], which enforces existence rules over any
//! [`BookRepository`]: SQLite in production, in-memory for tests or
//! `store.kind: memory`.

pub mod controllers;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod settings;
pub mod state;

use bookshelf_core::{AppBuilder, HealthBuilder};

pub use controllers::BookController;
pub use error::BookError;
pub use models::Book;
pub use repository::{
    BookRepository, MemoryBookRepository, MemoryHealth, SqliteBookRepository, SqliteHealth,
};
pub use services::BookService;
pub use settings::{Settings, StoreKind};
pub use state::AppState;

/// Assemble the book routes over `repository` with the given health checks.
pub fn app<R: BookRepository>(repository: R, health: HealthBuilder) -> AppBuilder<AppState<R>> {
    AppBuilder::new(AppState::new(repository))
        .register_controller::<BookController<R>>()
        .with_health(health)
}
