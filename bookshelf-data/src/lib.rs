//! # bookshelf-data
//!
//! Persistence abstractions: the [`Entity`] description of a table row, the
//! async [`Repository`] trait, [`DataError`] with its conversion from
//! `sqlx::Error`, and [`InMemoryRepository`], a process-local store that
//! honours the same contract as the SQL-backed ones.

pub mod entity;
pub mod error;
pub mod memory;
pub mod repository;

pub use entity::Entity;
pub use error::DataError;
pub use memory::InMemoryRepository;
pub use repository::Repository;

