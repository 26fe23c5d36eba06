pub mod book_controller;

pub use book_controller::BookController;
