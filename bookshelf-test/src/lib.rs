//! In-process HTTP client for exercising Bookshelf routers in tests.

mod app;

pub use app::{lookup, to_pointer, TestApp, TestRequest, TestResponse};
