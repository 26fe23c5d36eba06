use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use bookshelf_core::{Controller, HttpError, PathParam, Validated};

use crate::models::Book;
use crate::repository::BookRepository;
use crate::services::BookService;
use crate::state::AppState;

/// `/books` and `/books/{id}`.
///
/// Built per request from the application state, so every handler below is
/// a method with the service at hand.
pub struct BookController<R> {
    book_service: BookService<R>,
}

impl<R: BookRepository> FromRequestParts<AppState<R>> for BookController<R> {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState<R>,
    ) -> Result<Self, Infallible> {
        Ok(Self {
            book_service: state.book_service.clone(),
        })
    }
}

impl<R: BookRepository> Controller<AppState<R>> for BookController<R> {
    fn routes() -> Router<AppState<R>> {
        Router::new()
            .route(
                "/books",
                get(|c: Self| async move { c.list().await })
                    .post(|c: Self, Validated(book): Validated<Book>| async move {
                        c.create(book).await
                    }),
            )
            .route(
                "/books/{id}",
                get(|c: Self, PathParam(id): PathParam<i64>| async move { c.get_by_id(id).await })
                    .put(
                        |c: Self, PathParam(id): PathParam<i64>, Validated(book): Validated<Book>| async move {
                            c.update(id, book).await
                        },
                    )
                    .delete(|c: Self, PathParam(id): PathParam<i64>| async move {
                        c.delete(id).await
                    }),
            )
    }
}

impl<R: BookRepository> BookController<R> {
    async fn list(&self) -> Result<Json<Vec<Book>>, HttpError> {
        Ok(Json(self.book_service.get_all_books().await?))
    }

    async fn get_by_id(&self, id: i64) -> Result<Json<Book>, HttpError> {
        Ok(Json(self.book_service.get_book_by_id(id).await?))
    }

    async fn create(&self, book: Book) -> Result<(StatusCode, Json<Book>), HttpError> {
        let book = self.book_service.create_book(book).await?;
        Ok((StatusCode::CREATED, Json(book)))
    }

    // 201 rather than 200; existing clients expect it.
    async fn update(&self, id: i64, book: Book) -> Result<(StatusCode, Json<Book>), HttpError> {
        let book = self.book_service.update_book(id, book).await?;
        Ok((StatusCode::CREATED, Json(book)))
    }

    async fn delete(&self, id: i64) -> Result<StatusCode, HttpError> {
        self.book_service.delete_book(id).await?;
        Ok(StatusCode::NO_CONTENT)
    }
}
