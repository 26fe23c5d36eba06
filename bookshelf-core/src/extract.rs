//! Extractors that reject through [`HttpError`], so every malformed request
//! gets the same `{"error": ...}` body as the handlers' own failures.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::HttpError;
use crate::validation::ValidationErrorResponse;

/// JSON body. Syntax errors, a wrong content type and missing or mistyped
/// fields all become 400.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, HttpError> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(HttpError::BadRequest(rejection.body_text())),
        }
    }
}

/// A [`JsonBody`] that must also pass its `garde` rules.
///
/// ```ignore
/// async fn create(Validated(book): Validated<Book>) -> Result<Json<Book>, HttpError>
/// ```
pub struct Validated<T>(pub T);

impl<T, S> FromRequest<S> for Validated<T>
where
    T: DeserializeOwned + garde::Validate,
    T::Context: Default,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, HttpError> {
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;
        match value.validate() {
            Ok(()) => Ok(Self(value)),
            Err(report) => Err(HttpError::Validation(ValidationErrorResponse::from(&report))),
        }
    }
}

/// Path segments. A segment that does not parse (`/books/abc`) is a 400,
/// not axum's default plain-text response.
pub struct PathParam<T>(pub T);

impl<T, S> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, HttpError> {
        Path::<T>::from_request_parts(parts, state)
            .await
            .map(|Path(value)| Self(value))
            .map_err(|rejection| HttpError::BadRequest(rejection.body_text()))
    }
}
