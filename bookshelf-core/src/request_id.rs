//! `x-request-id` handling. A usable incoming id is kept, otherwise a UUID
//! v4 is minted. The id names the request's tracing span, is available to
//! handlers as [`RequestId`] and is echoed on the response.

use axum::extract::{FromRequestParts, Request};
use axum::http::request::Parts;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;

use crate::error::HttpError;

pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(HeaderValue);

impl RequestId {
    fn from_incoming(value: Option<&HeaderValue>) -> Self {
        match value {
            Some(v) if !v.is_empty() && v.to_str().is_ok() => Self(v.clone()),
            _ => Self::mint(),
        }
    }

    fn mint() -> Self {
        let id = uuid::Uuid::new_v4().to_string();
        Self(HeaderValue::from_str(&id).unwrap_or_else(|_| HeaderValue::from_static("unknown")))
    }

    pub fn as_str(&self) -> &str {
        self.0.to_str().unwrap_or_default()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<S: Send + Sync> FromRequestParts<S> for RequestId {
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, HttpError> {
        parts
            .extensions
            .get::<RequestId>()
            .cloned()
            .ok_or_else(|| HttpError::Internal("request id middleware is not installed".into()))
    }
}

/// Install with `axum::middleware::from_fn(request_id_middleware)`.
pub async fn request_id_middleware(mut req: Request, next: Next) -> Response {
    let id = RequestId::from_incoming(req.headers().get(&X_REQUEST_ID));
    let span = tracing::info_span!(
        "request",
        request_id = %id,
        method = %req.method(),
        path = %req.uri().path(),
    );
    req.extensions_mut().insert(id.clone());

    let mut response = next.run(req).instrument(span).await;
    response.headers_mut().insert(X_REQUEST_ID.clone(), id.0);
    response
}
