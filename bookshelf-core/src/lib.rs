//! # bookshelf-core
//!
//! Runtime pieces shared by every Bookshelf service: the [`HttpError`] type
//! and its JSON rendering, request extractors, layered configuration,
//! tracing setup, health checks and the [`AppBuilder`] that wires them into
//! an `axum::Router`.

pub mod builder;
pub mod config;
pub mod controller;
pub mod error;
pub mod extract;
pub mod health;
pub mod layers;
pub mod request_id;
pub mod validation;

pub use builder::AppBuilder;
pub use controller::Controller;
pub use config::{BookshelfConfig, ConfigError};
pub use error::{error_response, HttpError};
pub use extract::{JsonBody, PathParam, Validated};
pub use health::{HealthBuilder, HealthIndicator, HealthStatus};
pub use layers::init_tracing;
pub use request_id::{RequestId, X_REQUEST_ID};
pub use validation::{FieldError, ValidationErrorResponse};

pub use axum;
pub use garde;
