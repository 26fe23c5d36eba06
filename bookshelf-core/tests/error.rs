use axum::http::StatusCode;
use axum::response::IntoResponse;
use bookshelf_core::{error_response, FieldError, HttpError, ValidationErrorResponse};
use http_body_util::BodyExt;
use serde_json::{json, Value};

async fn rendered(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn each_variant_picks_its_status() {
    let cases = [
        (HttpError::NotFound("Book 7 not found".into()), StatusCode::NOT_FOUND),
        (HttpError::BadRequest("trailing comma".into()), StatusCode::BAD_REQUEST),
        (HttpError::Internal("disk full".into()), StatusCode::INTERNAL_SERVER_ERROR),
    ];
    for (err, expected) in cases {
        let message = err.to_string();
        let (status, body) = rendered(err.into_response()).await;
        assert_eq!(status, expected);
        assert!(message.ends_with(body["error"].as_str().unwrap()), "{message} vs {body}");
        assert!(body.get("details").is_none());
    }
}

#[tokio::test]
async fn validation_failures_carry_details() {
    let err = HttpError::Validation(ValidationErrorResponse {
        errors: vec![FieldError {
            field: "title".into(),
            message: "length is lower than 1".into(),
            code: "invalid".into(),
        }],
    });
    let (status, body) = rendered(err.into_response()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "error": "Validation failed",
            "details": [{"field": "title", "message": "length is lower than 1", "code": "invalid"}],
        })
    );
}

#[tokio::test]
async fn error_response_has_only_the_message() {
    let (status, body) = rendered(error_response(StatusCode::CONFLICT, "taken")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({"error": "taken"}));
}

#[test]
fn display_leads_with_the_status() {
    assert_eq!(HttpError::NotFound("x".into()).to_string(), "404 Not Found: x");
    assert_eq!(
        HttpError::Validation(ValidationErrorResponse::default()).to_string(),
        "400 Bad Request: 0 invalid field(s)"
    );
}
