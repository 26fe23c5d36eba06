use bookshelf_core::axum::body::Body;
use bookshelf_core::axum::Router;
use bookshelf_core::AppBuilder;
use bytes::Bytes;
use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use http::{request, HeaderMap, Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tower::util::ServiceExt;

/// Drives a router in-process: each request goes through
/// `ServiceExt::oneshot` on a clone, so no socket is bound.
#[derive(Clone)]
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Build with the same middleware the server runs behind.
    pub fn from_builder<T: Clone + Send + Sync + 'static>(builder: AppBuilder<T>) -> Self {
        Self::new(builder.build())
    }

    pub fn get(&self, uri: &str) -> TestRequest {
        self.request(Method::GET, uri)
    }

    pub fn post(&self, uri: &str) -> TestRequest {
        self.request(Method::POST, uri)
    }

    pub fn put(&self, uri: &str) -> TestRequest {
        self.request(Method::PUT, uri)
    }

    pub fn delete(&self, uri: &str) -> TestRequest {
        self.request(Method::DELETE, uri)
    }

    fn request(&self, method: Method, uri: &str) -> TestRequest {
        TestRequest {
            router: self.router.clone(),
            parts: Request::builder().method(method).uri(uri),
            body: Body::empty(),
        }
    }
}

pub struct TestRequest {
    router: Router,
    parts: request::Builder,
    body: Body,
}

impl TestRequest {
    pub fn header(mut self, name: &'static str, value: &'static str) -> Self {
        self.parts = self
            .parts
            .header(HeaderName::from_static(name), HeaderValue::from_static(value));
        self
    }

    /// Serialize `payload` as the body and mark it `application/json`.
    pub fn json(mut self, payload: &impl Serialize) -> Self {
        let bytes = serde_json::to_vec(payload).expect("request payload is not serializable");
        self.parts = self.parts.header(CONTENT_TYPE, "application/json");
        self.body = Body::from(bytes);
        self
    }

    /// Raw body bytes; headers are left as they are.
    pub fn body(mut self, raw: impl Into<Bytes>) -> Self {
        self.body = Body::from(raw.into());
        self
    }

    pub async fn send(self) -> TestResponse {
        let request = self.parts.body(self.body).expect("invalid test request");
        let response = self
            .router
            .oneshot(request)
            .await
            .unwrap_or_else(|never| match never {});
        let (parts, body) = response.into_parts();
        let body = body
            .collect()
            .await
            .expect("response body could not be read")
            .to_bytes();
        TestResponse {
            status: parts.status,
            headers: parts.headers,
            body,
        }
    }
}

/// Translate `books[1].title` into the JSON pointer `/books/1/title`.
///
/// A trailing `len()` segment is reported separately, since a pointer
/// cannot express it.
pub fn to_pointer(path: &str) -> (String, bool) {
    let (path, wants_len) = match path.strip_suffix("len()") {
        Some(rest) => (rest.trim_end_matches('.'), true),
        None => (path, false),
    };
    let mut pointer = String::new();
    for segment in path.split(['.', '[', ']']).filter(|s| !s.is_empty()) {
        pointer.push('/');
        pointer.push_str(&segment.replace('~', "~0").replace('/', "~1"));
    }
    (pointer, wants_len)
}

/// Look `path` up in `root`; anything missing reads as `null`.
pub fn lookup(root: &Value, path: &str) -> Value {
    let (pointer, wants_len) = to_pointer(path);
    let found = root.pointer(&pointer).cloned().unwrap_or(Value::Null);
    if !wants_len {
        return found;
    }
    match &found {
        Value::Array(items) => items.len().into(),
        Value::Object(fields) => fields.len().into(),
        Value::String(text) => text.chars().count().into(),
        other => panic!("len() of {other} at \"{path}\""),
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn assert_status(self, expected: StatusCode) -> Self {
        if self.status != expected {
            panic!(
                "status {} where {expected} was expected; body: {}",
                self.status,
                self.text()
            );
        }
        self
    }

    pub fn assert_ok(self) -> Self {
        self.assert_status(StatusCode::OK)
    }

    pub fn assert_created(self) -> Self {
        self.assert_status(StatusCode::CREATED)
    }

    pub fn assert_no_content(self) -> Self {
        self.assert_status(StatusCode::NO_CONTENT)
    }

    pub fn assert_bad_request(self) -> Self {
        self.assert_status(StatusCode::BAD_REQUEST)
    }

    pub fn assert_not_found(self) -> Self {
        self.assert_status(StatusCode::NOT_FOUND)
    }

    /// ```ignore
    /// resp.assert_json_path("title", "Dune").assert_json_path("len()", 2);
    /// ```
    pub fn assert_json_path(self, path: &str, expected: impl Into<Value>) -> Self {
        let body: Value = self.json();
        let expected = expected.into();
        let actual = lookup(&body, path);
        assert!(
            actual == expected,
            "\"{path}\" is {actual}, expected {expected}; body: {body}"
        );
        self
    }

    pub fn json_path<T: DeserializeOwned>(&self, path: &str) -> T {
        let value = lookup(&self.json(), path);
        serde_json::from_value(value)
            .unwrap_or_else(|e| panic!("\"{path}\" has the wrong shape: {e}"))
    }

    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body)
            .unwrap_or_else(|e| panic!("body is not the expected JSON ({e}): {}", self.text()))
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
