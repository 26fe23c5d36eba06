//! Liveness and readiness endpoints.
//!
//! `GET /health` runs every registered [`HealthIndicator`] and answers 200
//! when all are up, 503 otherwise. `GET /health/ready` does the same with
//! only the indicators that gate readiness. `GET /health/live` answers
//! `OK` as long as the process serves requests.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Up,
    Down(String),
}

impl HealthStatus {
    pub fn is_up(&self) -> bool {
        matches!(self, HealthStatus::Up)
    }
}

/// Something worth checking, such as the book store's connection pool.
pub trait HealthIndicator: Send + Sync + 'static {
    fn name(&self) -> &str;

    fn check(&self) -> impl Future<Output = HealthStatus> + Send;

    /// Set to `false` for checks that should show on `/health` without
    /// taking the instance out of rotation.
    fn affects_readiness(&self) -> bool {
        true
    }
}

type CheckFuture = Pin<Box<dyn Future<Output = HealthStatus> + Send>>;

struct Check {
    name: String,
    gates_readiness: bool,
    run: Box<dyn Fn() -> CheckFuture + Send + Sync>,
}

#[derive(Default)]
pub struct HealthBuilder {
    checks: Vec<Check>,
}

impl HealthBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check<H: HealthIndicator>(mut self, indicator: H) -> Self {
        let indicator = Arc::new(indicator);
        let name = indicator.name().to_owned();
        let gates_readiness = indicator.affects_readiness();
        self.checks.push(Check {
            name,
            gates_readiness,
            run: Box::new(move || -> CheckFuture {
                let indicator = Arc::clone(&indicator);
                Box::pin(async move { indicator.check().await })
            }),
        });
        self
    }

    /// The three health routes, usable under any router state.
    pub fn into_router<S>(self) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let all = Arc::new(Registry {
            list: self.checks,
            started: Instant::now(),
        });
        let ready = Arc::clone(&all);

        Router::new()
            .route("/health", get(move || run_checks(Arc::clone(&all), false)))
            .route("/health/live", get(|| async { "OK" }))
            .route("/health/ready", get(move || run_checks(Arc::clone(&ready), true)))
    }
}

struct Registry {
    list: Vec<Check>,
    started: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
enum Verdict {
    Up,
    Down,
}

#[derive(Serialize)]
struct CheckReport {
    name: String,
    status: Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    duration_ms: u64,
}

#[derive(Serialize)]
struct Report {
    status: Verdict,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    checks: Vec<CheckReport>,
    uptime_seconds: u64,
}

async fn run_checks(registry: Arc<Registry>, readiness_only: bool) -> (StatusCode, Json<Report>) {
    let mut checks = Vec::new();
    for check in registry.list.iter().filter(|p| !readiness_only || p.gates_readiness) {
        let started = Instant::now();
        let (status, reason) = match (check.run)().await {
            HealthStatus::Up => (Verdict::Up, None),
            HealthStatus::Down(reason) => {
                tracing::warn!(check = %check.name, %reason, "health check down");
                (Verdict::Down, Some(reason))
            }
        };
        checks.push(CheckReport {
            name: check.name.clone(),
            status,
            reason,
            duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        });
    }

    let healthy = checks.iter().all(|c| c.status == Verdict::Up);
    let report = Report {
        status: if healthy { Verdict::Up } else { Verdict::Down },
        checks,
        uptime_seconds: registry.started.elapsed().as_secs(),
    };
    let code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(report))
}
