//! Turning application state plus route fragments into a running server.

use std::future::Future;
use std::pin::Pin;

use axum::Router;

use crate::controller::Controller;
use crate::health::HealthBuilder;
use crate::layers;

type StopHook = Box<dyn FnOnce() -> Pin<Box<dyn Future<Output = ()> + Send>> + Send>;

/// Collects routes, the health endpoints and cleanup work around a state
/// value `T`.
///
/// Every router it produces goes through the same middleware stack, so
/// tests built from [`AppBuilder::build`] see what production sees.
pub struct AppBuilder<T> {
    state: T,
    fragments: Vec<Router<T>>,
    health: Option<HealthBuilder>,
    on_stop: Vec<StopHook>,
}

impl<T: Clone + Send + Sync + 'static> AppBuilder<T> {
    pub fn new(state: T) -> Self {
        Self {
            state,
            fragments: Vec::new(),
            health: None,
            on_stop: Vec::new(),
        }
    }

    pub fn register_routes(mut self, router: Router<T>) -> Self {
        self.fragments.push(router);
        self
    }

    pub fn register_controller<C: Controller<T>>(self) -> Self {
        tracing::debug!(controller = std::any::type_name::<C>(), "routes registered");
        self.register_routes(C::routes())
    }

    pub fn with_health(mut self, health: HealthBuilder) -> Self {
        self.health = Some(health);
        self
    }

    /// Runs once the server has drained, in registration order.
    ///
    /// ```ignore
    /// builder.on_stop(move || async move { pool.close().await })
    /// ```
    pub fn on_stop<F, Fut>(mut self, hook: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.on_stop.push(Box::new(move || Box::pin(hook())));
        self
    }

    pub fn build(self) -> Router {
        self.split().0
    }

    fn split(self) -> (Router, Vec<StopHook>) {
        let health = self.health.map(HealthBuilder::into_router);
        let routes = self
            .fragments
            .into_iter()
            .chain(health)
            .fold(Router::new(), |app, fragment| app.merge(fragment));
        (layers::apply(routes.with_state(self.state)), self.on_stop)
    }

    /// Serve on `addr` until Ctrl-C or SIGTERM, then run the stop hooks.
    pub async fn serve(self, addr: &str) -> Result<(), Box<dyn std::error::Error>> {
        let (router, on_stop) = self.split();
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(addr = %listener.local_addr()?, "listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(stop_requested())
            .await?;

        for hook in on_stop {
            hook().await;
        }
        tracing::info!("stopped");
        Ok(())
    }
}

async fn stop_requested() {
    let interrupt = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(%err, "cannot watch for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::warn!(%err, "cannot watch for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => {}
        () = terminate => {}
    }
    tracing::info!("shutdown requested, draining connections");
}
