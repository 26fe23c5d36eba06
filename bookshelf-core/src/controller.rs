use axum::Router;

/// A group of routes sharing a path prefix and the application state `T`.
///
/// Registered with [`AppBuilder::register_controller`](crate::AppBuilder::register_controller).
pub trait Controller<T: Clone + Send + Sync + 'static> {
    fn routes() -> Router<T>;
}
