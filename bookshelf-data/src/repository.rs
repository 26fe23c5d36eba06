use crate::error::DataError;
use std::future::Future;

/// Generic async repository trait for CRUD-by-id operations.
///
/// Methods return `impl Future + Send`, so no `async-trait` is needed.
pub trait Repository<T, ID>: Send + Sync
where
    T: Send + Sync + 'static,
    ID: Send + Sync + 'static,
{
    /// Every persisted entity, in ascending id order.
    fn find_all(&self) -> impl Future<Output = Result<Vec<T>, DataError>> + Send;

    fn find_by_id(&self, id: ID) -> impl Future<Output = Result<Option<T>, DataError>> + Send;

    /// Insert when `entity` has no id (the store assigns one), otherwise
    /// replace the row with that id or insert it if absent. Returns the
    /// persisted entity.
    fn save(&self, entity: T) -> impl Future<Output = Result<T, DataError>> + Send;

    /// Remove the entity if present. Returns whether a row was removed;
    /// deleting an absent id is not an error.
    fn delete_by_id(&self, id: ID) -> impl Future<Output = Result<bool, DataError>> + Send;
}
