use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::entity::Entity;
use crate::error::DataError;
use crate::repository::Repository;

struct Table<T> {
    rows: BTreeMap<i64, T>,
    /// `None` once `i64::MAX` has been handed out.
    next_id: Option<i64>,
}

/// A process-local repository keyed by `i64` ids.
///
/// Ids start at 1 and are never reused: saving an entity with an explicit id
/// at or above the next free id moves the counter past it. Writers are
/// serialised through a `RwLock`, so every operation is atomic.
///
/// Once an id of `i64::MAX` is stored the counter is spent: explicit ids are
/// still accepted, but saving without one fails.
///
/// Cloning is cheap and clones share the same table.
pub struct InMemoryRepository<T> {
    table: Arc<RwLock<Table<T>>>,
}

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(Table {
                rows: BTreeMap::new(),
                next_id: Some(1),
            })),
        }
    }

    /// Number of stored entities.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for InMemoryRepository<T> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
        }
    }
}

impl<T> Repository<T, i64> for InMemoryRepository<T>
where
    T: Entity<Id = i64>,
{
    async fn find_all(&self) -> Result<Vec<T>, DataError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<T>, DataError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn save(&self, entity: T) -> Result<T, DataError> {
        let mut table = self.table.write().await;
        let id = match entity.id() {
            Some(id) => {
                if table.next_id.is_some_and(|next| id >= next) {
                    table.next_id = id.checked_add(1);
                }
                id
            }
            None => {
                let id = table.next_id.ok_or_else(|| {
                    DataError::database(format!("{}: no ids left to assign", T::table_name()))
                })?;
                table.next_id = id.checked_add(1);
                id
            }
        };
        let stored = entity.with_id(id);
        table.rows.insert(id, stored.clone());
        tracing::trace!(table = T::table_name(), id, "row saved");
        Ok(stored)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, DataError> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: Option<i64>,
        text: String,
    }

    impl Entity for Note {
        type Id = i64;

        fn table_name() -> &'static str {
            "notes"
        }

        fn id_column() -> &'static str {
            "id"
        }

        fn columns() -> &'static [&'static str] {
            &["id", "text"]
        }

        fn id(&self) -> Option<i64> {
            self.id
        }

        fn with_id(self, id: i64) -> Self {
            Note { id: Some(id), ..self }
        }

        fn without_id(self) -> Self {
            Note { id: None, ..self }
        }
    }

    fn note(text: &str) -> Note {
        Note {
            id: None,
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn save_without_id_assigns_increasing_ids() {
        let repo = InMemoryRepository::new();
        let a = repo.save(note("a")).await.unwrap();
        let b = repo.save(note("b")).await.unwrap();
        assert_eq!(a.id, Some(1));
        assert_eq!(b.id, Some(2));
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn save_with_existing_id_replaces() {
        let repo = InMemoryRepository::new();
        let a = repo.save(note("a")).await.unwrap();
        let replaced = repo
            .save(Note {
                id: a.id,
                text: "a2".into(),
            })
            .await
            .unwrap();
        assert_eq!(replaced.id, a.id);
        assert_eq!(repo.len().await, 1);
        assert_eq!(repo.find_by_id(1).await.unwrap().unwrap().text, "a2");
    }

    #[tokio::test]
    async fn save_with_unknown_id_inserts_and_bumps_counter() {
        let repo = InMemoryRepository::new();
        let explicit = repo
            .save(Note {
                id: Some(10),
                text: "ten".into(),
            })
            .await
            .unwrap();
        assert_eq!(explicit.id, Some(10));
        let next = repo.save(note("next")).await.unwrap();
        assert_eq!(next.id, Some(11));
    }

    #[tokio::test]
    async fn explicit_max_id_is_stored_and_spends_the_counter() {
        let repo = InMemoryRepository::new();
        let last = repo
            .save(Note {
                id: Some(i64::MAX),
                text: "last".into(),
            })
            .await
            .unwrap();
        assert_eq!(last.id, Some(i64::MAX));
        assert_eq!(repo.find_by_id(i64::MAX).await.unwrap(), Some(last));

        let err = repo.save(note("one more")).await.unwrap_err();
        assert!(err.to_string().contains("no ids left"), "{err}");

        let lower = repo
            .save(Note {
                id: Some(3),
                text: "three".into(),
            })
            .await
            .unwrap();
        assert_eq!(lower.id, Some(3));
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = InMemoryRepository::new();
        let a = repo.save(note("a")).await.unwrap();
        assert!(repo.delete_by_id(1).await.unwrap());
        let b = repo.save(note("b")).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn delete_absent_id_is_noop() {
        let repo: InMemoryRepository<Note> = InMemoryRepository::new();
        assert!(!repo.delete_by_id(42).await.unwrap());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn find_all_is_ordered_by_id() {
        let repo = InMemoryRepository::new();
        repo.save(Note {
            id: Some(5),
            text: "five".into(),
        })
        .await
        .unwrap();
        repo.save(note("six")).await.unwrap();
        repo.save(Note {
            id: Some(2),
            text: "two".into(),
        })
        .await
        .unwrap();
        let ids: Vec<_> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.id.unwrap())
            .collect();
        assert_eq!(ids, vec![2, 5, 6]);
    }

    #[tokio::test]
    async fn clones_share_storage() {
        let repo = InMemoryRepository::new();
        let other = repo.clone();
        repo.save(note("shared")).await.unwrap();
        assert!(other.find_by_id(1).await.unwrap().is_some());
    }

    #[test]
    fn select_clause_lists_columns() {
        assert_eq!(Note::select_clause(), "SELECT id, text FROM notes");
    }
}
