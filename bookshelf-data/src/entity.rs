/// Trait representing a database entity with a table name, id column, and column list.
///
/// The id is optional on the value itself: an entity that has never been
/// persisted carries no id, and the store assigns one on save.
///
/// # Example
///
/// ```ignore
/// impl Entity for Book {
///     type Id = i64;
///     fn table_name() -> &'static str { "books" }
///     fn id_column() -> &'static str { "id" }
///     fn columns() -> &'static [&'static str] { &["id", "title", "author"] }
///     fn id(&self) -> Option<i64> { self.id }
///     fn with_id(self, id: i64) -> Self { Book { id: Some(id), ..self } }
/// }
/// ```
pub trait Entity: Clone + Send + Sync + Unpin + 'static {
    type Id: Copy + Ord + Send + Sync + std::fmt::Display + 'static;

    fn table_name() -> &'static str;
    fn id_column() -> &'static str;
    fn columns() -> &'static [&'static str];

    /// The store-assigned id, if this value has been persisted.
    fn id(&self) -> Option<Self::Id>;

    /// Return the same entity carrying `id`.
    fn with_id(self, id: Self::Id) -> Self;

    /// Return the same entity with no id, ready for insertion.
    fn without_id(self) -> Self;

    /// `SELECT <columns> FROM <table>` for this entity.
    fn select_clause() -> String {
        format!("SELECT {} FROM {}", Self::columns().join(", "), Self::table_name())
    }
}
