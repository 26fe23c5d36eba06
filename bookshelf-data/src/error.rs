use std::error::Error;

type BoxError = Box<dyn Error + Send + Sync>;

/// A store that could not do its job. Missing rows are not errors here:
/// lookups return `Option` and deletes return `bool`.
#[derive(Debug)]
pub enum DataError {
    /// The backend rejected or failed a query.
    Database(BoxError),
    /// The schema could not be brought up to date at start-up.
    Migration(BoxError),
}

impl DataError {
    pub fn database(err: impl Into<BoxError>) -> Self {
        Self::Database(err.into())
    }

    pub fn migration(err: impl Into<BoxError>) -> Self {
        Self::Migration(err.into())
    }
}

impl From<sqlx::Error> for DataError {
    fn from(err: sqlx::Error) -> Self {
        Self::database(err)
    }
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Database(err) => write!(f, "database error: {err}"),
            Self::Migration(err) => write!(f, "migration failed: {err}"),
        }
    }
}

impl Error for DataError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Database(err) | Self::Migration(err) => Some(err.as_ref()),
        }
    }
}

impl From<DataError> for bookshelf_core::HttpError {
    fn from(err: DataError) -> Self {
        Self::Internal(err.to_string())
    }
}
