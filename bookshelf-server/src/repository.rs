use bookshelf_core::{HealthIndicator, HealthStatus};
use bookshelf_data::{DataError, Entity, InMemoryRepository, Repository};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::models::Book;

/// Any store the book service can run against.
pub trait BookRepository: Repository<Book, i64> + Clone + 'static {}

impl<R: Repository<Book, i64> + Clone + 'static> BookRepository for R {}

/// Book store backed by a SQLite connection pool.
#[derive(Clone)]
pub struct SqliteBookRepository {
    pool: SqlitePool,
}

impl SqliteBookRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool on `url` and apply the bundled migrations.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, DataError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            // An in-memory database lives only as long as its connection.
            .idle_timeout(None)
            .max_lifetime(None)
            .connect(url)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(DataError::migration)?;

        tracing::info!(%url, max_connections, "book store ready");
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl Repository<Book, i64> for SqliteBookRepository {
    async fn find_all(&self) -> Result<Vec<Book>, DataError> {
        let sql = format!("{} ORDER BY {}", Book::select_clause(), Book::id_column());
        let books = sqlx::query_as::<_, Book>(&sql).fetch_all(&self.pool).await?;
        Ok(books)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Book>, DataError> {
        let sql = format!("{} WHERE {} = ?", Book::select_clause(), Book::id_column());
        sqlx::query_as::<_, Book>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DataError::from)
    }

    async fn save(&self, book: Book) -> Result<Book, DataError> {
        let query = match book.id {
            None => sqlx::query_as::<_, Book>(
                "INSERT INTO books (title, author, publication_year, isbn) \
                 VALUES (?, ?, ?, ?) \
                 RETURNING id, title, author, publication_year, isbn",
            ),
            Some(id) => sqlx::query_as::<_, Book>(
                "INSERT INTO books (id, title, author, publication_year, isbn) \
                 VALUES (?, ?, ?, ?, ?) \
                 ON CONFLICT(id) DO UPDATE SET \
                 title = excluded.title, author = excluded.author, \
                 publication_year = excluded.publication_year, isbn = excluded.isbn \
                 RETURNING id, title, author, publication_year, isbn",
            )
            .bind(id),
        };

        query
            .bind(book.title)
            .bind(book.author)
            .bind(book.publication_year)
            .bind(book.isbn)
            .fetch_one(&self.pool)
            .await
            .map_err(DataError::from)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, DataError> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Readiness check issuing `SELECT 1` against the pool.
pub struct SqliteHealth {
    pool: SqlitePool,
}

impl SqliteHealth {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl HealthIndicator for SqliteHealth {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn check(&self) -> HealthStatus {
        match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => HealthStatus::Up,
            Err(e) => HealthStatus::Down(e.to_string()),
        }
    }
}

/// The in-memory store has nothing to check.
pub struct MemoryHealth;

impl HealthIndicator for MemoryHealth {
    fn name(&self) -> &str {
        "memory"
    }

    async fn check(&self) -> HealthStatus {
        HealthStatus::Up
    }

    fn affects_readiness(&self) -> bool {
        false
    }
}

/// Process-local book store, selected with `store.kind: memory`.
pub type MemoryBookRepository = InMemoryRepository<Book>;
