use bookshelf_core::{init_tracing, BookshelfConfig, HealthBuilder};
use bookshelf_server::{
    app, MemoryBookRepository, MemoryHealth, Settings, SqliteBookRepository, SqliteHealth,
    StoreKind,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = BookshelfConfig::load("dev")?;
    let settings = Settings::from_config(&config)?;
    let addr = settings.bind_address();
    info!(profile = config.profile(), store = ?settings.store, "starting bookshelf");

    match settings.store {
        StoreKind::Sqlite => {
            let repository =
                SqliteBookRepository::connect(&settings.database_url, settings.database_connections)
                    .await?;
            let pool = repository.pool().clone();
            let health = HealthBuilder::new().check(SqliteHealth::new(pool.clone()));

            app(repository, health)
                .on_stop(move || async move {
                    pool.close().await;
                    info!("book store closed");
                })
                .serve(&addr)
                .await
        }
        StoreKind::Memory => {
            let health = HealthBuilder::new().check(MemoryHealth);
            app(MemoryBookRepository::new(), health).serve(&addr).await
        }
    }
}
