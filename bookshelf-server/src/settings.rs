use bookshelf_core::{BookshelfConfig, ConfigError};

/// Which book store backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Sqlite,
    Memory,
}

impl std::str::FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StoreKind::Sqlite),
            "memory" => Ok(StoreKind::Memory),
            _ => Err("expected sqlite or memory".to_owned()),
        }
    }
}

/// Server settings resolved from `application.yaml`, profile overrides and
/// the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub store: StoreKind,
    pub database_url: String,
    pub database_connections: u32,
}

impl Settings {
    pub fn from_config(config: &BookshelfConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            host: config.get_or("server.host", "0.0.0.0".to_string())?,
            port: config.get_or("server.port", 8080)?,
            store: config.get_or("store.kind", StoreKind::Sqlite)?,
            database_url: config
                .get_or("database.url", "sqlite://bookshelf.db?mode=rwc".to_string())?,
            database_connections: config.get_or("database.connections", 5)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
