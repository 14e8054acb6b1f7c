use anyhow::Result;
use std::path::PathBuf;

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            filename: std::env::var("DATABASE_FILENAME")
                .unwrap_or_else(|_| "data/database.db".into())
                .into(),
        };
        let server = ServerConfig {
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        };
        Ok(Self { database, server })
    }
}

pub struct DatabaseConfig {
    pub filename: PathBuf,
}

pub struct ServerConfig {
    pub port: u16,
}
