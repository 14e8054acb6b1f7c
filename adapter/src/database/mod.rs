use shared::{
    config::DatabaseConfig,
    error::{AppError, AppResult},
};
use sqlx::{sqlite::SqliteConnectOptions, SqlitePool};

pub mod model;
pub mod seed;

fn make_sqlite_connect_options(cfg: &DatabaseConfig) -> SqliteConnectOptions {
    SqliteConnectOptions::new()
        .filename(&cfg.filename)
        .create_if_missing(true)
}

#[derive(Clone)]
pub struct ConnectionPool(SqlitePool);

impl ConnectionPool {
    pub fn new(pool: SqlitePool) -> Self {
        Self(pool)
    }

    pub fn inner_ref(&self) -> &SqlitePool {
        &self.0
    }

    pub async fn begin(&self) -> AppResult<sqlx::Transaction<'_, sqlx::Sqlite>> {
        self.0.begin().await.map_err(AppError::TransactionError)
    }

    /// スキーマを最新化する（起動時に一度呼ぶ）
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::migrate!("./migrations").run(&self.0).await?;
        Ok(())
    }
}

pub fn connect_database_with(cfg: &DatabaseConfig) -> ConnectionPool {
    ConnectionPool(SqlitePool::connect_lazy_with(make_sqlite_connect_options(
        cfg,
    )))
}
