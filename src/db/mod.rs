use crate::models::query::QueryRecord;
use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        let mut opt = ConnectOptions::new(db_url.to_string());

        if let Some(path) = sqlite_file_path(db_url) {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory {}", parent.display())
                })?;
            }
            if !tokio::fs::try_exists(path).await.unwrap_or(false) {
                tokio::fs::File::create(path)
                    .await
                    .with_context(|| format!("Failed to create database file {}", path.display()))?;
            }

            opt.max_connections(max_connections)
                .min_connections(min_connections)
                .idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        } else {
            // Every pooled connection to `:memory:` would be its own database.
            opt.max_connections(1).min_connections(1);
        }

        opt.connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;
        let store = Self { conn };
        store.ensure_schema().await?;

        info!(
            "Database connected & schema ensured (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(store)
    }

    /// Creates the `ai_queries` table if it does not exist. Safe to call repeatedly.
    pub async fn ensure_schema(&self) -> Result<()> {
        use sea_orm_migration::MigratorTrait;

        migrator::Migrator::up(&self.conn, None)
            .await
            .context("Failed to ensure database schema")
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn query_repo(&self) -> repositories::query::QueryRepository {
        repositories::query::QueryRepository::new(self.conn.clone())
    }

    pub async fn add_query(&self, user_question: &str, ai_answer: &str) -> Result<QueryRecord> {
        self.query_repo().add(user_question, ai_answer).await
    }

    pub async fn get_query(&self, id: i64) -> Result<Option<QueryRecord>> {
        self.query_repo().get(id).await
    }

    pub async fn recent_queries(&self, limit: u64) -> Result<Vec<QueryRecord>> {
        self.query_repo().recent(limit).await
    }

    pub async fn count_queries(&self) -> Result<u64> {
        self.query_repo().count().await
    }
}

/// Resolves the on-disk file behind a `sqlite:` URL, or `None` for in-memory databases.
fn sqlite_file_path(db_url: &str) -> Option<&Path> {
    let rest = db_url.strip_prefix("sqlite:").unwrap_or(db_url);
    let rest = rest.strip_prefix("//").unwrap_or(rest);
    let path = rest.split('?').next().unwrap_or(rest);

    if path.is_empty() || path == ":memory:" || db_url.contains("mode=memory") {
        None
    } else {
        Some(Path::new(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_file_path_handles_url_forms() {
        assert_eq!(
            sqlite_file_path("sqlite:data/queries.db"),
            Some(Path::new("data/queries.db"))
        );
        assert_eq!(
            sqlite_file_path("sqlite://data/queries.db?mode=rwc"),
            Some(Path::new("data/queries.db"))
        );
        assert_eq!(
            sqlite_file_path("sqlite:///tmp/q.db"),
            Some(Path::new("/tmp/q.db"))
        );
        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("sqlite://file:x?mode=memory"), None);
    }

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let store = Store::new("sqlite::memory:").await.unwrap();
        store.add_query("q", "a").await.unwrap();

        store.ensure_schema().await.unwrap();
        store.ensure_schema().await.unwrap();

        assert_eq!(store.count_queries().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn ensure_schema_accepts_preexisting_table() {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1);
        let conn = Database::connect(opt).await.unwrap();
        conn.execute_unprepared(
            "CREATE TABLE ai_queries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_question TEXT,
                ai_answer TEXT
            )",
        )
        .await
        .unwrap();
        conn.execute_unprepared(
            "INSERT INTO ai_queries (user_question, ai_answer) VALUES ('old', 'row')",
        )
        .await
        .unwrap();

        let store = Store { conn };
        store.ensure_schema().await.unwrap();

        let rows = store.recent_queries(10).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].user_question, "old");
    }

    #[tokio::test]
    async fn ids_increase_and_recent_is_newest_first() {
        let store = Store::new("sqlite::memory:").await.unwrap();
        let first = store.add_query("first", "1").await.unwrap();
        let second = store.add_query("second", "2").await.unwrap();
        assert!(second.id > first.id);

        let recent = store.recent_queries(10).await.unwrap();
        assert_eq!(recent, vec![second.clone(), first]);

        assert_eq!(store.get_query(second.id).await.unwrap(), Some(second));
        assert_eq!(store.get_query(9999).await.unwrap(), None);

        assert_eq!(store.recent_queries(1).await.unwrap().len(), 1);
    }
}
