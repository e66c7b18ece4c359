use sqlx::PgPool;

use crate::{db::postgres::create_pool, errors::CatalogError, settings::AppConfig};

/// Postgres-backed implementation of every repository trait.
#[derive(Clone)]
pub struct SqlxRepo {
    pub pool: PgPool,
}

impl SqlxRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxRepo { pool }
    }

    /// Connects, runs pending migrations and hands back a ready store.
    pub async fn open(config: &AppConfig) -> Result<Self, CatalogError> {
        let database_url = config.database_url.as_deref().ok_or_else(|| {
            CatalogError::InternalError("No database URL configured".to_string())
        })?;

        let pool = create_pool(database_url, config.max_connections, config.connect_retries).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(SqlxRepo { pool })
    }

    pub async fn check_connection(&self) -> Result<(), CatalogError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(CatalogError::from)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Escapes `%`, `_` and `\` so user text is matched literally by ILIKE.
pub(crate) fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
