use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::data::repositories::postgres::post_repository::quote_identifier;

pub(crate) async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .context("failed to connect to postgres")
}

/// Creates the posts table when it does not exist yet.
pub(crate) async fn ensure_posts_table(pool: &PgPool, table: &str) -> Result<()> {
    let sql = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id TEXT PRIMARY KEY,
            created_at TIMESTAMPTZ NOT NULL,
            user_id BIGINT NOT NULL,
            title TEXT,
            body TEXT
        )
        "#,
        quote_identifier(table)
    );

    sqlx::query(&sql)
        .execute(pool)
        .await
        .with_context(|| format!("failed to ensure table {table}"))?;

    info!(table, "posts table ready");
    Ok(())
}
