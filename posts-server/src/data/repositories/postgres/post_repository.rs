use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;

use crate::data::post_repository::{PostPatch, PostRepository, parse_scan_limit};
use crate::domain::error::StorageError;
use crate::domain::post::Post;

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
    queries: PostQueries,
}

impl PostgresPostRepository {
    /// `table` must already be a validated SQL identifier.
    pub(crate) fn new(pool: PgPool, table: &str) -> Self {
        Self {
            pool,
            queries: PostQueries::for_table(table),
        }
    }
}

#[derive(Debug, Clone)]
struct PostQueries {
    insert: String,
    scan_all: String,
    scan_limited: String,
    get_by_key: String,
    conditional_update: String,
    delete_by_key: String,
}

const COLUMNS: &str = "id, created_at, user_id, title, body";

impl PostQueries {
    fn for_table(table: &str) -> Self {
        let table = quote_identifier(table);
        Self {
            insert: format!(
                r#"
                INSERT INTO {table} ({COLUMNS})
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (id) DO UPDATE
                SET created_at = EXCLUDED.created_at,
                    user_id = EXCLUDED.user_id,
                    title = EXCLUDED.title,
                    body = EXCLUDED.body
                "#
            ),
            scan_all: format!("SELECT {COLUMNS} FROM {table}"),
            scan_limited: format!("SELECT {COLUMNS} FROM {table} LIMIT $1"),
            get_by_key: format!("SELECT {COLUMNS} FROM {table} WHERE id = $1"),
            conditional_update: format!(
                r#"
                UPDATE {table}
                SET title = $2,
                    body = $3
                WHERE id = $1
                RETURNING {COLUMNS}
                "#
            ),
            delete_by_key: format!("DELETE FROM {table} WHERE id = $1"),
        }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: String,
    created_at: DateTime<Utc>,
    user_id: i64,
    title: Option<String>,
    body: Option<String>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            created_at: row.created_at,
            user_id: row.user_id,
            title: row.title,
            body: row.body,
        }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert(&self, post: Post) -> Result<(), StorageError> {
        sqlx::query(&self.queries.insert)
            .bind(&post.id)
            .bind(post.created_at)
            .bind(post.user_id)
            .bind(&post.title)
            .bind(&post.body)
            .execute(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        debug!(post_id = %post.id, "post stored");
        Ok(())
    }

    async fn scan_all(&self) -> Result<Vec<Post>, StorageError> {
        let rows = sqlx::query_as::<_, PostRow>(&self.queries.scan_all)
            .fetch_all(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn scan_limited(&self, limit: &str) -> Result<Vec<Post>, StorageError> {
        let limit = parse_scan_limit(limit)?;

        let rows = sqlx::query_as::<_, PostRow>(&self.queries.scan_limited)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn get_by_key(&self, id: &str) -> Result<Option<Post>, StorageError> {
        let row = sqlx::query_as::<_, PostRow>(&self.queries.get_by_key)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        Ok(row.map(Post::from))
    }

    async fn conditional_update(&self, id: &str, patch: PostPatch) -> Result<Post, StorageError> {
        let row = sqlx::query_as::<_, PostRow>(&self.queries.conditional_update)
            .bind(id)
            .bind(patch.title)
            .bind(patch.body)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        row.map(Post::from)
            .ok_or_else(StorageError::conditional_check_failed)
    }

    async fn delete_by_key(&self, id: &str) -> Result<(), StorageError> {
        let result = sqlx::query(&self.queries.delete_by_key)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        debug!(post_id = %id, rows = result.rows_affected(), "post delete issued");
        Ok(())
    }
}

pub(crate) fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn map_post_db_error(err: sqlx::Error) -> StorageError {
    match &err {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::unavailable(err.to_string()),
        sqlx::Error::Database(db_err) => {
            let class = db_err.code().map(|code| code.chars().take(2).collect::<String>());
            match class.as_deref() {
                Some("22") | Some("23") => StorageError::rejected(db_err.message()),
                _ => StorageError::internal(db_err.message()),
            }
        }
        _ => StorageError::internal(err.to_string()),
    }
}
