use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::post_service::PostService;
use data::post_repository::PostRepository;
use data::repositories::memory::post_repository::InMemoryPostRepository;
use data::repositories::postgres::post_repository::PostgresPostRepository;
use infrastructure::database::{create_pool, ensure_posts_table};
use infrastructure::id_generator::UuidV4Generator;
use infrastructure::logging::init_logging;
use infrastructure::settings::{Settings, StorageBackend};
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level, settings.log_format)?;

    let repo = build_repository(&settings).await?;
    let post_service = Arc::new(PostService::new(repo, Arc::new(UuidV4Generator)));
    let state = AppState::new(post_service);

    server::run_http(&settings, state).await
}

async fn build_repository(settings: &Settings) -> Result<Arc<dyn PostRepository>> {
    match settings.storage_backend {
        StorageBackend::Postgres => {
            let database_url = settings
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres backend")?;
            let pool = create_pool(database_url, settings.database_max_connections).await?;
            ensure_posts_table(&pool, &settings.posts_table).await?;

            info!(table = %settings.posts_table, "using postgres storage");
            Ok(Arc::new(PostgresPostRepository::new(
                pool,
                &settings.posts_table,
            )))
        }
        StorageBackend::Memory => {
            info!(table = %settings.posts_table, "using in-memory storage");
            Ok(Arc::new(InMemoryPostRepository::new()))
        }
    }
}
