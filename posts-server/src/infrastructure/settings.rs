use anyhow::{Context, Result, anyhow};

const MAX_TABLE_NAME_LEN: usize = 63;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) posts_table: String,
    pub(crate) storage_backend: StorageBackend,
    pub(crate) database_url: Option<String>,
    pub(crate) database_max_connections: u32,
    pub(crate) http_addr: String,
    pub(crate) cors_origins: Vec<String>,
    pub(crate) log_level: String,
    pub(crate) log_format: LogFormat,
    pub(crate) http_request_body_limit_bytes: usize,
    pub(crate) http_concurrency_limit: usize,
}

impl Settings {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_source<F>(source: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let posts_table =
            get_required(&source, "POSTS_TABLE").context("POSTS_TABLE is required")?;
        validate_table_name(&posts_table)?;

        let storage_backend = parse_backend(
            &source("STORAGE_BACKEND").unwrap_or_else(|| "postgres".to_string()),
        )?;
        let database_url = match storage_backend {
            StorageBackend::Postgres => Some(
                get_required(&source, "DATABASE_URL")
                    .context("DATABASE_URL is required for the postgres backend")?,
            ),
            StorageBackend::Memory => None,
        };
        let database_max_connections =
            u32::try_from(parse_usize(&source, "DATABASE_MAX_CONNECTIONS", 5)?)
                .context("DATABASE_MAX_CONNECTIONS is too large")?;

        let http_addr = source("HTTP_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string());
        let cors_origins =
            parse_cors_origins(&source("CORS_ORIGINS").unwrap_or_else(|| "*".to_string()));
        let log_level = source("LOG_LEVEL")
            .or_else(|| source("RUST_LOG"))
            .unwrap_or_else(|| "info".to_string());
        let log_format =
            parse_log_format(&source("LOG_FORMAT").unwrap_or_else(|| "compact".to_string()))?;
        let http_request_body_limit_bytes =
            parse_usize(&source, "HTTP_REQUEST_BODY_LIMIT_BYTES", 1024 * 1024)?;
        let http_concurrency_limit = parse_usize(&source, "HTTP_CONCURRENCY_LIMIT", 256)?;

        Ok(Self {
            posts_table,
            storage_backend,
            database_url,
            database_max_connections,
            http_addr,
            cors_origins,
            log_level,
            log_format,
            http_request_body_limit_bytes,
            http_concurrency_limit,
        })
    }
}

fn get_required<F>(source: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let value = source(key).ok_or_else(|| anyhow!("{key} is not set"))?;
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(anyhow!("{key} must not be empty"));
    }
    Ok(value)
}

fn validate_table_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_');
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if !starts_ok || !rest_ok || name.len() > MAX_TABLE_NAME_LEN {
        return Err(anyhow!(
            "POSTS_TABLE must match [A-Za-z_][A-Za-z0-9_]* and be at most {MAX_TABLE_NAME_LEN} chars"
        ));
    }
    Ok(())
}

fn parse_backend(raw: &str) -> Result<StorageBackend> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "postgres" => Ok(StorageBackend::Postgres),
        "memory" => Ok(StorageBackend::Memory),
        other => Err(anyhow!(
            "unknown STORAGE_BACKEND '{other}', expecting 'postgres' or 'memory'"
        )),
    }
}

fn parse_log_format(raw: &str) -> Result<LogFormat> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "compact" => Ok(LogFormat::Compact),
        "json" => Ok(LogFormat::Json),
        other => Err(anyhow!(
            "unknown LOG_FORMAT '{other}', expecting 'compact' or 'json'"
        )),
    }
}

fn parse_cors_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_usize<F>(source: &F, key: &str, default: usize) -> Result<usize>
where
    F: Fn(&str) -> Option<String>,
{
    let value = source(key)
        .unwrap_or_else(|| default.to_string())
        .parse::<usize>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}
