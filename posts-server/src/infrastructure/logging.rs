use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

use super::settings::LogFormat;

/// `level` is already resolved by `Settings` (`LOG_LEVEL`, then `RUST_LOG`).
pub(crate) fn init_logging(level: &str, format: LogFormat) -> Result<()> {
    let builder = fmt().with_env_filter(build_filter(level)).with_target(true);
    let result = match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().flatten_event(true).try_init(),
    };

    result.map_err(|e| anyhow!("failed to init logging: {e}"))
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::build_filter;

    #[test]
    fn filter_uses_resolved_level() {
        assert_eq!(build_filter("warn").to_string(), "warn");
    }
}
