use anyhow::{Result, anyhow};
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::infrastructure::settings::Settings;

const ALLOWED_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::OPTIONS,
];

fn allowed_origin(origins: &[String]) -> Result<AllowOrigin> {
    if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
        return Ok(AllowOrigin::from(Any));
    }

    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|err| anyhow!("invalid CORS origin '{origin}': {err}"))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(AllowOrigin::list(origins))
}

pub(crate) fn apply_cors(router: Router, settings: &Settings) -> Result<Router> {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origin(&settings.cors_origins)?)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);
    Ok(router.layer(cors))
}
