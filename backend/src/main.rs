mod handlers;
mod markdown;
mod request_context;
mod routes;
mod state;

use std::{env, path::PathBuf, str::FromStr};

use anyhow::{Context, Result};
use japan_info_shared::query::DEFAULT_PAGE_SIZE;
use tracing_subscriber::EnvFilter;

const DEFAULT_MAX_PAGE_SIZE: usize = 48;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string());
    let content_dir =
        PathBuf::from(env::var("CONTENT_DIR").unwrap_or_else(|_| "../content/japan-info".to_string()));
    let page_size = env_number("PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
    let max_page_size = env_number("MAX_PAGE_SIZE", DEFAULT_MAX_PAGE_SIZE)?;

    tracing::info!("Starting japan-info backend");
    tracing::info!("Content directory: {}", content_dir.display());

    let app_state = state::AppState::new(&content_dir, page_size, max_page_size).await?;
    tracing::info!(
        page_size = app_state.default_page_size(),
        max_page_size = app_state.max_page_size(),
        "Loaded {} articles",
        app_state.article_count().await
    );

    let app = routes::create_router(app_state);

    let addr = format!("{bind_addr}:{port}");
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn env_number<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a number, got `{raw}`")),
        Err(_) => Ok(default),
    }
}
