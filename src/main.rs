use std::sync::Arc;

use cinematch_api::{
    api::{create_router, AppState},
    cache::{create_redis_client, Cache},
    config::Config,
    services::providers::tmdb::TmdbProvider,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::from_env()?;
    let auth = config.tmdb_auth()?;

    let redis_client = create_redis_client(&config.redis_url)?;
    let (cache, cache_writer) = Cache::new(redis_client).await;

    let provider = Arc::new(TmdbProvider::new(cache, auth, config.tmdb_api_url.clone()));
    let state = AppState::new(provider, config.language.clone(), config.region.clone());

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "cinematch-api listening");
    axum::serve(listener, app).await?;

    cache_writer.shutdown().await;

    Ok(())
}
