mod analytics;
mod catalog;
mod config;
mod db;
mod entities;
mod error;
mod models;
mod routes;
mod templates;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{
    analytics::QueryLog,
    catalog::{Catalog, MetadataCache},
    config::Config,
};

pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Catalog,
    pub queries: QueryLog,
}

pub fn app(state: Arc<AppState>) -> Router {
    let static_dir = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/", get(routes::home))
        .route("/search", get(routes::search))
        .route("/filter", get(routes::filter))
        .route("/genre/{cat_id}", get(routes::genre))
        .nest_service("/static", static_dir)
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,filmdex=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

    let catalog_db = db::connect_catalog(&config.database_url).await?;
    let analytics_db = db::connect_analytics(&config.analytics_database_url).await?;

    let state = Arc::new(AppState {
        config: config.clone(),
        catalog: Catalog::new(catalog_db, Arc::new(MetadataCache::new())),
        queries: QueryLog::new(analytics_db),
    });

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, static_dir = %config.static_dir.display(), "listening");
    axum::serve(listener, app(state)).await?;

    Ok(())
}
