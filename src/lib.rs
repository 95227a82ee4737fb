use axum::{routing::get, routing::post, Router};
use sqlx::sqlite::SqlitePool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod sync;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub client: reqwest::Client,
    pub feed_url: String,
}

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Root and health
        .route("/", get(|| async { "Coronavirus Tracker API - v1.0" }))
        .route("/health", get(routes::health::health_check))

        // City endpoints
        .route("/create_city", post(routes::cities::create_city))
        .route("/city/{name}", get(routes::cities::get_city_by_name))
        .route("/cities", get(routes::cities::get_cities))

        // Data endpoints
        .route("/create_data", post(routes::data::create_data))
        .route("/get_data", get(routes::data::get_data))

        // Background sync
        .route("/sync_coronavirus_data/jhu", get(routes::sync::sync_coronavirus_data))

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
