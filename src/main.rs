use std::net::{Ipv4Addr, SocketAddr};

use sqlx::sqlite::SqlitePool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use covid_stats_api::{app, sync, AppState};

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting api server...");

    dotenvy::dotenv().ok();

    // Create database connection pool
    let db_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://covid19.sqlite3?mode=rwc".to_string());

    let pool = SqlitePool::connect(&db_url)
        .await
        .expect("Failed to connect to database");

    covid_stats_api::db::init_schema(&pool)
        .await
        .expect("Failed to create tables");

    tracing::info!("Database connection established.");

    let host: Ipv4Addr = std::env::var("HOST")
        .unwrap_or_else(|_| "127.0.0.1".to_string())
        .parse()
        .expect("HOST is not in the correct format");

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "8000".to_string())
        .parse()
        .expect("PORT is not in the correct format");

    let addr = SocketAddr::from((host, port));

    let state = AppState {
        pool,
        client: reqwest::Client::new(),
        feed_url: std::env::var("COVID_FEED_URL")
            .unwrap_or_else(|_| sync::DEFAULT_FEED_URL.to_string()),
    };

    let app = app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .expect("Failed to start server.");
}
