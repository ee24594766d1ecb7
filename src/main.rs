use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use roster_api::api;
use roster_api::config::Config;
use roster_api::infrastructure::database;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = Config::from_env().expect("Invalid configuration");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = database::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Database connected successfully");

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = api::router(pool)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Server listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .await
        .expect("Server failed");
}
