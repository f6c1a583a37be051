use axum::{
    routing::{get, post},
    Router,
};
use axum_prometheus::PrometheusMetricLayer;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use linkpeek_server::config::Config;
use linkpeek_server::handlers;
use linkpeek_server::state::AppState;

#[tokio::main]
async fn main() {
    // Initialize tracing — JSON in production, human-readable in dev.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "linkpeek_server=info,tower_http=info".parse().unwrap());

    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!("🚀 Linkpeek Server starting...");

    let config = Config::from_env();
    info!("📝 Configuration loaded");
    info!("🔗 Relay base: {}", config.relay_base);
    info!("🛰️ Metadata service: {}", config.metadata_service_url);

    // CORS: permissive in dev, restrictive in production.
    let cors = if config.is_dev {
        info!("🔓 CORS: permissive (dev mode)");
        CorsLayer::permissive()
    } else {
        tracing::warn!(
            "🔒 CORS: restrictive (production mode). \
             Cross-origin requests will be denied."
        );
        CorsLayer::new()
    };

    let addr = config.server_addr();

    let app_state = AppState::new(&config.relay_base, &config.metadata_service_url);

    // Prometheus metrics layer
    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    // Build router
    let app = Router::new()
        // Health check + metrics
        .route("/health", get(handlers::health_check))
        .route(
            "/metrics",
            get(move || async move { metric_handle.render() }),
        )
        // Metadata resolution
        .route("/resolve", get(handlers::resolve::resolve_metadata))
        // Preview rendering + meta tag generation
        .route("/render", post(handlers::preview::render_preview))
        .route("/meta-tags", post(handlers::preview::generate_meta_tags))
        // Middleware
        .layer(prometheus_layer)
        .layer(cors)
        .with_state(app_state);

    // Start server
    info!("🎧 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Server failed to start");
}
