use axum::Router;
use fintrack::config::Config;
use fintrack::handlers;
use fintrack::services::advisor::AdvisorClient;
use fintrack::state::AppState;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fintrack=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!("Starting fintrack on {}", config.address());

    let advisor = AdvisorClient::new(config.ai.clone()).expect("Failed to create advisor client");

    let state = AppState {
        config: Arc::new(config.clone()),
        advisor,
    };

    let app = Router::new()
        .merge(handlers::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = TcpListener::bind(config.address())
        .await
        .expect("Failed to bind address");

    tracing::info!("Listening on http://{}", config.address());

    axum::serve(listener, app).await.expect("Server error");
}
