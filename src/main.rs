use std::sync::Arc;

use tower_http::cors::CorsLayer;

use chat_relay::config::Config;
use chat_relay::routes;
use chat_relay::services::gemini::GeminiClient;
use chat_relay::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;

    let generator = Arc::new(GeminiClient::new(&config));
    let state = Arc::new(AppState::new(generator));

    let cors = CorsLayer::very_permissive();

    let app = routes::create_router().with_state(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;

    tracing::info!("chat relay running at http://localhost:{}", config.port);
    axum::serve(listener, app).await?;

    Ok(())
}
