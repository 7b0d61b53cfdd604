use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitae::{
    ai,
    api::{self, AppState},
    persona::Persona,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env first so provider detection below sees it
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    let persona = Arc::new(Persona::from_env());
    let backend = ai::backend_from_env()?;

    let state = AppState { backend, persona };

    let app = api::router()
        // CORS for the embedding page
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods(Any),
        )
        .with_state(state);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    tracing::info!("chat endpoint listening on http://{addr}/api/chat");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
