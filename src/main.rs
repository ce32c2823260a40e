use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use airline_demand_tracker::{
    config::Config,
    api::routes::create_router,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration (also picks up .env, so RUST_LOG may come from there)
    let config = Config::load()?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("airline_demand_tracker=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let server_addr = config.server_addr;
    if config.openai_api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; summary generation will fail");
    }

    let app = create_router(AppState::new(config));
    let listener = TcpListener::bind(server_addr).await?;

    info!("Dashboard listening on http://{}", server_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
