use backend::{
    config::{self, AppConfig},
    routes::AppState,
    server,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let figment = config::figment();
    let config = AppConfig::load(&figment).map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    info!(
        store = ?config.store,
        items = config.items.len(),
        session_mirror = config.session_mirror,
        "🚀 Starting poll server"
    );

    let state = AppState::from_config(&config);

    match &state.ballot_box {
        Ok(ballot_box) => match ballot_box.initialize().await {
            Ok(()) => info!("📋 Vote store ready"),
            Err(e) => warn!("Vote store not ready, will retry on first request: {}", e),
        },
        Err(e) => error!("Vote store disabled: {}", e),
    }

    let _ = server::build(figment, &config, state).launch().await?;
    Ok(())
}
