use dotenvy::dotenv;
use tracing::{info, warn};

use activity_board::board::BoardElements;
use activity_board::config::BoardConfig;
use activity_board::errors::HostError;
use activity_board::services::activities_api_service::{ActivitiesApi, HttpActivitiesApi};
use activity_board::web::{self, AppState};

#[tokio::main]
async fn main() -> Result<(), HostError> {
    // Laad .env bestand
    dotenv().ok();

    // 1. Start logging
    tracing_subscriber::fmt::init();

    let config = BoardConfig::from_env();
    info!(
        "Activity board build {} tegen {}",
        env!("ACTIVITY_BOARD_BUILD_ID"),
        config.api_url
    );

    // 2. Activiteiten-service controleren; elke bezoeker laadt daarna zelf de lijst
    let api = HttpActivitiesApi::new(&config.api_url, config.api_timeout)?;
    match api.list_activities().await {
        Ok(listing) => info!("{} activiteiten beschikbaar", listing.len()),
        Err(e) => warn!("Activiteiten nog niet bereikbaar: {}", e),
    }
    let app = web::router(AppState::new(api, BoardElements::default()));

    // 3. Start de server (met fallback poort)
    let listener = web::bind_with_fallback(&config.host, config.port).await?;
    let bound_addr = listener.local_addr()?;
    info!("🚀 Activity board draait op http://{}", bound_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
