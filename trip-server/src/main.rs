use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use trip_server::cache::{CacheConfig, CachedRouteClient};
use trip_server::config::{RoutingMode, ServerConfig};
use trip_server::domain::default_profiles;
use trip_server::geocode::{NominatimClient, NominatimConfig};
use trip_server::osrm::{OsrmClient, OsrmConfig};
use trip_server::places::{bay_area_places, default_hubs};
use trip_server::planner::{OfflineSource, PlannerConfig};
use trip_server::profiles::load_profiles;
use trip_server::web::{AppState, Geocoders, RoutingBackend, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("trip_server=info,tower_http=info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    let planner_config = PlannerConfig::default();

    let profiles = match &config.profiles_file {
        Some(path) => load_profiles(path, planner_config.max_profiles)?,
        None => default_profiles(),
    };
    info!(
        count = profiles.len(),
        keys = ?profiles.iter().map(|p| p.key()).collect::<Vec<_>>(),
        "Loaded transport profiles"
    );

    let routing = match config.routing_mode {
        RoutingMode::Live => {
            let osrm = OsrmClient::new(
                OsrmConfig::new()
                    .with_base_url(&config.osrm_base_url)
                    .with_max_concurrent(config.max_concurrent)
                    .with_timeout(config.http_timeout_secs),
            )?;
            RoutingBackend::Live(CachedRouteClient::new(osrm, &CacheConfig::default()))
        }
        RoutingMode::Offline => RoutingBackend::Offline(OfflineSource),
    };

    let nominatim = NominatimClient::new(
        NominatimConfig::new()
            .with_base_url(&config.nominatim_url)
            .with_timeout(config.http_timeout_secs),
    )?;
    let geocoders = Geocoders::new(nominatim, config.debounce);

    let state = AppState::new(
        routing,
        geocoders,
        profiles,
        bay_area_places(),
        default_hubs(),
        planner_config,
    );
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(
        addr = %config.bind_addr,
        mode = %config.routing_mode,
        "Trip planner listening"
    );
    info!("API endpoints: GET /health, GET /api/geocode, POST /api/routes/plan, POST /api/routes/optimize, GET /api/polyline/decode, GET /api/places, GET /api/profiles");

    axum::serve(listener, app).await?;
    Ok(())
}
