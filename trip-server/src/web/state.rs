//! Application state for the web layer.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::cache::CachedRouteClient;
use crate::domain::{Coordinate, TransportProfile};
use crate::geocode::{Geocoder, NominatimClient};
use crate::osrm::{LiveRoute, RouteFetchError};
use crate::places::PlaceCatalog;
use crate::planner::{OfflineSource, PlannerConfig, RouteSource};

/// Where the server gets live routes from.
pub enum RoutingBackend {
    /// Cached OSRM client
    Live(CachedRouteClient),
    /// No live routing; every route is a straight-line estimate
    Offline(OfflineSource),
}

impl RouteSource for RoutingBackend {
    async fn fetch_live(
        &self,
        profile: &TransportProfile,
        start: Coordinate,
        dest: Coordinate,
    ) -> Result<LiveRoute, RouteFetchError> {
        match self {
            RoutingBackend::Live(client) => client.fetch_live(profile, start, dest).await,
            RoutingBackend::Offline(source) => source.fetch_live(profile, start, dest).await,
        }
    }
}

/// How long a session's geocoders survive without a search.
const SESSION_IDLE: Duration = Duration::from_secs(30 * 60);

/// Maximum number of (session, input) geocoders kept at once.
const MAX_SESSION_GEOCODERS: u64 = 10_000;

/// Place search for the trip form inputs of every client.
///
/// Latest-wins applies to one input of one client: each `(session, field)`
/// pair gets its own geocoder, so one user's typing never supersedes
/// another's, and the start input never supersedes the destination.
/// Requests without a session are debounced but never superseded.
///
/// All geocoders share one Nominatim client, and with it the connection
/// pool and result cache.
pub struct Geocoders {
    client: NominatimClient,
    debounce: Duration,
    sessions: MokaCache<(String, &'static str), Arc<Geocoder<NominatimClient>>>,
}

impl Geocoders {
    pub fn new(client: NominatimClient, debounce: Duration) -> Self {
        let sessions = MokaCache::builder()
            .time_to_idle(SESSION_IDLE)
            .max_capacity(MAX_SESSION_GEOCODERS)
            .build();

        Self {
            client,
            debounce,
            sessions,
        }
    }

    /// The geocoder for one input of one session, or `None` for an unknown
    /// input name.
    pub async fn for_field(
        &self,
        session: Option<&str>,
        field: &str,
    ) -> Option<Arc<Geocoder<NominatimClient>>> {
        let field = match field {
            "start" => "start",
            "dest" => "dest",
            _ => return None,
        };

        let geocoder = match session.map(str::trim).filter(|s| !s.is_empty()) {
            Some(session) => {
                self.sessions
                    .get_with((session.to_string(), field), async {
                        Arc::new(self.geocoder())
                    })
                    .await
            }
            None => Arc::new(self.geocoder()),
        };

        Some(geocoder)
    }

    fn geocoder(&self) -> Geocoder<NominatimClient> {
        Geocoder::new(self.client.clone()).with_debounce(self.debounce)
    }
}

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Live or offline route source
    pub routing: Arc<RoutingBackend>,

    /// Debounced place search
    pub geocoders: Arc<Geocoders>,

    /// Configured transport profiles, in default display order
    pub profiles: Arc<Vec<TransportProfile>>,

    /// Built-in named places
    pub places: Arc<PlaceCatalog>,

    /// Default relay hubs
    pub hubs: Arc<PlaceCatalog>,

    /// Route planning configuration
    pub config: Arc<PlannerConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        routing: RoutingBackend,
        geocoders: Geocoders,
        profiles: Vec<TransportProfile>,
        places: PlaceCatalog,
        hubs: PlaceCatalog,
        config: PlannerConfig,
    ) -> Self {
        Self {
            routing: Arc::new(routing),
            geocoders: Arc::new(geocoders),
            profiles: Arc::new(profiles),
            places: Arc::new(places),
            hubs: Arc::new(hubs),
            config: Arc::new(config),
        }
    }

    /// Look up a configured profile by key.
    pub fn profile(&self, key: &str) -> Option<&TransportProfile> {
        self.profiles.iter().find(|p| p.key() == key)
    }
}
