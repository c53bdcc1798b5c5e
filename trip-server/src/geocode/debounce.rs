//! Debounced place search.
//!
//! Search-as-you-type issues one query per keystroke. The geocoder waits a
//! short quiet period before querying and drops any answer that a newer
//! query has superseded, so only the latest query's suggestions are ever
//! delivered.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::PlaceSuggestion;

use super::client::PlaceSearch;

/// Quiet period before a query is sent.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

/// Maximum suggestions per query.
pub const DEFAULT_LIMIT: usize = 5;

/// Queries shorter than this (after trimming) are not sent.
const MIN_QUERY_CHARS: usize = 3;

/// Debounced, latest-wins place search over a `PlaceSearch` backend.
///
/// One geocoder serves one input field. Every call takes a fresh sequence
/// number; a call whose number is no longer the latest when it wakes up, or
/// when its search completes, delivers nothing.
#[derive(Debug)]
pub struct Geocoder<S> {
    source: S,
    latest: AtomicU64,
    debounce: Duration,
    limit: usize,
}

impl<S: PlaceSearch> Geocoder<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            latest: AtomicU64::new(0),
            debounce: DEFAULT_DEBOUNCE,
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn is_current(&self, token: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == token
    }

    /// Search for places matching `query`.
    ///
    /// Returns `None` if a later call superseded this one, either during
    /// the debounce wait or while the search was in flight. Otherwise
    /// returns the suggestions, which are empty for queries under three
    /// characters and when the search service fails.
    pub async fn search(&self, query: &str) -> Option<Vec<PlaceSuggestion>> {
        let token = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        tokio::time::sleep(self.debounce).await;
        if !self.is_current(token) {
            debug!(%query, "Superseded before sending");
            return None;
        }

        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Some(Vec::new());
        }

        let suggestions = match self.source.search_places(query, self.limit).await {
            Ok(mut suggestions) => {
                suggestions.truncate(self.limit);
                suggestions
            }
            Err(e) => {
                warn!(%query, error = %e, "Place search failed");
                Vec::new()
            }
        };

        if !self.is_current(token) {
            debug!(%query, "Discarding superseded response");
            return None;
        }

        Some(suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;
    use crate::geocode::GeocodeError;
    use std::sync::Mutex;
    use tokio::time::sleep;

    /// Answers every query with one suggestion labelled by the query.
    struct MockPlaces {
        queries: Mutex<Vec<String>>,
        delay: Duration,
        failing: bool,
        results_per_query: usize,
    }

    impl MockPlaces {
        fn new() -> Self {
            Self {
                queries: Mutex::new(Vec::new()),
                delay: Duration::ZERO,
                failing: false,
                results_per_query: 1,
            }
        }

        fn queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    impl PlaceSearch for MockPlaces {
        async fn search_places(
            &self,
            query: &str,
            _limit: usize,
        ) -> Result<Vec<PlaceSuggestion>, GeocodeError> {
            self.queries.lock().unwrap().push(query.to_string());
            sleep(self.delay).await;
            if self.failing {
                return Err(GeocodeError::Api {
                    status: 500,
                    message: "down".into(),
                });
            }
            let here = Coordinate::new(12.9716, 77.5946).unwrap();
            Ok((0..self.results_per_query)
                .map(|i| PlaceSuggestion::new(format!("{query} #{i}"), here))
                .collect())
        }
    }

    fn labels(suggestions: &[PlaceSuggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.label.as_str()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_typing_delivers_only_last_query() {
        let geocoder = Geocoder::new(MockPlaces::new());

        let (a, ab, abc) = tokio::join!(
            geocoder.search("a"),
            async {
                sleep(Duration::from_millis(50)).await;
                geocoder.search("ab").await
            },
            async {
                sleep(Duration::from_millis(100)).await;
                geocoder.search("abc").await
            },
        );

        assert_eq!(a, None);
        assert_eq!(ab, None);
        assert_eq!(labels(&abc.unwrap()), vec!["abc #0"]);
        assert_eq!(geocoder.source().queries(), vec!["abc"]);
    }

    #[tokio::test(start_paused = true)]
    async fn superseded_queries_never_reach_the_service() {
        let geocoder = Geocoder::new(MockPlaces::new());

        let (first, second, last) = tokio::join!(
            geocoder.search("Chen"),
            async {
                sleep(Duration::from_millis(200)).await;
                geocoder.search("Chenn").await
            },
            async {
                sleep(Duration::from_millis(400)).await;
                geocoder.search("Chennai").await
            },
        );

        assert_eq!(first, None);
        assert_eq!(second, None);
        assert!(last.is_some());
        assert_eq!(geocoder.source().queries(), vec!["Chennai"]);
    }

    #[tokio::test(start_paused = true)]
    async fn in_flight_response_discarded_when_superseded() {
        let mut places = MockPlaces::new();
        places.delay = Duration::from_millis(500);
        let geocoder = Geocoder::new(places);

        let (stale, fresh) = tokio::join!(geocoder.search("London"), async {
            // After the first debounce, while its search is in flight
            sleep(Duration::from_millis(300)).await;
            geocoder.search("Paris").await
        });

        assert_eq!(stale, None);
        assert_eq!(labels(&fresh.unwrap()), vec!["Paris #0"]);
        assert_eq!(geocoder.source().queries(), vec!["London", "Paris"]);
    }

    #[tokio::test(start_paused = true)]
    async fn spaced_queries_are_all_delivered() {
        let geocoder = Geocoder::new(MockPlaces::new());

        let first = geocoder.search("Bengaluru").await;
        let second = geocoder.search("Mysuru").await;

        assert_eq!(labels(&first.unwrap()), vec!["Bengaluru #0"]);
        assert_eq!(labels(&second.unwrap()), vec!["Mysuru #0"]);
    }

    #[tokio::test(start_paused = true)]
    async fn short_query_skips_service() {
        let geocoder = Geocoder::new(MockPlaces::new());

        assert_eq!(geocoder.search("ab").await, Some(Vec::new()));
        assert_eq!(geocoder.search("  ab  ").await, Some(Vec::new()));
        assert_eq!(geocoder.search("").await, Some(Vec::new()));
        assert!(geocoder.source().queries().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn service_failure_delivers_empty_list() {
        let mut places = MockPlaces::new();
        places.failing = true;
        let geocoder = Geocoder::new(places);

        assert_eq!(geocoder.search("Chennai").await, Some(Vec::new()));
        assert_eq!(geocoder.source().queries(), vec!["Chennai"]);
    }

    #[tokio::test(start_paused = true)]
    async fn results_capped_at_limit() {
        let mut places = MockPlaces::new();
        places.results_per_query = 10;
        let geocoder = Geocoder::new(places).with_limit(3);

        let results = geocoder.search("Station").await.unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].label, "Station #0");
    }

    #[tokio::test(start_paused = true)]
    async fn waits_for_debounce_before_searching() {
        let geocoder = Geocoder::new(MockPlaces::new()).with_debounce(Duration::from_secs(1));

        let began = tokio::time::Instant::now();
        geocoder.search("Chennai").await;

        assert!(began.elapsed() >= Duration::from_secs(1));
    }
}
