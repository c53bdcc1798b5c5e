//! Server configuration from the environment.
//!
//! Every setting has a default, so an empty environment gives a working
//! live-routing server on localhost.
//!
//! | Variable                 | Default                                        |
//! |--------------------------|------------------------------------------------|
//! | `TRIP_BIND_ADDR`         | `127.0.0.1:3000`                               |
//! | `TRIP_ROUTING_MODE`      | `live` (or `offline`)                          |
//! | `TRIP_OSRM_BASE_URL`     | `https://routing.openstreetmap.de/routed-{profile}` |
//! | `TRIP_NOMINATIM_URL`     | `https://nominatim.openstreetmap.org`          |
//! | `TRIP_HTTP_TIMEOUT_SECS` | `10`                                           |
//! | `TRIP_MAX_CONCURRENT`    | `4`                                            |
//! | `TRIP_DEBOUNCE_MS`       | `250`                                          |
//! | `TRIP_PROFILES_FILE`     | unset (built-in car, bike, foot)               |

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::geocode;
use crate::osrm;

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {var}={value:?}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Where live routes come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoutingMode {
    /// Query the routing service, falling back to estimates on failure
    #[default]
    Live,
    /// Never contact a routing service; every route is an estimate
    Offline,
}

impl FromStr for RoutingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(RoutingMode::Live),
            "offline" => Ok(RoutingMode::Offline),
            _ => Err("expected \"live\" or \"offline\"".to_string()),
        }
    }
}

impl fmt::Display for RoutingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingMode::Live => write!(f, "live"),
            RoutingMode::Offline => write!(f, "offline"),
        }
    }
}

/// Settings for the HTTP server and its clients.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub routing_mode: RoutingMode,
    pub osrm_base_url: String,
    pub nominatim_url: String,
    pub http_timeout_secs: u64,
    pub max_concurrent: usize,
    pub debounce: Duration,
    pub profiles_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            routing_mode: RoutingMode::Live,
            osrm_base_url: osrm::DEFAULT_BASE_URL.to_string(),
            nominatim_url: geocode::DEFAULT_BASE_URL.to_string(),
            http_timeout_secs: 10,
            max_concurrent: 4,
            debounce: geocode::DEFAULT_DEBOUNCE,
            profiles_file: None,
        }
    }
}

impl ServerConfig {
    /// Read configuration from `TRIP_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// Unset and empty variables take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(value) = get("TRIP_BIND_ADDR") {
            config.bind_addr = parse("TRIP_BIND_ADDR", value)?;
        }
        if let Some(value) = get("TRIP_ROUTING_MODE") {
            config.routing_mode = parse("TRIP_ROUTING_MODE", value)?;
        }
        if let Some(value) = get("TRIP_OSRM_BASE_URL") {
            config.osrm_base_url = http_url("TRIP_OSRM_BASE_URL", value)?;
        }
        if let Some(value) = get("TRIP_NOMINATIM_URL") {
            config.nominatim_url = http_url("TRIP_NOMINATIM_URL", value)?;
        }
        if let Some(value) = get("TRIP_HTTP_TIMEOUT_SECS") {
            config.http_timeout_secs = positive("TRIP_HTTP_TIMEOUT_SECS", value)?;
        }
        if let Some(value) = get("TRIP_MAX_CONCURRENT") {
            config.max_concurrent = positive("TRIP_MAX_CONCURRENT", value)? as usize;
        }
        if let Some(value) = get("TRIP_DEBOUNCE_MS") {
            let ms: u64 = parse("TRIP_DEBOUNCE_MS", value)?;
            config.debounce = Duration::from_millis(ms);
        }
        if let Some(value) = get("TRIP_PROFILES_FILE") {
            config.profiles_file = Some(PathBuf::from(value));
        }

        Ok(config)
    }
}

fn parse<T>(var: &'static str, value: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError {
        var,
        reason: e.to_string(),
        value,
    })
}

fn positive(var: &'static str, value: String) -> Result<u64, ConfigError> {
    let n: u64 = parse(var, value.clone())?;
    if n == 0 {
        return Err(ConfigError {
            var,
            value,
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(n)
}

fn http_url(var: &'static str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Err(ConfigError {
            var,
            value,
            reason: "must be an http(s) URL".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ServerConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.routing_mode, RoutingMode::Live);
        assert_eq!(config.debounce, Duration::from_millis(250));
        assert!(config.profiles_file.is_none());
    }

    #[test]
    fn all_variables_read() {
        let config = config_from(&[
            ("TRIP_BIND_ADDR", "0.0.0.0:8080"),
            ("TRIP_ROUTING_MODE", "Offline"),
            ("TRIP_OSRM_BASE_URL", "http://localhost:5000"),
            ("TRIP_NOMINATIM_URL", "http://localhost:7070"),
            ("TRIP_HTTP_TIMEOUT_SECS", "3"),
            ("TRIP_MAX_CONCURRENT", "16"),
            ("TRIP_DEBOUNCE_MS", "0"),
            ("TRIP_PROFILES_FILE", "/etc/trip/profiles.json"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.routing_mode, RoutingMode::Offline);
        assert_eq!(config.osrm_base_url, "http://localhost:5000");
        assert_eq!(config.nominatim_url, "http://localhost:7070");
        assert_eq!(config.http_timeout_secs, 3);
        assert_eq!(config.max_concurrent, 16);
        assert_eq!(config.debounce, Duration::ZERO);
        assert_eq!(
            config.profiles_file,
            Some(PathBuf::from("/etc/trip/profiles.json"))
        );
    }

    #[test]
    fn empty_values_use_defaults() {
        let config = config_from(&[("TRIP_ROUTING_MODE", ""), ("TRIP_MAX_CONCURRENT", "  ")]).unwrap();
        assert_eq!(config.routing_mode, RoutingMode::Live);
        assert_eq!(config.max_concurrent, 4);
    }

    #[test]
    fn invalid_values_rejected() {
        let err = config_from(&[("TRIP_ROUTING_MODE", "sometimes")]).unwrap_err();
        assert_eq!(err.var, "TRIP_ROUTING_MODE");
        assert_eq!(
            err.to_string(),
            "invalid TRIP_ROUTING_MODE=\"sometimes\": expected \"live\" or \"offline\""
        );

        let err = config_from(&[("TRIP_MAX_CONCURRENT", "0")]).unwrap_err();
        assert_eq!(err.var, "TRIP_MAX_CONCURRENT");

        let err = config_from(&[("TRIP_HTTP_TIMEOUT_SECS", "ten")]).unwrap_err();
        assert_eq!(err.var, "TRIP_HTTP_TIMEOUT_SECS");

        let err = config_from(&[("TRIP_BIND_ADDR", "localhost")]).unwrap_err();
        assert_eq!(err.var, "TRIP_BIND_ADDR");

        let err = config_from(&[("TRIP_NOMINATIM_URL", "nominatim.local")]).unwrap_err();
        assert_eq!(err.var, "TRIP_NOMINATIM_URL");
    }

    #[test]
    fn routing_mode_round_trips_display() {
        assert_eq!("live".parse::<RoutingMode>(), Ok(RoutingMode::Live));
        assert_eq!(RoutingMode::Offline.to_string(), "offline");
    }
}
