//! Route provider for leg distance/duration lookups
//!
//! Uses a Directions-compatible HTTP service in production, a static leg
//! table offline and in tests.

mod directions;

pub use directions::{DirectionsClient, DirectionsConfig};

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use crate::config::Config;
use crate::types::RouteLeg;

/// Route provider trait for abstraction (Directions, static table, etc.)
#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// Get distance and duration for driving from `origin` to `destination`
    async fn get_leg(&self, origin: &str, destination: &str) -> Result<RouteLeg>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}

/// One known leg in a static route table
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteTableEntry {
    pub origin: String,
    pub destination: String,
    pub distance_miles: f64,
    pub duration_hours: f64,
    #[serde(default)]
    pub polyline: Option<String>,
}

/// Static route provider backed by a table of known legs.
/// Legs are symmetric; identical origin and destination give a zero leg.
#[derive(Debug, Clone, Default)]
pub struct StaticRouteProvider {
    entries: Vec<RouteTableEntry>,
}

impl StaticRouteProvider {
    pub fn new(entries: Vec<RouteTableEntry>) -> Self {
        Self { entries }
    }

    /// Load a JSON array of `RouteTableEntry`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read route table {}", path.display()))?;
        let entries: Vec<RouteTableEntry> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse route table {}", path.display()))?;
        Ok(Self::new(entries))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn same_place(a: &str, b: &str) -> bool {
        a.trim().eq_ignore_ascii_case(b.trim())
    }
}

#[async_trait]
impl RouteProvider for StaticRouteProvider {
    async fn get_leg(&self, origin: &str, destination: &str) -> Result<RouteLeg> {
        if Self::same_place(origin, destination) {
            return Ok(RouteLeg::stationary(origin));
        }

        let entry = self
            .entries
            .iter()
            .find(|e| {
                (Self::same_place(&e.origin, origin) && Self::same_place(&e.destination, destination))
                    || (Self::same_place(&e.origin, destination) && Self::same_place(&e.destination, origin))
            })
            .with_context(|| format!("No route known from {} to {}", origin, destination))?;

        Ok(RouteLeg {
            origin_label: origin.to_string(),
            dest_label: destination.to_string(),
            distance_miles: entry.distance_miles,
            duration_hours: entry.duration_hours,
            polyline: entry.polyline.clone(),
        })
    }

    fn name(&self) -> &str {
        "StaticRoutes"
    }
}

/// Create route provider based on configuration
///
/// Prefers the Directions service when a URL is configured, then a route
/// table file, then an empty table (only same-place legs resolve).
pub fn create_route_provider(config: &Config) -> Result<Box<dyn RouteProvider>> {
    if let Some(url) = &config.directions_url {
        let mut cfg = DirectionsConfig::new(url, config.directions_api_key.clone().unwrap_or_default());
        cfg.timeout_seconds = config.route_timeout_seconds;
        info!("Using Directions route provider at {}", url);
        return Ok(Box::new(DirectionsClient::new(cfg)?));
    }

    if let Some(path) = &config.route_table_path {
        let provider = StaticRouteProvider::from_file(path)?;
        info!("Using static route table {} ({} legs)", path.display(), provider.len());
        return Ok(Box::new(provider));
    }

    info!("No route provider configured; only same-location legs will resolve");
    Ok(Box::new(StaticRouteProvider::default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> StaticRouteProvider {
        StaticRouteProvider::new(vec![RouteTableEntry {
            origin: "Chicago, IL".to_string(),
            destination: "Dallas, TX".to_string(),
            distance_miles: 967.0,
            duration_hours: 14.5,
            polyline: Some("_p~iF~ps|U".to_string()),
        }])
    }

    #[tokio::test]
    async fn test_static_provider_lookup() {
        let leg = table().get_leg("Chicago, IL", "Dallas, TX").await.unwrap();
        assert_eq!(leg.distance_miles, 967.0);
        assert_eq!(leg.duration_hours, 14.5);
        assert_eq!(leg.dest_label, "Dallas, TX");
        assert_eq!(leg.polyline.as_deref(), Some("_p~iF~ps|U"));
    }

    #[tokio::test]
    async fn test_static_provider_is_symmetric_and_case_insensitive() {
        let leg = table().get_leg("dallas, tx", "CHICAGO, IL").await.unwrap();
        assert_eq!(leg.distance_miles, 967.0);
        assert_eq!(leg.origin_label, "dallas, tx");
    }

    #[tokio::test]
    async fn test_static_provider_same_place_is_zero_leg() {
        let leg = StaticRouteProvider::default()
            .get_leg("Chicago, IL", " chicago, il ")
            .await
            .unwrap();
        assert_eq!(leg.distance_miles, 0.0);
        assert_eq!(leg.duration_hours, 0.0);
    }

    #[tokio::test]
    async fn test_static_provider_unknown_leg_errors() {
        let err = table().get_leg("Chicago, IL", "Miami, FL").await.unwrap_err();
        assert!(err.to_string().contains("No route known"));
    }

    #[test]
    fn test_static_provider_from_file() {
        let path = std::env::temp_dir().join(format!("route-table-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            r#"[{"origin": "A", "destination": "B", "distanceMiles": 10.0, "durationHours": 0.25}]"#,
        )
        .unwrap();

        let provider = StaticRouteProvider::from_file(&path).unwrap();
        assert_eq!(provider.len(), 1);
        assert_eq!(provider.name(), "StaticRoutes");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_create_route_provider_without_config() {
        let config = Config::default();
        let provider = create_route_provider(&config).unwrap();
        assert_eq!(provider.name(), "StaticRoutes");
    }

    #[test]
    fn test_create_route_provider_prefers_directions() {
        let config = Config {
            directions_url: Some("http://localhost:8080/directions/json".to_string()),
            directions_api_key: Some("test-key".to_string()),
            ..Config::default()
        };
        let provider = create_route_provider(&config).unwrap();
        assert_eq!(provider.name(), "Directions");
    }
}
