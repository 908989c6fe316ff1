//! Directions service client
//!
//! Speaks the Google Directions JSON API shape:
//! https://developers.google.com/maps/documentation/directions/get-directions

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::defaults::METERS_PER_MILE;
use crate::types::RouteLeg;
use super::RouteProvider;

/// Directions client configuration
#[derive(Debug, Clone)]
pub struct DirectionsConfig {
    /// Full endpoint URL (e.g., "https://maps.googleapis.com/maps/api/directions/json")
    pub url: String,
    pub api_key: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for DirectionsConfig {
    fn default() -> Self {
        Self {
            url: "https://maps.googleapis.com/maps/api/directions/json".to_string(),
            api_key: String::new(),
            timeout_seconds: 30,
        }
    }
}

impl DirectionsConfig {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }
}

/// Directions routing client
pub struct DirectionsClient {
    client: Client,
    config: DirectionsConfig,
}

impl DirectionsClient {
    pub fn new(config: DirectionsConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    /// Query parameters for one origin/destination lookup
    fn build_query<'a>(&'a self, origin: &'a str, destination: &'a str) -> [(&'static str, &'a str); 4] {
        [
            ("origin", origin),
            ("destination", destination),
            ("key", self.config.api_key.as_str()),
            ("units", "imperial"),
        ]
    }
}

#[async_trait]
impl RouteProvider for DirectionsClient {
    async fn get_leg(&self, origin: &str, destination: &str) -> Result<RouteLeg> {
        debug!("Requesting directions {} -> {}", origin, destination);

        let response = self.client
            .get(&self.config.url)
            .query(&self.build_query(origin, destination))
            .send()
            .await
            .context("Failed to send request to Directions service")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Directions service returned error {}: {}", status, body);
        }

        let body: DirectionsResponse = response
            .json()
            .await
            .context("Failed to parse Directions response")?;

        let leg = leg_from_response(origin, destination, body)?;
        debug!(
            "Directions {} -> {}: {:.2} mi, {:.2} h",
            origin, destination, leg.distance_miles, leg.duration_hours
        );
        Ok(leg)
    }

    fn name(&self) -> &str {
        "Directions"
    }
}

/// Sum the legs of the first route into one `RouteLeg`.
/// Distances arrive in meters and durations in seconds.
fn leg_from_response(origin: &str, destination: &str, body: DirectionsResponse) -> Result<RouteLeg> {
    if body.status != "OK" {
        anyhow::bail!(
            "Directions status {}{}",
            body.status,
            body.error_message.map(|m| format!(": {}", m)).unwrap_or_default()
        );
    }

    let route = body
        .routes
        .into_iter()
        .next()
        .context("Directions response contained no routes")?;

    let meters: f64 = route.legs.iter().map(|l| l.distance.value).sum();
    let seconds: f64 = route.legs.iter().map(|l| l.duration.value).sum();

    Ok(RouteLeg {
        origin_label: origin.to_string(),
        dest_label: destination.to_string(),
        distance_miles: round2(meters / METERS_PER_MILE),
        duration_hours: round2(seconds / 3600.0),
        polyline: route.overview_polyline.map(|p| p.points),
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// Directions API types

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    legs: Vec<DirectionsLeg>,
    #[serde(default)]
    overview_polyline: Option<OverviewPolyline>,
}

#[derive(Debug, Deserialize)]
struct DirectionsLeg {
    distance: ValueField,
    duration: ValueField,
}

#[derive(Debug, Deserialize)]
struct ValueField {
    value: f64,
}

#[derive(Debug, Deserialize)]
struct OverviewPolyline {
    points: String,
}
