use super::{send, LocationResolver};
use crate::config::OpenMeteoConfig;
use crate::error::{Result, WeatherOddsError};
use crate::models::GeoLocation;
use reqwest::Url;
use serde::Deserialize;

pub struct GeocodingClient {
    client: reqwest::Client,
    base_url: String,
}

// Open-Meteo geocoding API response structures
#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    country: Option<String>,
}

impl GeocodingClient {
    pub fn new(config: &OpenMeteoConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.geocoding_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.geocoding_url.clone(),
        })
    }

    fn search_url(&self, name: &str) -> Result<Url> {
        Url::parse_with_params(
            &self.base_url,
            &[
                ("name", name),
                ("count", "1"),
                ("language", "en"),
                ("format", "json"),
            ],
        )
        .map_err(|e| WeatherOddsError::Config(format!("Invalid geocoding URL: {}", e)))
    }

    /// Look up the best match for `name`.
    pub async fn search(&self, name: &str) -> Result<GeoLocation> {
        let url = self.search_url(name)?;
        tracing::debug!("Geocoding '{}'", name);

        let response = send("Geocoding", self.client.get(url)).await?;
        let body: GeocodingResponse = response.json().await.map_err(|e| {
            WeatherOddsError::DataSourceUnavailable(format!(
                "Failed to parse geocoding response: {}",
                e
            ))
        })?;

        let location = first_match(body, name)?;
        tracing::info!(
            "Resolved '{}' to {} ({:.4}, {:.4})",
            name,
            location.name,
            location.latitude,
            location.longitude
        );
        Ok(location)
    }

    /// Check the geocoding endpoint answers a trivial query.
    pub async fn test_connection(&self) -> Result<bool> {
        let url = self.search_url("London")?;
        let response = self.client.get(url).send().await.map_err(|e| {
            WeatherOddsError::DataSourceUnavailable(format!("Geocoding: {}", e))
        })?;

        Ok(response.status().is_success())
    }
}

fn first_match(body: GeocodingResponse, name: &str) -> Result<GeoLocation> {
    body.results
        .and_then(|results| results.into_iter().next())
        .map(|r| GeoLocation {
            name: r.name,
            latitude: r.latitude,
            longitude: r.longitude,
            country: r.country,
        })
        .ok_or_else(|| WeatherOddsError::LocationNotFound(name.to_string()))
}

impl LocationResolver for GeocodingClient {
    async fn resolve(&self, name: &str) -> Result<GeoLocation> {
        self.search(name).await
    }
}
