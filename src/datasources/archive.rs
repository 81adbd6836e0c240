use super::{send, HistoryFetcher};
use crate::config::OpenMeteoConfig;
use crate::error::{Result, WeatherOddsError};
use crate::models::{DailySeries, GeoLocation, HistoricalDailyRecord, YearRange};
use reqwest::Url;
use serde::Deserialize;

const DAILY_VARIABLES: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum,wind_speed_10m_max,relative_humidity_2m_mean";

pub struct ArchiveClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    #[serde(default)]
    daily: DailySeries,
}

impl ArchiveClient {
    pub fn new(config: &OpenMeteoConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.archive_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.archive_url.clone(),
        })
    }

    fn archive_url(&self, location: &GeoLocation, years: YearRange) -> Result<Url> {
        let latitude = location.latitude.to_string();
        let longitude = location.longitude.to_string();
        let start_date = years.start_date();
        let end_date = years.end_date();

        Url::parse_with_params(
            &self.base_url,
            &[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("start_date", start_date.as_str()),
                ("end_date", end_date.as_str()),
                ("daily", DAILY_VARIABLES),
                ("timezone", "auto"),
            ],
        )
        .map_err(|e| WeatherOddsError::Config(format!("Invalid archive URL: {}", e)))
    }

    /// Fetch daily observations for every day of `years`.
    pub async fn fetch_daily(
        &self,
        location: &GeoLocation,
        years: YearRange,
    ) -> Result<Vec<HistoricalDailyRecord>> {
        let url = self.archive_url(location, years)?;
        tracing::info!("Fetching {} daily history for {}", years, location.name);

        let response = send("Archive", self.client.get(url)).await?;
        let body: ArchiveResponse = response.json().await.map_err(|e| {
            WeatherOddsError::DataSourceUnavailable(format!(
                "Failed to parse archive response: {}",
                e
            ))
        })?;

        let records = body.daily.into_records()?;
        tracing::debug!("Archive returned {} daily records", records.len());
        Ok(records)
    }
}

impl HistoryFetcher for ArchiveClient {
    async fn fetch(
        &self,
        location: &GeoLocation,
        years: YearRange,
    ) -> Result<Vec<HistoricalDailyRecord>> {
        self.fetch_daily(location, years).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lisbon() -> GeoLocation {
        GeoLocation {
            name: "Lisbon".into(),
            latitude: 38.72,
            longitude: -9.13,
            country: Some("Portugal".into()),
        }
    }

    #[test]
    fn archive_url_covers_whole_years() {
        let client = ArchiveClient::new(&OpenMeteoConfig::default()).unwrap();
        let url = client
            .archive_url(&lisbon(), YearRange::trailing(2026, 20))
            .unwrap();

        assert_eq!(url.host_str(), Some("archive-api.open-meteo.com"));
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        let get = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        };

        assert_eq!(get("latitude").as_deref(), Some("38.72"));
        assert_eq!(get("longitude").as_deref(), Some("-9.13"));
        assert_eq!(get("start_date").as_deref(), Some("2005-01-01"));
        assert_eq!(get("end_date").as_deref(), Some("2025-12-31"));
        assert_eq!(get("timezone").as_deref(), Some("auto"));
        let daily = get("daily").unwrap();
        for var in [
            "temperature_2m_max",
            "temperature_2m_min",
            "precipitation_sum",
            "wind_speed_10m_max",
            "relative_humidity_2m_mean",
        ] {
            assert!(daily.contains(var), "missing {}", var);
        }
    }

    #[test]
    fn response_body_parses_into_records() {
        let body: ArchiveResponse = serde_json::from_str(
            r#"{
                "latitude": 38.7,
                "longitude": -9.1,
                "daily_units": {"time": "iso8601"},
                "daily": {
                    "time": ["2005-01-01"],
                    "temperature_2m_max": [14.2],
                    "temperature_2m_min": [7.9],
                    "precipitation_sum": [0.0],
                    "wind_speed_10m_max": [18.4],
                    "relative_humidity_2m_mean": [81]
                }
            }"#,
        )
        .unwrap();

        let records = body.daily.into_records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].temperature_min, Some(7.9));
        assert_eq!(records[0].wind_speed_max, Some(18.4));
    }
}
