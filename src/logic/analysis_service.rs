use super::aggregation::aggregate_for_date;
use super::imagery::satellite_view_url;
use crate::config::Config;
use crate::datasources::{ArchiveClient, GeocodingClient, HistoryFetcher, LocationResolver};
use crate::error::Result;
use crate::models::{AnalysisQuery, AnalysisReport, YearRange};
use chrono::{Datelike, Utc};

/// Resolves a place, fetches its history and reduces it for one calendar day.
pub struct AnalysisService<R, F> {
    resolver: R,
    fetcher: F,
    history_years: u32,
    imagery_enabled: bool,
}

impl AnalysisService<GeocodingClient, ArchiveClient> {
    pub fn from_config(config: &Config) -> Result<Self> {
        let resolver = GeocodingClient::new(&config.open_meteo)?;
        let fetcher = ArchiveClient::new(&config.open_meteo)?;

        if !config.imagery.enabled {
            tracing::info!("Satellite imagery links disabled");
        }

        Ok(Self::new(
            resolver,
            fetcher,
            config.open_meteo.history_years,
            config.imagery.enabled,
        ))
    }

    pub fn resolver(&self) -> &GeocodingClient {
        &self.resolver
    }
}

impl<R: LocationResolver, F: HistoryFetcher> AnalysisService<R, F> {
    pub fn new(resolver: R, fetcher: F, history_years: u32, imagery_enabled: bool) -> Self {
        Self {
            resolver,
            fetcher,
            history_years,
            imagery_enabled,
        }
    }

    pub async fn analyze(&self, query: &AnalysisQuery) -> Result<AnalysisReport> {
        self.analyze_as_of(query, Utc::now().year()).await
    }

    /// Same as [`analyze`](Self::analyze) with an explicit current year.
    pub async fn analyze_as_of(
        &self,
        query: &AnalysisQuery,
        current_year: i32,
    ) -> Result<AnalysisReport> {
        tracing::info!(
            "Analyzing {} for '{}'",
            query.date_string(),
            query.location
        );

        let location = self.resolver.resolve(&query.location).await?;
        let years = YearRange::trailing(current_year, self.history_years);
        let series = self.fetcher.fetch(&location, years).await?;

        let analysis = aggregate_for_date(&series, query.date)?;
        tracing::debug!(
            "Analysis for {} based on {} years",
            location.name,
            analysis.analysis_based_on_years
        );

        let satellite_view_url = if self.imagery_enabled {
            satellite_view_url(location.latitude, location.longitude, query.date, years.end)
        } else {
            None
        };

        Ok(AnalysisReport {
            location: query.location.clone(),
            requested_date: query.date_string(),
            resolved_location: location,
            weather_analysis: analysis,
            satellite_view_url,
        })
    }
}
