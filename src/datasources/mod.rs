pub mod archive;
pub mod geocoding;
#[cfg(test)]
pub(crate) mod testing;

pub use archive::ArchiveClient;
pub use geocoding::GeocodingClient;

use crate::error::{Result, WeatherOddsError};
use crate::models::{GeoLocation, HistoricalDailyRecord, YearRange};
use reqwest::StatusCode;
use std::future::Future;

/// Maps a free-text place name to coordinates.
pub trait LocationResolver: Send + Sync {
    fn resolve(&self, name: &str) -> impl Future<Output = Result<GeoLocation>> + Send;
}

/// Retrieves the daily history of a place over whole calendar years.
pub trait HistoryFetcher: Send + Sync {
    fn fetch(
        &self,
        location: &GeoLocation,
        years: YearRange,
    ) -> impl Future<Output = Result<Vec<HistoricalDailyRecord>>> + Send;
}

/// Turn a non-success upstream status into the matching error.
pub(crate) fn status_error(source: &str, status: StatusCode) -> WeatherOddsError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        WeatherOddsError::RateLimited(format!("{} returned {}", source, status))
    } else {
        WeatherOddsError::DataSourceUnavailable(format!("{} returned {}", source, status))
    }
}

/// Send a prepared request, mapping transport and status failures.
pub(crate) async fn send(
    source: &str,
    request: reqwest::RequestBuilder,
) -> Result<reqwest::Response> {
    let response = request
        .send()
        .await
        .map_err(|e| WeatherOddsError::DataSourceUnavailable(format!("{}: {}", source, e)))?;

    if !response.status().is_success() {
        return Err(status_error(source, response.status()));
    }

    Ok(response)
}
