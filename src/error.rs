use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherOddsError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("API rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(String),

    #[error("Could not find coordinates for '{0}'")]
    LocationNotFound(String),

    #[error("No historical data found for this date.")]
    NoHistoricalData,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl WeatherOddsError {
    /// True when an upstream service refused or failed to answer.
    ///
    /// `Http` is left out: transport and status failures are already mapped
    /// to `DataSourceUnavailable`, so what remains is an undecodable body.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            WeatherOddsError::RateLimited(_) | WeatherOddsError::DataSourceUnavailable(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, WeatherOddsError>;
