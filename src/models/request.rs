use crate::error::{Result, WeatherOddsError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Request body as sent by clients. Both fields are required but deserialize
/// leniently so a missing one is reported as a caller error, not a parse error.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AnalysisRequest {
    pub location: Option<String>,
    pub date: Option<String>,
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisQuery {
    pub location: String,
    pub date: NaiveDate,
}

impl AnalysisQuery {
    pub fn parse(location: &str, date: &str) -> Result<Self> {
        let location = location.trim();
        if location.is_empty() {
            return Err(WeatherOddsError::InvalidRequest(
                "Location and date are required".into(),
            ));
        }

        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
            WeatherOddsError::InvalidRequest(format!(
                "date '{}' is not in YYYY-MM-DD format",
                date
            ))
        })?;

        Ok(Self {
            location: location.to_string(),
            date,
        })
    }

    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

impl AnalysisRequest {
    pub fn validate(&self) -> Result<AnalysisQuery> {
        match (self.location.as_deref(), self.date.as_deref()) {
            (Some(location), Some(date)) if !date.trim().is_empty() => {
                AnalysisQuery::parse(location, date)
            }
            _ => Err(WeatherOddsError::InvalidRequest(
                "Location and date are required".into(),
            )),
        }
    }
}
