//! In-memory collaborators for tests.

use super::{HistoryFetcher, LocationResolver};
use crate::error::{Result, WeatherOddsError};
use crate::models::{GeoLocation, HistoricalDailyRecord, YearRange};
use chrono::NaiveDate;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub struct StubResolver {
    found: bool,
}

impl StubResolver {
    pub fn found() -> Self {
        Self { found: true }
    }

    pub fn not_found() -> Self {
        Self { found: false }
    }
}

impl LocationResolver for StubResolver {
    async fn resolve(&self, name: &str) -> Result<GeoLocation> {
        if self.found {
            Ok(GeoLocation {
                name: name.to_string(),
                latitude: 40.0,
                longitude: -3.7,
                country: None,
            })
        } else {
            Err(WeatherOddsError::LocationNotFound(name.to_string()))
        }
    }
}

#[derive(Default)]
pub struct StubFetcher {
    records: Vec<HistoricalDailyRecord>,
    rate_limited: bool,
    pub calls: AtomicUsize,
    requested: Mutex<Option<YearRange>>,
}

impl StubFetcher {
    pub fn with_records(records: Vec<HistoricalDailyRecord>) -> Self {
        Self {
            records,
            ..Default::default()
        }
    }

    pub fn rate_limited() -> Self {
        Self {
            rate_limited: true,
            ..Default::default()
        }
    }

    pub fn last_range(&self) -> Option<YearRange> {
        *self.requested.lock().unwrap()
    }
}

impl HistoryFetcher for StubFetcher {
    async fn fetch(
        &self,
        _location: &GeoLocation,
        years: YearRange,
    ) -> Result<Vec<HistoricalDailyRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.requested.lock().unwrap() = Some(years);
        if self.rate_limited {
            return Err(WeatherOddsError::RateLimited("Archive returned 429".into()));
        }
        Ok(self.records.clone())
    }
}

/// July 4th of 2005..=2025: 30/18 °C, dry except every leap year (3 mm).
pub fn july_fourths() -> Vec<HistoricalDailyRecord> {
    (2005..=2025)
        .map(|y| HistoricalDailyRecord {
            temperature_max: Some(30.0),
            temperature_min: Some(18.0),
            wind_speed_max: Some(12.0),
            precipitation_sum: Some(if y % 4 == 0 { 3.0 } else { 0.0 }),
            humidity_mean: Some(45.0),
            ..HistoricalDailyRecord::new(NaiveDate::from_ymd_opt(y, 7, 4).unwrap())
        })
        .collect()
}
