use crate::error::{Result, WeatherOddsError};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One day of observations. Every measurement may be missing upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalDailyRecord {
    pub date: NaiveDate,
    pub temperature_max: Option<f64>,
    pub temperature_min: Option<f64>,
    pub wind_speed_max: Option<f64>,
    pub precipitation_sum: Option<f64>,
    pub humidity_mean: Option<f64>,
}

impl HistoricalDailyRecord {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            temperature_max: None,
            temperature_min: None,
            wind_speed_max: None,
            precipitation_sum: None,
            humidity_mean: None,
        }
    }

    /// Same month and day, any year.
    pub fn falls_on(&self, month: u32, day: u32) -> bool {
        self.date.month() == month && self.date.day() == day
    }

    /// Mid-range of the day's max and min, when both are known.
    pub fn mean_temperature(&self) -> Option<f64> {
        match (self.temperature_max, self.temperature_min) {
            (Some(max), Some(min)) => Some((max + min) / 2.0),
            _ => None,
        }
    }
}

/// Daily block of an Open-Meteo archive response: one array per variable,
/// aligned by index with `time`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailySeries {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_speed_10m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_sum: Vec<Option<f64>>,
    #[serde(default)]
    pub relative_humidity_2m_mean: Vec<Option<f64>>,
}

impl DailySeries {
    /// Zip the columns into records. Ragged columns are rejected.
    pub fn into_records(self) -> Result<Vec<HistoricalDailyRecord>> {
        let expected = self.time.len();
        let columns = [
            ("temperature_2m_max", self.temperature_2m_max.len()),
            ("temperature_2m_min", self.temperature_2m_min.len()),
            ("wind_speed_10m_max", self.wind_speed_10m_max.len()),
            ("precipitation_sum", self.precipitation_sum.len()),
            ("relative_humidity_2m_mean", self.relative_humidity_2m_mean.len()),
        ];

        if let Some((name, len)) = columns.iter().find(|(_, len)| *len != expected) {
            return Err(WeatherOddsError::InvalidData(format!(
                "column '{}' has {} values but 'time' has {}",
                name, len, expected
            )));
        }

        self.time
            .iter()
            .enumerate()
            .map(|(i, raw)| {
                let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
                    WeatherOddsError::InvalidData(format!("bad date '{}' at index {}: {}", raw, i, e))
                })?;

                Ok(HistoricalDailyRecord {
                    date,
                    temperature_max: self.temperature_2m_max[i],
                    temperature_min: self.temperature_2m_min[i],
                    wind_speed_max: self.wind_speed_10m_max[i],
                    precipitation_sum: self.precipitation_sum[i],
                    humidity_mean: self.relative_humidity_2m_mean[i],
                })
            })
            .collect()
    }
}
