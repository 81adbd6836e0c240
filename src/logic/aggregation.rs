//! Day-of-year climatology over a multi-year daily series.
//!
//! Records whose month and day match the target are reduced into threshold
//! probabilities, null-skipping averages and a newest-first trend of the most
//! recent years. Each measurement is judged on its own: a missing humidity
//! does not exclude the same record from the temperature or rain counts.

use super::calculations::{average, percent, round_to};
use crate::error::{Result, WeatherOddsError};
use crate::models::{AnalysisResult, HistoricalDailyRecord, HistoricalTrends, YearlySnapshot};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Max temperature above this (°C) makes a hot day.
pub const HOT_MAX_TEMP_C: f64 = 32.0;
/// Min temperature below this (°C) makes a cold day.
pub const COLD_MIN_TEMP_C: f64 = 10.0;
/// Max wind speed above this (km/h) makes a windy day.
pub const WINDY_WIND_SPEED_KMH: f64 = 35.0;
/// Precipitation at or above this (mm) makes a rainy day.
pub const RAINY_PRECIPITATION_MM: f64 = 1.0;
/// Number of years kept in the trend series.
pub const TREND_YEARS: usize = 10;

#[derive(Debug, Default)]
struct Tally {
    matching_days: usize,
    hot_days: usize,
    cold_days: usize,
    windy_days: usize,
    rainy_days: usize,
    any_rain_days: usize,
    temperatures: Vec<f64>,
    humidities: Vec<f64>,
    wind_speeds: Vec<f64>,
    by_year: BTreeMap<i32, YearlySnapshot>,
}

impl Tally {
    fn add(&mut self, record: &HistoricalDailyRecord) {
        self.matching_days += 1;

        let mean_temp = record.mean_temperature();
        if let Some(t) = mean_temp {
            self.temperatures.push(t);
        }
        if let Some(h) = record.humidity_mean {
            self.humidities.push(h);
        }
        if let Some(w) = record.wind_speed_max {
            self.wind_speeds.push(w);
        }

        if record.temperature_max.is_some_and(|t| t > HOT_MAX_TEMP_C) {
            self.hot_days += 1;
        }
        if record.temperature_min.is_some_and(|t| t < COLD_MIN_TEMP_C) {
            self.cold_days += 1;
        }
        if record.wind_speed_max.is_some_and(|w| w > WINDY_WIND_SPEED_KMH) {
            self.windy_days += 1;
        }

        let rained = record.precipitation_sum.is_some_and(|p| p > 0.0);
        if record
            .precipitation_sum
            .is_some_and(|p| p >= RAINY_PRECIPITATION_MM)
        {
            self.rainy_days += 1;
        }
        if rained {
            self.any_rain_days += 1;
        }

        self.by_year.insert(
            record.date.year(),
            YearlySnapshot {
                temperature: mean_temp.map(|t| round_to(t, 1)),
                humidity: record.humidity_mean,
                wind_speed: record.wind_speed_max,
                rain_chance_percent: if rained { 100 } else { 0 },
            },
        );
    }

    fn finish(self) -> Result<AnalysisResult> {
        let total = self.matching_days;
        if total == 0 {
            return Err(WeatherOddsError::NoHistoricalData);
        }

        let mut historical_trends = HistoricalTrends::default();
        for (year, snapshot) in self.by_year.iter().rev().take(TREND_YEARS) {
            historical_trends.push(*year, snapshot);
        }

        Ok(AnalysisResult {
            average_temperature_celsius: average(&self.temperatures),
            average_humidity_percent: average(&self.humidities),
            average_wind_speed_kmh: average(&self.wind_speeds),
            chance_of_any_rain_percent: percent(self.any_rain_days, total),
            chance_of_hot_day_percent: percent(self.hot_days, total),
            chance_of_cold_day_percent: percent(self.cold_days, total),
            chance_of_windy_day_percent: percent(self.windy_days, total),
            chance_of_rainy_day_percent: percent(self.rainy_days, total),
            analysis_based_on_years: total,
            historical_trends,
        })
    }
}

/// Aggregate every record falling on `target_month`/`target_day`, any year.
///
/// The target is not checked against the calendar; an impossible day simply
/// matches nothing and yields [`WeatherOddsError::NoHistoricalData`].
pub fn aggregate(
    series: &[HistoricalDailyRecord],
    target_month: u32,
    target_day: u32,
) -> Result<AnalysisResult> {
    let mut tally = Tally::default();
    for record in series
        .iter()
        .filter(|r| r.falls_on(target_month, target_day))
    {
        tally.add(record);
    }

    tracing::debug!(
        "{} of {} records fall on {:02}-{:02}",
        tally.matching_days,
        series.len(),
        target_month,
        target_day
    );

    tally.finish()
}

pub fn aggregate_for_date(
    series: &[HistoricalDailyRecord],
    date: NaiveDate,
) -> Result<AnalysisResult> {
    aggregate(series, date.month(), date.day())
}
