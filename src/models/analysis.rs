use super::GeoLocation;
use serde::{Deserialize, Serialize};

/// Per-year values behind the trend chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct YearlySnapshot {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    /// 100 if any precipitation fell that day, else 0.
    pub rain_chance_percent: u32,
}

/// Newest-first parallel series, one entry per year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoricalTrends {
    pub years: Vec<i32>,
    pub temperatures: Vec<Option<f64>>,
    pub humidities: Vec<Option<f64>>,
    pub wind_speeds: Vec<Option<f64>>,
    pub rain_chances_percent: Vec<u32>,
}

impl HistoricalTrends {
    pub fn push(&mut self, year: i32, snapshot: &YearlySnapshot) {
        self.years.push(year);
        self.temperatures.push(snapshot.temperature);
        self.humidities.push(snapshot.humidity);
        self.wind_speeds.push(snapshot.wind_speed);
        self.rain_chances_percent.push(snapshot.rain_chance_percent);
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Row-wise view, in series order.
    pub fn rows(&self) -> impl Iterator<Item = (i32, YearlySnapshot)> + '_ {
        (0..self.len()).map(move |i| {
            (
                self.years[i],
                YearlySnapshot {
                    temperature: self.temperatures[i],
                    humidity: self.humidities[i],
                    wind_speed: self.wind_speeds[i],
                    rain_chance_percent: self.rain_chances_percent[i],
                },
            )
        })
    }
}

/// Climatology of one calendar day at one place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub average_temperature_celsius: f64,
    pub average_humidity_percent: f64,
    pub average_wind_speed_kmh: f64,
    pub chance_of_any_rain_percent: u32,
    pub chance_of_hot_day_percent: u32,
    pub chance_of_cold_day_percent: u32,
    pub chance_of_windy_day_percent: u32,
    pub chance_of_rainy_day_percent: u32,
    pub analysis_based_on_years: usize,
    pub historical_trends: HistoricalTrends,
}

/// Everything returned for one request: the echoed query, where it resolved
/// to, the analysis and an optional satellite view of the place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub location: String,
    pub requested_date: String,
    pub resolved_location: GeoLocation,
    pub weather_analysis: AnalysisResult,
    #[serde(rename = "nasa_satellite_view_url")]
    pub satellite_view_url: Option<String>,
}
