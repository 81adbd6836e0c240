use crate::error::{Result, WeatherOddsError};
use crate::models::{AnalysisReport, AnalysisResult};

fn summary_rows(analysis: &AnalysisResult) -> Vec<(&'static str, String)> {
    vec![
        (
            "average_temperature_celsius",
            format!("{:.1}", analysis.average_temperature_celsius),
        ),
        (
            "average_humidity_percent",
            format!("{:.1}", analysis.average_humidity_percent),
        ),
        (
            "average_wind_speed_kmh",
            format!("{:.1}", analysis.average_wind_speed_kmh),
        ),
        (
            "chance_of_any_rain_percent",
            analysis.chance_of_any_rain_percent.to_string(),
        ),
        (
            "chance_of_hot_day_percent",
            analysis.chance_of_hot_day_percent.to_string(),
        ),
        (
            "chance_of_cold_day_percent",
            analysis.chance_of_cold_day_percent.to_string(),
        ),
        (
            "chance_of_windy_day_percent",
            analysis.chance_of_windy_day_percent.to_string(),
        ),
        (
            "chance_of_rainy_day_percent",
            analysis.chance_of_rainy_day_percent.to_string(),
        ),
        (
            "analysis_based_on_years",
            analysis.analysis_based_on_years.to_string(),
        ),
    ]
}

/// `chance_of_hot_day_percent` -> `Chance Of Hot Day Percent`
fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Summary table followed by the trend table, separated by blank lines.
pub fn csv_report(report: &AnalysisReport) -> Result<String> {
    let analysis = &report.weather_analysis;

    let mut wtr = section_writer(Vec::new());
    wtr.write_record([
        "Analysis Summary for",
        report.location.as_str(),
        "on",
        report.requested_date.as_str(),
    ])?;
    let buf = end_section(wtr)?;

    let mut wtr = section_writer(buf);
    wtr.write_record(["Metric", "Value"])?;
    for (key, value) in summary_rows(analysis) {
        wtr.write_record([title_case(key), value])?;
    }
    let buf = end_section(wtr)?;

    let mut wtr = section_writer(buf);
    wtr.write_record(["Historical Trend Data (Last 10 Years)"])?;
    wtr.write_record([
        "years",
        "temperatures",
        "humidities",
        "wind_speeds",
        "rain_chances_percent",
    ])?;
    for (year, snapshot) in analysis.historical_trends.rows() {
        wtr.write_record([
            year.to_string(),
            cell(snapshot.temperature),
            cell(snapshot.humidity),
            cell(snapshot.wind_speed),
            snapshot.rain_chance_percent.to_string(),
        ])?;
    }

    let bytes = into_bytes(wtr)?;
    String::from_utf8(bytes)
        .map_err(|e| WeatherOddsError::InvalidData(format!("CSV output is not UTF-8: {}", e)))
}

fn section_writer(buf: Vec<u8>) -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new().flexible(true).from_writer(buf)
}

fn into_bytes(wtr: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
    wtr.into_inner()
        .map_err(|e| WeatherOddsError::Io(e.into_error()))
}

// csv quotes a lone empty field, so the blank separator goes in between writers.
fn end_section(wtr: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
    let mut buf = into_bytes(wtr)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Attachment name for a location, safe to put in a header.
pub fn csv_filename(location: &str) -> String {
    let slug: String = location
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("weather_analysis_{}.csv", slug)
}

pub fn json_report(report: &AnalysisReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GeoLocation, HistoricalTrends};

    fn report() -> AnalysisReport {
        AnalysisReport {
            location: "New York".into(),
            requested_date: "2026-07-04".into(),
            resolved_location: GeoLocation {
                name: "New York".into(),
                latitude: 40.71,
                longitude: -74.01,
                country: Some("United States".into()),
            },
            weather_analysis: AnalysisResult {
                average_temperature_celsius: 18.0,
                average_humidity_percent: 55.0,
                average_wind_speed_kmh: 25.3,
                chance_of_any_rain_percent: 33,
                chance_of_hot_day_percent: 33,
                chance_of_cold_day_percent: 33,
                chance_of_windy_day_percent: 33,
                chance_of_rainy_day_percent: 33,
                analysis_based_on_years: 3,
                historical_trends: HistoricalTrends {
                    years: vec![2025, 2024],
                    temperatures: vec![None, Some(23.5)],
                    humidities: vec![None, Some(50.0)],
                    wind_speeds: vec![None, Some(40.2)],
                    rain_chances_percent: vec![0, 100],
                },
            },
            satellite_view_url: None,
        }
    }

    #[test]
    fn title_case_keys() {
        assert_eq!(
            title_case("average_temperature_celsius"),
            "Average Temperature Celsius"
        );
        assert_eq!(title_case("analysis_based_on_years"), "Analysis Based On Years");
    }

    #[test]
    fn csv_layout() {
        let csv = csv_report(&report()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "Analysis Summary for,New York,on,2026-07-04");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "Metric,Value");
        assert_eq!(lines[3], "Average Temperature Celsius,18.0");
        assert_eq!(lines[5], "Average Wind Speed Kmh,25.3");
        assert_eq!(lines[11], "Analysis Based On Years,3");
        assert_eq!(lines[12], "");
        assert_eq!(lines[13], "Historical Trend Data (Last 10 Years)");
        assert_eq!(
            lines[14],
            "years,temperatures,humidities,wind_speeds,rain_chances_percent"
        );
        assert_eq!(lines[15], "2025,,,,0");
        assert_eq!(lines[16], "2024,23.5,50,40.2,100");
        assert_eq!(lines.len(), 17);
        assert!(csv.contains("2026-07-04\n\nMetric,Value\n"));
        assert!(csv.contains("Based On Years,3\n\nHistorical Trend"));
    }

    #[test]
    fn filename_is_sanitized() {
        assert_eq!(csv_filename("New York"), "weather_analysis_new_york.csv");
        assert_eq!(csv_filename("a\"b;c\r\n"), "weather_analysis_a_b_c.csv");
        assert_eq!(csv_filename("Zürich"), "weather_analysis_z_rich.csv");
    }

    #[test]
    fn json_envelope_fields() {
        let json = json_report(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["location"], "New York");
        assert_eq!(value["requested_date"], "2026-07-04");
        assert_eq!(value["resolved_location"]["latitude"], 40.71);
        assert_eq!(value["weather_analysis"]["chance_of_hot_day_percent"], 33);
        assert!(value["nasa_satellite_view_url"].is_null());
        assert!(value.get("satellite_view_url").is_none());
    }
}
