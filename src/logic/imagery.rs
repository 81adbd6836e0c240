use chrono::{Datelike, NaiveDate};

const GIBS_BASE_URL: &str =
    "https://gibs.earthdata.nasa.gov/wmts/epsg4326/best/MODIS_Terra_CorrectedReflectance_TrueColor/default";
const BBOX_HALF_WIDTH_DEG: f64 = 0.25;

/// True-colour satellite view of the requested calendar day in `year`,
/// centred on the given point. `None` when that day does not exist in `year`.
pub fn satellite_view_url(
    latitude: f64,
    longitude: f64,
    date: NaiveDate,
    year: i32,
) -> Option<String> {
    let day = date.with_year(year)?;

    let lon_min = longitude - BBOX_HALF_WIDTH_DEG;
    let lon_max = longitude + BBOX_HALF_WIDTH_DEG;
    let lat_min = latitude - BBOX_HALF_WIDTH_DEG;
    let lat_max = latitude + BBOX_HALF_WIDTH_DEG;

    Some(format!(
        "{}/{}/250m/{},{},{},{}?format=image/jpeg",
        GIBS_BASE_URL,
        day.format("%Y-%m-%d"),
        lon_min,
        lat_min,
        lon_max,
        lat_max
    ))
}
