use serde::{Deserialize, Serialize};

/// A place resolved from a free-text name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Inclusive range of whole calendar years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    /// `span` full years before the last completed one, plus that year:
    /// `current_year - span - 1 ..= current_year - 1`.
    pub fn trailing(current_year: i32, span: u32) -> Self {
        let end = current_year - 1;
        Self {
            start: end - span as i32,
            end,
        }
    }

    pub fn start_date(&self) -> String {
        format!("{}-01-01", self.start)
    }

    pub fn end_date(&self) -> String {
        format!("{}-12-31", self.end)
    }

}

impl std::fmt::Display for YearRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
