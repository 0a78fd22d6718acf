use super::error::AppError;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// India Standard Time, UTC+05:30 with no daylight saving
const IST_OFFSET_SECONDS: i32 = 5 * 3600 + 30 * 60;

/// Predicted direction of the gold price for a day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn is_up(&self) -> bool {
        matches!(self, Direction::Up)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Direction::Up => "↑",
            Direction::Down => "↓",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

// Anything other than "UP" is treated as a fall
impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(if s == "UP" {
            Direction::Up
        } else {
            Direction::Down
        })
    }
}

/// Model version as emitted by the backend, either a string or a number
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ModelVersion {
    Number(serde_json::Number),
    Text(String),
}

impl std::fmt::Display for ModelVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelVersion::Number(n) => write!(f, "{n}"),
            ModelVersion::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastDay {
    pub day: u32,
    pub date: String,
    /// USD per troy ounce
    pub gold_price_usd: f64,
    pub prediction: Direction,
    /// Probability of the predicted direction, 0..=1
    pub probability: f64,
    pub confidence: String,
}

impl ForecastDay {
    /// Confidence bar width in percent, one decimal place
    pub fn confidence_fill(&self) -> String {
        format!("{:.1}", self.probability * 100.0)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastResponse {
    pub predictions: Vec<ForecastDay>,
    pub model_version: ModelVersion,
    pub model_alias: String,
    pub predicted_at: String,
    pub mlflow_url: String,
}

impl ForecastResponse {
    /// Rejects responses the renderer cannot summarise.
    pub fn validate(self) -> Result<Self, AppError> {
        if self.predictions.is_empty() {
            return Err(AppError::Data(
                "Forecast response contained no predictions".to_string(),
            ));
        }
        Ok(self)
    }

    pub fn latest(&self) -> Option<&ForecastDay> {
        self.predictions.last()
    }

    pub fn model_label(&self) -> String {
        format!("v{} · {}", self.model_version, self.model_alias)
    }
}

/// Body of `GET /`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceInfo {
    pub model_version: ModelVersion,
    pub model_alias: String,
}

impl ServiceInfo {
    pub fn badge(&self) -> String {
        format!("Model v{} · {}", self.model_version, self.model_alias)
    }
}

/// Parses a backend timestamp, treating zone-less values as UTC.
pub fn parse_predicted_at(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(&format!("{raw}Z")) {
        return Some(parsed.with_timezone(&Utc));
    }

    // Space separated naive timestamps
    NaiveDateTime::parse_from_str(raw.trim_end_matches('Z'), "%Y-%m-%d %H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Formats a timestamp in IST, e.g. `14/10/2026, 03:45:12 pm IST`.
/// Unparseable input is returned unchanged.
pub fn format_predicted_at(raw: &str) -> String {
    let Some(ist) = FixedOffset::east_opt(IST_OFFSET_SECONDS) else {
        return raw.to_string();
    };

    match parse_predicted_at(raw) {
        Some(instant) => instant
            .with_timezone(&ist)
            .format("%d/%m/%Y, %I:%M:%S %P IST")
            .to_string(),
        None => raw.to_string(),
    }
}

/// `2025-01-15` → `15 Jan`
pub fn format_forecast_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|d| d.format("%d %b").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_naive_timestamp_is_treated_as_utc() {
        let parsed = parse_predicted_at("2026-10-14T10:15:30").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 10, 14, 10, 15, 30).unwrap());
    }

    #[test]
    fn test_explicit_offset_is_respected() {
        let parsed = parse_predicted_at("2026-10-14T10:15:30+05:30").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 10, 14, 4, 45, 30).unwrap());
    }

    #[test]
    fn test_negative_offset_is_respected() {
        let parsed = parse_predicted_at("2026-10-14T10:15:30-05:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 10, 14, 15, 15, 30).unwrap());
        assert_eq!(
            format_predicted_at("2026-10-14T10:15:30-05:00"),
            "14/10/2026, 08:45:30 pm IST"
        );
    }

    #[test]
    fn test_fractional_seconds() {
        let parsed = parse_predicted_at("2026-10-14T10:15:30.123456").unwrap();
        let whole = Utc.with_ymd_and_hms(2026, 10, 14, 10, 15, 30).unwrap();
        assert_eq!(parsed.timestamp(), whole.timestamp());
    }

    #[test]
    fn test_format_predicted_at_in_ist() {
        assert_eq!(
            format_predicted_at("2026-10-14T10:15:30Z"),
            "14/10/2026, 03:45:30 pm IST"
        );
        assert_eq!(
            format_predicted_at("2026-10-14T20:00:00"),
            "15/10/2026, 01:30:00 am IST"
        );
    }

    #[test]
    fn test_unparseable_timestamp_is_shown_raw() {
        assert_eq!(format_predicted_at("yesterday"), "yesterday");
    }

    #[test]
    fn test_forecast_date_format() {
        assert_eq!(format_forecast_date("2026-01-05"), "05 Jan");
        assert_eq!(format_forecast_date("n/a"), "n/a");
    }

    #[test]
    fn test_direction_parsing() {
        let up: Direction = serde_json::from_str("\"UP\"").unwrap();
        let down: Direction = serde_json::from_str("\"DOWN\"").unwrap();
        let other: Direction = serde_json::from_str("\"FLAT\"").unwrap();
        assert_eq!(up, Direction::Up);
        assert_eq!(down, Direction::Down);
        assert_eq!(other, Direction::Down);
    }

    #[test]
    fn test_model_version_display() {
        let n: ModelVersion = serde_json::from_str("3").unwrap();
        let s: ModelVersion = serde_json::from_str("\"12\"").unwrap();
        assert_eq!(n.to_string(), "3");
        assert_eq!(s.to_string(), "12");
    }

    #[test]
    fn test_confidence_fill_one_decimal() {
        let day = ForecastDay {
            day: 1,
            date: "2026-10-15".to_string(),
            gold_price_usd: 2650.0,
            prediction: Direction::Up,
            probability: 0.6789,
            confidence: "Medium".to_string(),
        };
        assert_eq!(day.confidence_fill(), "67.9");
    }
}
