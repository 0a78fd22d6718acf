use crate::config::Config;
use crate::models::{currency::ExchangeRate, error::AppError};
use serde::Deserialize;

/// API response structure from the rate provider
#[derive(Deserialize, Debug)]
struct RateResponse {
    #[serde(default)]
    rates: Option<RateTable>,
}

#[derive(Deserialize, Debug)]
struct RateTable {
    #[serde(rename = "INR", default)]
    inr: Option<f64>,
}

/// Extracts the INR rate from a provider response body.
pub fn parse_usd_inr(body: &str) -> Result<ExchangeRate, AppError> {
    let response: RateResponse = serde_json::from_str(body)
        .map_err(|e| AppError::Data(format!("Failed to parse rate response: {e}")))?;

    let inr = response
        .rates
        .and_then(|r| r.inr)
        .ok_or_else(|| AppError::Data("Rate response has no INR rate".to_string()))?;

    ExchangeRate::new(inr).ok_or_else(|| AppError::Data(format!("Invalid INR rate: {inr}")))
}

/// Client for the USD→INR exchange rate provider
pub struct ExchangeRateClient {
    http: reqwest::Client,
    base_url: String,
}

impl ExchangeRateClient {
    pub fn new() -> Result<Self, AppError> {
        Self::with_base_url(Config::RATE_PROVIDER_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn rate_url(&self) -> String {
        format!("{}?from=USD&to=INR", self.base_url)
    }

    pub async fn fetch_usd_inr(&self) -> Result<ExchangeRate, AppError> {
        let response = self
            .http
            .get(self.rate_url())
            .send()
            .await
            .map_err(|e| AppError::unreachable(format!("Rate request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::unreachable(format!("Failed to read rate response: {e}")))?;

        parse_usd_inr(&body)
    }
}

/// Fetches a fresh rate, or `None` if anything goes wrong.
///
/// Never fails: the caller keeps whatever rate it already has.
pub async fn refresh_usd_inr_rate() -> Option<ExchangeRate> {
    let result = match ExchangeRateClient::new() {
        Ok(client) => client.fetch_usd_inr().await,
        Err(e) => Err(e),
    };

    into_refresh(result, |e| {
        gloo::console::warn!(format!(
            "USD/INR fetch failed, keeping current rate: {}",
            e.log_detail()
        ));
    })
}

/// A failed fetch yields no rate; `warn` is told why.
fn into_refresh(
    result: Result<ExchangeRate, AppError>,
    warn: impl FnOnce(&AppError),
) -> Option<ExchangeRate> {
    match result {
        Ok(rate) => Some(rate),
        Err(e) => {
            warn(&e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provider_response() {
        let json = r#"{"amount": 1.0, "base": "USD", "date": "2026-10-14", "rates": {"INR": 88.12}}"#;
        assert_eq!(parse_usd_inr(json).unwrap().value(), 88.12);
    }

    #[test]
    fn test_missing_inr_field() {
        assert!(parse_usd_inr(r#"{"rates": {"EUR": 0.92}}"#).is_err());
        assert!(parse_usd_inr(r#"{"message": "not found"}"#).is_err());
    }

    #[test]
    fn test_malformed_or_invalid_rate() {
        assert!(parse_usd_inr("<html>").is_err());
        assert!(parse_usd_inr(r#"{"rates": {"INR": "88"}}"#).is_err());
        assert!(parse_usd_inr(r#"{"rates": {"INR": 0}}"#).is_err());
    }

    #[test]
    fn test_failed_fetch_keeps_current_rate() {
        let mut warned = None;
        let refreshed = into_refresh(Err(AppError::Status(503)), |e| warned = Some(e.clone()));

        assert_eq!(refreshed, None);
        assert_eq!(warned, Some(AppError::Status(503)));
    }

    #[test]
    fn test_successful_fetch_is_adopted_silently() {
        let mut warned = false;
        let fresh = ExchangeRate::new(88.12).unwrap();
        let refreshed = into_refresh(Ok(fresh), |_| warned = true);

        assert_eq!(refreshed, Some(fresh));
        assert!(!warned);
    }

    #[test]
    fn test_unparseable_body_yields_no_rate() {
        let refreshed = into_refresh(parse_usd_inr("<html>"), |_| ());
        assert_eq!(refreshed, None);
    }

    #[test]
    fn test_rate_url() {
        let client = ExchangeRateClient::new().unwrap();
        assert_eq!(
            client.rate_url(),
            "https://api.frankfurter.app/latest?from=USD&to=INR"
        );
    }
}
