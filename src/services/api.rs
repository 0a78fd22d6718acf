use crate::config::Config;
use crate::models::{
    error::AppError,
    forecast::{ForecastResponse, ServiceInfo},
};
use crate::services::deadline::{timeout_ms, with_deadline};
use serde::Deserialize;

// API CONFIGURATION
/// Configuration for the prediction service client.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    base_url: String,
    predict_timeout_ms: u32,
}

impl ApiConfig {
    /// Creates a builder for constructing an `ApiConfig`.
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn predict_timeout_ms(&self) -> u32 {
        self.predict_timeout_ms
    }

    /// Root endpoint, used for model info and liveness.
    pub fn root_url(&self) -> String {
        format!("{}/", self.base_url)
    }

    pub fn predict_url(&self) -> String {
        format!("{}/predict", self.base_url)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfigBuilder::default().build()
    }
}

// API CONFIGURATION BUILDER
/// Builder for constructing an `ApiConfig` with custom settings.
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    base_url: Option<String>,
    predict_timeout_ms: Option<u32>,
}

impl ApiConfigBuilder {
    /// Sets a custom base URL. A trailing slash is dropped.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn predict_timeout_ms(mut self, ms: u32) -> Self {
        self.predict_timeout_ms = Some(ms);
        self
    }

    pub fn build(self) -> ApiConfig {
        let base_url = self
            .base_url
            .unwrap_or_else(|| Config::API_BASE_URL.to_string());

        ApiConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            predict_timeout_ms: self
                .predict_timeout_ms
                .unwrap_or(Config::PREDICT_TIMEOUT_MS),
        }
    }
}

// API RESPONSE TYPES
#[derive(Deserialize, Debug)]
struct ApiErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Maps a non-2xx response to an error, preferring the backend's `detail`.
pub fn error_for_status(status: u16, body: &str) -> AppError {
    let detail = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .and_then(|d| match d {
            serde_json::Value::String(s) if !s.is_empty() => Some(s),
            _ => None,
        });

    match detail {
        Some(detail) => AppError::Api(detail),
        None => AppError::Status(status),
    }
}

/// Parses and validates a predict response body.
pub fn parse_forecast(body: &str) -> Result<ForecastResponse, AppError> {
    serde_json::from_str::<ForecastResponse>(body)
        .map_err(|e| AppError::unreachable(format!("Failed to parse forecast: {e}")))?
        .validate()
}

// BACKEND CLIENT
/// HTTP client for the gold prediction service.
pub struct BackendClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl BackendClient {
    /// Creates a new client with default configuration.
    pub fn new() -> Result<Self, AppError> {
        Self::with_config(ApiConfig::default())
    }

    pub fn with_config(config: ApiConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Model version and alias from `GET /`.
    pub async fn fetch_service_info(&self) -> Result<ServiceInfo, AppError> {
        let response = self
            .http
            .get(self.config.root_url())
            .send()
            .await
            .map_err(|e| self.classify_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Status(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::unreachable(format!("Failed to parse service info: {e}")))
    }

    /// Single `POST /predict`, bounded by the configured timeout.
    pub async fn fetch_predictions(&self) -> Result<ForecastResponse, AppError> {
        let timeout = self.config.predict_timeout_ms;

        with_deadline(self.request_predictions(), timeout_ms(timeout))
            .await
            .unwrap_or_else(|| {
                Err(AppError::unreachable(format!(
                    "Predict request timed out after {timeout}ms"
                )))
            })
    }

    async fn request_predictions(&self) -> Result<ForecastResponse, AppError> {
        let response = self
            .http
            .post(self.config.predict_url())
            .send()
            .await
            .map_err(|e| self.classify_error(e))?;

        let status = response.status();
        let body = response.text().await;

        if !status.is_success() {
            return Err(error_for_status(status.as_u16(), &body.unwrap_or_default()));
        }

        let body = body.map_err(|e| self.classify_error(e))?;
        parse_forecast(&body)
    }

    /// Liveness probe against `GET /`. Only a 2xx within `timeout` counts.
    pub async fn probe(&self, timeout: u32) -> Result<(), AppError> {
        let request = async {
            let response = self
                .http
                .get(self.config.root_url())
                .send()
                .await
                .map_err(|e| self.classify_error(e))?;

            let status = response.status();
            if status.is_success() {
                Ok(())
            } else {
                Err(AppError::Status(status.as_u16()))
            }
        };

        with_deadline(request, timeout_ms(timeout))
            .await
            .unwrap_or_else(|| {
                Err(AppError::unreachable(format!(
                    "Probe timed out after {timeout}ms"
                )))
            })
    }

    /// Converts a reqwest error into an appropriate AppError.
    fn classify_error(&self, error: reqwest::Error) -> AppError {
        if error.is_timeout() {
            AppError::unreachable(format!("Request timeout: {error}"))
        } else if error.is_request() {
            AppError::unreachable(format!("Request error: {error}"))
        } else if error.is_decode() {
            AppError::unreachable(format!("Failed to read response: {error}"))
        } else {
            AppError::unreachable(format!("Network error: {error}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORECAST_JSON: &str = r#"{
        "predictions": [
            {"day": 1, "date": "2026-10-15", "gold_price_usd": 2650.4,
             "prediction": "UP", "probability": 0.71, "confidence": "High"},
            {"day": 2, "date": "2026-10-16", "gold_price_usd": 2641.0,
             "prediction": "DOWN", "probability": 0.55, "confidence": "Low"}
        ],
        "model_version": 4,
        "model_alias": "champion",
        "predicted_at": "2026-10-14T09:00:00",
        "mlflow_url": "https://mlflow.example.com/#/models/gold"
    }"#;

    #[test]
    fn test_config_builder_defaults() {
        let config = ApiConfig::builder().build();
        assert_eq!(config.base_url(), Config::API_BASE_URL);
        assert_eq!(config.predict_timeout_ms(), Config::PREDICT_TIMEOUT_MS);
    }

    #[test]
    fn test_urls_from_custom_base() {
        let config = ApiConfig::builder()
            .base_url("http://localhost:8000/")
            .build();
        assert_eq!(config.root_url(), "http://localhost:8000/");
        assert_eq!(config.predict_url(), "http://localhost:8000/predict");
    }

    #[test]
    fn test_structured_error_detail_is_verbatim() {
        let err = error_for_status(503, r#"{"detail": "Model not loaded"}"#);
        assert_eq!(err, AppError::Api("Model not loaded".to_string()));
        assert_eq!(err.to_string(), "Model not loaded");
    }

    #[test]
    fn test_unstructured_error_uses_status() {
        assert_eq!(error_for_status(502, "<html>Bad Gateway</html>").to_string(), "HTTP 502");
        assert_eq!(error_for_status(500, r#"{"detail": ""}"#).to_string(), "HTTP 500");
        assert_eq!(
            error_for_status(422, r#"{"detail": [{"msg": "field required"}]}"#),
            AppError::Status(422)
        );
    }

    #[test]
    fn test_parse_forecast() {
        let forecast = parse_forecast(FORECAST_JSON).unwrap();
        assert_eq!(forecast.predictions.len(), 2);
        assert_eq!(forecast.model_label(), "v4 · champion");
        assert_eq!(forecast.latest().unwrap().day, 2);
    }

    #[test]
    fn test_missing_predictions_is_handled() {
        let body = r#"{"model_version": "1", "model_alias": "a",
                       "predicted_at": "2026-10-14T09:00:00", "mlflow_url": ""}"#;
        let err = parse_forecast(body).unwrap_err();
        assert!(matches!(err, AppError::Unreachable { .. }));
        assert!(err.log_detail().contains("predictions"));
    }

    #[test]
    fn test_empty_predictions_is_handled() {
        let body = r#"{"predictions": [], "model_version": "1", "model_alias": "a",
                       "predicted_at": "2026-10-14T09:00:00", "mlflow_url": ""}"#;
        assert!(matches!(parse_forecast(body), Err(AppError::Data(_))));
    }

    #[test]
    fn test_client_creation() {
        assert!(BackendClient::new().is_ok());
    }
}
