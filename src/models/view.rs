use super::currency::{Currency, ExchangeRate, format_price};
use super::error::AppError;
use super::forecast::{ForecastDay, ForecastResponse, format_forecast_date, format_predicted_at};

const RISE_COLOR: &str = "#4CAF82";
const FALL_COLOR: &str = "#E05252";

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryView {
    pub latest_price: String,
    pub data_date: String,
    pub model_label: String,
    pub predicted_at: String,
    pub note: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub day_label: String,
    pub date: String,
    pub price: String,
    pub arrow: &'static str,
    pub direction: &'static str,
    pub css_class: &'static str,
    /// Target confidence bar width in percent, one decimal
    pub confidence_fill: String,
    pub confidence_label: String,
}

impl CardView {
    fn build(day: &ForecastDay, currency: Currency, rate: ExchangeRate) -> Self {
        Self {
            day_label: format!("DAY {}", day.day),
            date: format_forecast_date(&day.date),
            price: format_price(day.gold_price_usd, currency, rate),
            arrow: day.prediction.arrow(),
            direction: day.prediction.label(),
            css_class: day.prediction.css_class(),
            confidence_fill: day.confidence_fill(),
            confidence_label: format!("{} confidence", day.confidence),
        }
    }
}

/// Everything the chart needs for one currency
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub currency: Currency,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<&'static str>,
    /// Tooltip text per point, formatted like the cards
    pub point_labels: Vec<String>,
}

impl ChartSeries {
    pub fn build(predictions: &[ForecastDay], currency: Currency, rate: ExchangeRate) -> Self {
        let labels = predictions
            .iter()
            .map(|p| format_forecast_date(&p.date))
            .collect();
        let values: Vec<f64> = predictions
            .iter()
            .map(|p| currency.chart_value(p.gold_price_usd, rate))
            .collect();
        let colors = predictions
            .iter()
            .map(|p| if p.prediction.is_up() { RISE_COLOR } else { FALL_COLOR })
            .collect();
        let point_labels = values.iter().map(|v| currency.tooltip_label(*v)).collect();

        Self {
            currency,
            labels,
            values,
            colors,
            point_labels,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One render pass: every figure is computed from the same rate.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastView {
    pub currency: Currency,
    pub rate: ExchangeRate,
    pub summary: SummaryView,
    pub cards: Vec<CardView>,
    pub chart: ChartSeries,
    pub mlflow_url: String,
}

impl ForecastView {
    pub fn build(
        data: &ForecastResponse,
        currency: Currency,
        rate: ExchangeRate,
    ) -> Result<Self, AppError> {
        let latest = data
            .latest()
            .ok_or_else(|| AppError::Data("No predictions to display".to_string()))?;

        let summary = SummaryView {
            latest_price: format_price(latest.gold_price_usd, currency, rate),
            data_date: latest.date.clone(),
            model_label: data.model_label(),
            predicted_at: format_predicted_at(&data.predicted_at),
            note: currency.summary_note(),
        };

        let cards = data
            .predictions
            .iter()
            .map(|day| CardView::build(day, currency, rate))
            .collect();

        Ok(Self {
            currency,
            rate,
            summary,
            cards,
            chart: ChartSeries::build(&data.predictions, currency, rate),
            mlflow_url: data.mlflow_url.clone(),
        })
    }
}
