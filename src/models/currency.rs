use crate::config::Config;

/// Grams in one troy ounce
pub const TROY_OUNCE_GRAMS: f64 = 31.1035;

/// Retail INR quotes are per 10 grams
pub const INR_UNIT_GRAMS: f64 = 10.0;

/// 3% GST applied to the INR retail price
pub const GST_MULTIPLIER: f64 = 1.03;

/// Display currency for every price on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Currency {
    #[default]
    Inr,
    Usd,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
        }
    }

    /// Value plotted for a USD-per-ounce price
    pub fn chart_value(&self, usd_per_oz: f64, rate: ExchangeRate) -> f64 {
        match self {
            Currency::Inr => usd_per_oz_to_inr_per_10g(usd_per_oz, rate),
            Currency::Usd => usd_per_oz,
        }
    }

    pub fn summary_note(&self) -> &'static str {
        match self {
            Currency::Inr => "Intl. spot · 24k · 10g · incl. GST",
            Currency::Usd => "Intl. spot · 24k · per troy oz",
        }
    }

    pub fn series_label(&self) -> &'static str {
        match self {
            Currency::Inr => "Gold Price (INR/10g)",
            Currency::Usd => "Gold Price (USD/oz)",
        }
    }

    /// Tooltip text for an already converted chart value
    pub fn tooltip_label(&self, value: f64) -> String {
        match self {
            Currency::Inr => format!(" ₹{}", group_amount(value, Grouping::Indian)),
            Currency::Usd => format!(" ${}/oz", group_amount(value, Grouping::Western)),
        }
    }

    /// JavaScript body of the ECharts y axis formatter, e.g. `₹57k` or `$2000`
    pub fn axis_formatter_js(&self) -> &'static str {
        match self {
            Currency::Inr => "return '₹' + (value / 1000).toFixed(0) + 'k';",
            Currency::Usd => "return '$' + value.toFixed(0);",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// INR per USD
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangeRate(f64);

impl ExchangeRate {
    /// Accepts only finite, positive rates.
    pub fn new(inr_per_usd: f64) -> Option<Self> {
        (inr_per_usd.is_finite() && inr_per_usd > 0.0).then_some(Self(inr_per_usd))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for ExchangeRate {
    fn default() -> Self {
        Self(Config::FALLBACK_USD_INR_RATE)
    }
}

/// Troy ounce → 10 g, then USD → INR, then GST.
pub fn usd_per_oz_to_inr_per_10g(usd_per_oz: f64, rate: ExchangeRate) -> f64 {
    let per_gram = usd_per_oz / TROY_OUNCE_GRAMS;
    let per_unit_usd = per_gram * INR_UNIT_GRAMS;
    let base_inr = per_unit_usd * rate.value();
    base_inr * GST_MULTIPLIER
}

pub fn to_inr(usd_per_oz: f64, rate: ExchangeRate) -> String {
    format!(
        "₹{}",
        group_amount(usd_per_oz_to_inr_per_10g(usd_per_oz, rate), Grouping::Indian)
    )
}

pub fn to_usd(usd_per_oz: f64) -> String {
    format!("${}", group_amount(usd_per_oz, Grouping::Western))
}

pub fn format_price(usd_per_oz: f64, currency: Currency, rate: ExchangeRate) -> String {
    match currency {
        Currency::Inr => to_inr(usd_per_oz, rate),
        Currency::Usd => to_usd(usd_per_oz),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Grouping {
    /// en-US: groups of three
    Western,
    /// en-IN: last three digits, then groups of two
    Indian,
}

/// Two fixed decimals with locale digit grouping.
fn group_amount(value: f64, grouping: Grouping) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let grouped = match grouping {
        Grouping::Western => group_digits(int_part, 3, 3),
        Grouping::Indian => group_digits(int_part, 3, 2),
    };

    // "-0.00" is not worth a sign
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

fn group_digits(digits: &str, first: usize, rest: usize) -> String {
    if digits.len() <= first {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - first);
    let mut groups = vec![tail];
    let mut remaining = head;
    while remaining.len() > rest {
        let (h, t) = remaining.split_at(remaining.len() - rest);
        groups.push(t);
        remaining = h;
    }
    groups.push(remaining);
    groups.reverse();
    groups.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(v: f64) -> ExchangeRate {
        ExchangeRate::new(v).unwrap()
    }

    #[test]
    fn test_inr_pipeline_matches_formula() {
        let value = usd_per_oz_to_inr_per_10g(2000.0, rate(86.5));
        let expected = 2000.0 / 31.1035 * 10.0 * 86.5 * 1.03;
        assert!((value - expected).abs() < 1e-9);
        assert_eq!(to_inr(2000.0, rate(86.5)), "₹57,289.37");
    }

    #[test]
    fn test_usd_formatting() {
        assert_eq!(to_usd(2000.0), "$2,000.00");
        assert_eq!(to_usd(0.0), "$0.00");
        assert_eq!(to_usd(999.999), "$1,000.00");
        assert_eq!(to_usd(1234567.891), "$1,234,567.89");
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(group_amount(572893.7, Grouping::Indian), "5,72,893.70");
        assert_eq!(group_amount(12345678.9, Grouping::Indian), "1,23,45,678.90");
        assert_eq!(group_amount(999.0, Grouping::Indian), "999.00");
        assert_eq!(group_amount(1000.0, Grouping::Indian), "1,000.00");
    }

    #[test]
    fn test_negative_sign_follows_symbol() {
        assert_eq!(to_usd(-1234.5), "$-1,234.50");
        assert_eq!(to_usd(-0.001), "$0.00");
    }

    #[test]
    fn test_format_price_dispatch() {
        assert_eq!(format_price(2000.0, Currency::Usd, rate(86.5)), "$2,000.00");
        assert_eq!(format_price(2000.0, Currency::Inr, rate(86.5)), "₹57,289.37");
    }

    #[test]
    fn test_chart_value_by_currency() {
        assert_eq!(Currency::Usd.chart_value(2345.67, rate(83.0)), 2345.67);
        let inr = Currency::Inr.chart_value(2000.0, rate(86.5));
        assert!((inr - 57289.3725).abs() < 1e-3);
    }

    #[test]
    fn test_tooltip_labels() {
        assert_eq!(Currency::Inr.tooltip_label(57289.372), " ₹57,289.37");
        assert_eq!(Currency::Usd.tooltip_label(2000.0), " $2,000.00/oz");
    }

    #[test]
    fn test_exchange_rate_validation() {
        assert!(ExchangeRate::new(0.0).is_none());
        assert!(ExchangeRate::new(-3.0).is_none());
        assert!(ExchangeRate::new(f64::NAN).is_none());
        assert_eq!(ExchangeRate::default().value(), 86.5);
    }

    #[test]
    fn test_default_currency_is_inr() {
        assert_eq!(Currency::default(), Currency::Inr);
        assert_eq!(Currency::Inr.to_string(), "INR");
    }
}
