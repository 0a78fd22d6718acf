/// Configuration constants for the application
pub struct Config;

impl Config {
    /// Base URL of the gold prediction service
    pub const API_BASE_URL: &'static str = "https://gold-api-u521.onrender.com";

    /// USD to INR exchange rate provider
    pub const RATE_PROVIDER_URL: &'static str = "https://api.frankfurter.app/latest";

    /// INR per USD used until a live rate has been fetched
    pub const FALLBACK_USD_INR_RATE: f64 = 86.5;

    /// Interval between in-flight status messages
    pub const STATUS_STEP_INTERVAL_MS: u32 = 1_800;

    /// Upper bound on a single predict request (90 seconds covers a cold start)
    pub const PREDICT_TIMEOUT_MS: u32 = 90_000;

    /// Wake poller attempt budget
    pub const WAKE_MAX_ATTEMPTS: u32 = 10;

    /// Delay between wake attempts
    pub const WAKE_INTERVAL_MS: u32 = 3_000;

    /// Timeout applied to each wake probe
    pub const WAKE_PROBE_TIMEOUT_MS: u32 = 5_000;

    /// Per-card delay for the staggered card entrance
    pub const CARD_STAGGER_MS: u32 = 80;

    /// Delay between a card appearing and its confidence bar filling
    pub const CONFIDENCE_FILL_DELAY_MS: u32 = 100;

    /// Debounce applied to window resize before the chart re-renders
    pub const CHART_RESIZE_DEBOUNCE_MS: u32 = 150;
}
