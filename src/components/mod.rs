pub mod chart;
pub mod currency_toggle;
pub mod forecast_cards;
pub mod status;
pub mod summary;
pub mod wake_panel;

pub use chart::PriceChart;
pub use currency_toggle::CurrencyToggle;
pub use forecast_cards::ForecastCards;
pub use status::Status;
pub use summary::Summary;
pub use wake_panel::WakePanel;
