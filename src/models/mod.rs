pub mod currency;
pub mod error;
pub mod forecast;
pub mod view;
