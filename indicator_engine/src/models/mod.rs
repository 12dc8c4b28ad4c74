pub mod bar;
pub mod price_series;
