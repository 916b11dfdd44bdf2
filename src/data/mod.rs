//! Data module - CSV loading and the weather table

mod loader;

pub use loader::{LoaderError, WeatherTable, DATE_COLUMN, GROUP_COLUMN};
