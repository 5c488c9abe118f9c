pub mod config;

pub use config::{AppConfig, HistorySettings, CONFIG_PATH_ENV};
