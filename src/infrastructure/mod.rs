//! Infrastructure layer: HTTP adapter and configuration loading.

pub mod config;
pub mod http;

pub use config::{ConfigError, ConfigLoader};
pub use http::{HttpStoreConfig, HttpTaskStore};
