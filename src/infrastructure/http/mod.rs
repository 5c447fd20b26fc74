//! HTTP adapter for the remote task store.

pub mod store;
pub mod types;

pub use store::{HttpStoreConfig, HttpTaskStore};
