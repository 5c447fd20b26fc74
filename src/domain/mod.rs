//! Domain layer: models, transition rules, ports, and errors.
//!
//! Everything here is pure; network access lives behind the ports.

pub mod errors;
pub mod models;
pub mod ports;
pub mod transitions;

pub use errors::{EngineError, EngineResult};
