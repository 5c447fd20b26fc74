//! Turnover - Housekeeping Task Lifecycle and Assignment Engine
//!
//! Turnover manages the daily lifecycle of hotel cleaning tasks: a
//! data-driven state machine with role checks, checklist-gated
//! completion, single and bulk assignment, idempotent day generation,
//! and a time-boxed cache over a remote task store.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Pure models, transition rules, and ports
//! - **Service Layer** (`services`): Cache, progress aggregation, action
//!   serialization, and the engine facade
//! - **Infrastructure Layer** (`infrastructure`): HTTP adapter and config
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use turnover::{HousekeepingEngine, HttpStoreConfig, HttpTaskStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = HttpTaskStore::new(HttpStoreConfig::default())?;
//!     let engine = HousekeepingEngine::new(store, &Default::default());
//!     let today = chrono::Utc::now().date_naive();
//!     let tasks = engine.list_tasks_for_date(today).await?;
//!     println!("{} tasks today", tasks.len());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{EngineError, EngineResult};
pub use domain::models::checklist::{Checklist, ChecklistItem, ChecklistProgress};
pub use domain::models::config::{ApiConfig, CacheConfig, EngineConfig, LoggingConfig};
pub use domain::models::staff::{Actor, Housekeeper, Role, Room, Zone};
pub use domain::models::task::{CleaningTask, Location, TaskAction, TaskStatus};
pub use domain::ports::{GenerationReport, TaskStore};
pub use infrastructure::{ConfigError, ConfigLoader, HttpStoreConfig, HttpTaskStore};
pub use services::{
    compute_progress, ActionGate, ActionScope, ExpiringCache, HousekeepingEngine, ProgressReport,
};
