//! Service layer: cache, progress aggregation, action serialization,
//! assignment, and the engine facade.

pub mod action_gate;
pub mod assignment;
pub mod cache;
pub mod directory;
pub mod engine;
pub mod progress;

pub use action_gate::{ActionGate, ActionGuard, ActionScope};
pub use assignment::AssignmentService;
pub use cache::{Clock, ExpiringCache, SystemClock, DEFAULT_TTL};
pub use directory::TaskDirectory;
pub use engine::HousekeepingEngine;
pub use progress::{compute_progress, ProgressReport};
