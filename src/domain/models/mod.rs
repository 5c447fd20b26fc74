pub mod checklist;
pub mod config;
pub mod staff;
pub mod task;

pub use checklist::{Checklist, ChecklistId, ChecklistItem, ChecklistItemId, ChecklistProgress};
pub use config::{ApiConfig, CacheConfig, EngineConfig, LoggingConfig};
pub use staff::{Actor, Housekeeper, Role, Room, Zone};
pub use task::{
    review_order, CleaningTask, HousekeeperId, Location, RoomId, TaskAction, TaskId, TaskStatus,
    ZoneId,
};
