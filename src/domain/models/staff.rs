//! Staff and reference entities: housekeepers, rooms, zones, roles.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::task::{CleaningTask, HousekeeperId, RoomId, ZoneId};

/// Role of the user issuing a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Housekeeper,
    Manager,
    FrontDesk,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Housekeeper => "housekeeper",
            Self::Manager => "manager",
            Self::FrontDesk => "front_desk",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "housekeeper" => Some(Self::Housekeeper),
            "manager" => Some(Self::Manager),
            "front_desk" | "frontdesk" => Some(Self::FrontDesk),
            _ => None,
        }
    }

    /// Managing roles may cancel, check, rush, and assign freely.
    pub fn can_manage(&self) -> bool {
        matches!(self, Self::Manager | Self::FrontDesk)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user a command is executed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: i64,
    pub role: Role,
}

impl Actor {
    pub fn new(id: i64, role: Role) -> Self {
        Self { id, role }
    }

    /// A housekeeper owns a task only when it is assigned to them.
    pub fn owns(&self, task: &CleaningTask) -> bool {
        self.role == Role::Housekeeper && task.assigned_to == Some(self.id)
    }
}

/// A user with the housekeeper role, relevant here only as an
/// assignment target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Housekeeper {
    pub id: HousekeeperId,
    pub name: String,
}

/// A guest room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub number: String,
}

/// A common area cleaned on a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
}
