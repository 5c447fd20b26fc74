//! Reference-data subcommands: staff, rooms, and zones.

use anyhow::Result;

use crate::cli::output;
use crate::domain::ports::TaskStore;
use crate::services::HousekeepingEngine;

pub async fn staff<S: TaskStore>(engine: &HousekeepingEngine<S>, json: bool) -> Result<()> {
    let housekeepers = engine.list_housekeepers().await?;
    output::print_housekeepers(&housekeepers, json)
}

pub async fn rooms<S: TaskStore>(engine: &HousekeepingEngine<S>, json: bool) -> Result<()> {
    let rooms = engine.list_rooms().await?;
    output::print_rooms(&rooms, json)
}

pub async fn zones<S: TaskStore>(engine: &HousekeepingEngine<S>, json: bool) -> Result<()> {
    let zones = engine.list_zones().await?;
    output::print_zones(&zones, json)
}
