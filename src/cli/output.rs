//! Table and JSON rendering for CLI output.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

use crate::domain::models::staff::{Housekeeper, Room, Zone};
use crate::domain::models::task::{CleaningTask, TaskAction};
use crate::domain::ports::GenerationReport;

fn base_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_tasks(tasks: &[CleaningTask], json: bool) -> Result<()> {
    if json {
        return print_json(&tasks);
    }
    let mut table = base_table(vec![
        "ID", "Location", "Type", "Status", "Assigned", "Due", "Rush", "Checklists",
    ]);
    for task in tasks {
        table.add_row(vec![
            task.id.to_string(),
            task.location.to_string(),
            task.cleaning_type.clone(),
            task.status.to_string(),
            task.assigned_to.map_or_else(|| "-".to_string(), |id| id.to_string()),
            task.due_time.map_or_else(|| "-".to_string(), |t| t.format("%H:%M").to_string()),
            if task.is_rush { "yes" } else { "no" }.to_string(),
            task.checklist_data.len().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn print_task(task: &CleaningTask, json: bool) -> Result<()> {
    print_tasks(std::slice::from_ref(task), json)
}

pub fn print_housekeepers(housekeepers: &[Housekeeper], json: bool) -> Result<()> {
    if json {
        return print_json(&housekeepers);
    }
    let mut table = base_table(vec!["ID", "Name"]);
    for hk in housekeepers {
        table.add_row(vec![hk.id.to_string(), hk.name.clone()]);
    }
    println!("{table}");
    Ok(())
}

pub fn print_rooms(rooms: &[Room], json: bool) -> Result<()> {
    if json {
        return print_json(&rooms);
    }
    let mut table = base_table(vec!["ID", "Number"]);
    for room in rooms {
        table.add_row(vec![room.id.to_string(), room.number.clone()]);
    }
    println!("{table}");
    Ok(())
}

pub fn print_zones(zones: &[Zone], json: bool) -> Result<()> {
    if json {
        return print_json(&zones);
    }
    let mut table = base_table(vec!["ID", "Name"]);
    for zone in zones {
        table.add_row(vec![zone.id.to_string(), zone.name.clone()]);
    }
    println!("{table}");
    Ok(())
}

pub fn print_actions(actions: &[TaskAction], json: bool) -> Result<()> {
    if json {
        return print_json(&actions);
    }
    if actions.is_empty() {
        println!("No actions available.");
    } else {
        let names: Vec<&str> = actions.iter().map(TaskAction::as_str).collect();
        println!("{}", names.join(", "));
    }
    Ok(())
}

pub fn print_generation(report: GenerationReport, json: bool) -> Result<()> {
    if json {
        return print_json(&report);
    }
    if report.created_count == 0 {
        println!("Tasks already exist for that date; nothing created.");
    } else {
        println!("Created {} tasks.", report.created_count);
    }
    Ok(())
}
