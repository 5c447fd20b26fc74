//! Task subcommands: listing, generation, assignment, and transitions.

use std::collections::HashMap;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};

use crate::cli::output;
use crate::domain::models::checklist::{ChecklistId, ChecklistProgress};
use crate::domain::models::staff::Actor;
use crate::domain::models::task::{HousekeeperId, TaskAction, TaskId};
use crate::domain::ports::TaskStore;
use crate::services::HousekeepingEngine;

#[derive(Args)]
pub struct TasksArgs {
    #[command(subcommand)]
    pub command: TasksCommand,
}

#[derive(Subcommand)]
pub enum TasksCommand {
    /// List tasks scheduled for a date
    List {
        #[arg(long)]
        date: NaiveDate,
    },
    /// Tasks awaiting inspection, rush first then due time
    Inspection {
        #[arg(long)]
        date: NaiveDate,
    },
    /// Generate the day's recurring tasks (idempotent)
    Generate {
        #[arg(long)]
        date: NaiveDate,
    },
    /// Assign a task to a housekeeper
    Assign {
        task: TaskId,
        #[arg(long)]
        housekeeper: HousekeeperId,
        #[arg(long)]
        date: NaiveDate,
    },
    /// Assign several tasks to one housekeeper in one operation
    AssignBulk {
        #[arg(long, value_delimiter = ',')]
        tasks: Vec<TaskId>,
        #[arg(long)]
        housekeeper: Option<HousekeeperId>,
        #[arg(long)]
        date: NaiveDate,
    },
    /// Start work on a task
    Start {
        task: TaskId,
        #[arg(long)]
        date: NaiveDate,
    },
    /// Complete a task. Checklist progress is passed as id=completed/total
    Complete {
        task: TaskId,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long = "progress", value_parser = parse_progress)]
        progress: Vec<(ChecklistId, ChecklistProgress)>,
    },
    /// Mark an inspected task as checked
    Check {
        task: TaskId,
        #[arg(long)]
        date: NaiveDate,
    },
    /// Cancel a task
    Cancel {
        task: TaskId,
        #[arg(long)]
        date: NaiveDate,
    },
    /// Toggle the rush flag
    Rush {
        task: TaskId,
        #[arg(long)]
        date: NaiveDate,
    },
    /// Show the actions the acting user may take on a task
    Actions {
        task: TaskId,
        #[arg(long)]
        date: NaiveDate,
    },
    /// Attach a checklist template to a task
    AttachChecklist {
        task: TaskId,
        #[arg(long)]
        template: ChecklistId,
        #[arg(long)]
        date: NaiveDate,
    },
    /// Remove a checklist from a task
    DetachChecklist {
        task: TaskId,
        #[arg(long)]
        checklist: ChecklistId,
        #[arg(long)]
        date: NaiveDate,
    },
}

/// Parse `<checklist_id>=<completed>/<total>` into a progress entry.
fn parse_progress(s: &str) -> Result<(ChecklistId, ChecklistProgress), String> {
    let (id, counts) = s
        .split_once('=')
        .ok_or_else(|| format!("expected <id>=<completed>/<total>, got '{s}'"))?;
    let (completed, total) = counts
        .split_once('/')
        .ok_or_else(|| format!("expected <completed>/<total>, got '{counts}'"))?;
    let id: ChecklistId = id.trim().parse().map_err(|e| format!("bad checklist id: {e}"))?;
    let completed: u32 = completed.trim().parse().map_err(|e| format!("bad count: {e}"))?;
    let total: u32 = total.trim().parse().map_err(|e| format!("bad count: {e}"))?;
    Ok((id, ChecklistProgress::new(total, completed)))
}

pub async fn execute<S: TaskStore>(
    args: TasksArgs,
    engine: &HousekeepingEngine<S>,
    actor: &Actor,
    json: bool,
) -> Result<()> {
    match args.command {
        TasksCommand::List { date } => {
            let tasks = engine.list_tasks_for_date(date).await?;
            output::print_tasks(&tasks, json)
        }
        TasksCommand::Inspection { date } => {
            let tasks = engine.ready_for_inspection(date).await;
            output::print_tasks(&tasks, json)
        }
        TasksCommand::Generate { date } => {
            let report = engine.auto_generate(date).await?;
            output::print_generation(report, json)
        }
        TasksCommand::Assign { task, housekeeper, date } => {
            engine.list_tasks_for_date(date).await?;
            let tasks = engine.assign_one(task, housekeeper).await?;
            output::print_tasks(&tasks, json)
        }
        TasksCommand::AssignBulk { tasks, housekeeper, date } => {
            engine.list_tasks_for_date(date).await?;
            let refreshed = engine.assign_many(&tasks, housekeeper, date).await?;
            output::print_tasks(&refreshed, json)
        }
        TasksCommand::Start { task, date } => {
            transition(engine, task, date, TaskAction::Start, actor, &HashMap::new(), json).await
        }
        TasksCommand::Complete { task, date, progress } => {
            let item_state: HashMap<ChecklistId, ChecklistProgress> =
                progress.into_iter().collect();
            transition(engine, task, date, TaskAction::Complete, actor, &item_state, json).await
        }
        TasksCommand::Check { task, date } => {
            transition(engine, task, date, TaskAction::Check, actor, &HashMap::new(), json).await
        }
        TasksCommand::Cancel { task, date } => {
            transition(engine, task, date, TaskAction::Cancel, actor, &HashMap::new(), json).await
        }
        TasksCommand::Rush { task, date } => {
            engine.list_tasks_for_date(date).await?;
            let updated = engine.toggle_rush(task, actor).await?;
            output::print_task(&updated, json)
        }
        TasksCommand::Actions { task, date } => {
            engine.list_tasks_for_date(date).await?;
            let actions = engine.allowed_actions(task, actor)?;
            output::print_actions(&actions, json)
        }
        TasksCommand::AttachChecklist { task, template, date } => {
            engine.list_tasks_for_date(date).await?;
            let updated = engine.attach_checklist(task, template, actor).await?;
            output::print_task(&updated, json)
        }
        TasksCommand::DetachChecklist { task, checklist, date } => {
            engine.list_tasks_for_date(date).await?;
            let updated = engine.detach_checklist(task, checklist, actor).await?;
            output::print_task(&updated, json)
        }
    }
}

async fn transition<S: TaskStore>(
    engine: &HousekeepingEngine<S>,
    task: TaskId,
    date: NaiveDate,
    action: TaskAction,
    actor: &Actor,
    item_state: &HashMap<ChecklistId, ChecklistProgress>,
    json: bool,
) -> Result<()> {
    // Prime the engine's task index with the day's list.
    engine.list_tasks_for_date(date).await?;
    let updated = engine.transition(task, action, actor, item_state).await?;
    output::print_task(&updated, json)
}
