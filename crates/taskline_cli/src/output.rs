use tabled::{Table, Tabled};
use taskline_core::model::timestamp::format_timestamp;
use taskline_core::model::{Task, TaskKind};
use taskline_core::session::Outcome;
use taskline_core::task_list::TaskList;

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Type")]
    kind: char,
    #[tabled(rename = "Done")]
    done: &'static str,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "When")]
    when: String,
}

fn schedule_label(task: &Task) -> String {
    match task.kind {
        TaskKind::Todo => "-".to_string(),
        TaskKind::Deadline { due } => format!("by {}", format_timestamp(due)),
        TaskKind::Event { start, end } => format!(
            "{} -> {}",
            format_timestamp(start),
            format_timestamp(end)
        ),
    }
}

pub fn render_table(tasks: &TaskList) -> String {
    let rows = tasks.snapshot().map(|(position, task)| TaskRow {
        position,
        kind: task.kind.symbol(),
        done: if task.done { "yes" } else { "no" },
        description: task.description.clone(),
        priority: task.priority.to_string(),
        when: schedule_label(task),
    });
    Table::new(rows).to_string()
}

pub fn render_json(outcome: &Outcome, tasks: &TaskList) -> serde_json::Value {
    let rows: Vec<serde_json::Value> = tasks
        .snapshot()
        .map(|(position, task)| {
            let mut row = serde_json::to_value(task).unwrap_or(serde_json::Value::Null);
            if let Some(map) = row.as_object_mut() {
                map.insert("position".to_string(), position.into());
            }
            row
        })
        .collect();

    serde_json::json!({
        "command": outcome.command_type.as_str(),
        "message": outcome.message,
        "tasks": rows,
    })
}
