//! Plain-text rendering of the board.

use chrono::Local;

use super::api::TaskApi;
use super::board::Board;
use crate::types::Task;

fn format_created(task: &Task) -> String {
    task.created_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// One task as a short block.
pub fn format_task(task: &Task) -> String {
    let mark = if task.is_completed { "[x]" } else { "[ ]" };
    let mut out = format!("{} #{} {}\n", mark, task.id, task.title);
    if let Some(desc) = task.description.as_deref().filter(|d| !d.is_empty()) {
        for line in desc.lines() {
            out.push_str(&format!("      {}\n", line));
        }
    }
    out.push_str(&format!("      Created: {}\n", format_created(task)));
    out
}

/// Recent list, stats, quote and any error banner.
pub fn render_board<A: TaskApi>(board: &Board<A>) -> String {
    let mut out = String::new();

    if let Some(err) = board.error() {
        out.push_str(&format!("!! {}\n\n", err));
    }

    if let Some(task) = board.edit_task() {
        out.push_str(&format!("Editing task #{}: {}\n\n", task.id, task.title));
    }

    out.push_str("Latest Tasks\n");
    if board.tasks().is_empty() {
        out.push_str("  No pending tasks\n");
    } else {
        for task in board.tasks() {
            out.push_str(&format_task(task));
        }
    }

    let stats = board.stats();
    out.push_str(&format!(
        "\n{} Completed | {} Pending\n",
        stats.completed, stats.pending
    ));
    out.push_str(&format!("\"{}\"\n", board.quote()));
    out
}

/// Full list under the current filter.
pub fn render_all<A: TaskApi>(board: &Board<A>) -> String {
    let mut out = format!("All Tasks (filter: {})\n", board.filter().as_str());
    let tasks = board.filtered_tasks();
    if tasks.is_empty() {
        out.push_str("  Nothing to show\n");
    }
    for task in tasks {
        out.push_str(&format_task(task));
    }
    out
}
