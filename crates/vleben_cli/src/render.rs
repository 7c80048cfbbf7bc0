//! Plain-text rendering of journal views.

use vleben_core::{
    BackupReport, GoalView, Ignored, JournalStats, StatusSummary, Task, Thought, XpGrant,
};

const NO_TASKS: &str = "(no tasks)";
const NO_THOUGHTS: &str = "(no entries)";
const CHART_WIDTH: usize = 30;

/// Numbered task list; numbers are the 1-based indexes edit/delete accept.
pub fn task_list<'a>(tasks: impl Iterator<Item = &'a Task>) -> String {
    let lines = tasks
        .enumerate()
        .map(|(index, task)| format!("{:>3}. {}", index + 1, task_line(task)))
        .collect::<Vec<_>>();
    if lines.is_empty() {
        return NO_TASKS.to_string();
    }
    lines.join("\n")
}

pub fn task_line(task: &Task) -> String {
    match task.deadline {
        Some(_) => format!(
            "{} [Category: {} | Due: {}]",
            task.text,
            task.category,
            task.deadline_label()
        ),
        None => format!("{} [Category: {}]", task.text, task.category),
    }
}

pub fn latest_thought(thought: Option<&Thought>) -> String {
    let text = thought.map_or(NO_THOUGHTS, |thought| thought.text.as_str());
    format!("Latest thought:\n{text}")
}

pub fn thought_list(thoughts: &[Thought]) -> String {
    if thoughts.is_empty() {
        return NO_THOUGHTS.to_string();
    }
    thoughts
        .iter()
        .enumerate()
        .map(|(index, thought)| format!("{:>3}. {}", index + 1, thought.text))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn goal(view: &GoalView) -> String {
    match view {
        GoalView::None => "No daily goal set.".to_string(),
        GoalView::Open(text) => format!("Daily goal: {text} [open]"),
        GoalView::Done(text) => format!("Daily goal: {text} [done!]"),
    }
}

pub fn grant(grant: &XpGrant) -> String {
    let mut line = format!(
        "+{} XP (Level {} | XP {})",
        grant.amount, grant.state.level, grant.state.xp
    );
    if grant.levels_gained > 0 {
        line.push_str(&format!("\nLevel up! You reached level {}.", grant.state.level));
    }
    line
}

pub fn ignored(reason: Ignored) -> String {
    format!("Nothing changed: {reason}.")
}

pub fn status(summary: &StatusSummary) -> String {
    format!(
        "Level: {} | XP: {} ({} to next level)\nTasks: {}\nThoughts: {}",
        summary.level,
        summary.xp,
        summary.xp_to_next_level,
        summary.task_count,
        summary.thought_count
    )
}

/// Totals plus a horizontal bar per category scaled to the largest count.
pub fn stats(stats: &JournalStats) -> String {
    let mut out = format!(
        "Tasks total: {}\nThoughts total: {}",
        stats.total_tasks, stats.total_thoughts
    );
    let max = stats.max_category_count();
    if max == 0 {
        return out;
    }
    let label_width = stats
        .per_category
        .iter()
        .map(|(category, _)| category.label().len())
        .max()
        .unwrap_or(0);
    out.push_str("\n\nTasks per category:");
    for (category, count) in &stats.per_category {
        let bar_len = (count * CHART_WIDTH).div_ceil(max);
        out.push_str(&format!(
            "\n{:<label_width$} | {} {count}",
            category.label(),
            "#".repeat(bar_len)
        ));
    }
    out
}

pub fn backup(report: &BackupReport) -> String {
    let copied = report
        .copied
        .iter()
        .map(|kind| kind.file_name())
        .collect::<Vec<_>>();
    let location = report
        .directory
        .as_ref()
        .map(|dir| dir.display().to_string())
        .unwrap_or_else(|| "memory".to_string());
    if copied.is_empty() {
        return format!("Backup saved to {location} (no data files yet).");
    }
    format!("Backup saved to {location}: {}", copied.join(", "))
}
