//! Command-line surface.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use vleben_core::{parse_date, Category, CategoryParseError, DeadlineParseError, TaskFilter};

#[derive(Debug, Parser)]
#[command(
    name = "vleben",
    version,
    about = "Virtuelles Leben: tasks, thoughts, a daily goal and XP"
)]
pub struct Cli {
    /// Directory holding tasks.json, thoughts.json, level.json and goal.json.
    #[arg(long, global = true, env = "VLEBEN_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// trace|debug|info|warn|error (defaults by build mode).
    #[arg(long, global = true, env = "VLEBEN_LOG_LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage to-do items.
    Task {
        #[command(subcommand)]
        command: TaskCommand,
    },
    /// Record and read thoughts.
    Thought {
        #[command(subcommand)]
        command: ThoughtCommand,
    },
    /// Set or complete today's goal.
    Goal {
        #[command(subcommand)]
        command: GoalCommand,
    },
    /// Show level, XP, counts and today's goal.
    Status,
    /// Show task/thought statistics with a per-category chart.
    Stats,
    /// Copy the data files into <data-dir>/backup.
    Backup,
    /// Export tasks and thoughts as CSV.
    Export {
        path: PathBuf,
    },
    /// Print a motivational quote.
    Motivate,
    /// Print core version.
    Version,
}

impl Command {
    /// Stable name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Task { command } => match command {
                TaskCommand::Add { .. } => "task_add",
                TaskCommand::List { .. } => "task_list",
                TaskCommand::Edit { .. } => "task_edit",
                TaskCommand::Delete { .. } => "task_delete",
            },
            Self::Thought { command } => match command {
                ThoughtCommand::Add { .. } => "thought_add",
                ThoughtCommand::Latest => "thought_latest",
                ThoughtCommand::List => "thought_list",
            },
            Self::Goal { command } => match command {
                GoalCommand::Set { .. } => "goal_set",
                GoalCommand::Done => "goal_done",
                GoalCommand::Show => "goal_show",
            },
            Self::Status => "status",
            Self::Stats => "stats",
            Self::Backup => "backup",
            Self::Export { .. } => "export",
            Self::Motivate => "motivate",
            Self::Version => "version",
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    /// Add a task (+5 XP).
    Add {
        text: String,
        #[arg(long, short, value_parser = parse_category, default_value = "General")]
        category: Category,
        /// Due date (YYYY-MM-DD).
        #[arg(long, short, value_parser = parse_date_arg)]
        deadline: Option<NaiveDate>,
    },
    /// List tasks, optionally filtered.
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Edit the task at INDEX of the (filtered) list.
    Edit {
        /// 1-based position as shown by `task list` with the same filters.
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        index: u32,
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long)]
        text: Option<String>,
        #[arg(long = "category", value_parser = parse_category)]
        new_category: Option<Category>,
        #[arg(long, value_parser = parse_date_arg, conflicts_with = "clear_deadline")]
        deadline: Option<NaiveDate>,
        #[arg(long)]
        clear_deadline: bool,
    },
    /// Delete the task at INDEX of the (filtered) list.
    Delete {
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        index: u32,
        #[command(flatten)]
        filter: FilterArgs,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
}

/// Filter flags shared by list/edit/delete so indexes line up.
#[derive(Debug, Clone, Args)]
pub struct FilterArgs {
    /// Only tasks in this category.
    #[arg(long = "in-category", value_parser = parse_category)]
    pub category: Option<Category>,
    /// Only tasks due on or before this date; tasks without deadline are hidden.
    #[arg(long, value_parser = parse_date_arg)]
    pub due_by: Option<NaiveDate>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> TaskFilter {
        TaskFilter {
            category: self.category,
            due_by: self.due_by,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ThoughtCommand {
    /// Record a thought (+2 XP).
    Add { text: String },
    /// Show the most recent thought.
    Latest,
    /// Show every thought in order.
    List,
}

#[derive(Debug, Subcommand)]
pub enum GoalCommand {
    /// Set today's goal, replacing any previous goal.
    Set { text: String },
    /// Mark today's goal done (+10 XP).
    Done,
    /// Show today's goal.
    Show,
}

fn parse_category(value: &str) -> Result<Category, CategoryParseError> {
    value.parse()
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, DeadlineParseError> {
    parse_date(value)
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, TaskCommand};
    use clap::{CommandFactory, Parser};
    use vleben_core::Category;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn task_add_parses_german_category_and_deadline() {
        let cli = Cli::try_parse_from([
            "vleben", "task", "add", "Mathe", "--category", "Schule", "--deadline", "2026-10-20",
        ])
        .unwrap();
        match cli.command {
            Command::Task {
                command:
                    TaskCommand::Add {
                        text,
                        category,
                        deadline,
                    },
            } => {
                assert_eq!(text, "Mathe");
                assert_eq!(category, Category::School);
                assert_eq!(deadline.map(|d| d.to_string()).as_deref(), Some("2026-10-20"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn edit_rejects_zero_index_and_conflicting_deadline_flags() {
        assert!(Cli::try_parse_from(["vleben", "task", "edit", "0", "--text", "x"]).is_err());
        assert!(Cli::try_parse_from([
            "vleben",
            "task",
            "edit",
            "1",
            "--deadline",
            "2026-10-20",
            "--clear-deadline",
        ])
        .is_err());
    }
}
