//! `vleben` terminal front end.
//!
//! # Responsibility
//! - Parse commands and route each to one journal operation.
//! - Own confirmations and render results as plain text.
//!
//! # Invariants
//! - One command performs at most one journal mutation.
//! - Validation no-ops print a notice and exit successfully.

mod cli;
mod render;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use cli::{Cli, Command, FilterArgs, GoalCommand, TaskCommand, ThoughtCommand};
use log::info;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use vleben_core::{
    default_log_level, init_logging, random_quote, Category, FileStore, Journal, Mutation, Task,
    TaskEdit,
};

const LOG_DIR_NAME: &str = "logs";

type CliJournal = Journal<FileStore>;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Command::Version = cli.command {
        println!("vleben_core version={}", vleben_core::core_version());
        return Ok(());
    }
    if let Command::Motivate = cli.command {
        println!("{}", random_quote());
        return Ok(());
    }

    let data_dir = absolute(&cli.data_dir)?;
    start_logging(cli.log_level.as_deref(), &data_dir);
    info!(
        "event=cli_start module=cli status=ok command={}",
        cli.command.name()
    );

    let store = FileStore::open(&data_dir)
        .with_context(|| format!("cannot open data directory `{}`", data_dir.display()))?;
    let mut journal = Journal::open(store).context("cannot load journal")?;

    match cli.command {
        Command::Task { command } => run_task(&mut journal, command),
        Command::Thought { command } => run_thought(&mut journal, command),
        Command::Goal { command } => run_goal(&mut journal, command),
        Command::Status => {
            println!("{}", render::status(&journal.status()));
            println!("{}", render::goal(&journal.goal_view()));
            println!("{}", random_quote());
            Ok(())
        }
        Command::Stats => {
            println!("{}", render::stats(&journal.stats()));
            Ok(())
        }
        Command::Backup => {
            let report = journal.backup().context("backup failed")?;
            println!("{}", render::backup(&report));
            Ok(())
        }
        Command::Export { path } => {
            let report = journal.export_csv(&path)?;
            println!(
                "Exported {} task(s) and {} thought(s) to {}.",
                report.task_rows,
                report.thought_rows,
                report.path.display()
            );
            Ok(())
        }
        Command::Motivate | Command::Version => Ok(()),
    }
}

fn run_task(journal: &mut CliJournal, command: TaskCommand) -> Result<()> {
    match command {
        TaskCommand::Add {
            text,
            category,
            deadline,
        } => match journal.add_task(&text, category, deadline)? {
            Mutation::Applied(added) => println!("Task added.\n{}", render::grant(&added.grant)),
            Mutation::Ignored(reason) => println!("{}", render::ignored(reason)),
        },
        TaskCommand::List { filter } => {
            println!("{}", render::task_list(journal.filter_tasks(filter.to_filter())));
        }
        TaskCommand::Edit {
            index,
            filter,
            text,
            new_category,
            deadline,
            clear_deadline,
        } => {
            let position = to_position(index);
            let Some(current) = selected_task(journal, &filter, position) else {
                return report_missing(journal, &filter, position);
            };
            let edit = merge_edit(&current, text, new_category, deadline, clear_deadline);
            match journal.edit_task_at(filter.to_filter(), position, &edit)? {
                Mutation::Applied(id) => {
                    if let Some(task) = journal.task(id) {
                        println!("Task updated: {}", render::task_line(task));
                    }
                }
                Mutation::Ignored(reason) => println!("{}", render::ignored(reason)),
            }
        }
        TaskCommand::Delete { index, filter, yes } => {
            let position = to_position(index);
            let Some(current) = selected_task(journal, &filter, position) else {
                return report_missing(journal, &filter, position);
            };
            if !yes && !confirm(&format!("Really delete this task?\n  {}", current.text))? {
                println!("Kept.");
                return Ok(());
            }
            match journal.delete_task_at(filter.to_filter(), position)? {
                Mutation::Applied(task) => println!("Deleted: {}", task.text),
                Mutation::Ignored(reason) => println!("{}", render::ignored(reason)),
            }
        }
    }
    Ok(())
}

fn run_thought(journal: &mut CliJournal, command: ThoughtCommand) -> Result<()> {
    match command {
        ThoughtCommand::Add { text } => match journal.add_thought(&text)? {
            Mutation::Applied(grant) => println!("Thought saved.\n{}", render::grant(&grant)),
            Mutation::Ignored(reason) => println!("{}", render::ignored(reason)),
        },
        ThoughtCommand::Latest => println!("{}", render::latest_thought(journal.latest_thought())),
        ThoughtCommand::List => println!("{}", render::thought_list(journal.thoughts())),
    }
    Ok(())
}

fn run_goal(journal: &mut CliJournal, command: GoalCommand) -> Result<()> {
    match command {
        GoalCommand::Set { text } => match journal.set_goal(&text)? {
            Mutation::Applied(()) => println!("{}", render::goal(&journal.goal_view())),
            Mutation::Ignored(reason) => println!("{}", render::ignored(reason)),
        },
        GoalCommand::Done => match journal.complete_goal()? {
            Mutation::Applied(grant) => {
                println!("Great! Daily goal done.\n{}", render::grant(&grant));
            }
            Mutation::Ignored(reason) => println!("{}", render::ignored(reason)),
        },
        GoalCommand::Show => println!("{}", render::goal(&journal.goal_view())),
    }
    Ok(())
}

/// Builds the replacement for `current`; omitted flags keep the current value.
fn merge_edit(
    current: &Task,
    text: Option<String>,
    category: Option<Category>,
    deadline: Option<NaiveDate>,
    clear_deadline: bool,
) -> TaskEdit {
    TaskEdit {
        text: text.unwrap_or_else(|| current.text.clone()),
        category: category.unwrap_or(current.category),
        deadline: if clear_deadline {
            None
        } else {
            deadline.or(current.deadline)
        },
    }
}

/// Converts a 1-based CLI index into a view position.
fn to_position(index: u32) -> usize {
    (index as usize).saturating_sub(1)
}

fn selected_task(
    journal: &CliJournal,
    filter: &FilterArgs,
    position: usize,
) -> Option<Task> {
    journal
        .filter_tasks(filter.to_filter())
        .nth(position)
        .cloned()
}

fn report_missing(journal: &CliJournal, filter: &FilterArgs, position: usize) -> Result<()> {
    let len = journal.filter_tasks(filter.to_filter()).count();
    println!(
        "{}",
        render::ignored(vleben_core::Ignored::IndexOutOfRange {
            index: position + 1,
            len,
        })
    );
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}\n[y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_confirmation(&answer))
}

fn is_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes" | "j" | "ja")
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("cannot resolve current directory")?;
    Ok(cwd.join(path))
}

/// Logging failures are reported but never block the command.
fn start_logging(level: Option<&str>, data_dir: &Path) {
    let level = match level {
        Some(level) => level,
        None => default_log_level(),
    };
    if let Err(err) = init_logging(level, data_dir.join(LOG_DIR_NAME)) {
        eprintln!("warning: logging disabled: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::{is_confirmation, merge_edit, run, to_position};
    use crate::cli::Cli;
    use chrono::NaiveDate;
    use clap::Parser;
    use std::path::Path;
    use vleben_core::{Category, FileStore, Journal, Task};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, day).unwrap()
    }

    fn run_in(data_dir: &Path, args: &[&str]) {
        let data_dir = data_dir.to_string_lossy().into_owned();
        let mut argv = vec!["vleben", "--data-dir", data_dir.as_str()];
        argv.extend_from_slice(args);
        run(Cli::try_parse_from(argv).unwrap()).unwrap();
    }

    fn reload(data_dir: &Path) -> Vec<Task> {
        let journal = Journal::open(FileStore::open(data_dir).unwrap()).unwrap();
        journal.tasks().to_vec()
    }

    #[test]
    fn merge_edit_keeps_omitted_fields() {
        let current = Task::new("read", Category::School, Some(date(20))).unwrap();

        let renamed = merge_edit(&current, Some("write".to_string()), None, None, false);
        assert_eq!(renamed.text, "write");
        assert_eq!(renamed.category, Category::School);
        assert_eq!(renamed.deadline, Some(date(20)));

        let moved = merge_edit(&current, None, Some(Category::Work), Some(date(25)), false);
        assert_eq!(moved.text, "read");
        assert_eq!(moved.category, Category::Work);
        assert_eq!(moved.deadline, Some(date(25)));
    }

    #[test]
    fn merge_edit_clear_deadline_drops_it() {
        let current = Task::new("read", Category::School, Some(date(20))).unwrap();
        let cleared = merge_edit(&current, None, None, None, true);
        assert_eq!(cleared.deadline, None);
        assert_eq!(cleared.text, "read");
    }

    #[test]
    fn positions_are_one_based_and_answers_confirm_in_both_languages() {
        assert_eq!(to_position(1), 0);
        assert_eq!(to_position(3), 2);
        for answer in ["y\n", "YES", " ja "] {
            assert!(is_confirmation(answer), "{answer:?}");
        }
        for answer in ["", "n", "no thanks"] {
            assert!(!is_confirmation(answer), "{answer:?}");
        }
    }

    #[test]
    fn edit_and_delete_address_the_filtered_view() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path();
        run_in(dir, &["task", "add", "plan", "--category", "Arbeit", "--deadline", "2026-10-20"]);
        run_in(dir, &["task", "add", "milk"]);
        run_in(dir, &["task", "add", "report", "--category", "Work"]);

        run_in(dir, &["task", "edit", "1", "--clear-deadline"]);
        let tasks = reload(dir);
        assert_eq!(tasks[0].text, "plan");
        assert_eq!(tasks[0].category, Category::Work);
        assert_eq!(tasks[0].deadline, None);

        run_in(dir, &["task", "edit", "2", "--in-category", "Work", "--text", "final report"]);
        let tasks = reload(dir);
        assert_eq!(tasks[1].text, "milk");
        assert_eq!(tasks[2].text, "final report");

        run_in(dir, &["task", "delete", "2", "--in-category", "Work", "--yes"]);
        let texts = reload(dir)
            .into_iter()
            .map(|task| task.text)
            .collect::<Vec<_>>();
        assert_eq!(texts, ["plan", "milk"]);
    }

    #[test]
    fn out_of_range_index_changes_nothing() {
        let temp = tempfile::tempdir().unwrap();
        run_in(temp.path(), &["task", "add", "only"]);
        run_in(temp.path(), &["task", "delete", "5", "--yes"]);
        assert_eq!(reload(temp.path()).len(), 1);
    }
}
