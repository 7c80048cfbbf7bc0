//! CSV export of tasks and thoughts.
//!
//! # Responsibility
//! - Render the journal as one CSV table (`Type,Text,Category,Deadline`).
//! - Write the table to a caller-chosen path and report I/O failures.
//!
//! # Invariants
//! - Task rows come first, in ledger order; thought rows follow in log order.
//! - Fields are quoted only when they contain a delimiter, quote or newline.
//! - Rows end with CRLF.

use crate::model::task::Task;
use crate::model::thought::Thought;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const CSV_HEADER: [&str; 4] = ["Type", "Text", "Category", "Deadline"];
const TASK_ROW_TYPE: &str = "Task";
const THOUGHT_ROW_TYPE: &str = "Thought";
const ROW_TERMINATOR: &str = "\r\n";

/// Export failed while writing the CSV file.
#[derive(Debug)]
pub struct ExportError {
    pub path: PathBuf,
    pub source: std::io::Error,
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "export to `{}` failed: {}", self.path.display(), self.source)
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Summary of a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub path: PathBuf,
    pub task_rows: usize,
    pub thought_rows: usize,
}

/// Renders tasks and thoughts as CSV text, header included.
pub fn render_csv(tasks: &[Task], thoughts: &[Thought]) -> String {
    let mut out = String::new();
    push_row(&mut out, &CSV_HEADER);
    for task in tasks {
        let deadline = task.deadline_label();
        push_row(
            &mut out,
            &[
                TASK_ROW_TYPE,
                task.text.as_str(),
                task.category.label(),
                deadline.as_str(),
            ],
        );
    }
    for thought in thoughts {
        push_row(&mut out, &[THOUGHT_ROW_TYPE, thought.text.as_str(), "", ""]);
    }
    out
}

/// Writes the CSV export to `path`, replacing any existing file.
pub fn write_csv(
    path: impl AsRef<Path>,
    tasks: &[Task],
    thoughts: &[Thought],
) -> Result<ExportReport, ExportError> {
    let path = path.as_ref().to_path_buf();
    let contents = render_csv(tasks, thoughts);
    if let Err(source) = std::fs::write(&path, contents) {
        error!("event=export_csv module=export status=error error={source}");
        return Err(ExportError { path, source });
    }
    info!(
        "event=export_csv module=export status=ok task_rows={} thought_rows={}",
        tasks.len(),
        thoughts.len()
    );
    Ok(ExportReport {
        path,
        task_rows: tasks.len(),
        thought_rows: thoughts.len(),
    })
}

fn push_row(out: &mut String, fields: &[&str]) {
    for (index, field) in fields.iter().enumerate() {
        if index > 0 {
            out.push(',');
        }
        push_field(out, field);
    }
    out.push_str(ROW_TERMINATOR);
}

fn push_field(out: &mut String, field: &str) {
    let needs_quotes = field.contains([',', '"', '\r', '\n']);
    if !needs_quotes {
        out.push_str(field);
        return;
    }
    out.push('"');
    out.push_str(&field.replace('"', "\"\""));
    out.push('"');
}
