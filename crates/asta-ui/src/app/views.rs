use std::fmt;

use asta_shared::{
  LogEntry,
  Task,
  TaskStatus
};
use chrono::Locale;

use super::due_date::format_due_date;

pub const EMPTY_TASKS_MESSAGE: &str =
  "No tasks yet";
pub const EMPTY_LOG_MESSAGE: &str =
  "No log yet.";

#[derive(Debug, Clone, PartialEq)]
pub struct TaskRowView {
  pub id:           i64,
  pub title:        String,
  pub description:  Option<String>,
  pub due_label:    String,
  pub status:       TaskStatus,
  pub can_complete: bool
}

impl TaskRowView {
  pub fn from_task(
    task: &Task,
    locale: Locale
  ) -> Self {
    Self {
      id:           task.id,
      title:        task.title.clone(),
      description:  task
        .description
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string),
      due_label:    format_due_date(
        task.due_date.as_deref(),
        task.all_day,
        locale
      ),
      status:       task.status,
      can_complete: task.can_complete()
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TaskTableBody {
  Placeholder,
  Rows(Vec<TaskRowView>)
}

/// One row per task, in backend order,
/// or the placeholder for an empty
/// list.
pub fn task_table_body(
  tasks: &[Task],
  locale: Locale
) -> TaskTableBody {
  if tasks.is_empty() {
    return TaskTableBody::Placeholder;
  }
  TaskTableBody::Rows(
    tasks
      .iter()
      .map(|task| {
        TaskRowView::from_task(
          task, locale
        )
      })
      .collect()
  )
}

/// What the single-line log display
/// currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum LogView {
  Empty,
  Entry(LogEntry),
  Message(String)
}

impl From<Option<LogEntry>> for LogView {
  fn from(
    entry: Option<LogEntry>
  ) -> Self {
    match entry {
      | Some(entry) => {
        LogView::Entry(entry)
      }
      | None => LogView::Empty
    }
  }
}

impl fmt::Display for LogView {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    match self {
      | LogView::Empty => {
        f.write_str(EMPTY_LOG_MESSAGE)
      }
      | LogView::Entry(entry) => {
        write!(f, "{entry}")
      }
      | LogView::Message(text) => {
        f.write_str(text)
      }
    }
  }
}
