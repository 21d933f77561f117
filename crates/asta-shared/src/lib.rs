use std::fmt;

use serde::{
  Deserialize,
  Deserializer,
  Serialize
};

pub const DEFAULT_BASE_URL: &str =
  "http://localhost:8000";
pub const DEFAULT_USER_ID: u64 = 1;

/// Shown wherever a task has no
/// usable due date.
pub const DUE_DATE_PLACEHOLDER: &str =
  "—";

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
  #[default]
  Pending,
  Completed,
  #[serde(other)]
  Other
}

impl TaskStatus {
  pub fn as_key(self) -> &'static str {
    match self {
      | TaskStatus::Pending => "pending",
      | TaskStatus::Completed => {
        "completed"
      }
      | TaskStatus::Other => "unknown"
    }
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
pub struct Task {
  #[serde(default)]
  pub id:          i64,
  #[serde(
    default,
    deserialize_with = "null_as_default"
  )]
  pub title:       String,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub due_date:    Option<String>,
  #[serde(
    default,
    deserialize_with = "null_as_default"
  )]
  pub all_day:     bool,
  #[serde(
    default,
    deserialize_with = "null_as_default"
  )]
  pub status:      TaskStatus
}

impl Task {
  /// Only pending tasks offer the
  /// "Complete" action.
  pub fn can_complete(&self) -> bool {
    self.status == TaskStatus::Pending
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
pub struct LogEntry {
  #[serde(
    default,
    deserialize_with = "null_as_default"
  )]
  pub event_type: String,
  #[serde(
    default,
    deserialize_with = "null_as_default"
  )]
  pub content:    String
}

impl fmt::Display for LogEntry {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    write!(
      f,
      "[{}] {}",
      self.event_type, self.content
    )
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct CommandRequest {
  pub user_id: u64,
  pub text:    String
}

impl CommandRequest {
  pub fn new(
    user_id: u64,
    text: impl Into<String>
  ) -> Self {
    Self {
      user_id,
      text: text.into()
    }
  }

  /// Deletion goes through the
  /// natural-language endpoint as a
  /// synthesized command.
  pub fn delete_task(
    user_id: u64,
    task_id: i64
  ) -> Self {
    Self::new(
      user_id,
      format!("delete task {task_id}")
    )
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
pub struct CommandResponse {
  #[serde(
    default,
    deserialize_with = "null_as_default"
  )]
  pub tasks: Vec<Task>,
  #[serde(default)]
  pub log:   Option<LogEntry>
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Method {
  Get,
  Post,
  Put
}

impl Method {
  pub fn as_str(self) -> &'static str {
    match self {
      | Method::Get => "GET",
      | Method::Post => "POST",
      | Method::Put => "PUT"
    }
  }
}

impl fmt::Display for Method {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Endpoint {
  SubmitCommand,
  ListTasks { user_id: u64 },
  ListLogs { user_id: u64, limit: u32 },
  CompleteTask { task_id: i64 }
}

impl Endpoint {
  pub fn last_log(user_id: u64) -> Self {
    Endpoint::ListLogs {
      user_id,
      limit: 1
    }
  }

  pub fn method(&self) -> Method {
    match self {
      | Endpoint::SubmitCommand => {
        Method::Post
      }
      | Endpoint::ListTasks {
        ..
      }
      | Endpoint::ListLogs {
        ..
      } => Method::Get,
      | Endpoint::CompleteTask {
        ..
      } => Method::Put
    }
  }

  pub fn path(&self) -> String {
    match self {
      | Endpoint::SubmitCommand => {
        "/nlp/act".to_string()
      }
      | Endpoint::ListTasks {
        user_id
      } => {
        format!("/users/{user_id}/tasks")
      }
      | Endpoint::ListLogs {
        user_id,
        limit
      } => format!(
        "/users/{user_id}/logs?limit=\
         {limit}"
      ),
      | Endpoint::CompleteTask {
        task_id
      } => format!(
        "/tasks/{task_id}/complete"
      )
    }
  }

  pub fn url(
    &self,
    base_url: &str
  ) -> String {
    format!(
      "{}{}",
      base_url.trim_end_matches('/'),
      self.path()
    )
  }
}

fn null_as_default<'de, D, T>(
  deserializer: D
) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>
{
  Ok(
    Option::<T>::deserialize(
      deserializer
    )?
    .unwrap_or_default()
  )
}
