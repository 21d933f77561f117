use std::cell::RefCell;
use std::rc::Rc;

use asta_shared::Task;
use gloo::timers::future::TimeoutFuture;
use yew::{
  UseReducerHandle,
  UseStateHandle
};

use super::alerts::{
  ALERT_VISIBLE_MS,
  Alert,
  AlertAction,
  AlertKind,
  AlertStack
};
use super::sequence::{
  Sequencer,
  Ticket,
  ViewSlot
};
use super::views::LogView;
use crate::api::{
  ApiError,
  DeleteOutcome,
  TaskBackend
};

pub const UNREACHABLE_MESSAGE: &str =
  "Request failed. Is backend running?";

/// Everything a controller operation may
/// touch on screen.
pub trait TaskView {
  fn issue(&self) -> Ticket;
  fn render_tasks(
    &self,
    ticket: Ticket,
    tasks: Vec<Task>
  );
  fn render_log(
    &self,
    ticket: Ticket,
    log: LogView
  );
  fn clear_input(&self);
  fn show_alert(
    &self,
    message: String,
    kind: AlertKind
  );
}

/// Handles to the component state,
/// built once per render and handed to
/// each operation.
#[derive(Clone)]
pub struct ViewBinding {
  pub tasks:     UseStateHandle<Vec<Task>>,
  pub log:       UseStateHandle<LogView>,
  pub input:     UseStateHandle<String>,
  pub alerts:
    UseReducerHandle<AlertStack>,
  pub sequencer: Rc<RefCell<Sequencer>>,
  pub alert_ids: Rc<RefCell<u64>>
}

impl TaskView for ViewBinding {
  fn issue(&self) -> Ticket {
    self.sequencer.borrow_mut().issue()
  }

  fn render_tasks(
    &self,
    ticket: Ticket,
    tasks: Vec<Task>
  ) {
    if self
      .sequencer
      .borrow_mut()
      .admit(ViewSlot::Tasks, ticket)
    {
      tracing::debug!(
        count = tasks.len(),
        "rendering task list"
      );
      self.tasks.set(tasks);
    }
  }

  fn render_log(
    &self,
    ticket: Ticket,
    log: LogView
  ) {
    if self
      .sequencer
      .borrow_mut()
      .admit(ViewSlot::Log, ticket)
    {
      self.log.set(log);
    }
  }

  fn clear_input(&self) {
    self.input.set(String::new());
  }

  fn show_alert(
    &self,
    message: String,
    kind: AlertKind
  ) {
    let id =
      next_alert_id(&self.alert_ids);
    self.alerts.dispatch(
      AlertAction::Show(Alert {
        id,
        message,
        kind
      })
    );

    let alerts = self.alerts.clone();
    wasm_bindgen_futures::spawn_local(
      async move {
        TimeoutFuture::new(
          ALERT_VISIBLE_MS
        )
        .await;
        alerts.dispatch(
          AlertAction::Expire(id)
        );
      }
    );
  }
}

/// Every banner gets its own id, so its
/// timer can only ever expire itself.
fn next_alert_id(
  ids: &RefCell<u64>
) -> u64 {
  let mut next = ids.borrow_mut();
  *next = next.wrapping_add(1);
  *next
}

/// Trimmed command text, or `None` when
/// there is nothing to send.
pub fn command_text(
  raw: &str
) -> Option<&str> {
  let text = raw.trim();
  (!text.is_empty()).then_some(text)
}

pub async fn send_command<B, V>(
  backend: &B,
  view: &V,
  raw: &str
) where
  B: TaskBackend,
  V: TaskView
{
  let Some(text) = command_text(raw)
  else {
    tracing::debug!(
      "ignored empty command"
    );
    return;
  };

  let ticket = view.issue();
  tracing::info!(
    text,
    "submitting command"
  );

  match backend.submit_command(text).await
  {
    | Ok(response) => {
      view.render_tasks(
        ticket,
        response.tasks
      );
      view.render_log(
        ticket,
        LogView::from(response.log)
      );
      view.clear_input();
    }
    | Err(ApiError::Network(error)) => {
      tracing::error!(
        %error,
        "command request failed"
      );
      view.render_log(
        ticket,
        LogView::Message(
          UNREACHABLE_MESSAGE
            .to_string()
        )
      );
      view.show_alert(
        UNREACHABLE_MESSAGE.to_string(),
        AlertKind::Error
      );
    }
    | Err(error) => {
      tracing::warn!(
        %error,
        "command rejected by backend"
      );
      let message =
        format!("Error: {error}");
      view.render_log(
        ticket,
        LogView::Message(
          message.clone()
        )
      );
      view.show_alert(
        message,
        AlertKind::Error
      );
    }
  }
}

pub async fn delete_task<B, V>(
  backend: &B,
  view: &V,
  task_id: i64
) where
  B: TaskBackend,
  V: TaskView
{
  let ticket = view.issue();
  tracing::info!(
    task_id,
    "deleting task"
  );

  match backend.delete_task(task_id).await
  {
    | Ok(DeleteOutcome {
      accepted,
      response
    }) => {
      view.render_tasks(
        ticket,
        response.tasks
      );
      view.render_log(
        ticket,
        LogView::from(response.log)
      );
      if accepted {
        view.show_alert(
          format!(
            "Task {task_id} deleted"
          ),
          AlertKind::Success
        );
      } else {
        view.show_alert(
          format!(
            "Failed to delete task \
             {task_id}"
          ),
          AlertKind::Error
        );
      }
    }
    | Err(error) => {
      tracing::error!(
        task_id,
        %error,
        "delete failed"
      );
      view.show_alert(
        format!(
          "Failed to delete task \
           {task_id}: {error}"
        ),
        AlertKind::Error
      );
    }
  }
}

/// Marks a task completed, then reloads
/// both views concurrently instead of
/// applying the response locally.
pub async fn complete_task<B, V>(
  backend: &B,
  view: &V,
  task_id: i64
) where
  B: TaskBackend,
  V: TaskView
{
  tracing::info!(
    task_id,
    "completing task"
  );

  match backend
    .complete_task(task_id)
    .await
  {
    | Ok(()) => {
      view.show_alert(
        format!(
          "Task {task_id} marked as \
           completed"
        ),
        AlertKind::Success
      );
      refresh_views(backend, view).await;
    }
    | Err(error) => {
      tracing::warn!(
        task_id,
        %error,
        "completion failed"
      );
      view.show_alert(
        format!(
          "Failed to complete task \
           {task_id}: {error}"
        ),
        AlertKind::Error
      );
    }
  }
}

pub async fn load_tasks<B, V>(
  backend: &B,
  view: &V
) where
  B: TaskBackend,
  V: TaskView
{
  let ticket = view.issue();
  match backend.list_tasks().await {
    | Ok(tasks) => {
      view.render_tasks(ticket, tasks)
    }
    | Err(error) => {
      tracing::error!(
        %error,
        "loading tasks failed"
      );
      view.show_alert(
        format!(
          "Could not load tasks: \
           {error}"
        ),
        AlertKind::Error
      );
    }
  }
}

pub async fn load_last_log<B, V>(
  backend: &B,
  view: &V
) where
  B: TaskBackend,
  V: TaskView
{
  let ticket = view.issue();
  match backend.last_log().await {
    | Ok(entry) => {
      view.render_log(
        ticket,
        LogView::from(entry)
      )
    }
    | Err(error) => {
      tracing::error!(
        %error,
        "loading last log failed"
      );
      view.render_log(
        ticket,
        LogView::Message(format!(
          "Could not load log: {error}"
        ))
      );
    }
  }
}

/// Both fetches run at once; each view
/// is filled by its own response.
pub async fn refresh_views<B, V>(
  backend: &B,
  view: &V
) where
  B: TaskBackend,
  V: TaskView
{
  futures::join!(
    load_tasks(backend, view),
    load_last_log(backend, view)
  );
}

#[cfg(test)]
mod tests {
  use std::cell::Cell;

  use asta_shared::{
    CommandResponse,
    LogEntry,
    TaskStatus
  };
  use futures::executor::block_on;

  use super::*;

  struct FakeBackend {
    command:  Result<
      CommandResponse,
      ApiError
    >,
    delete:
      Result<DeleteOutcome, ApiError>,
    tasks:    Result<Vec<Task>, ApiError>,
    log: Result<Option<LogEntry>, ApiError>,
    complete: Result<(), ApiError>,
    calls:    RefCell<Vec<String>>
  }

  impl Default for FakeBackend {
    fn default() -> Self {
      Self {
        command:  Ok(
          CommandResponse::default()
        ),
        delete:   Ok(DeleteOutcome {
          accepted: true,
          response:
            CommandResponse::default()
        }),
        tasks:    Ok(vec![]),
        log:      Ok(None),
        complete: Ok(()),
        calls:    RefCell::new(vec![])
      }
    }
  }

  impl FakeBackend {
    fn record(&self, call: String) {
      self.calls.borrow_mut().push(call);
    }

    fn calls(&self) -> Vec<String> {
      self.calls.borrow().clone()
    }
  }

  impl TaskBackend for FakeBackend {
    async fn submit_command(
      &self,
      text: &str
    ) -> Result<CommandResponse, ApiError>
    {
      self.record(format!("act {text}"));
      self.command.clone()
    }

    async fn delete_task(
      &self,
      task_id: i64
    ) -> Result<DeleteOutcome, ApiError>
    {
      self.record(format!(
        "delete {task_id}"
      ));
      self.delete.clone()
    }

    async fn list_tasks(
      &self
    ) -> Result<Vec<Task>, ApiError> {
      self.record("tasks".to_string());
      self.tasks.clone()
    }

    async fn last_log(
      &self
    ) -> Result<Option<LogEntry>, ApiError>
    {
      self.record("logs".to_string());
      self.log.clone()
    }

    async fn complete_task(
      &self,
      task_id: i64
    ) -> Result<(), ApiError> {
      self.record(format!(
        "complete {task_id}"
      ));
      self.complete.clone()
    }
  }

  #[derive(Default)]
  struct RecordingView {
    sequencer:     RefCell<Sequencer>,
    tasks:         RefCell<Option<Vec<Task>>>,
    log:           RefCell<Option<LogView>>,
    input_cleared: Cell<bool>,
    alerts:
      RefCell<Vec<(String, AlertKind)>>
  }

  impl TaskView for RecordingView {
    fn issue(&self) -> Ticket {
      self.sequencer.borrow_mut().issue()
    }

    fn render_tasks(
      &self,
      ticket: Ticket,
      tasks: Vec<Task>
    ) {
      if self
        .sequencer
        .borrow_mut()
        .admit(ViewSlot::Tasks, ticket)
      {
        *self.tasks.borrow_mut() =
          Some(tasks);
      }
    }

    fn render_log(
      &self,
      ticket: Ticket,
      log: LogView
    ) {
      if self
        .sequencer
        .borrow_mut()
        .admit(ViewSlot::Log, ticket)
      {
        *self.log.borrow_mut() =
          Some(log);
      }
    }

    fn clear_input(&self) {
      self.input_cleared.set(true);
    }

    fn show_alert(
      &self,
      message: String,
      kind: AlertKind
    ) {
      self
        .alerts
        .borrow_mut()
        .push((message, kind));
    }
  }

  fn task(id: i64) -> Task {
    Task {
      id,
      title: format!("task {id}"),
      status: TaskStatus::Pending,
      ..Task::default()
    }
  }

  fn entry(
    event_type: &str,
    content: &str
  ) -> LogEntry {
    LogEntry {
      event_type: event_type
        .to_string(),
      content:    content.to_string()
    }
  }

  #[test]
  fn blank_command_sends_nothing() {
    let backend = FakeBackend::default();
    let view = RecordingView::default();

    block_on(send_command(
      &backend, &view, "   \t "
    ));

    assert!(backend.calls().is_empty());
    assert!(view.tasks.borrow().is_none());
    assert!(view.log.borrow().is_none());
    assert!(!view.input_cleared.get());
    assert!(view.alerts.borrow().is_empty());
  }

  #[test]
  fn alert_ids_are_distinct_per_call() {
    let ids = RefCell::new(0_u64);
    let first = next_alert_id(&ids);
    let second = next_alert_id(&ids);

    assert_ne!(first, second);
    assert_eq!(*ids.borrow(), second);
  }

  #[test]
  fn command_text_is_trimmed() {
    assert_eq!(
      command_text("  add milk  "),
      Some("add milk")
    );
    assert_eq!(command_text(""), None);
  }

  #[test]
  fn successful_command_replaces_views_and_clears_input(
  ) {
    let backend = FakeBackend {
      command: Ok(CommandResponse {
        tasks: vec![task(1), task(2)],
        log:   Some(entry(
          "create",
          "Added task 2"
        ))
      }),
      ..FakeBackend::default()
    };
    let view = RecordingView::default();

    block_on(send_command(
      &backend,
      &view,
      " remind me to study "
    ));

    assert_eq!(
      backend.calls(),
      vec!["act remind me to study"]
    );
    assert_eq!(
      view
        .tasks
        .borrow()
        .as_ref()
        .map(Vec::len),
      Some(2)
    );
    assert_eq!(
      view
        .log
        .borrow()
        .as_ref()
        .map(ToString::to_string)
        .as_deref(),
      Some("[create] Added task 2")
    );
    assert!(view.input_cleared.get());
  }

  #[test]
  fn rejected_command_keeps_tasks_and_shows_raw_body(
  ) {
    let backend = FakeBackend {
      command: Err(ApiError::Status {
        status: 500,
        body:   "Internal Server Error"
          .to_string()
      }),
      ..FakeBackend::default()
    };
    let view = RecordingView::default();

    block_on(send_command(
      &backend, &view, "do it"
    ));

    assert!(view.tasks.borrow().is_none());
    assert_eq!(
      *view.log.borrow(),
      Some(LogView::Message(
        "Error: Internal Server Error"
          .to_string()
      ))
    );
    assert!(!view.input_cleared.get());
    assert_eq!(
      view.alerts.borrow()[0].1,
      AlertKind::Error
    );
  }

  #[test]
  fn unreachable_backend_shows_generic_message(
  ) {
    let backend = FakeBackend {
      command: Err(ApiError::Network(
        "TypeError: Failed to fetch"
          .to_string()
      )),
      ..FakeBackend::default()
    };
    let view = RecordingView::default();

    block_on(send_command(
      &backend, &view, "list tasks"
    ));

    assert_eq!(
      *view.log.borrow(),
      Some(LogView::Message(
        UNREACHABLE_MESSAGE.to_string()
      ))
    );
    assert!(view.tasks.borrow().is_none());
  }

  #[test]
  fn delete_applies_response_and_alerts_success(
  ) {
    let backend = FakeBackend {
      delete: Ok(DeleteOutcome {
        accepted: true,
        response: CommandResponse {
          tasks: vec![],
          log:   Some(entry(
            "delete",
            "Task 5 removed"
          ))
        }
      }),
      ..FakeBackend::default()
    };
    let view = RecordingView::default();

    block_on(delete_task(
      &backend, &view, 5
    ));

    assert_eq!(
      backend.calls(),
      vec!["delete 5"]
    );
    assert_eq!(
      *view.tasks.borrow(),
      Some(vec![])
    );
    assert_eq!(
      view
        .log
        .borrow()
        .as_ref()
        .map(ToString::to_string)
        .as_deref(),
      Some("[delete] Task 5 removed")
    );
    assert_eq!(
      *view.alerts.borrow(),
      vec![(
        "Task 5 deleted".to_string(),
        AlertKind::Success
      )]
    );
  }

  #[test]
  fn delete_with_error_status_still_applies_decoded_body(
  ) {
    let backend = FakeBackend {
      delete: Ok(DeleteOutcome {
        accepted: false,
        response: CommandResponse {
          tasks: vec![task(5)],
          log:   Some(entry(
            "error",
            "Task 5 not found"
          ))
        }
      }),
      ..FakeBackend::default()
    };
    let view = RecordingView::default();

    block_on(delete_task(
      &backend, &view, 5
    ));

    assert_eq!(
      view
        .tasks
        .borrow()
        .as_ref()
        .map(Vec::len),
      Some(1)
    );
    assert_eq!(
      view.alerts.borrow()[0].1,
      AlertKind::Error
    );
  }

  #[test]
  fn rejected_delete_keeps_rendered_views(
  ) {
    let backend = FakeBackend {
      delete: Err(ApiError::Status {
        status: 404,
        body:
          "{\"detail\":\"Task 99 not found\"}"
            .to_string()
      }),
      ..FakeBackend::default()
    };
    let view = RecordingView::default();
    let earlier = view.issue();
    view.render_tasks(
      earlier,
      vec![task(1), task(2)]
    );
    view.render_log(
      earlier,
      LogView::Entry(entry(
        "create",
        "Added task 2"
      ))
    );

    block_on(delete_task(
      &backend, &view, 99
    ));

    assert_eq!(
      view
        .tasks
        .borrow()
        .as_ref()
        .map(Vec::len),
      Some(2)
    );
    assert_eq!(
      view
        .log
        .borrow()
        .as_ref()
        .map(ToString::to_string)
        .as_deref(),
      Some("[create] Added task 2")
    );
    assert_eq!(
      view.alerts.borrow()[0].1,
      AlertKind::Error
    );
  }

  #[test]
  fn unreadable_reply_is_not_reported_as_unreachable(
  ) {
    let backend = FakeBackend {
      command: Err(ApiError::Decode(
        "response body unreadable"
          .to_string()
      )),
      ..FakeBackend::default()
    };
    let view = RecordingView::default();

    block_on(send_command(
      &backend, &view, "list tasks"
    ));

    let shown = view
      .log
      .borrow()
      .as_ref()
      .map(ToString::to_string)
      .unwrap_or_default();
    assert!(shown.starts_with("Error: "));
    assert_ne!(shown, UNREACHABLE_MESSAGE);
  }

  #[test]
  fn failed_delete_leaves_views_untouched(
  ) {
    let backend = FakeBackend {
      delete: Err(ApiError::Network(
        "offline".to_string()
      )),
      ..FakeBackend::default()
    };
    let view = RecordingView::default();

    block_on(delete_task(
      &backend, &view, 3
    ));

    assert!(view.tasks.borrow().is_none());
    assert!(view.log.borrow().is_none());
    assert_eq!(
      view.alerts.borrow()[0].1,
      AlertKind::Error
    );
  }

  #[test]
  fn completion_not_found_skips_reload() {
    let backend = FakeBackend {
      complete: Err(ApiError::Status {
        status: 404,
        body:
          "{\"detail\":\"Task not found\"}"
            .to_string()
      }),
      ..FakeBackend::default()
    };
    let view = RecordingView::default();

    block_on(complete_task(
      &backend, &view, 7
    ));

    assert_eq!(
      backend.calls(),
      vec!["complete 7"]
    );
    assert!(view.tasks.borrow().is_none());
    assert_eq!(
      view.alerts.borrow().len(),
      1
    );
    assert_eq!(
      view.alerts.borrow()[0].1,
      AlertKind::Error
    );
  }

  #[test]
  fn completion_reloads_tasks_and_log() {
    let mut done = task(7);
    done.status = TaskStatus::Completed;
    let backend = FakeBackend {
      tasks: Ok(vec![done]),
      log: Ok(Some(entry(
        "complete",
        "Task 7 completed"
      ))),
      ..FakeBackend::default()
    };
    let view = RecordingView::default();

    block_on(complete_task(
      &backend, &view, 7
    ));

    let calls = backend.calls();
    assert_eq!(calls[0], "complete 7");
    assert!(
      calls.contains(&"tasks".to_string())
    );
    assert!(
      calls.contains(&"logs".to_string())
    );
    assert_eq!(
      view.tasks.borrow().as_ref().map(
        |tasks| tasks[0].status
      ),
      Some(TaskStatus::Completed)
    );
    assert_eq!(
      view.alerts.borrow()[0].1,
      AlertKind::Success
    );
  }

  #[test]
  fn initial_load_failures_are_independent(
  ) {
    let backend = FakeBackend {
      tasks: Err(ApiError::Network(
        "offline".to_string()
      )),
      log: Ok(Some(entry(
        "create",
        "Added A"
      ))),
      ..FakeBackend::default()
    };
    let view = RecordingView::default();

    block_on(refresh_views(
      &backend, &view
    ));

    assert!(view.tasks.borrow().is_none());
    assert_eq!(
      view
        .log
        .borrow()
        .as_ref()
        .map(ToString::to_string)
        .as_deref(),
      Some("[create] Added A")
    );
    assert_eq!(
      view.alerts.borrow().len(),
      1
    );
  }

  #[test]
  fn empty_log_list_renders_placeholder() {
    let backend = FakeBackend::default();
    let view = RecordingView::default();

    block_on(load_last_log(
      &backend, &view
    ));

    assert_eq!(
      *view.log.borrow(),
      Some(LogView::Empty)
    );
  }

  #[test]
  fn stale_load_does_not_overwrite_newer_command(
  ) {
    let view = RecordingView::default();
    let load_ticket = view.issue();
    let command_ticket = view.issue();

    view.render_tasks(
      command_ticket,
      vec![task(1), task(2)]
    );
    view.render_tasks(load_ticket, vec![]);

    assert_eq!(
      view
        .tasks
        .borrow()
        .as_ref()
        .map(Vec::len),
      Some(2)
    );
  }
}
