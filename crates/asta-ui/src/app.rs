mod alerts;
mod controller;
mod due_date;
mod sequence;
mod storage;
mod views;

use asta_shared::Task;
use gloo::console::debug;
use yew::{
  Callback,
  Html,
  function_component,
  html,
  use_effect_with,
  use_mut_ref,
  use_reducer,
  use_state
};

pub use self::alerts::Alert;
use self::alerts::AlertStack;
use self::controller::ViewBinding;
use self::sequence::Sequencer;
pub use self::views::{
  EMPTY_TASKS_MESSAGE,
  LogView,
  TaskRowView,
  TaskTableBody
};
use crate::api::BackendClient;
use crate::components::{
  AlertBanners,
  CommandBar,
  LogPanel,
  TaskTable
};

#[function_component(App)]
pub fn app() -> Html {
  let config = use_state(
    storage::load_backend_config
  );
  let locale =
    use_state(due_date::browser_locale);
  let tasks =
    use_state(Vec::<Task>::new);
  let log = use_state(|| LogView::Empty);
  let input = use_state(String::new);
  let alerts =
    use_reducer(AlertStack::default);
  let sequencer =
    use_mut_ref(Sequencer::default);
  let alert_ids =
    use_mut_ref(|| 0_u64);

  let client =
    BackendClient::new((*config).clone());
  let view = ViewBinding {
    tasks: tasks.clone(),
    log: log.clone(),
    input: input.clone(),
    alerts: alerts.clone(),
    sequencer,
    alert_ids
  };

  {
    let client = client.clone();
    let view = view.clone();
    use_effect_with((), move |_| {
      ui_event(
        "app.mounted",
        "loading tasks and last log"
      );
      wasm_bindgen_futures::spawn_local(
        async move {
          controller::refresh_views(
            &client, &view
          )
          .await;
        }
      );
      || ()
    });
  }

  let on_input = {
    let input = input.clone();
    Callback::from(
      move |value: String| {
        input.set(value);
      }
    )
  };

  let on_submit = {
    let client = client.clone();
    let view = view.clone();
    let input = input.clone();
    Callback::from(move |_: ()| {
      let client = client.clone();
      let view = view.clone();
      let raw = (*input).clone();
      ui_event(
        "action.command.submit",
        &format!("len={}", raw.len())
      );
      wasm_bindgen_futures::spawn_local(
        async move {
          controller::send_command(
            &client, &view, &raw
          )
          .await;
        }
      );
    })
  };

  let on_complete = {
    let client = client.clone();
    let view = view.clone();
    Callback::from(move |task_id: i64| {
      let client = client.clone();
      let view = view.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          controller::complete_task(
            &client, &view, task_id
          )
          .await;
        }
      );
    })
  };

  let on_delete = {
    let client = client.clone();
    let view = view.clone();
    Callback::from(move |task_id: i64| {
      let client = client.clone();
      let view = view.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          controller::delete_task(
            &client, &view, task_id
          )
          .await;
        }
      );
    })
  };

  let body =
    views::task_table_body(&tasks, *locale);

  html! {
      <div class="shell">
          <header class="topbar">
              <h1>{ "ASTA" }</h1>
              <span class="subtitle">{ format!("user {} · {}", config.user_id, config.base_url) }</span>
          </header>
          <AlertBanners alerts={alerts.alerts.clone()} />
          <CommandBar
              value={(*input).clone()}
              on_input={on_input}
              on_submit={on_submit}
          />
          <TaskTable
              body={body}
              on_complete={on_complete}
              on_delete={on_delete}
          />
          <LogPanel log={(*log).clone()} />
      </div>
  }
}

/// Mirrors a UI event to the tracing
/// subscriber and the browser console.
fn ui_event(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    target: "asta_ui::events",
    event,
    detail
  );
  debug!(format!("{event} ({detail})"));
}
