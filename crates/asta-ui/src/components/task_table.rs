use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TaskTableRow;
use crate::app::{
  EMPTY_TASKS_MESSAGE,
  TaskTableBody
};

#[derive(Properties, PartialEq)]
pub struct TaskTableProps {
  pub body:        TaskTableBody,
  pub on_complete: Callback<i64>,
  pub on_delete:   Callback<i64>
}

#[function_component(TaskTable)]
pub fn task_table(
  props: &TaskTableProps
) -> Html {
  let rows = match &props.body {
    | TaskTableBody::Placeholder => {
      html! {
          <tr>
              <td colspan="5" class="empty">{ EMPTY_TASKS_MESSAGE }</td>
          </tr>
      }
    }
    | TaskTableBody::Rows(rows) => rows
      .iter()
      .cloned()
      .map(|row| {
        let key = row.id.to_string();
        html! {
            <TaskTableRow
                key={key}
                row={row}
                on_complete={props.on_complete.clone()}
                on_delete={props.on_delete.clone()}
            />
        }
      })
      .collect::<Html>()
  };

  html! {
      <div class="panel tasks">
          <div class="header">{ "Tasks" }</div>
          <table id="tasksTable" class="task-table">
              <thead>
                  <tr>
                      <th>{ "ID" }</th>
                      <th>{ "Title" }</th>
                      <th>{ "Due" }</th>
                      <th>{ "Status" }</th>
                      <th>{ "Actions" }</th>
                  </tr>
              </thead>
              <tbody>{ rows }</tbody>
          </table>
      </div>
  }
}
