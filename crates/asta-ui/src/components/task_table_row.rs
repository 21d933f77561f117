use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::StatusBadge;
use crate::app::TaskRowView;

#[derive(Properties, PartialEq)]
pub struct TaskTableRowProps {
  pub row:         TaskRowView,
  pub on_complete: Callback<i64>,
  pub on_delete:   Callback<i64>
}

#[function_component(TaskTableRow)]
pub fn task_table_row(
  props: &TaskTableRowProps
) -> Html {
  let task_id = props.row.id;

  html! {
      <tr class="task-row">
          <td>{ task_id.to_string() }</td>
          <td>
              <div>{ &props.row.title }</div>
              {
                  if let Some(description) = &props.row.description {
                      html! { <div class="task-subtitle">{ description }</div> }
                  } else {
                      html! {}
                  }
              }
          </td>
          <td>{ &props.row.due_label }</td>
          <td><StatusBadge status={props.row.status} /></td>
          <td class="actions">
              {
                  if props.row.can_complete {
                      html! { <button class="btn ok" onclick={{
                          let on_complete = props.on_complete.clone();
                          Callback::from(move |_| on_complete.emit(task_id))
                      }}>{ "Complete" }</button> }
                  } else {
                      html! {}
                  }
              }
              <button class="btn danger" onclick={{
                  let on_delete = props.on_delete.clone();
                  Callback::from(move |_| on_delete.emit(task_id))
              }}>{ "Delete" }</button>
          </td>
      </tr>
  }
}
