use asta_shared::TaskStatus;
use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct StatusBadgeProps {
  pub status: TaskStatus
}

#[function_component(StatusBadge)]
pub fn status_badge(
  props: &StatusBadgeProps
) -> Html {
  let key = props.status.as_key();
  html! {
      <span class={format!("badge status-{key}")}>{ key }</span>
  }
}
