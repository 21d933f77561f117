use yew::{
  Html,
  Properties,
  function_component,
  html
};

use crate::app::LogView;

#[derive(Properties, PartialEq)]
pub struct LogPanelProps {
  pub log: LogView
}

#[function_component(LogPanel)]
pub fn log_panel(
  props: &LogPanelProps
) -> Html {
  let class = match props.log {
    | LogView::Message(_) => {
      "log-line error"
    }
    | LogView::Empty => "log-line muted",
    | LogView::Entry(_) => "log-line"
  };

  html! {
      <div class="panel log">
          <div class="header">{ "Last activity" }</div>
          <div id="logOutput" class={class}>{ props.log.to_string() }</div>
      </div>
  }
}
