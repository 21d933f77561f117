use web_sys::{
  HtmlInputElement,
  InputEvent,
  KeyboardEvent,
  MouseEvent
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct CommandBarProps {
  pub value:     String,
  pub on_input:  Callback<String>,
  pub on_submit: Callback<()>
}

/// Free-text command input. Clicking
/// "Send" and pressing Enter submit the
/// same way.
#[function_component(CommandBar)]
pub fn command_bar(
  props: &CommandBarProps
) -> Html {
  let oninput = {
    let on_input =
      props.on_input.clone();
    Callback::from(
      move |e: InputEvent| {
        let input: HtmlInputElement =
          e.target_unchecked_into();
        on_input.emit(input.value());
      }
    )
  };

  let onkeypress = {
    let on_submit =
      props.on_submit.clone();
    Callback::from(
      move |e: KeyboardEvent| {
        if e.key() == "Enter" {
          on_submit.emit(());
        }
      }
    )
  };

  let onclick = {
    let on_submit =
      props.on_submit.clone();
    Callback::from(move |_: MouseEvent| {
      on_submit.emit(());
    })
  };

  html! {
      <div class="panel command-bar">
          <input
              id="userInput"
              type="text"
              placeholder="e.g. remind me tomorrow at 5 pm to study math"
              value={props.value.clone()}
              {oninput}
              {onkeypress}
          />
          <button id="sendBtn" class="btn primary" {onclick}>{ "Send" }</button>
      </div>
  }
}
