use yew::{
  Html,
  Properties,
  function_component,
  html
};

use crate::app::Alert;

#[derive(Properties, PartialEq)]
pub struct AlertBannersProps {
  pub alerts: Vec<Alert>
}

#[function_component(AlertBanners)]
pub fn alert_banners(
  props: &AlertBannersProps
) -> Html {
  html! {
      <div class="alerts">
          {
              for props.alerts.iter().map(|alert| html! {
                  <div key={alert.id.to_string()} class={alert.kind.css_class()} role="alert">
                      { &alert.message }
                  </div>
              })
          }
      </div>
  }
}
