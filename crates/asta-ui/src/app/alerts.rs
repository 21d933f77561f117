use std::rc::Rc;

use yew::Reducible;

/// How long a banner stays up.
/// Each alert runs its own timer.
pub const ALERT_VISIBLE_MS: u32 = 3_000;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum AlertKind {
  Success,
  Error
}

impl AlertKind {
  pub fn css_class(
    self
  ) -> &'static str {
    match self {
      | AlertKind::Success => {
        "alert success"
      }
      | AlertKind::Error => {
        "alert error"
      }
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
  pub id:      u64,
  pub message: String,
  pub kind:    AlertKind
}

#[derive(Debug, Clone)]
pub enum AlertAction {
  Show(Alert),
  Expire(u64)
}

#[derive(
  Debug, Clone, PartialEq, Default,
)]
pub struct AlertStack {
  pub alerts: Vec<Alert>
}

impl AlertStack {
  fn apply(
    &mut self,
    action: AlertAction
  ) {
    match action {
      | AlertAction::Show(alert) => {
        self.alerts.push(alert)
      }
      | AlertAction::Expire(id) => {
        self
          .alerts
          .retain(|alert| alert.id != id)
      }
    }
  }
}

impl Reducible for AlertStack {
  type Action = AlertAction;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    let mut next = (*self).clone();
    next.apply(action);
    Rc::new(next)
  }
}
