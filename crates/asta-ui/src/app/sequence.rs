/// Order stamp taken when a request
/// is issued.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
)]
pub struct Ticket(u64);

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum ViewSlot {
  Tasks,
  Log
}

/// Hands out monotonically increasing
/// tickets and remembers, per view, the
/// newest ticket already applied. A
/// response whose ticket is older than
/// that is stale and must be dropped.
#[derive(Debug, Default)]
pub struct Sequencer {
  issued:        u64,
  tasks_applied: u64,
  log_applied:   u64
}

impl Sequencer {
  pub fn issue(&mut self) -> Ticket {
    self.issued =
      self.issued.saturating_add(1);
    Ticket(self.issued)
  }

  pub fn admit(
    &mut self,
    slot: ViewSlot,
    ticket: Ticket
  ) -> bool {
    let applied = match slot {
      | ViewSlot::Tasks => {
        &mut self.tasks_applied
      }
      | ViewSlot::Log => {
        &mut self.log_applied
      }
    };

    if ticket.0 < *applied {
      tracing::debug!(
        ?slot,
        ticket = ticket.0,
        applied = *applied,
        "dropping stale response"
      );
      return false;
    }
    *applied = ticket.0;
    true
  }
}
