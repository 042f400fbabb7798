use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::ObligationId;

/// events emitted while mutating an obligation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    PaymentRecorded {
        obligation_id: ObligationId,
        paid_on: NaiveDate,
        amount: Money,
        balance_after: Money,
    },
    ObligationSettled {
        obligation_id: ObligationId,
        settled_on: NaiveDate,
    },
}

/// collects events during an operation; the caller drains them afterwards
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    /// hand the collected events to the caller, leaving the log empty
    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
