use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::Result;
use crate::obligations::Obligation;
use crate::schedule::ProjectionLimits;
use crate::types::{ObligationId, ObligationStatus};

/// conditions the payables dashboard surfaces per obligation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Alert {
    PaymentDueSoon {
        obligation_id: ObligationId,
        due_date: NaiveDate,
        amount: Money,
        days_until: i64,
    },
    PaymentOverdue {
        obligation_id: ObligationId,
        due_date: NaiveDate,
        amount: Money,
        days_overdue: i64,
    },
    /// the projection hit its period ceiling with debt remaining; the terms
    /// or the recorded balances need a second look
    ProjectionTruncated {
        obligation_id: ObligationId,
        periods: u32,
        remaining_balance: Money,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertConfig {
    /// how many days ahead an upcoming installment counts as due soon
    pub due_soon_days: i64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self { due_soon_days: 7 }
    }
}

/// evaluate alert conditions for one obligation against the injected clock
///
/// settled obligations never alert. the due-date alerts look at the first
/// projected installment; a payment due today counts as due soon.
pub fn evaluate(
    obligation: &Obligation,
    limits: &ProjectionLimits,
    config: &AlertConfig,
    time: &SafeTimeProvider,
) -> Result<Vec<Alert>> {
    if obligation.status == ObligationStatus::Settled {
        return Ok(Vec::new());
    }

    let rows = obligation.schedule(limits)?;
    let today = time.now().date_naive();
    let mut alerts = Vec::new();

    if let Some(next) = rows.iter().find(|r| !r.is_actual) {
        let days_until = (next.date - today).num_days();

        if days_until < 0 {
            alerts.push(Alert::PaymentOverdue {
                obligation_id: obligation.id,
                due_date: next.date,
                amount: next.installment,
                days_overdue: -days_until,
            });
        } else if days_until <= config.due_soon_days {
            alerts.push(Alert::PaymentDueSoon {
                obligation_id: obligation.id,
                due_date: next.date,
                amount: next.installment,
                days_until,
            });
        }
    }

    if let Some(last) = rows.last() {
        if !last.is_actual && !last.balance.is_zero() {
            alerts.push(Alert::ProjectionTruncated {
                obligation_id: obligation.id,
                periods: last.period,
                remaining_balance: last.balance,
            });
        }
    }

    Ok(alerts)
}
