use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;

/// unique identifier for an obligation
pub type ObligationId = Uuid;

/// obligation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObligationStatus {
    /// payments outstanding
    Active,
    /// fully paid off
    Settled,
}

/// a payment already made against an obligation
///
/// `balance_after` is authoritative: the schedule engine replays it verbatim
/// instead of recomputing it, so correction history from the source system
/// survives even when it does not sit on the theoretical amortization curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub paid_on: NaiveDate,
    pub amount_paid: Money,
    pub interest_portion: Money,
    pub principal_portion: Money,
    pub balance_after: Money,
}

/// one row of an amortization schedule
///
/// Rows derived from recorded payments carry `is_actual = true`; forecast rows
/// carry `is_actual = false`. `period` numbers the full sequence 1..N without
/// restarting between the two kinds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub period: u32,
    pub date: NaiveDate,
    pub installment: Money,
    pub interest: Money,
    pub principal: Money,
    pub balance: Money,
    pub is_actual: bool,
}
