pub mod rows;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

pub use rows::{ObligationRow, PaymentRow};

use crate::decimal::{Money, Rate};
use crate::errors::{PayablesError, Result};
use crate::events::{Event, EventLog};
use crate::schedule::{compute_schedule, LoanTerms, ProjectionLimits};
use crate::types::{ObligationId, ObligationStatus, PaymentRecord, ScheduleRow};

/// one financed payable: the contract terms plus everything paid against them
#[derive(Debug, Clone)]
pub struct Obligation {
    pub id: ObligationId,
    pub creditor: String,
    pub terms: LoanTerms,
    pub status: ObligationStatus,
    pub events: EventLog,
    payments: Vec<PaymentRecord>,
}

impl Obligation {
    pub fn new(creditor: impl Into<String>, terms: LoanTerms) -> Self {
        Self {
            id: Uuid::new_v4(),
            creditor: creditor.into(),
            terms,
            status: ObligationStatus::Active,
            events: EventLog::new(),
            payments: Vec::new(),
        }
    }

    pub fn builder() -> ObligationBuilder {
        ObligationBuilder::new()
    }

    /// rehydrate a persisted obligation; no events are emitted for history
    pub fn restore(
        id: ObligationId,
        creditor: impl Into<String>,
        terms: LoanTerms,
        status: ObligationStatus,
        payments: Vec<PaymentRecord>,
    ) -> Self {
        Self {
            id,
            creditor: creditor.into(),
            terms,
            status,
            events: EventLog::new(),
            payments,
        }
    }

    pub fn payments(&self) -> &[PaymentRecord] {
        &self.payments
    }

    /// last authoritative balance, or the principal before any payment
    pub fn outstanding(&self) -> Money {
        self.latest_payment()
            .map(|p| p.balance_after)
            .unwrap_or(self.terms.principal)
    }

    /// record a payment against the obligation
    ///
    /// status follows the recorded balance: a payment that zeroes it settles
    /// the obligation, and a later correction with a positive balance reopens it
    pub fn record_payment(&mut self, payment: PaymentRecord) {
        // a backdated entry does not outrank the latest-dated record already
        // on file; on a shared date the newest wins
        let latest = match self.latest_payment().copied() {
            Some(prev) if prev.paid_on > payment.paid_on => prev,
            _ => payment,
        };

        self.payments.push(payment);
        self.events.emit(Event::PaymentRecorded {
            obligation_id: self.id,
            paid_on: payment.paid_on,
            amount: payment.amount_paid,
            balance_after: payment.balance_after,
        });
        info!(
            obligation_id = %self.id,
            paid_on = %payment.paid_on,
            amount = %payment.amount_paid,
            "payment recorded"
        );

        if latest.balance_after.is_zero() {
            if self.status != ObligationStatus::Settled {
                self.status = ObligationStatus::Settled;
                self.events.emit(Event::ObligationSettled {
                    obligation_id: self.id,
                    settled_on: latest.paid_on,
                });
                info!(obligation_id = %self.id, settled_on = %latest.paid_on, "obligation settled");
            }
        } else {
            self.status = ObligationStatus::Active;
        }
    }

    /// full schedule, actual rows then projection
    ///
    /// terms are validated here; the engine itself accepts anything
    pub fn schedule(&self, limits: &ProjectionLimits) -> Result<Vec<ScheduleRow>> {
        self.terms.validate()?;

        Ok(compute_schedule(&self.terms, &self.payments, limits))
    }

    /// reconciliation view over the schedule
    pub fn summary(&self, limits: &ProjectionLimits) -> Result<ObligationSummary> {
        let rows = self.schedule(limits)?;

        let mut payments_made = 0u32;
        let mut total_paid = Money::ZERO;
        let mut total_interest_paid = Money::ZERO;

        for row in rows.iter().filter(|r| r.is_actual) {
            payments_made += 1;
            total_paid += row.installment;
            total_interest_paid += row.interest;
        }

        let outstanding = self.outstanding();
        let closing = rows.last().filter(|r| !r.is_actual);

        let (fully_amortized, projected_payoff) = match closing {
            Some(row) if row.balance.is_zero() => (true, Some(row.date)),
            Some(row) => {
                warn!(
                    obligation_id = %self.id,
                    balance = %row.balance,
                    "projection truncated before payoff"
                );
                (false, None)
            }
            None if outstanding.is_zero() => (true, rows.last().map(|r| r.date)),
            None => (false, None),
        };

        Ok(ObligationSummary {
            payments_made,
            total_paid,
            total_interest_paid,
            outstanding,
            projected_payoff,
            fully_amortized,
        })
    }

    fn latest_payment(&self) -> Option<&PaymentRecord> {
        self.payments
            .iter()
            .enumerate()
            .max_by_key(|(i, p)| (p.paid_on, *i))
            .map(|(_, p)| p)
    }
}

/// what the payables screens need to render one obligation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObligationSummary {
    pub payments_made: u32,
    pub total_paid: Money,
    pub total_interest_paid: Money,
    pub outstanding: Money,
    /// date of the last projected installment, when the projection closes
    pub projected_payoff: Option<NaiveDate>,
    /// false when the projection hit the period ceiling with debt remaining
    pub fully_amortized: bool,
}

/// assembles an [`Obligation`], validating the terms on build
#[derive(Debug, Default)]
pub struct ObligationBuilder {
    id: Option<ObligationId>,
    creditor: Option<String>,
    principal: Option<Money>,
    periodic_rate: Option<Rate>,
    term_periods: Option<u32>,
    start_date: Option<NaiveDate>,
}

impl ObligationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: ObligationId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn creditor(mut self, creditor: impl Into<String>) -> Self {
        self.creditor = Some(creditor.into());
        self
    }

    pub fn principal(mut self, principal: Money) -> Self {
        self.principal = Some(principal);
        self
    }

    /// omitting the rate means interest-free financing
    pub fn periodic_rate(mut self, rate: Rate) -> Self {
        self.periodic_rate = Some(rate);
        self
    }

    pub fn term_periods(mut self, periods: u32) -> Self {
        self.term_periods = Some(periods);
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn build(self) -> Result<Obligation> {
        let creditor = self
            .creditor
            .ok_or(PayablesError::MissingField { field: "creditor" })?;
        let principal = self
            .principal
            .ok_or(PayablesError::MissingField { field: "principal" })?;
        let term_periods = self.term_periods.ok_or(PayablesError::MissingField {
            field: "term_periods",
        })?;
        let start_date = self.start_date.ok_or(PayablesError::MissingField {
            field: "start_date",
        })?;

        let terms = LoanTerms::new(
            principal,
            self.periodic_rate.unwrap_or(Rate::ZERO),
            term_periods,
            start_date,
        );
        terms.validate()?;

        let mut obligation = Obligation::new(creditor, terms);
        if let Some(id) = self.id {
            obligation.id = id;
        }

        Ok(obligation)
    }
}
