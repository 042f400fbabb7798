pub mod engine;

pub use engine::{compute_schedule, reference_installment};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{PayablesError, Result};

/// original contract terms of an obligation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    /// per-period fraction, e.g. 0.02 for 2% per period
    pub periodic_rate: Rate,
    pub term_periods: u32,
    pub start_date: NaiveDate,
}

impl LoanTerms {
    pub fn new(
        principal: Money,
        periodic_rate: Rate,
        term_periods: u32,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            principal,
            periodic_rate,
            term_periods,
            start_date,
        }
    }

    /// check terms before scheduling; the engine itself accepts anything
    /// and degrades to an empty or truncated schedule on bad input
    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_positive() {
            return Err(PayablesError::InvalidPrincipal {
                amount: self.principal,
            });
        }

        if self.term_periods == 0 {
            return Err(PayablesError::InvalidTerm {
                periods: self.term_periods,
            });
        }

        if self.periodic_rate.is_negative() {
            return Err(PayablesError::InvalidRate {
                rate: self.periodic_rate,
            });
        }

        Ok(())
    }
}

/// bounds on forward projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionLimits {
    /// projection stops once the balance is at or below this amount; anything
    /// left under it is folded into the final installment
    pub residual_cutoff: Money,
    /// hard ceiling on projected rows, guards against non-converging histories
    pub max_periods: u32,
}

impl Default for ProjectionLimits {
    fn default() -> Self {
        Self {
            residual_cutoff: Money::from_major(100),
            max_periods: 360,
        }
    }
}
