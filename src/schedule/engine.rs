use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::decimal::{Money, Rate};
use crate::schedule::{LoanTerms, ProjectionLimits};
use crate::types::{PaymentRecord, ScheduleRow};

/// compounding factor past which (1 + r)^n / ((1 + r)^n - 1) is 1 at cent
/// precision; the installment saturates to interest-only there
const ANNUITY_SATURATION: Decimal = dec!(10000000000000000);

/// magnitude bound on projected balances and per-row interest; projection
/// stops past it so the row arithmetic stays inside Decimal
const RUNAWAY_BALANCE: Decimal = dec!(100000000000000000000);

/// build the full schedule for an obligation: one actual row per recorded
/// payment, then projected rows until payoff or the projection ceiling
pub fn compute_schedule(
    terms: &LoanTerms,
    payments: &[PaymentRecord],
    limits: &ProjectionLimits,
) -> Vec<ScheduleRow> {
    let mut rows: Vec<ScheduleRow> = Vec::new();

    // recorded payments replay first; their stored balances are authoritative
    // even when they disagree with what the terms would predict
    let mut history = payments.to_vec();
    history.sort_by_key(|p| p.paid_on);

    let mut balance = terms.principal;
    let mut anchor = terms.start_date;

    for payment in &history {
        rows.push(ScheduleRow {
            period: rows.len() as u32 + 1,
            date: payment.paid_on,
            installment: payment.amount_paid,
            interest: payment.interest_portion,
            principal: payment.principal_portion,
            balance: payment.balance_after,
            is_actual: true,
        });

        balance = payment.balance_after;
        anchor = payment.paid_on;
    }

    // the reference installment always comes from the original terms, not the
    // remaining balance, so a history off the contract curve shows up as a
    // shorter or longer tail instead of a repriced installment
    let reference =
        reference_installment(terms.principal, terms.periodic_rate, terms.term_periods);
    let rate = terms.periodic_rate.as_decimal();

    let mut period = rows.len() as u32;
    let mut months_out = 0;
    let mut projected = 0;

    while balance > limits.residual_cutoff
        && projected < limits.max_periods
        && balance.as_decimal() < RUNAWAY_BALANCE
    {
        // interest past the runaway band never amortizes; stop projecting
        let interest = match balance.as_decimal().checked_mul(rate) {
            Some(v) if v.abs() < RUNAWAY_BALANCE => Money::from_decimal(v),
            _ => break,
        };

        period += 1;
        months_out += 1;
        projected += 1;

        let due = balance + interest;

        // the closing installment shrinks to whatever debt is left
        let mut installment = due.min(reference);
        let mut principal = installment - interest;
        let mut ending_balance = (balance - principal).max(Money::ZERO);

        // cent rounding can strand a residue below the cutoff on the natural
        // last row; fold it in so the schedule lands on zero
        if ending_balance.is_positive() && ending_balance <= limits.residual_cutoff {
            installment += ending_balance;
            principal += ending_balance;
            ending_balance = Money::ZERO;
        }

        rows.push(ScheduleRow {
            period,
            date: due_date(anchor, months_out),
            installment,
            interest,
            principal,
            balance: ending_balance,
            is_actual: false,
        });

        balance = ending_balance;
    }

    rows
}

/// fixed installment for a fully amortizing loan over the original terms
///
/// installment = P * r * (1 + r)^n / ((1 + r)^n - 1)
///
/// never panics: where the annuity arithmetic would leave Decimal's range the
/// result saturates to interest-only P * r, or to the largest representable
/// amount when even that overflows
pub fn reference_installment(principal: Money, periodic_rate: Rate, term_periods: u32) -> Money {
    if term_periods == 0 {
        return principal;
    }

    let r = periodic_rate.as_decimal();

    // zero and negative rates amortize straight-line
    if r <= Decimal::ZERO {
        return principal / Decimal::from(term_periods);
    }

    let interest_only = match principal.as_decimal().checked_mul(r) {
        Some(v) => v,
        None => return Money::from_decimal(Decimal::MAX),
    };

    let base = match Decimal::ONE.checked_add(r) {
        Some(b) => b,
        None => return Money::from_decimal(interest_only),
    };

    let mut compound = Decimal::ONE;
    for _ in 0..term_periods {
        compound = match compound.checked_mul(base) {
            Some(c) if c <= ANNUITY_SATURATION => c,
            _ => return Money::from_decimal(interest_only),
        };
    }

    // compound is capped and strictly above one, so the factor stays in range
    let factor = compound / (compound - Decimal::ONE);

    match interest_only.checked_mul(factor) {
        Some(installment) => Money::from_decimal(installment),
        None => Money::from_decimal(Decimal::MAX),
    }
}

/// due date for the k-th projected period: day-of-month anchored, clamped to
/// shorter months, saturating at chrono's ceiling
fn due_date(anchor: NaiveDate, months_out: u32) -> NaiveDate {
    anchor
        .checked_add_months(Months::new(months_out))
        .unwrap_or(NaiveDate::MAX)
}
