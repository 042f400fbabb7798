use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{PayablesError, Result};
use crate::obligations::Obligation;
use crate::schedule::LoanTerms;
use crate::types::{ObligationId, ObligationStatus, PaymentRecord};

/// persisted shape of an obligation row
///
/// every column is optional because stored rows accumulate gaps over time.
/// hydration defaults missing numbers to zero and missing text to empty, but
/// refuses rows without an id or a start date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObligationRow {
    pub id: Option<ObligationId>,
    pub creditor: Option<String>,
    pub principal: Option<Money>,
    pub periodic_rate: Option<Rate>,
    pub term_periods: Option<u32>,
    pub start_date: Option<NaiveDate>,
    pub status: Option<ObligationStatus>,
}

impl ObligationRow {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_obligation(obligation: &Obligation) -> Self {
        Self {
            id: Some(obligation.id),
            creditor: Some(obligation.creditor.clone()),
            principal: Some(obligation.terms.principal),
            periodic_rate: Some(obligation.terms.periodic_rate),
            term_periods: Some(obligation.terms.term_periods),
            start_date: Some(obligation.terms.start_date),
            status: Some(obligation.status),
        }
    }

    /// hydrate the obligation this row and its payment rows describe
    pub fn into_obligation(self, payments: Vec<PaymentRow>) -> Result<Obligation> {
        let id = self.id.ok_or(PayablesError::MissingField { field: "id" })?;
        let start_date = self.start_date.ok_or(PayablesError::MissingField {
            field: "start_date",
        })?;

        let terms = LoanTerms::new(
            self.principal.unwrap_or(Money::ZERO),
            self.periodic_rate.unwrap_or(Rate::ZERO),
            self.term_periods.unwrap_or(0),
            start_date,
        );

        let payments = payments
            .into_iter()
            .map(PaymentRow::into_record)
            .collect::<Result<Vec<_>>>()?;

        Ok(Obligation::restore(
            id,
            self.creditor.unwrap_or_default(),
            terms,
            self.status.unwrap_or(ObligationStatus::Active),
            payments,
        ))
    }
}

/// persisted shape of one payment row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRow {
    pub obligation_id: Option<ObligationId>,
    pub paid_on: Option<NaiveDate>,
    pub amount_paid: Option<Money>,
    pub interest_portion: Option<Money>,
    pub principal_portion: Option<Money>,
    pub balance_after: Option<Money>,
}

impl PaymentRow {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_record(obligation_id: ObligationId, record: &PaymentRecord) -> Self {
        Self {
            obligation_id: Some(obligation_id),
            paid_on: Some(record.paid_on),
            amount_paid: Some(record.amount_paid),
            interest_portion: Some(record.interest_portion),
            principal_portion: Some(record.principal_portion),
            balance_after: Some(record.balance_after),
        }
    }

    /// missing amounts default to zero; a row without a date cannot be
    /// replayed, so that one is an error
    pub fn into_record(self) -> Result<PaymentRecord> {
        let paid_on = self
            .paid_on
            .ok_or(PayablesError::MissingField { field: "paid_on" })?;

        Ok(PaymentRecord {
            paid_on,
            amount_paid: self.amount_paid.unwrap_or(Money::ZERO),
            interest_portion: self.interest_portion.unwrap_or(Money::ZERO),
            principal_portion: self.principal_portion.unwrap_or(Money::ZERO),
            balance_after: self.balance_after.unwrap_or(Money::ZERO),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::schedule::ProjectionLimits;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    const ROW_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    #[test]
    fn test_payment_row_defaults_missing_amounts_to_zero() {
        let json = r#"{"paid_on": "2024-02-15", "amount_paid": "60000.00"}"#;

        let record = PaymentRow::from_json(json).unwrap().into_record().unwrap();

        assert_eq!(record.paid_on, NaiveDate::from_ymd_opt(2024, 2, 15).unwrap());
        assert_eq!(record.amount_paid, Money::from_major(60_000));
        assert_eq!(record.interest_portion, Money::ZERO);
        assert_eq!(record.principal_portion, Money::ZERO);
        assert_eq!(record.balance_after, Money::ZERO);
    }

    #[test]
    fn test_payment_row_requires_a_date() {
        let json = r#"{"amount_paid": "10.00"}"#;

        let err = PaymentRow::from_json(json).unwrap().into_record().unwrap_err();

        assert!(matches!(err, PayablesError::MissingField { field: "paid_on" }));
    }

    #[test]
    fn test_obligation_row_requires_identity_and_date() {
        let no_id = r#"{"creditor": "Electro Sur", "start_date": "2024-01-15"}"#;
        let err = ObligationRow::from_json(no_id)
            .unwrap()
            .into_obligation(Vec::new())
            .unwrap_err();
        assert!(matches!(err, PayablesError::MissingField { field: "id" }));

        let no_date = format!(r#"{{"id": "{}", "creditor": "Electro Sur"}}"#, ROW_ID);
        let err = ObligationRow::from_json(&no_date)
            .unwrap()
            .into_obligation(Vec::new())
            .unwrap_err();
        assert!(matches!(
            err,
            PayablesError::MissingField { field: "start_date" }
        ));
    }

    #[test]
    fn test_obligation_row_hydrates_with_payments() {
        let row_json = format!(
            r#"{{
                "id": "{}",
                "creditor": "Suministros del Norte",
                "principal": "500000.00",
                "periodic_rate": "0.02",
                "term_periods": 10,
                "start_date": "2024-01-15",
                "status": "Active"
            }}"#,
            ROW_ID
        );
        let payment_json = r#"{
            "paid_on": "2024-02-15",
            "amount_paid": "60000.00",
            "interest_portion": "10000.00",
            "principal_portion": "50000.00",
            "balance_after": "440000.00"
        }"#;

        let row = ObligationRow::from_json(&row_json).unwrap();
        let payment = PaymentRow::from_json(payment_json).unwrap();
        let obligation = row.into_obligation(vec![payment]).unwrap();

        assert_eq!(obligation.id, Uuid::parse_str(ROW_ID).unwrap());
        assert_eq!(obligation.creditor, "Suministros del Norte");
        assert_eq!(obligation.terms.principal, Money::from_major(500_000));
        assert_eq!(obligation.terms.term_periods, 10);
        assert_eq!(obligation.outstanding(), Money::from_major(440_000));

        // hydrated data feeds straight into scheduling
        let rows = obligation.schedule(&ProjectionLimits::default()).unwrap();
        assert!(rows[0].is_actual);
        assert!(rows.len() > 1);
    }

    #[test]
    fn test_missing_text_defaults_to_empty() {
        let json = format!(
            r#"{{"id": "{}", "principal": "1000.00", "term_periods": 2, "start_date": "2024-01-15"}}"#,
            ROW_ID
        );

        let obligation = ObligationRow::from_json(&json)
            .unwrap()
            .into_obligation(Vec::new())
            .unwrap();

        assert_eq!(obligation.creditor, "");
        assert_eq!(obligation.status, ObligationStatus::Active);
        assert_eq!(obligation.terms.periodic_rate, Rate::ZERO);
    }

    #[test]
    fn test_malformed_payload_is_a_decode_error() {
        let err = ObligationRow::from_json("{ not json").unwrap_err();

        assert!(matches!(err, PayablesError::RowDecode { .. }));
    }

    #[test]
    fn test_persisted_obligation_survives_rehydration() {
        let mut original = Obligation::builder()
            .creditor("Ferreteria Centro")
            .principal(Money::from_major(200_000))
            .periodic_rate(Rate::from_decimal(dec!(0.01)))
            .term_periods(8)
            .start_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
            .build()
            .unwrap();
        original.record_payment(PaymentRecord {
            paid_on: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            amount_paid: Money::from_major(27_000),
            interest_portion: Money::from_major(2_000),
            principal_portion: Money::from_major(25_000),
            balance_after: Money::from_major(175_000),
        });

        let row_json = serde_json::to_string(&ObligationRow::from_obligation(&original)).unwrap();
        let payment_rows: Vec<String> = original
            .payments()
            .iter()
            .map(|p| serde_json::to_string(&PaymentRow::from_record(original.id, p)).unwrap())
            .collect();

        let row = ObligationRow::from_json(&row_json).unwrap();
        let payments = payment_rows
            .iter()
            .map(|json| PaymentRow::from_json(json).unwrap())
            .collect();
        let restored = row.into_obligation(payments).unwrap();

        assert_eq!(restored.id, original.id);
        assert_eq!(restored.creditor, original.creditor);
        assert_eq!(restored.terms, original.terms);
        assert_eq!(restored.status, original.status);
        assert_eq!(restored.outstanding(), Money::from_major(175_000));
    }
}
