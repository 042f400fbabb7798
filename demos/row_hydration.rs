/// row hydration - persisted rows to live obligations and back
use payables_core::chrono::NaiveDate;
use payables_core::obligations::{ObligationRow, PaymentRow};
use payables_core::{Money, PaymentRecord, ProjectionLimits};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== row hydration example ===\n");

    // rows as the persistence layer hands them over, gaps included
    let obligation_json = r#"{
        "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
        "creditor": "Ferreteria Centro",
        "principal": "200000.00",
        "periodic_rate": "0.01",
        "term_periods": 8,
        "start_date": "2024-03-01"
    }"#;
    let payment_json = r#"{
        "paid_on": "2024-04-01",
        "amount_paid": "27000.00",
        "interest_portion": "2000.00",
        "principal_portion": "25000.00",
        "balance_after": "175000.00"
    }"#;

    let row = ObligationRow::from_json(obligation_json)?;
    let payment = PaymentRow::from_json(payment_json)?;
    let mut obligation = row.into_obligation(vec![payment])?;

    println!(
        "hydrated {} owing {}",
        obligation.creditor,
        obligation.outstanding()
    );

    let limits = ProjectionLimits::default();

    println!("\nstage 1: straight after hydration");
    println!("---------------------------------");
    println!(
        "{}\n",
        serde_json::to_string_pretty(&obligation.summary(&limits)?)?
    );

    // another installment lands
    obligation.record_payment(PaymentRecord {
        paid_on: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        amount_paid: Money::from_major(26_750),
        interest_portion: Money::from_major(1_750),
        principal_portion: Money::from_major(25_000),
        balance_after: Money::from_major(150_000),
    });

    println!("stage 2: after the may installment");
    println!("----------------------------------");
    println!(
        "{}\n",
        serde_json::to_string_pretty(&obligation.summary(&limits)?)?
    );

    // back to rows for persistence
    let stored = ObligationRow::from_obligation(&obligation);
    let stored_payments: Vec<PaymentRow> = obligation
        .payments()
        .iter()
        .map(|p| PaymentRow::from_record(obligation.id, p))
        .collect();

    println!("stage 3: rows going back to storage");
    println!("-----------------------------------");
    println!("{}", serde_json::to_string_pretty(&stored)?);
    println!("{}", serde_json::to_string_pretty(&stored_payments)?);

    Ok(())
}
