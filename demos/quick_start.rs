/// quick start - code a supplier, finance a purchase, read the schedule
use payables_core::chrono::NaiveDate;
use payables_core::codes::{CodeAllocator, CodeSeries, InMemoryCodeStore};
use payables_core::{Money, Obligation, PaymentRecord, ProjectionLimits, Rate};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // assign the supplier its account code
    let mut store = InMemoryCodeStore::new();
    let allocator = CodeAllocator::new(CodeSeries::suppliers());
    println!("supplier code: {}", allocator.allocate(&mut store)?);

    // a 500,000 purchase financed over 10 periods at 2% per period
    let mut obligation = Obligation::builder()
        .creditor("Suministros del Norte")
        .principal(Money::from_major(500_000))
        .periodic_rate(Rate::from_decimal(dec!(0.02)))
        .term_periods(10)
        .start_date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        .build()?;

    // first installment came in
    obligation.record_payment(PaymentRecord {
        paid_on: NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
        amount_paid: Money::from_major(60_000),
        interest_portion: Money::from_major(10_000),
        principal_portion: Money::from_major(50_000),
        balance_after: Money::from_major(440_000),
    });

    // actual rows first, then the projection to payoff
    let limits = ProjectionLimits::default();
    for row in obligation.schedule(&limits)? {
        println!(
            "{:>3} {} {} installment {:>12} balance {:>12}",
            row.period,
            row.date,
            if row.is_actual { "paid" } else { "due " },
            row.installment,
            row.balance
        );
    }

    println!("{}", serde_json::to_string_pretty(&obligation.summary(&limits)?)?);

    Ok(())
}
