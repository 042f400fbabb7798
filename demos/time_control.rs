/// time control - deterministic alerting with controlled time
use payables_core::alerts::{self, AlertConfig};
use payables_core::chrono::{Duration, NaiveDate, TimeZone, Utc};
use payables_core::codes::{CodeAllocator, CodeSeries, InMemoryCodeStore};
use payables_core::{
    Money, Obligation, PaymentRecord, ProjectionLimits, Rate, SafeTimeProvider, TimeSource,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== time control example ===\n");

    // create controlled time for testing
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 3, 20, 9, 0, 0).unwrap(),
    ));
    let controller = time.test_control().unwrap();

    println!("starting date: {}", time.now().format("%Y-%m-%d"));

    // financed purchase with one installment in; the next falls on 2024-04-15
    let mut obligation = Obligation::builder()
        .creditor("Suministros del Norte")
        .principal(Money::from_major(500_000))
        .periodic_rate(Rate::from_decimal(dec!(0.02)))
        .term_periods(10)
        .start_date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        .build()?;
    obligation.record_payment(PaymentRecord {
        paid_on: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        amount_paid: Money::from_major(60_000),
        interest_portion: Money::from_major(10_000),
        principal_portion: Money::from_major(50_000),
        balance_after: Money::from_major(450_000),
    });

    let limits = ProjectionLimits::default();
    let config = AlertConfig::default();

    // 26 days out: nothing to report yet
    let quiet = alerts::evaluate(&obligation, &limits, &config, &time)?;
    println!("alerts today: {}", quiet.len());

    // advance into the due-soon window
    controller.advance(Duration::days(22));
    println!("\nadvanced to: {}", time.now().format("%Y-%m-%d"));
    for alert in alerts::evaluate(&obligation, &limits, &config, &time)? {
        println!("  {:?}", alert);
    }

    // advance past the due date
    controller.advance(Duration::days(10));
    println!("\nadvanced to: {}", time.now().format("%Y-%m-%d"));
    for alert in alerts::evaluate(&obligation, &limits, &config, &time)? {
        println!("  {:?}", alert);
    }

    // the invoice series reads the same clock, so its prefix rolls with the year
    let mut store = InMemoryCodeStore::new();
    let allocator = CodeAllocator::new(CodeSeries::invoices_for(&time));
    println!(
        "\ninvoice issued {}: {}",
        time.now().format("%Y-%m-%d"),
        allocator.allocate(&mut store)?
    );

    controller.advance(Duration::days(300));
    let allocator = CodeAllocator::new(CodeSeries::invoices_for(&time));
    println!(
        "invoice issued {}: {}",
        time.now().format("%Y-%m-%d"),
        allocator.allocate(&mut store)?
    );

    Ok(())
}
