pub mod allocator;
pub mod store;

use chrono::Datelike;
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub use allocator::CodeAllocator;
pub use store::{CodeStore, InMemoryCodeStore};

/// next code in a prefix-plus-zero-padded-number series
///
/// `highest` is the current maximum code of the series, if any. a suffix that
/// does not parse as a number restarts the sequence at 1 rather than failing,
/// and numbers that outgrow the width render unpadded instead of truncating.
pub fn next_code(highest: Option<&str>, prefix: &str, width: usize) -> String {
    let next = match highest {
        None => 1,
        Some(code) => match numeric_suffix(code, prefix) {
            Some(n) => n.saturating_add(1),
            None => {
                warn!(code, prefix, "code does not extend the series, restarting at 1");
                1
            }
        },
    };

    format!("{}{:0width$}", prefix, next, width = width)
}

fn numeric_suffix(code: &str, prefix: &str) -> Option<u64> {
    code.strip_prefix(prefix)?.trim().parse().ok()
}

/// a document numbering series: fixed prefix plus zero-padded counter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSeries {
    pub prefix: String,
    pub width: usize,
}

impl CodeSeries {
    pub fn new(prefix: impl Into<String>, width: usize) -> Self {
        Self {
            prefix: prefix.into(),
            width,
        }
    }

    /// client accounts, CLI-001 style
    pub fn clients() -> Self {
        Self::new("CLI-", 3)
    }

    /// job work codes, COD-001 style
    pub fn work_codes() -> Self {
        Self::new("COD-", 3)
    }

    /// supplier accounts, PROV-001 style
    pub fn suppliers() -> Self {
        Self::new("PROV-", 3)
    }

    /// inventory articles, ART-0001 style
    pub fn inventory() -> Self {
        Self::new("ART-", 4)
    }

    /// invoices restart their counter every year, FAC-2024-0001 style
    pub fn invoices(year: i32) -> Self {
        Self::new(format!("FAC-{}-", year), 4)
    }

    /// invoice series for the current clock year
    pub fn invoices_for(time: &SafeTimeProvider) -> Self {
        Self::invoices(time.now().year())
    }

    pub fn next_after(&self, highest: Option<&str>) -> String {
        next_code(highest, &self.prefix, self.width)
    }

    /// highest number the padded form can hold
    pub fn capacity(&self) -> u64 {
        10u64
            .checked_pow(self.width as u32)
            .map(|p| p - 1)
            .unwrap_or(u64::MAX)
    }

    pub fn format(&self, number: u64) -> String {
        format!("{}{:0width$}", self.prefix, number, width = self.width)
    }

    /// numeric suffix of a code belonging to this series
    pub fn number_of(&self, code: &str) -> Option<u64> {
        numeric_suffix(code, &self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use hourglass_rs::TimeSource;

    #[test]
    fn test_next_code_increments_highest() {
        assert_eq!(next_code(Some("CLI-007"), "CLI-", 3), "CLI-008");
        assert_eq!(next_code(Some("COD-041"), "COD-", 3), "COD-042");
    }

    #[test]
    fn test_next_code_starts_empty_series() {
        assert_eq!(next_code(None, "CLI-", 3), "CLI-001");
        assert_eq!(next_code(None, "ART-", 4), "ART-0001");
    }

    #[test]
    fn test_next_code_restarts_on_malformed_suffix() {
        assert_eq!(next_code(Some("CLI-ABC"), "CLI-", 3), "CLI-001");
        assert_eq!(next_code(Some("PROV-010"), "CLI-", 3), "CLI-001");
        assert_eq!(next_code(Some("CLI-"), "CLI-", 3), "CLI-001");
    }

    #[test]
    fn test_next_code_parses_loose_suffixes() {
        // stray padding and whitespace still count as the series
        assert_eq!(next_code(Some("CLI-0007"), "CLI-", 3), "CLI-008");
        assert_eq!(next_code(Some("CLI- 12"), "CLI-", 3), "CLI-013");
    }

    #[test]
    fn test_next_code_grows_past_width() {
        assert_eq!(next_code(Some("CLI-999"), "CLI-", 3), "CLI-1000");
        assert_eq!(next_code(Some("CLI-1000"), "CLI-", 3), "CLI-1001");
    }

    #[test]
    fn test_series_presets() {
        assert_eq!(CodeSeries::clients().next_after(None), "CLI-001");
        assert_eq!(CodeSeries::work_codes().next_after(None), "COD-001");
        assert_eq!(CodeSeries::suppliers().next_after(None), "PROV-001");
        assert_eq!(CodeSeries::inventory().next_after(None), "ART-0001");

        assert_eq!(CodeSeries::clients().capacity(), 999);
        assert_eq!(CodeSeries::inventory().capacity(), 9_999);
    }

    #[test]
    fn test_year_scoped_invoice_series() {
        let series = CodeSeries::invoices(2024);

        assert_eq!(series.prefix, "FAC-2024-");
        assert_eq!(series.next_after(Some("FAC-2024-0047")), "FAC-2024-0048");
        assert_eq!(CodeSeries::invoices(2025).next_after(None), "FAC-2025-0001");
    }

    #[test]
    fn test_invoice_series_follows_clock() {
        let start = Utc.with_ymd_and_hms(2024, 12, 31, 23, 0, 0).unwrap();
        let time = SafeTimeProvider::new(TimeSource::Test(start));

        assert_eq!(CodeSeries::invoices_for(&time).prefix, "FAC-2024-");

        let control = time.test_control().unwrap();
        control.advance(Duration::days(1));

        assert_eq!(CodeSeries::invoices_for(&time).prefix, "FAC-2025-");
    }

    #[test]
    fn test_format_pads_to_width() {
        let series = CodeSeries::clients();

        assert_eq!(series.format(7), "CLI-007");
        assert_eq!(series.format(1_234), "CLI-1234");
    }

    #[test]
    fn test_number_of_rejects_foreign_codes() {
        let series = CodeSeries::clients();

        assert_eq!(series.number_of("CLI-042"), Some(42));
        assert_eq!(series.number_of("PROV-001"), None);
    }
}
