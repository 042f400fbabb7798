pub mod alerts;
pub mod codes;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod obligations;
pub mod schedule;
pub mod types;

// re-export key types
pub use alerts::{Alert, AlertConfig};
pub use codes::{next_code, CodeAllocator, CodeSeries, CodeStore, InMemoryCodeStore};
pub use decimal::{Money, Rate};
pub use errors::{PayablesError, Result};
pub use events::{Event, EventLog};
pub use obligations::{
    Obligation, ObligationBuilder, ObligationRow, ObligationSummary, PaymentRow,
};
pub use schedule::{compute_schedule, reference_installment, LoanTerms, ProjectionLimits};
pub use types::{ObligationId, ObligationStatus, PaymentRecord, ScheduleRow};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
