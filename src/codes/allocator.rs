use tracing::debug;

use crate::codes::{CodeSeries, CodeStore};
use crate::errors::{PayablesError, Result};

const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// hands out the next free code of a series against a [`CodeStore`]
#[derive(Debug, Clone)]
pub struct CodeAllocator {
    series: CodeSeries,
    max_attempts: u32,
}

impl CodeAllocator {
    pub fn new(series: CodeSeries) -> Self {
        Self {
            series,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(series: CodeSeries, max_attempts: u32) -> Self {
        Self {
            series,
            max_attempts,
        }
    }

    pub fn series(&self) -> &CodeSeries {
        &self.series
    }

    /// reserve the next free code in the series
    ///
    /// retries on `CodeConflict` so two writers racing on the same series
    /// settle on distinct codes; any other store error passes through. once
    /// the padded width is used up the series refuses to grow, since unpadded
    /// codes would no longer sort after padded ones.
    pub fn allocate(&self, store: &mut dyn CodeStore) -> Result<String> {
        let mut attempt = 0;

        loop {
            attempt += 1;

            let highest = store.highest_code(&self.series.prefix)?;
            let code = self.series.next_after(highest.as_deref());

            if self
                .series
                .number_of(&code)
                .map_or(false, |n| n > self.series.capacity())
            {
                return Err(PayablesError::CodeSeriesExhausted {
                    prefix: self.series.prefix.clone(),
                    width: self.series.width,
                });
            }

            match store.insert(&code) {
                Ok(()) => {
                    debug!(code = %code, attempt, "allocated code");
                    return Ok(code);
                }
                Err(err) if err.is_retryable() && attempt < self.max_attempts => {
                    debug!(code = %code, attempt, "code already taken, retrying");
                }
                Err(err) => return Err(err),
            }
        }
    }
}
