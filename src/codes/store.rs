use std::collections::BTreeSet;

use crate::errors::{PayablesError, Result};

/// lookup and reservation surface the allocator drives
///
/// `highest_code` must return the lexicographically greatest code carrying
/// the series prefix; that matches numeric order while codes stay inside
/// their zero-padded width
pub trait CodeStore {
    fn highest_code(&self, prefix: &str) -> Result<Option<String>>;

    /// reserve a code; inserting one already present is a `CodeConflict`
    fn insert(&mut self, code: &str) -> Result<()>;
}

/// set-backed store for tests and single-process use
#[derive(Debug, Clone, Default)]
pub struct InMemoryCodeStore {
    codes: BTreeSet<String>,
}

impl InMemoryCodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl CodeStore for InMemoryCodeStore {
    fn highest_code(&self, prefix: &str) -> Result<Option<String>> {
        Ok(self
            .codes
            .range(prefix.to_string()..)
            .take_while(|code| code.starts_with(prefix))
            .last()
            .cloned())
    }

    fn insert(&mut self, code: &str) -> Result<()> {
        if !self.codes.insert(code.to_string()) {
            return Err(PayablesError::CodeConflict {
                code: code.to_string(),
            });
        }

        Ok(())
    }
}
