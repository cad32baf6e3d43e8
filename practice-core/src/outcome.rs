use crate::storage::StorageError;
use std::fmt;

/// Secondary writes whose failure does not undo the primary effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondaryWrite {
    /// Score, round cursor and status after an attempt or skip
    SessionProgress,
    SampleAnswerCache,
}

impl fmt::Display for SecondaryWrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecondaryWrite::SessionProgress => f.write_str("session progress"),
            SecondaryWrite::SampleAnswerCache => f.write_str("sample answer cache"),
        }
    }
}

#[derive(Debug)]
pub struct SecondaryFailure {
    pub write: SecondaryWrite,
    pub error: StorageError,
}

/// A primary result that succeeded, plus any secondary writes that did not.
#[derive(Debug)]
pub struct BestEffort<T> {
    pub value: T,
    pub failures: Vec<SecondaryFailure>,
}

impl<T> BestEffort<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            failures: Vec::new(),
        }
    }

    /// Record a failed secondary write. Logged at warn level.
    pub fn record(&mut self, write: SecondaryWrite, error: StorageError) {
        tracing::warn!(write = %write, error = %error, "Secondary write failed");
        self.failures.push(SecondaryFailure { write, error });
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed(&self, write: SecondaryWrite) -> bool {
        self.failures.iter().any(|f| f.write == write)
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}
