//! Error type shared by every core operation.

/// Error type for Fibonacci sequence operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FibError {
    /// The caller supplied an index outside the domain (e.g. negative).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The request is too large to satisfy within the configured limits or
    /// the memory the allocator can hand out.
    #[error("resource exhausted for n={requested}: {reason}")]
    ResourceExhausted {
        /// Requested count or index.
        requested: u64,
        /// What ran out.
        reason: String,
    },

    /// The generator backing a cache stopped producing values.
    #[error("sequence generator closed after {produced} values")]
    GeneratorClosed {
        /// Number of values the cache holds.
        produced: usize,
    },
}

impl FibError {
    pub(crate) fn exhausted(requested: u64, reason: impl Into<String>) -> Self {
        Self::ResourceExhausted {
            requested,
            reason: reason.into(),
        }
    }
}

/// Convert a signed index parsed at the boundary into a core index.
///
/// # Example
/// ```
/// use fibserve_core::{checked_index, FibError};
/// assert_eq!(checked_index(12), Ok(12));
/// assert!(matches!(checked_index(-1), Err(FibError::InvalidInput(_))));
/// ```
pub fn checked_index(n: i64) -> Result<u64, FibError> {
    u64::try_from(n).map_err(|_| FibError::InvalidInput(format!("n must be non-negative, got {n}")))
}
