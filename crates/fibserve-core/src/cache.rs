//! Memoizing cache over a single Fibonacci generator.
//!
//! # Concurrency
//!
//! `FibCache` is single-writer. [`FibCache::first`] takes `&mut self`
//! because extending the cache pulls from the generator and appends in one
//! non-atomic step; the borrow checker therefore rules out concurrent
//! extension. Callers sharing one cache across threads must serialize
//! access themselves, e.g. with a `Mutex<FibCache>`.

use std::sync::Arc;

use num_bigint::BigUint;

use crate::error::FibError;
use crate::memory_budget::Limits;
use crate::sequence::FibSequence;

/// Append-only cache of F(0), F(1), ... backed by one generator.
///
/// Entry `i` is always F(i). Entries are never rewritten or removed, and each
/// value is pulled from the generator exactly once. Values are shared through
/// `Arc`, so prefixes returned by different calls point at the same objects.
///
/// # Example
/// ```
/// use fibserve_core::FibCache;
/// let mut cache = FibCache::new();
/// let first: Vec<String> = cache.first(8).unwrap().iter().map(ToString::to_string).collect();
/// assert_eq!(first, ["0", "1", "1", "2", "3", "5", "8", "13"]);
/// assert_eq!(cache.len(), 8);
/// ```
#[derive(Debug)]
pub struct FibCache<S = FibSequence> {
    values: Vec<Arc<BigUint>>,
    source: S,
    limits: Limits,
}

impl FibCache<FibSequence> {
    /// Create an empty, unbounded cache over a fresh [`FibSequence`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_source(FibSequence::new())
    }
}

impl Default for FibCache<FibSequence> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> FibCache<S>
where
    S: Iterator<Item = BigUint>,
{
    /// Create an empty cache pulling from `source`.
    ///
    /// `source` must yield the Fibonacci sequence starting at F(0) and must
    /// not have been advanced yet.
    pub fn with_source(source: S) -> Self {
        Self {
            values: Vec::new(),
            source,
            limits: Limits::unbounded(),
        }
    }

    /// Reject extensions beyond `limits`.
    #[must_use]
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Return F(0)..F(n-1), extending the cache first if needed.
    ///
    /// If `n <= self.len()` this is a pure slice and the generator is not
    /// touched. Otherwise only the missing suffix is pulled. Extension blocks
    /// until every missing value has been produced.
    ///
    /// # Errors
    ///
    /// - [`FibError::ResourceExhausted`] if `n` does not fit in memory on this
    ///   platform, exceeds the configured [`Limits`], or the allocator refuses
    ///   to reserve room for it. The cache is unchanged.
    /// - [`FibError::GeneratorClosed`] if the generator stops early. Values
    ///   pulled before that stay cached.
    pub fn first(&mut self, n: u64) -> Result<&[Arc<BigUint>], FibError> {
        let wanted = usize::try_from(n)
            .map_err(|_| FibError::exhausted(n, "count is not addressable on this platform"))?;
        if wanted > self.values.len() {
            self.extend_to(n, wanted)?;
        }
        Ok(&self.values[..wanted])
    }

    fn extend_to(&mut self, n: u64, wanted: usize) -> Result<(), FibError> {
        self.limits.check_prefix(n)?;

        let missing = wanted - self.values.len();
        self.values
            .try_reserve_exact(missing)
            .map_err(|e| FibError::exhausted(n, e.to_string()))?;

        for _ in 0..missing {
            let Some(value) = self.source.next() else {
                return Err(FibError::GeneratorClosed {
                    produced: self.values.len(),
                });
            };
            self.values.push(Arc::new(value));
        }
        Ok(())
    }
}

impl<S> FibCache<S> {
    /// Number of values cached so far.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }
}
