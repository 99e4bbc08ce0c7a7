//! Memory budget estimation and request limits.

use crate::constants::{BITS_PER_INDEX, CACHE_ENTRY_OVERHEAD};
use crate::error::FibError;

/// Memory estimate for holding Fibonacci values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryEstimate {
    /// Estimated memory for the digits themselves (in bytes).
    pub value_bytes: usize,
    /// Estimated bookkeeping memory around the digits (in bytes).
    pub overhead_bytes: usize,
    /// Total estimated memory (in bytes).
    pub total_bytes: usize,
}

impl MemoryEstimate {
    /// Estimate the memory of F(n) alone.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn for_value(n: u64) -> Self {
        // F(n) has approximately n * log2(phi) bits, stored in 64-bit limbs.
        let bits = (n as f64 * BITS_PER_INDEX).ceil() as usize;
        let value_bytes = bits.div_ceil(64).saturating_mul(8);
        Self::new(value_bytes, 0)
    }

    /// Estimate the memory of a cache holding F(0)..F(n-1).
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn for_prefix(n: u64) -> Self {
        // Sum of i * log2(phi) for i in 0..n.
        let n_f = n as f64;
        let bits = (n_f * (n_f - 1.0).max(0.0) / 2.0 * BITS_PER_INDEX).ceil();
        let value_bytes = (bits / 8.0) as usize;
        let overhead_bytes = usize::try_from(n)
            .unwrap_or(usize::MAX)
            .saturating_mul(CACHE_ENTRY_OVERHEAD);
        Self::new(value_bytes, overhead_bytes)
    }

    fn new(value_bytes: usize, overhead_bytes: usize) -> Self {
        Self {
            value_bytes,
            overhead_bytes,
            total_bytes: value_bytes.saturating_add(overhead_bytes),
        }
    }

    /// Check if the estimate fits within the given memory limit.
    ///
    /// `None` means unlimited (always fits).
    #[must_use]
    pub fn fits_in(&self, limit: Option<usize>) -> bool {
        match limit {
            None => true,
            Some(l) => self.total_bytes <= l,
        }
    }
}

/// Parse a memory limit string (e.g., "8G", "512M", "1024K").
///
/// # Errors
///
/// Returns an error string if the format is invalid or the number cannot be parsed.
pub fn parse_memory_limit(s: &str) -> Result<usize, String> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(0);
    }

    let (num_str, multiplier) = if let Some(n) = s.strip_suffix('G') {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('M') {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('K') {
        (n, 1024)
    } else if let Some(n) = s.strip_suffix('B') {
        (n, 1)
    } else {
        (s, 1)
    };

    let value: usize = num_str
        .trim()
        .parse()
        .map_err(|e| format!("invalid memory limit: {e}"))?;
    value
        .checked_mul(multiplier)
        .ok_or_else(|| format!("memory limit too large: {s}"))
}

/// Upper bounds a caller places on requests before they reach the generator.
///
/// The default is unbounded: nothing is rejected up front and only an
/// allocation failure surfaces as [`FibError::ResourceExhausted`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Limits {
    /// Largest count (cache) or index (direct computer) accepted.
    pub max_count: Option<u64>,
    /// Largest estimated memory, in bytes, a single request may need.
    pub memory_limit: Option<usize>,
}

impl Limits {
    /// No limits at all.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            max_count: None,
            memory_limit: None,
        }
    }

    /// Build limits where `0` means "no limit", as on the command line.
    #[must_use]
    pub fn from_raw(max_count: u64, memory_limit: usize) -> Self {
        Self {
            max_count: (max_count != 0).then_some(max_count),
            memory_limit: (memory_limit != 0).then_some(memory_limit),
        }
    }

    /// Check that a prefix of `n` values may be materialized.
    pub fn check_prefix(&self, n: u64) -> Result<(), FibError> {
        self.check_count(n)?;
        self.check_memory(n, MemoryEstimate::for_prefix(n))
    }

    /// Check that the single value F(n) may be computed.
    pub fn check_value(&self, n: u64) -> Result<(), FibError> {
        self.check_count(n)?;
        self.check_memory(n, MemoryEstimate::for_value(n))
    }

    fn check_count(&self, n: u64) -> Result<(), FibError> {
        match self.max_count {
            Some(max) if n > max => Err(FibError::exhausted(
                n,
                format!("exceeds the maximum of {max}"),
            )),
            _ => Ok(()),
        }
    }

    fn check_memory(&self, n: u64, estimate: MemoryEstimate) -> Result<(), FibError> {
        if estimate.fits_in(self.memory_limit) {
            return Ok(());
        }
        Err(FibError::exhausted(
            n,
            format!(
                "estimated memory ({} bytes) exceeds limit ({} bytes)",
                estimate.total_bytes,
                self.memory_limit.unwrap_or(usize::MAX)
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_estimate_small() {
        let est = MemoryEstimate::for_value(100);
        // F(100) has 69 bits: two limbs.
        assert_eq!(est.value_bytes, 16);
        assert_eq!(est.total_bytes, 16);
    }

    #[test]
    fn value_estimate_zero() {
        assert_eq!(MemoryEstimate::for_value(0).total_bytes, 0);
    }

    #[test]
    fn prefix_estimate_grows_quadratically() {
        let est = MemoryEstimate::for_prefix(20_000);
        // ~1.39e8 bits of digits plus 48 bytes per entry.
        assert!(est.value_bytes > 17_000_000, "{est:?}");
        assert!(est.value_bytes < 18_000_000, "{est:?}");
        assert_eq!(est.overhead_bytes, 20_000 * CACHE_ENTRY_OVERHEAD);

        let quadruple = MemoryEstimate::for_prefix(40_000);
        assert!(quadruple.value_bytes > est.value_bytes * 3);
    }

    #[test]
    fn prefix_estimate_empty() {
        assert_eq!(MemoryEstimate::for_prefix(0).total_bytes, 0);
    }

    #[test]
    fn prefix_estimate_saturates() {
        let est = MemoryEstimate::for_prefix(u64::MAX);
        assert!(!est.fits_in(Some(usize::MAX - 1)));
    }

    #[test]
    fn fits_in_unlimited() {
        let est = MemoryEstimate::for_prefix(100_000_000);
        assert!(est.fits_in(None));
    }

    #[test]
    fn parse_memory_limit_values() {
        assert_eq!(parse_memory_limit("8G").unwrap(), 8 * 1024 * 1024 * 1024);
        assert_eq!(parse_memory_limit("512M").unwrap(), 512 * 1024 * 1024);
        assert_eq!(parse_memory_limit("1024K").unwrap(), 1024 * 1024);
        assert_eq!(parse_memory_limit("64B").unwrap(), 64);
        assert_eq!(parse_memory_limit("").unwrap(), 0);
    }

    #[test]
    fn parse_memory_limit_invalid() {
        assert!(parse_memory_limit("abc").is_err());
        assert!(parse_memory_limit("-5M").is_err());
    }

    #[test]
    fn limits_from_raw_zero_is_unbounded() {
        assert_eq!(Limits::from_raw(0, 0), Limits::unbounded());
        assert_eq!(
            Limits::from_raw(10, 4096),
            Limits {
                max_count: Some(10),
                memory_limit: Some(4096)
            }
        );
    }

    #[test]
    fn limits_reject_large_count() {
        let limits = Limits::from_raw(100, 0);
        assert!(limits.check_prefix(100).is_ok());
        assert!(matches!(
            limits.check_prefix(101),
            Err(FibError::ResourceExhausted { requested: 101, .. })
        ));
        assert!(limits.check_value(101).is_err());
    }

    #[test]
    fn limits_reject_large_memory() {
        let limits = Limits::from_raw(0, 1024 * 1024);
        assert!(limits.check_prefix(100).is_ok());
        assert!(matches!(
            limits.check_prefix(10_000),
            Err(FibError::ResourceExhausted { requested: 10_000, .. })
        ));
        // A single value is far cheaper than the whole prefix.
        assert!(limits.check_value(10_000).is_ok());
    }

    #[test]
    fn unbounded_accepts_everything() {
        let limits = Limits::unbounded();
        assert!(limits.check_prefix(u64::MAX).is_ok());
        assert!(limits.check_value(u64::MAX).is_ok());
    }
}
