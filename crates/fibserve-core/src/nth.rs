//! Direct computation of a single Fibonacci number.

use num_bigint::BigUint;

use crate::constants::{FIB_TABLE, MAX_FIB_U64};
use crate::error::FibError;
use crate::memory_budget::Limits;

/// Compute F(n) without materializing the prefix.
///
/// Indices up to [`MAX_FIB_U64`] come straight from [`FIB_TABLE`]. Past that
/// the additive recurrence runs from F(93), F(94) with only two live values,
/// one of which is added into in place and never exposed until returned.
///
/// This performs O(n) additions, but each addition is linear in the bit
/// length of its operands and F(n) has about `0.694 * n` bits, so the total
/// cost is O(n^2) bit operations. No upper bound is enforced here; callers
/// that need bounded latency should use [`fib_nth_bounded`].
///
/// # Example
/// ```
/// use fibserve_core::fib_nth;
/// assert_eq!(fib_nth(0).to_string(), "0");
/// assert_eq!(fib_nth(100).to_string(), "354224848179261915075");
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn fib_nth(n: u64) -> BigUint {
    if n <= MAX_FIB_U64 {
        return BigUint::from(FIB_TABLE[n as usize]);
    }

    let mut a = BigUint::from(FIB_TABLE[MAX_FIB_U64 as usize]);
    let mut b = a.clone() + FIB_TABLE[MAX_FIB_U64 as usize - 1];
    for _ in MAX_FIB_U64..n {
        a += &b;
        std::mem::swap(&mut a, &mut b);
    }
    a
}

/// Compute F(n) after checking `n` against `limits`.
///
/// # Errors
///
/// Returns [`FibError::ResourceExhausted`] if the index or the estimated
/// size of F(n) exceeds the limits.
pub fn fib_nth_bounded(n: u64, limits: &Limits) -> Result<BigUint, FibError> {
    limits.check_value(n)?;
    Ok(fib_nth(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::FibSequence;

    #[test]
    fn small_values() {
        let expected = [0u64, 1, 1, 2, 3, 5, 8, 13, 21, 34];
        for (n, want) in expected.iter().enumerate() {
            assert_eq!(fib_nth(n as u64), BigUint::from(*want), "F({n})");
        }
    }

    #[test]
    fn u64_boundary() {
        assert_eq!(fib_nth(93).to_string(), "12200160415121876738");
        assert_eq!(fib_nth(94).to_string(), "19740274219868223167");
        assert_eq!(fib_nth(95).to_string(), "31940434634990099905");
    }

    #[test]
    fn matches_sequence_across_table_edge() {
        let seq: Vec<BigUint> = FibSequence::new().take(300).collect();
        for (n, want) in seq.iter().enumerate() {
            assert_eq!(&fib_nth(n as u64), want, "F({n})");
        }
    }

    #[test]
    fn f1000_digit_count() {
        assert_eq!(fib_nth(1000).to_string().len(), 209);
    }

    #[test]
    fn bounded_rejects_over_limit() {
        let limits = Limits::from_raw(500, 0);
        assert_eq!(
            fib_nth_bounded(500, &limits).unwrap(),
            fib_nth(500)
        );
        assert!(matches!(
            fib_nth_bounded(501, &limits),
            Err(FibError::ResourceExhausted { requested: 501, .. })
        ));
    }

    #[test]
    fn bounded_unlimited() {
        assert_eq!(
            fib_nth_bounded(10, &Limits::unbounded()).unwrap(),
            BigUint::from(55u32)
        );
    }
}
