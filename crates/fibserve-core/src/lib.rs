//! # fibserve-core
//!
//! Core library for the FibServe Fibonacci service.
//!
//! Three pieces cooperate here:
//!
//! - [`sequence`]: stateful generators over the unbounded Fibonacci sequence,
//!   either a plain iterator ([`FibSequence`]) or a producer thread behind a
//!   rendezvous channel ([`ChannelSequence`]).
//! - [`nth`]: the direct computer for a single F(n).
//! - [`cache`]: [`FibCache`], which owns one generator and memoizes every value
//!   it has pulled so prefix requests never recompute.
//!
//! The crate never logs. Every failure is returned as a [`FibError`] and
//! presentation is left to the caller.

pub mod cache;
pub mod constants;
pub mod error;
pub mod memory_budget;
pub mod nth;
pub mod sequence;

// Re-exports
pub use cache::FibCache;
pub use constants::{FIB_TABLE, MAX_FIB_U64};
pub use error::{checked_index, FibError};
pub use memory_budget::{Limits, MemoryEstimate};
pub use nth::{fib_nth, fib_nth_bounded};
pub use sequence::{ChannelSequence, FibSequence};

/// Compute the first `n` Fibonacci numbers with a fresh cache.
///
/// Convenience for one-off callers; long-lived services should keep a
/// [`FibCache`] around instead so later requests reuse the prefix.
///
/// # Example
/// ```
/// let nums = fibserve_core::first_n(7).unwrap();
/// let text: Vec<String> = nums.iter().map(ToString::to_string).collect();
/// assert_eq!(text, ["0", "1", "1", "2", "3", "5", "8"]);
/// ```
pub fn first_n(n: u64) -> Result<Vec<num_bigint::BigUint>, FibError> {
    let mut cache = FibCache::new();
    let prefix = cache.first(n)?;
    Ok(prefix.iter().map(|v| (**v).clone()).collect())
}
