//! JSON response shapes.
//!
//! Big integers are written as decimal strings: JSON numbers lose precision
//! past 2^53 in most clients, and F(79) is already larger than that.

use std::sync::Arc;

use num_bigint::BigUint;
use serde::{Serialize, Serializer};

/// A shared big integer serialized as its decimal string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decimal(pub Arc<BigUint>);

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&*self.0)
    }
}

/// Response of `GET /api/fibonacci/{n}`.
#[derive(Debug, Serialize)]
pub struct SequenceResponse {
    pub nums: Vec<Decimal>,
}

impl SequenceResponse {
    #[must_use]
    pub fn new(nums: Vec<Arc<BigUint>>) -> Self {
        Self {
            nums: nums.into_iter().map(Decimal).collect(),
        }
    }
}

/// Response of `GET /api/nth/{n}`.
#[derive(Debug, Serialize)]
pub struct NthResponse {
    pub n: u64,
    pub num: Decimal,
}

/// Response of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Values held by the sequence cache, or `None` while it is being extended.
    pub cached: Option<usize>,
}
