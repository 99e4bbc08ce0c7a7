//! Constants shared by the generator, direct computer, and memory budget.

/// Maximum Fibonacci index that fits in a u64.
/// F(93) = 12200160415121876738
pub const MAX_FIB_U64: u64 = 93;

/// Approximate number of bits each index adds to F(n): log2(phi).
pub const BITS_PER_INDEX: f64 = 0.694_241_913_630_617_3;

/// Fixed per-entry overhead of a cached value in bytes
/// (`Arc` counters + `BigUint` vector header + the slot in the cache vector).
pub const CACHE_ENTRY_OVERHEAD: usize = 16 + 24 + 8;

/// Precomputed Fibonacci values for n = 0..=93 (fast path).
///
/// F(93) = 12,200,160,415,121,876,738 is the largest Fibonacci number
/// that fits in `u64`. F(94) = 19,740,274,219,868,223,167 overflows
/// `u64::MAX` (18,446,744,073,709,551,615).
pub const FIB_TABLE: [u64; 94] = {
    let mut table = [0u64; 94];
    table[0] = 0;
    table[1] = 1;
    let mut i = 2;
    while i < 94 {
        table[i] = table[i - 1] + table[i - 2];
        i += 1;
    }
    table
};
