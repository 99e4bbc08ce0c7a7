#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint::BigUint;

use fibserve_core::{fib_nth, FibSequence};

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    // Use first 2 bytes as n, capped at 5000 for speed
    let n = u16::from_le_bytes([data[0], data[1]]) % 5_000;

    let iterated: BigUint = FibSequence::new().nth(usize::from(n)).unwrap();
    assert_eq!(fib_nth(u64::from(n)), iterated, "direct != sequence at n={n}");
});
