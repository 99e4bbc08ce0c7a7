#![no_main]

use libfuzzer_sys::fuzz_target;

use fibserve_core::{fib_nth, FibCache, Limits};

fuzz_target!(|data: &[u8]| {
    // Each byte pair is one request count, capped at 2000 for speed.
    let mut cache = FibCache::new().with_limits(Limits::from_raw(1_500, 0));
    let mut high_water = 0;

    for chunk in data.chunks_exact(2) {
        let n = u64::from(u16::from_le_bytes([chunk[0], chunk[1]]) % 2_000);
        match cache.first(n) {
            Ok(prefix) => {
                assert_eq!(prefix.len() as u64, n);
                if let Some(last) = prefix.last() {
                    assert_eq!(**last, fib_nth(n - 1));
                }
                high_water = high_water.max(n as usize);
            }
            Err(_) => assert!(n > 1_500, "rejected in-limit request n={n}"),
        }
        assert_eq!(cache.len(), high_water);
    }
});
