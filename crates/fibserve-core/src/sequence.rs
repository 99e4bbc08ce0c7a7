//! Stateful generators over the unbounded Fibonacci sequence.
//!
//! Both generators yield F(0), F(1), F(2), ... in order, one value per pull,
//! and never restart. They differ only in where the additions run:
//! [`FibSequence`] computes on the caller's thread, [`ChannelSequence`] on a
//! dedicated producer thread that hands values over a rendezvous channel.

use std::io;
use std::iter::FusedIterator;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Lazy iterator over the Fibonacci sequence using the additive recurrence.
///
/// Keeps the rolling pair `(a, b)` and performs exactly one big-integer
/// addition per value. Each yielded value is a fresh `BigUint`; nothing the
/// iterator hands out is touched again.
///
/// # Example
/// ```
/// use fibserve_core::sequence::FibSequence;
/// let fibs: Vec<_> = FibSequence::new().take(7).map(|v| v.to_string()).collect();
/// assert_eq!(fibs, ["0", "1", "1", "2", "3", "5", "8"]);
/// ```
#[derive(Debug, Clone)]
pub struct FibSequence {
    a: BigUint,
    b: BigUint,
    position: u64,
}

impl FibSequence {
    #[must_use]
    pub fn new() -> Self {
        Self {
            a: BigUint::zero(),
            b: BigUint::one(),
            position: 0,
        }
    }

    /// Index of the value the next call to `next` will yield.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.position
    }
}

impl Default for FibSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for FibSequence {
    type Item = BigUint;

    fn next(&mut self) -> Option<Self::Item> {
        let next = &self.a + &self.b;
        let current = std::mem::replace(&mut self.a, std::mem::replace(&mut self.b, next));
        self.position += 1;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl FusedIterator for FibSequence {}

/// Fibonacci generator running on its own producer thread.
///
/// The producer sends through a zero-capacity channel, so it blocks after
/// computing each value until a consumer takes it: at most one value is in
/// flight and ordering is strictly by index. Dropping the consumer
/// disconnects the channel, which stops and joins the producer.
///
/// # Example
/// ```
/// use fibserve_core::sequence::ChannelSequence;
/// let fibs: Vec<_> = ChannelSequence::spawn().unwrap().take(5).collect();
/// assert_eq!(fibs, [0u32, 1, 1, 2, 3].map(num_bigint::BigUint::from));
/// ```
#[derive(Debug)]
pub struct ChannelSequence {
    rx: Receiver<BigUint>,
    producer: Option<JoinHandle<()>>,
}

impl ChannelSequence {
    /// Start the producer thread.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the thread cannot be spawned.
    pub fn spawn() -> io::Result<Self> {
        let (tx, rx) = crossbeam_channel::bounded(0);
        let producer = thread::Builder::new()
            .name("fib-sequence".into())
            .spawn(move || produce(&tx))?;
        Ok(Self {
            rx,
            producer: Some(producer),
        })
    }
}

fn produce(tx: &Sender<BigUint>) {
    for value in FibSequence::new() {
        if tx.send(value).is_err() {
            // Consumer hung up.
            return;
        }
    }
}

impl Iterator for ChannelSequence {
    type Item = BigUint;

    /// Blocks until the producer hands over the next value. Returns `None`
    /// only if the producer thread is gone.
    fn next(&mut self) -> Option<Self::Item> {
        self.rx.recv().ok()
    }
}

impl Drop for ChannelSequence {
    fn drop(&mut self) {
        // Disconnect first so a producer blocked in `send` wakes up and exits.
        drop(std::mem::replace(&mut self.rx, crossbeam_channel::never()));
        if let Some(handle) = self.producer.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_ten() {
        let vals: Vec<u64> = FibSequence::new()
            .take(10)
            .map(|v| v.try_into().unwrap())
            .collect();
        assert_eq!(vals, [0, 1, 1, 2, 3, 5, 8, 13, 21, 34]);
    }

    #[test]
    fn position_tracks_pulls() {
        let mut seq = FibSequence::new();
        assert_eq!(seq.position(), 0);
        seq.next();
        seq.next();
        seq.next();
        assert_eq!(seq.position(), 3);
        assert_eq!(seq.next(), Some(BigUint::from(2u32)));
    }

    #[test]
    fn continues_where_it_left_off() {
        let mut seq = FibSequence::new();
        let head: Vec<_> = seq.by_ref().take(5).collect();
        let tail: Vec<_> = seq.take(3).collect();
        assert_eq!(head, [0u32, 1, 1, 2, 3].map(BigUint::from));
        assert_eq!(tail, [5u32, 8, 13].map(BigUint::from));
    }

    #[test]
    fn crosses_u64_boundary_exactly() {
        let mut seq = FibSequence::new().skip(93);
        assert_eq!(seq.next().unwrap().to_string(), "12200160415121876738");
        assert_eq!(seq.next().unwrap().to_string(), "19740274219868223167");
    }

    #[test]
    fn f100_exact() {
        let f100 = FibSequence::new().nth(100).unwrap();
        assert_eq!(f100.to_string(), "354224848179261915075");
    }

    #[test]
    fn channel_matches_iterator() {
        let from_channel: Vec<_> = ChannelSequence::spawn().unwrap().take(200).collect();
        let from_iter: Vec<_> = FibSequence::new().take(200).collect();
        assert_eq!(from_channel, from_iter);
    }

    #[test]
    fn channel_drop_stops_producer() {
        let mut seq = ChannelSequence::spawn().unwrap();
        assert_eq!(seq.next(), Some(BigUint::zero()));
        // Dropping joins the producer; the test hangs if it never exits.
        drop(seq);
    }

    #[test]
    fn channel_drop_without_pulling() {
        drop(ChannelSequence::spawn().unwrap());
    }
}
