//! Per-instance reference counting.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts the holders of one buffer instance.
///
/// Holders call [`increment`](Self::increment) when they take a reference
/// and [`decrement`](Self::decrement) when they release it. The count never
/// goes below zero. Buffers do not act on the count themselves.
#[derive(Debug, Default)]
pub struct ReferenceCount {
    count: AtomicUsize,
}

impl ReferenceCount {
    /// A count of zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new holder; returns the updated count.
    pub fn increment(&self) -> usize {
        self.count.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Release a holder; returns the updated count. Saturates at zero.
    pub fn decrement(&self) -> usize {
        match self
            .count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
        {
            Ok(previous) => previous - 1,
            Err(_) => 0,
        }
    }

    /// Current number of holders.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn starts_at_zero() {
        assert_eq!(ReferenceCount::new().count(), 0);
    }

    #[test]
    fn decrement_saturates() {
        let refs = ReferenceCount::new();
        assert_eq!(refs.increment(), 1);
        assert_eq!(refs.decrement(), 0);
        assert_eq!(refs.decrement(), 0);
        assert_eq!(refs.count(), 0);
    }

    #[test]
    fn concurrent_increments_are_counted() {
        let refs = Arc::new(ReferenceCount::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let refs = Arc::clone(&refs);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        refs.increment();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(refs.count(), 800);
    }
}
