//! Strongly-typed instance identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique [`SpaceInstanceId`] allocation.
static SPACE_INSTANCE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Counter for unique [`BufferId`] allocation.
static BUFFER_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for a `Space` object.
///
/// Allocated from a monotonic atomic counter via [`SpaceInstanceId::next`].
/// Two distinct space instances always have different IDs, even if they
/// describe the same coordinate range. Regions and buffers compare the IDs
/// of their spaces to detect cross-space operands.
///
/// Cloning a space preserves its instance ID, which is correct because
/// immutable spaces with the same ID describe the same universe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpaceInstanceId(u64);

impl SpaceInstanceId {
    /// Allocate a fresh, unique instance ID.
    ///
    /// Each call returns a new ID that has never been returned before
    /// within this process. Thread-safe.
    pub fn next() -> Self {
        Self(SPACE_INSTANCE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SpaceInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies one buffer instance.
///
/// Copy-on-write buffers hand out a new ID for every instance they
/// produce, so log lines and error messages can tell the generations of
/// a persistent buffer apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(u64);

impl BufferId {
    /// Allocate a fresh, unique buffer ID. Thread-safe.
    pub fn next() -> Self {
        Self(BUFFER_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "buffer#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_instance_ids_are_unique() {
        let a = SpaceInstanceId::next();
        let b = SpaceInstanceId::next();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn buffer_ids_are_unique_across_threads() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| (0..64).map(|_| BufferId::next()).collect::<Vec<_>>()))
            .collect();
        let mut all: Vec<BufferId> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        let before = all.len();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), before);
    }

    #[test]
    fn buffer_id_display_is_prefixed() {
        let id = BufferId(7);
        assert_eq!(id.to_string(), "buffer#7");
    }
}
