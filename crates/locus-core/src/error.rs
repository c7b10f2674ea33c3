//! Error types for the locus framework.
//!
//! The arithmetic and search layers never fail: they answer with sentinel
//! positions and regions instead. Errors only exist at the boundaries where
//! a silent failure would corrupt state (constructors, exhausted position
//! sequences, buffer writes) and are organised by subsystem.

use std::error::Error;
use std::fmt;

use crate::id::{BufferId, SpaceInstanceId};

/// Errors from region construction and position sequences.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegionError {
    /// A sub-region belongs to a different space instance than the
    /// composite being built.
    SpaceMismatch {
        /// The space the composite is being built in.
        expected: SpaceInstanceId,
        /// The space of the offending sub-region.
        found: SpaceInstanceId,
    },
    /// A position sequence was advanced after it had yielded its last
    /// position.
    Exhausted,
}

impl fmt::Display for RegionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SpaceMismatch { expected, found } => {
                write!(f, "region from space {found} used in space {expected}")
            }
            Self::Exhausted => write!(f, "no more positions in sequence"),
        }
    }
}

impl Error for RegionError {}

/// Errors from buffer construction and writes.
///
/// Positions and regions are carried as their `Debug` rendering so the
/// error stays independent of any concrete space.
#[derive(Clone, Debug, PartialEq)]
pub enum BufferError {
    /// A write targeted a position that is not contained in the buffer's
    /// region. The buffer is left unchanged.
    Overflow {
        /// The buffer that rejected the write.
        buffer: BufferId,
        /// The rejected position.
        position: String,
        /// The buffer's region.
        region: String,
    },
    /// The region holds more positions than a buffer can index.
    CapacityExceeded {
        /// Number of positions in the region, as computed by the space
        /// (may be non-finite for degenerate sizes).
        positions: f64,
        /// Largest permitted capacity.
        max: usize,
    },
    /// The region was built in a different space instance than the one
    /// the buffer was asked to address.
    SpaceMismatch {
        /// The space the buffer addresses.
        expected: SpaceInstanceId,
        /// The space of the supplied region.
        found: SpaceInstanceId,
    },
    /// No null slot remains after the requested position.
    NowhereToAppend {
        /// The full buffer.
        buffer: BufferId,
        /// The position the search started after.
        after: String,
    },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overflow {
                buffer,
                position,
                region,
            } => {
                write!(
                    f,
                    "buffer overflow: position {position} is outside {buffer} region {region}"
                )
            }
            Self::CapacityExceeded { positions, max } => {
                write!(
                    f,
                    "buffer capacity exceeded: region holds {positions} positions, max {max}"
                )
            }
            Self::SpaceMismatch { expected, found } => {
                write!(f, "region from space {found} cannot address space {expected}")
            }
            Self::NowhereToAppend { buffer, after } => {
                write!(f, "nowhere to append in {buffer} after position {after}")
            }
        }
    }
}

impl Error for BufferError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_message_names_position_and_region() {
        let err = BufferError::Overflow {
            buffer: BufferId::next(),
            position: "42".into(),
            region: "[0..=9]".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("42"));
        assert!(msg.contains("[0..=9]"));
    }

    #[test]
    fn capacity_message_reports_limit() {
        let err = BufferError::CapacityExceeded {
            positions: 1e12,
            max: 1024,
        };
        assert!(err.to_string().contains("max 1024"));
    }

    #[test]
    fn exhausted_is_distinct_from_mismatch() {
        let a = SpaceInstanceId::next();
        let b = SpaceInstanceId::next();
        let mismatch = RegionError::SpaceMismatch {
            expected: a,
            found: b,
        };
        assert_ne!(mismatch, RegionError::Exhausted);
        assert_eq!(
            RegionError::Exhausted.to_string(),
            "no more positions in sequence"
        );
    }
}
