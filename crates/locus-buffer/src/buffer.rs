//! The `Buffer` contract and shared construction checks.

use locus_core::{BufferError, BufferId, Field};
use locus_space::{Region, Space};
use tracing::debug;

use crate::references::ReferenceCount;

/// What a successful [`Buffer::set`] produced.
///
/// Mutable backends write in place and answer
/// [`SameInstance`](Self::SameInstance). Copy-on-write backends leave the
/// receiver untouched and answer [`NewInstance`](Self::NewInstance) with
/// the updated buffer, which the caller must use from then on.
#[derive(Debug)]
pub enum SetOutcome<B> {
    /// The receiver was updated in place.
    SameInstance,
    /// The write produced a new buffer; the receiver is unchanged.
    NewInstance(B),
}

impl<B> SetOutcome<B> {
    /// Returns `true` if the write produced a new buffer.
    pub fn is_new_instance(&self) -> bool {
        matches!(self, Self::NewInstance(_))
    }

    /// The new buffer, if one was produced.
    pub fn into_new_instance(self) -> Option<B> {
        match self {
            Self::SameInstance => None,
            Self::NewInstance(buffer) => Some(buffer),
        }
    }

    /// Map the new buffer, if any.
    pub fn map<C>(self, f: impl FnOnce(B) -> C) -> SetOutcome<C> {
        match self {
            Self::SameInstance => SetOutcome::SameInstance,
            Self::NewInstance(buffer) => SetOutcome::NewInstance(f(buffer)),
        }
    }
}

/// Fixed-capacity storage mapping every position of one region to one
/// [`Field`] slot.
///
/// Slots are laid out in region order: the slot of position `p` sits at
/// `(p - region.start()) / one`. Reads never fail; an unset slot or an
/// invalid position reads as [`Field::null`]. Writes to positions outside
/// the region fail with [`BufferError::Overflow`] and leave the buffer
/// unchanged.
///
/// Plain buffers are not synchronised: `set` takes `&mut self`. Share a
/// buffer between writers through [`SyncBuffer`](crate::SyncBuffer).
pub trait Buffer<S: Space, F: Field>: Sized {
    /// Identifier of this buffer instance.
    fn id(&self) -> BufferId;

    /// The region this buffer addresses.
    fn region(&self) -> &Region<S>;

    /// Number of slots, one per position of the region.
    fn capacity(&self) -> usize;

    /// Slot offset of `position`, or `None` if the region does not contain
    /// it.
    fn index_of(&self, position: &S::Position) -> Option<usize> {
        slot_index(self.region(), position)
    }

    /// The Field stored at `position`, or null if unset or not addressable.
    fn get(&self, position: &S::Position) -> F;

    /// Store `field` at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Overflow`] if the region does not contain
    /// `position`. The buffer is unchanged on error.
    fn set(&mut self, position: S::Position, field: F) -> Result<SetOutcome<Self>, BufferError>;

    /// Reference count of this buffer instance.
    fn references(&self) -> &ReferenceCount;

    /// Store `field` at `position`, rebinding `self` when the backend
    /// produces a new instance.
    ///
    /// # Errors
    ///
    /// Same as [`set`](Self::set).
    fn store(&mut self, position: S::Position, field: F) -> Result<(), BufferError> {
        if let SetOutcome::NewInstance(next) = self.set(position, field)? {
            *self = next;
        }
        Ok(())
    }

    /// Returns `true` if `position` has a slot in this buffer.
    fn contains(&self, position: &S::Position) -> bool {
        self.index_of(position).is_some()
    }
}

/// Slot offset of `position` within `region`.
pub(crate) fn slot_index<S: Space>(region: &Region<S>, position: &S::Position) -> Option<usize> {
    if !region.contains(position) {
        return None;
    }
    let space = region.space();
    let offset = space.distance(&region.start(), position)?;
    let index = space.ratio(&offset, &space.one());
    (index.is_finite() && index >= 0.0).then_some(index as usize)
}

/// Largest slot count an `f64` ratio still represents exactly (2^53).
const EXACT_SLOT_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Number of slots needed for `region`, bounded by `max`.
///
/// Counts that are not whole numbers below [`EXACT_SLOT_LIMIT`] are
/// rejected whatever `max` allows, so a count is never rounded.
pub(crate) fn checked_capacity<S: Space>(
    region: &Region<S>,
    max: usize,
) -> Result<usize, BufferError> {
    if region.is_empty() {
        return Ok(0);
    }
    let space = region.space();
    let positions = space.ratio(&region.size(), &space.one());
    let exact = positions.is_finite()
        && positions >= 0.0
        && positions.fract() == 0.0
        && positions < EXACT_SLOT_LIMIT;
    if !exact || positions > max as f64 {
        debug!(positions, max, region = ?region, "rejected buffer region");
        return Err(BufferError::CapacityExceeded { positions, max });
    }
    Ok(positions as usize)
}

/// Reject `region` unless it was built in `space`.
pub(crate) fn check_space<S: Space>(space: &S, region: &Region<S>) -> Result<(), BufferError> {
    if region.space().topology_eq(space) {
        Ok(())
    } else {
        Err(BufferError::SpaceMismatch {
            expected: space.instance_id(),
            found: region.space().instance_id(),
        })
    }
}

/// The error for a write outside `region`.
pub(crate) fn overflow<S: Space>(
    buffer: BufferId,
    region: &Region<S>,
    position: &S::Position,
) -> BufferError {
    debug!(%buffer, ?position, region = ?region, "rejected write outside buffer region");
    BufferError::Overflow {
        buffer,
        position: format!("{position:?}"),
        region: format!("{region:?}"),
    }
}
