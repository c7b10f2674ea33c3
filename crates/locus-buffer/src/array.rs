//! Mutable, in-place buffer backend.

use locus_core::{BufferError, BufferId, Field};
use locus_space::{Region, Space};
use tracing::debug;

use crate::buffer::{check_space, checked_capacity, overflow, Buffer, SetOutcome};
use crate::config::{Backend, BufferConfig};
use crate::references::ReferenceCount;

/// A buffer whose writes update its slots in place.
///
/// Every [`set`](Buffer::set) answers [`SetOutcome::SameInstance`].
/// Cloning produces an independent buffer with its own id and a fresh
/// reference count.
#[derive(Debug)]
pub struct ArrayBuffer<S: Space, F: Field> {
    id: BufferId,
    region: Region<S>,
    slots: Vec<F>,
    references: ReferenceCount,
}

impl<S: Space, F: Field> ArrayBuffer<S, F> {
    /// A buffer with one null slot per position of `region`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::CapacityExceeded`] if the region holds more
    /// than [`BufferConfig::DEFAULT_MAX_CAPACITY`] positions.
    pub fn new(region: Region<S>) -> Result<Self, BufferError> {
        Self::with_config(region, &BufferConfig::default())
    }

    /// As [`new`](Self::new), additionally rejecting a region built in a
    /// different instance than `space`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::SpaceMismatch`] or
    /// [`BufferError::CapacityExceeded`].
    pub fn with_space(space: &S, region: Region<S>) -> Result<Self, BufferError> {
        check_space(space, &region)?;
        Self::new(region)
    }

    /// A buffer over `region` bounded by `config.max_capacity`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::CapacityExceeded`] if the region holds more
    /// than `config.max_capacity` positions.
    pub fn with_config(region: Region<S>, config: &BufferConfig) -> Result<Self, BufferError> {
        let capacity = checked_capacity(&region, config.max_capacity)?;
        let id = BufferId::next();
        debug!(buffer = %id, capacity, backend = ?Backend::Array, "buffer constructed");
        Ok(Self {
            id,
            region,
            slots: vec![F::null(); capacity],
            references: ReferenceCount::new(),
        })
    }

    /// The slots, in region order.
    pub fn as_slice(&self) -> &[F] {
        &self.slots
    }
}

impl<S: Space, F: Field> Buffer<S, F> for ArrayBuffer<S, F> {
    fn id(&self) -> BufferId {
        self.id
    }

    fn region(&self) -> &Region<S> {
        &self.region
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn get(&self, position: &S::Position) -> F {
        self.index_of(position)
            .and_then(|i| self.slots.get(i))
            .cloned()
            .unwrap_or_else(F::null)
    }

    fn set(&mut self, position: S::Position, field: F) -> Result<SetOutcome<Self>, BufferError> {
        let slot = self
            .index_of(&position)
            .and_then(|i| self.slots.get_mut(i))
            .ok_or_else(|| overflow(self.id, &self.region, &position))?;
        *slot = field;
        Ok(SetOutcome::SameInstance)
    }

    fn references(&self) -> &ReferenceCount {
        &self.references
    }
}

impl<S: Space, F: Field> Clone for ArrayBuffer<S, F> {
    fn clone(&self) -> Self {
        Self {
            id: BufferId::next(),
            region: self.region.clone(),
            slots: self.slots.clone(),
            references: ReferenceCount::new(),
        }
    }
}
