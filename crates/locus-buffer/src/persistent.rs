//! Copy-on-write buffer backend.

use std::sync::Arc;

use locus_core::{BufferError, BufferId, Field};
use locus_space::{Region, Space};
use tracing::{debug, trace};

use crate::buffer::{check_space, checked_capacity, overflow, Buffer, SetOutcome};
use crate::config::{Backend, BufferConfig};
use crate::references::ReferenceCount;

/// A buffer whose writes never modify it.
///
/// A [`set`](Buffer::set) that changes a slot copies the slots, applies
/// the write to the copy and answers [`SetOutcome::NewInstance`] with a
/// buffer that has a new id and a fresh reference count. Writing the value
/// a slot already holds answers [`SetOutcome::SameInstance`].
///
/// Clones share storage, id and reference count: they are the same
/// immutable instance.
#[derive(Clone, Debug)]
pub struct PersistentBuffer<S: Space, F: Field> {
    id: BufferId,
    region: Region<S>,
    slots: Arc<[F]>,
    references: Arc<ReferenceCount>,
}

impl<S: Space, F: Field> PersistentBuffer<S, F> {
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
        debug!(buffer = %id, capacity, backend = ?Backend::Persistent, "buffer constructed");
        Ok(Self {
            id,
            region,
            slots: vec![F::null(); capacity].into(),
            references: Arc::new(ReferenceCount::new()),
        })
    }

    /// The slots, in region order.
    pub fn as_slice(&self) -> &[F] {
        &self.slots
    }

    /// Returns `true` if `self` and `other` share storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.slots, &other.slots)
    }
}

impl<S: Space, F: Field> Buffer<S, F> for PersistentBuffer<S, F> {
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
        let index = self
            .index_of(&position)
            .filter(|&i| i < self.slots.len())
            .ok_or_else(|| overflow(self.id, &self.region, &position))?;
        if self.slots[index] == field {
            return Ok(SetOutcome::SameInstance);
        }
        let mut slots = self.slots.to_vec();
        slots[index] = field;
        let next = Self {
            id: BufferId::next(),
            region: self.region.clone(),
            slots: slots.into(),
            references: Arc::new(ReferenceCount::new()),
        };
        trace!(from = %self.id, to = %next.id, ?position, "copy-on-write set");
        Ok(SetOutcome::NewInstance(next))
    }

    fn references(&self) -> &ReferenceCount {
        &self.references
    }
}
