//! Lock-serialised buffer sharing.

use std::fmt;
use std::marker::PhantomData;
use std::sync::{Mutex, MutexGuard, PoisonError};

use locus_core::{BufferError, BufferId, Field};
use locus_space::{Region, Space};
use tracing::{trace, warn};

use crate::array::ArrayBuffer;
use crate::buffer::{Buffer, SetOutcome};
use crate::persistent::PersistentBuffer;

/// A buffer shared between threads behind one exclusive lock.
///
/// Every call acquires the lock for the duration of one operation on the
/// wrapped buffer, so calls from different threads apply in some total
/// order. When the wrapped backend answers a write with a new instance the
/// wrapper rebinds to it, so in-place and copy-on-write backends behave
/// the same behind this type.
///
/// Share through `Arc<SyncBuffer<..>>`.
///
/// A lock poisoned by a panicking holder is recovered: the wrapped buffer
/// is consistent between operations.
pub struct SyncBuffer<S: Space, F: Field, B: Buffer<S, F>> {
    region: Region<S>,
    capacity: usize,
    inner: Mutex<B>,
    _field: PhantomData<fn() -> F>,
}

// Compile-time assertion: SyncBuffer is Send + Sync for both backends.
const _: () = {
    #[allow(dead_code)]
    fn assert_send_sync<T: Send + Sync>() {}
    #[allow(dead_code)]
    fn check<S: Space, F: Field>() {
        assert_send_sync::<SyncBuffer<S, F, ArrayBuffer<S, F>>>();
        assert_send_sync::<SyncBuffer<S, F, PersistentBuffer<S, F>>>();
    }
};

impl<S: Space, F: Field, B: Buffer<S, F>> SyncBuffer<S, F, B> {
    /// Wrap `buffer`.
    pub fn new(buffer: B) -> Self {
        Self {
            region: buffer.region().clone(),
            capacity: buffer.capacity(),
            inner: Mutex::new(buffer),
            _field: PhantomData,
        }
    }

    fn lock(&self) -> MutexGuard<'_, B> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            warn!("recovering poisoned buffer lock");
            poisoned.into_inner()
        })
    }

    /// Identifier of the currently wrapped instance.
    pub fn id(&self) -> BufferId {
        self.lock().id()
    }

    /// The region the wrapped buffer addresses.
    ///
    /// Rebinding never changes the region, so no lock is taken.
    pub fn region(&self) -> &Region<S> {
        &self.region
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slot offset of `position`, if addressable.
    pub fn index_of(&self, position: &S::Position) -> Option<usize> {
        self.lock().index_of(position)
    }

    /// The Field stored at `position`, or null.
    pub fn get(&self, position: &S::Position) -> F {
        self.lock().get(position)
    }

    /// Store `field` at `position`, rebinding to a new instance if the
    /// backend produces one.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Overflow`] if the region does not contain
    /// `position`.
    pub fn set(&self, position: S::Position, field: F) -> Result<(), BufferError> {
        let mut guard = self.lock();
        if let SetOutcome::NewInstance(next) = guard.set(position, field)? {
            trace!(from = %guard.id(), to = %next.id(), "rebinding shared buffer");
            *guard = next;
        }
        Ok(())
    }

    /// Run `f` with the wrapped buffer while holding the lock.
    pub fn with<R>(&self, f: impl FnOnce(&B) -> R) -> R {
        f(&self.lock())
    }

    /// Run `f` with exclusive access to the wrapped buffer while holding the
    /// lock. `f` may rebind the buffer (for example through
    /// [`Buffer::store`]) but must keep its region.
    ///
    /// # Panics
    ///
    /// Panics if `f` leaves a buffer over a different region in place.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut B) -> R) -> R {
        let mut guard = self.lock();
        let result = f(&mut guard);
        assert!(
            guard.region() == &self.region,
            "shared buffer rebound from {:?} to {:?}",
            self.region,
            guard.region()
        );
        result
    }

    /// Unwrap the current buffer instance.
    pub fn into_inner(self) -> B {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: Space, F: Field, B: Buffer<S, F>> From<B> for SyncBuffer<S, F, B> {
    fn from(buffer: B) -> Self {
        Self::new(buffer)
    }
}

impl<S: Space, F: Field, B: Buffer<S, F> + fmt::Debug> fmt::Debug for SyncBuffer<S, F, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncBuffer")
            .field("region", &self.region)
            .field("inner", &*self.lock())
            .finish()
    }
}
