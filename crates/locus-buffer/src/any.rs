//! Runtime choice between buffer backends.

use locus_core::{BufferError, BufferId, Field};
use locus_space::{Region, Space};

use crate::array::ArrayBuffer;
use crate::buffer::{Buffer, SetOutcome};
use crate::config::Backend;
use crate::persistent::PersistentBuffer;
use crate::references::ReferenceCount;

/// A buffer whose backend is chosen at run time, typically by
/// [`BufferConfig::build`](crate::BufferConfig::build).
#[derive(Clone, Debug)]
pub enum AnyBuffer<S: Space, F: Field> {
    /// In-place backend.
    Array(ArrayBuffer<S, F>),
    /// Copy-on-write backend.
    Persistent(PersistentBuffer<S, F>),
}

impl<S: Space, F: Field> AnyBuffer<S, F> {
    /// The backend in use.
    pub fn backend(&self) -> Backend {
        match self {
            Self::Array(_) => Backend::Array,
            Self::Persistent(_) => Backend::Persistent,
        }
    }

    /// The slots, in region order.
    pub fn as_slice(&self) -> &[F] {
        match self {
            Self::Array(b) => b.as_slice(),
            Self::Persistent(b) => b.as_slice(),
        }
    }
}

impl<S: Space, F: Field> From<ArrayBuffer<S, F>> for AnyBuffer<S, F> {
    fn from(buffer: ArrayBuffer<S, F>) -> Self {
        Self::Array(buffer)
    }
}

impl<S: Space, F: Field> From<PersistentBuffer<S, F>> for AnyBuffer<S, F> {
    fn from(buffer: PersistentBuffer<S, F>) -> Self {
        Self::Persistent(buffer)
    }
}

impl<S: Space, F: Field> Buffer<S, F> for AnyBuffer<S, F> {
    fn id(&self) -> BufferId {
        match self {
            Self::Array(b) => b.id(),
            Self::Persistent(b) => b.id(),
        }
    }

    fn region(&self) -> &Region<S> {
        match self {
            Self::Array(b) => b.region(),
            Self::Persistent(b) => b.region(),
        }
    }

    fn capacity(&self) -> usize {
        match self {
            Self::Array(b) => b.capacity(),
            Self::Persistent(b) => b.capacity(),
        }
    }

    fn get(&self, position: &S::Position) -> F {
        match self {
            Self::Array(b) => b.get(position),
            Self::Persistent(b) => b.get(position),
        }
    }

    fn set(&mut self, position: S::Position, field: F) -> Result<SetOutcome<Self>, BufferError> {
        Ok(match self {
            Self::Array(b) => b.set(position, field)?.map(Self::Array),
            Self::Persistent(b) => b.set(position, field)?.map(Self::Persistent),
        })
    }

    fn references(&self) -> &ReferenceCount {
        match self {
            Self::Array(b) => b.references(),
            Self::Persistent(b) => b.references(),
        }
    }
}
