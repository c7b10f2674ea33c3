//! Lookup from stored Field to the positions holding it.

use std::sync::OnceLock;

use indexmap::IndexMap;
use locus_core::{BufferError, BufferId, Field};
use locus_space::{Criterion, Position, Region, Space};
use smallvec::SmallVec;
use tracing::trace;

use crate::buffer::{Buffer, SetOutcome};
use crate::references::ReferenceCount;

type Entries<P, F> = IndexMap<F, SmallVec<[P; 1]>>;

/// Secondary index from Field value to the positions holding it.
///
/// Built lazily from a buffer on the first lookup and kept until
/// [`invalidate`](Self::invalidate) is called. Null Fields are not
/// indexed. Positions are listed in region order and Fields in order of
/// first appearance.
#[derive(Debug)]
pub struct FieldIndex<P, F> {
    entries: OnceLock<Entries<P, F>>,
}

impl<P: Position, F: Field> FieldIndex<P, F> {
    /// An index that has not been built yet.
    pub fn new() -> Self {
        Self {
            entries: OnceLock::new(),
        }
    }

    /// Returns `true` if the index has been built since the last
    /// invalidation.
    pub fn is_built(&self) -> bool {
        self.entries.get().is_some()
    }

    /// Discard the index; the next lookup rebuilds it.
    pub fn invalidate(&mut self) {
        self.entries.take();
    }

    /// Positions of `buffer` holding `field`, building the index from
    /// `buffer` if needed.
    pub fn positions_of<S, B>(&self, buffer: &B, field: &F) -> &[P]
    where
        S: Space<Position = P>,
        B: Buffer<S, F>,
    {
        self.entries
            .get_or_init(|| Self::build(buffer))
            .get(field)
            .map(|positions| positions.as_slice())
            .unwrap_or(&[])
    }

    /// Number of distinct non-null Fields indexed, if built.
    pub fn distinct_fields(&self) -> Option<usize> {
        self.entries.get().map(IndexMap::len)
    }

    fn build<S, B>(buffer: &B) -> Entries<P, F>
    where
        S: Space<Position = P>,
        B: Buffer<S, F>,
    {
        let mut entries: Entries<P, F> = IndexMap::new();
        for position in buffer.region() {
            let field = buffer.get(&position);
            if !field.is_null() {
                entries.entry(field).or_default().push(position);
            }
        }
        trace!(buffer = %buffer.id(), fields = entries.len(), "built field index");
        entries
    }
}

impl<P: Position, F: Field> Default for FieldIndex<P, F> {
    fn default() -> Self {
        Self::new()
    }
}

/// A buffer decorated with a [`FieldIndex`].
///
/// Every successful write invalidates the index; a write that produces a
/// new instance wraps it with a fresh index and leaves the receiver's
/// index valid, since the receiver is unchanged.
#[derive(Debug)]
pub struct IndexedBuffer<S: Space, F: Field, B> {
    inner: B,
    index: FieldIndex<S::Position, F>,
}

impl<S: Space, F: Field, B: Buffer<S, F>> IndexedBuffer<S, F, B> {
    /// Decorate `inner`.
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            index: FieldIndex::new(),
        }
    }

    /// Positions holding `field`, in region order. Empty for null.
    pub fn positions_of(&self, field: &F) -> &[S::Position] {
        self.index.positions_of(&self.inner, field)
    }

    /// The first position holding `field`, or out-of-bounds.
    pub fn first_position_of(&self, field: &F) -> S::Position {
        match self.positions_of(field).first() {
            Some(position) => position.clone(),
            None => self.inner.region().space().out_of_bounds(),
        }
    }

    /// The index, for inspection.
    pub fn index(&self) -> &FieldIndex<S::Position, F> {
        &self.index
    }

    /// The decorated buffer.
    pub fn inner(&self) -> &B {
        &self.inner
    }

    /// Remove the decoration.
    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<S: Space, F: Field, B: Buffer<S, F>> Buffer<S, F> for IndexedBuffer<S, F, B> {
    fn id(&self) -> BufferId {
        self.inner.id()
    }

    fn region(&self) -> &Region<S> {
        self.inner.region()
    }

    fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    fn index_of(&self, position: &S::Position) -> Option<usize> {
        self.inner.index_of(position)
    }

    fn get(&self, position: &S::Position) -> F {
        self.inner.get(position)
    }

    fn set(&mut self, position: S::Position, field: F) -> Result<SetOutcome<Self>, BufferError> {
        Ok(match self.inner.set(position, field)? {
            SetOutcome::SameInstance => {
                self.index.invalidate();
                SetOutcome::SameInstance
            }
            SetOutcome::NewInstance(next) => SetOutcome::NewInstance(Self::new(next)),
        })
    }

    fn references(&self) -> &ReferenceCount {
        self.inner.references()
    }
}

/// Matches positions whose stored Field equals a value.
///
/// Reads the buffer at search time. Positions the buffer does not address
/// never match.
pub struct FieldEquals<'a, B, F> {
    buffer: &'a B,
    field: F,
}

impl<'a, B, F> FieldEquals<'a, B, F> {
    /// Match positions of `buffer` holding `field`.
    pub fn new(buffer: &'a B, field: F) -> Self {
        Self { buffer, field }
    }
}

impl<S, F, B> Criterion<S> for FieldEquals<'_, B, F>
where
    S: Space,
    F: Field,
    B: Buffer<S, F>,
{
    fn matches(&self, position: &S::Position) -> bool {
        self.buffer.contains(position) && self.buffer.get(position) == self.field
    }
}
