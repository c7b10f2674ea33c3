//! Sparse regions: ordered sets of disjoint contiguous regions.

use std::fmt;

use locus_core::{RegionError, SpaceInstanceId};
use smallvec::SmallVec;
use tracing::debug;

use crate::region::Region;
use crate::regional::{Positions, Regional};
use crate::space::Space;

/// Inline capacity for sub-region storage. Most sparse regions in practice
/// are a handful of runs.
type SubRegions<S> = SmallVec<[Region<S>; 4]>;

/// An ordered set of disjoint, non-adjacent, non-empty contiguous regions
/// of one space.
///
/// Built with [`SparseRegion::new`] or a [`SparseRegionBuilder`], which
/// flatten nested sparse regions, drop empty pieces, sort by start, and
/// merge pieces that overlap or touch. The result is canonical: two sparse
/// regions holding the same positions compare equal.
///
/// `start()` and `end()` come from the first and last sub-regions;
/// `size()` sums the sub-region sizes. Holes between sub-regions are
/// skipped by stepping and traversal.
#[derive(Clone)]
pub struct SparseRegion<S: Space> {
    space: S,
    sub_regions: SubRegions<S>,
    size: S::Size,
}

impl<S: Space> SparseRegion<S> {
    /// Build from `regions`, which must all belong to `space`.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::SpaceMismatch`] if any region belongs to a
    /// different space instance.
    pub fn new<I>(space: S, regions: I) -> Result<Self, RegionError>
    where
        I: IntoIterator<Item = Region<S>>,
    {
        regions
            .into_iter()
            .fold(SparseRegionBuilder::new(space), |builder, region| {
                builder.concatenate(&region)
            })
            .build()
    }

    /// The sparse region holding nothing.
    pub fn empty(space: S) -> Self {
        let size = space.none();
        Self {
            space,
            sub_regions: SubRegions::new(),
            size,
        }
    }

    /// Canonicalise `pieces`, all known to belong to `space`.
    pub(crate) fn merged(space: S, mut pieces: Vec<Region<S>>) -> Self {
        pieces.retain(|r| !r.is_empty());
        pieces.sort_by(|a, b| a.bounds().cmp(&b.bounds()));

        let one = space.one();
        let mut merged: Vec<(S::Position, S::Position)> = Vec::with_capacity(pieces.len());
        for piece in &pieces {
            let Some((start, end)) = piece.bounds() else {
                continue;
            };
            if let Some((_, last_end)) = merged.last_mut() {
                let touches = *start <= *last_end
                    || space.offset(last_end, &one).as_ref() == Some(start);
                if touches {
                    if *end > *last_end {
                        *last_end = end.clone();
                    }
                    continue;
                }
            }
            merged.push((start.clone(), end.clone()));
        }

        let sub_regions: SubRegions<S> = merged
            .into_iter()
            .map(|(start, end)| Region::new(space.clone(), start, end))
            .collect();
        let size = sub_regions
            .iter()
            .try_fold(space.none(), |total, r| space.size_add(&total, &r.size()))
            .unwrap_or_else(|| space.none());
        Self {
            space,
            sub_regions,
            size,
        }
    }

    /// The sub-regions, in position order.
    pub fn sub_regions(&self) -> &[Region<S>] {
        &self.sub_regions
    }

    /// The single sub-region, if this sparse region is contiguous.
    pub fn as_contiguous(&self) -> Option<&Region<S>> {
        match self.sub_regions.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    /// Returns `true` if every position of `region` is held.
    ///
    /// Because sub-regions never touch, a contiguous region is held only
    /// if a single sub-region contains it.
    pub fn contains_region(&self, region: &Region<S>) -> bool {
        if !self.space.topology_eq(region.space()) {
            return false;
        }
        let Some((start, _)) = region.bounds() else {
            return true;
        };
        match self.find_sub_region(start) {
            Ok(index) => self.sub_regions[index].contains_region(region),
            Err(_) => false,
        }
    }

    /// The holes between consecutive sub-regions, in order.
    pub fn gaps(&self) -> Vec<Region<S>> {
        let one = self.space.one();
        self.sub_regions
            .windows(2)
            .filter_map(|pair| {
                let (_, left_end) = pair[0].bounds()?;
                let (right_start, _) = pair[1].bounds()?;
                let start = self.space.offset(left_end, &one)?;
                let end = self.space.retreat(right_start, &one)?;
                Some(Region::new(self.space.clone(), start, end))
            })
            .collect()
    }
}

impl<S: Space> Regional<S> for SparseRegion<S> {
    fn space(&self) -> &S {
        &self.space
    }

    fn start(&self) -> S::Position {
        match self.sub_regions.first() {
            Some(first) => first.start(),
            None => self.space.out_of_bounds(),
        }
    }

    fn end(&self) -> S::Position {
        match self.sub_regions.last() {
            Some(last) => last.end(),
            None => self.space.out_of_bounds(),
        }
    }

    fn size(&self) -> S::Size {
        self.size.clone()
    }

    fn num_regions(&self) -> usize {
        self.sub_regions.len()
    }

    fn sub_region(&self, index: usize) -> Option<&Region<S>> {
        self.sub_regions.get(index)
    }

    fn find_sub_region(&self, target: &S::Position) -> Result<usize, usize> {
        if !self.space.contains_position(target) {
            return Err(self.sub_regions.len());
        }
        self.sub_regions.binary_search_by(|region| match region.bounds() {
            Some((_, end)) if end < target => std::cmp::Ordering::Less,
            Some((start, _)) if start > target => std::cmp::Ordering::Greater,
            _ => std::cmp::Ordering::Equal,
        })
    }
}

impl<S: Space> From<Region<S>> for SparseRegion<S> {
    fn from(region: Region<S>) -> Self {
        let space = region.space().clone();
        Self::merged(space, vec![region])
    }
}

impl<S: Space> PartialEq for SparseRegion<S> {
    fn eq(&self, other: &Self) -> bool {
        self.space.topology_eq(&other.space) && self.sub_regions == other.sub_regions
    }
}

impl<S: Space> Eq for SparseRegion<S> {}

impl<S: Space> PartialEq<Region<S>> for SparseRegion<S> {
    fn eq(&self, other: &Region<S>) -> bool {
        match self.sub_regions.as_slice() {
            [] => other.is_empty() && self.space.topology_eq(other.space()),
            [only] => only == other,
            _ => false,
        }
    }
}

impl<S: Space> PartialEq<SparseRegion<S>> for Region<S> {
    fn eq(&self, other: &SparseRegion<S>) -> bool {
        other == self
    }
}

impl<S: Space> fmt::Debug for SparseRegion<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.sub_regions.iter()).finish()
    }
}

impl<'a, S: Space> IntoIterator for &'a SparseRegion<S> {
    type Item = S::Position;
    type IntoIter = Positions<'a, S, SparseRegion<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.positions()
    }
}

/// Accumulates regions and sparse regions into a canonical
/// [`SparseRegion`].
///
/// The first piece from another space instance is remembered and reported
/// by [`build`](Self::build).
#[derive(Clone, Debug)]
pub struct SparseRegionBuilder<S: Space> {
    space: S,
    pieces: Vec<Region<S>>,
    mismatch: Option<SpaceInstanceId>,
}

impl<S: Space> SparseRegionBuilder<S> {
    /// An empty builder for `space`.
    pub fn new(space: S) -> Self {
        Self {
            space,
            pieces: Vec::new(),
            mismatch: None,
        }
    }

    /// Add every sub-region of `regional`.
    #[must_use]
    pub fn concatenate<R: Regional<S>>(mut self, regional: &R) -> Self {
        self.push(regional);
        self
    }

    /// Add every sub-region of `regional` in place.
    pub fn push<R: Regional<S>>(&mut self, regional: &R) {
        if !regional.space().topology_eq(&self.space) {
            let found = regional.space().instance_id();
            debug!(
                expected = %self.space.instance_id(),
                %found,
                "sparse region builder received a foreign region"
            );
            self.mismatch.get_or_insert(found);
            return;
        }
        self.pieces
            .extend((0..regional.num_regions()).filter_map(|i| regional.sub_region(i).cloned()));
    }

    /// Number of pieces accumulated so far, before merging.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Returns `true` if nothing has been accumulated.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Flatten, sort and merge the accumulated pieces.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::SpaceMismatch`] if any piece came from a
    /// different space instance.
    pub fn build(self) -> Result<SparseRegion<S>, RegionError> {
        if let Some(found) = self.mismatch {
            return Err(RegionError::SpaceMismatch {
                expected: self.space.instance_id(),
                found,
            });
        }
        Ok(SparseRegion::merged(self.space, self.pieces))
    }
}
