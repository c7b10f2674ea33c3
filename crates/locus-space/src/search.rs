//! Ordered search over the positions of a region.

use std::marker::PhantomData;

use tracing::trace;

use crate::criterion::Criterion;
use crate::region::Region;
use crate::regional::{signed_index, Positions, Regional};
use crate::space::Space;
use crate::sparse::SparseRegion;

/// A criterion bound to a region.
///
/// Created by [`Regional::search`]. Positions are visited in order,
/// skipping holes. Criteria naming a [`target`](Criterion::target) are
/// answered by binary search over the sub-regions instead.
pub struct Search<'a, S: Space, R: Regional<S> + ?Sized, C> {
    region: &'a R,
    criterion: C,
    _space: PhantomData<fn() -> S>,
}

impl<'a, S: Space, R: Regional<S> + ?Sized, C: Criterion<S>> Search<'a, S, R, C> {
    /// Bind `criterion` to `region`.
    pub fn new(region: &'a R, criterion: C) -> Self {
        Self {
            region,
            criterion,
            _space: PhantomData,
        }
    }

    /// The target position, if the criterion names one and the region
    /// holds it.
    fn held_target(&self) -> Option<Option<&S::Position>> {
        self.criterion.target().map(|target| {
            (self.region.contains(target) && self.criterion.matches(target)).then_some(target)
        })
    }

    /// First matching position, or out-of-bounds if none matches.
    pub fn find(&self) -> S::Position {
        let space = self.region.space();
        let found = match self.held_target() {
            Some(target) => target.cloned(),
            None => Positions::new(self.region).find(|p| self.criterion.matches(p)),
        };
        found.unwrap_or_else(|| space.out_of_bounds())
    }

    /// Index of the sub-region holding the first match.
    ///
    /// `Err(num_regions())` when nothing matches.
    pub fn find_sub_region(&self) -> Result<usize, usize> {
        let first = self.find();
        if first == self.region.space().out_of_bounds() {
            return Err(self.region.num_regions());
        }
        self.region.find_sub_region(&first)
    }

    /// Signed form of [`find_sub_region`](Self::find_sub_region).
    pub fn find_sub_region_index(&self) -> i64 {
        signed_index(self.find_sub_region())
    }

    /// Every matching position, as maximal contiguous runs.
    ///
    /// Runs never bridge a hole of the searched region.
    pub fn find_all(&self) -> SparseRegion<S> {
        let space = self.region.space();
        if let Some(target) = self.held_target() {
            let pieces = target
                .map(|t| Region::single(space.clone(), t.clone()))
                .into_iter()
                .collect();
            return SparseRegion::merged(space.clone(), pieces);
        }

        let one = space.one();
        let mut runs = Vec::new();
        let mut run: Option<(S::Position, S::Position)> = None;
        for position in Positions::new(self.region) {
            if !self.criterion.matches(&position) {
                if let Some((start, end)) = run.take() {
                    runs.push(Region::new(space.clone(), start, end));
                }
                continue;
            }
            run = match run.take() {
                Some((start, end)) if space.offset(&end, &one).as_ref() == Some(&position) => {
                    Some((start, position))
                }
                Some((start, end)) => {
                    runs.push(Region::new(space.clone(), start, end));
                    Some((position.clone(), position))
                }
                None => Some((position.clone(), position)),
            };
        }
        if let Some((start, end)) = run {
            runs.push(Region::new(space.clone(), start, end));
        }
        trace!(runs = runs.len(), "search collected matching runs");
        SparseRegion::merged(space.clone(), runs)
    }
}
