//! The contract shared by contiguous and sparse regions, with bounded
//! stepping and ordered traversal.

use std::iter::FusedIterator;

use locus_core::RegionError;

use crate::criterion::Criterion;
use crate::region::Region;
use crate::search::Search;
use crate::space::Space;

/// Anything made of ordered, disjoint, contiguous sub-regions of one space.
///
/// A [`Region`] is the single-piece case (zero pieces when empty); a
/// [`SparseRegion`](crate::SparseRegion) may hold many, separated by
/// holes. Sub-regions are indexed `0..num_regions()` in position order.
pub trait Regional<S: Space> {
    /// The owning space.
    fn space(&self) -> &S;

    /// First position, or out-of-bounds when empty.
    fn start(&self) -> S::Position;

    /// Last position, or out-of-bounds when empty.
    fn end(&self) -> S::Position;

    /// Number of positions held, as a space size.
    fn size(&self) -> S::Size;

    /// Number of contiguous sub-regions.
    fn num_regions(&self) -> usize;

    /// The sub-region at `index`, if any.
    fn sub_region(&self, index: usize) -> Option<&Region<S>>;

    /// Locate the sub-region holding `target`.
    ///
    /// `Ok(i)` if sub-region `i` contains `target`. Otherwise `Err(k)`,
    /// where `k` is the index of the first sub-region starting after
    /// `target` (`num_regions()` if none does). A value the space does not
    /// accept as a position, the out-of-bounds sentinel included, always
    /// answers `Err(num_regions())`.
    fn find_sub_region(&self, target: &S::Position) -> Result<usize, usize>;

    /// Returns `true` if no positions are held.
    fn is_empty(&self) -> bool {
        self.num_regions() == 0
    }

    /// Returns `true` if `position` lies in some sub-region.
    fn contains(&self, position: &S::Position) -> bool {
        self.find_sub_region(position).is_ok()
    }

    /// The sub-region at `index`, or the empty region past the end.
    fn region(&self, index: usize) -> Region<S> {
        match self.sub_region(index) {
            Some(region) => region.clone(),
            None => self.space().empty(),
        }
    }

    /// Signed form of [`find_sub_region`](Self::find_sub_region): the
    /// index when found, otherwise `-(insertion_point) - 1`.
    fn find_sub_region_index(&self, target: &S::Position) -> i64 {
        signed_index(self.find_sub_region(target))
    }

    /// Bounded stepping starting at `position`.
    fn expr(&self, position: S::Position) -> RegionalPositionExpr<'_, S, Self>
    where
        Self: Sized,
    {
        RegionalPositionExpr::new(self, position)
    }

    /// Every held position, in order.
    fn positions(&self) -> Positions<'_, S, Self>
    where
        Self: Sized,
    {
        Positions::new(self)
    }

    /// Search this region for positions satisfying `criterion`.
    fn search<C: Criterion<S>>(&self, criterion: C) -> Search<'_, S, Self, C>
    where
        Self: Sized,
    {
        Search::new(self, criterion)
    }
}

pub(crate) fn signed_index(found: Result<usize, usize>) -> i64 {
    match found {
        Ok(index) => index as i64,
        Err(insertion) => -(insertion as i64) - 1,
    }
}

/// Position arithmetic confined to a region.
///
/// Created by [`Regional::expr`]. [`next`](Self::next) and
/// [`previous`](Self::previous) step to the adjacent held position,
/// jumping holes between sub-regions. [`add`](Self::add) and
/// [`subtract`](Self::subtract) do plain arithmetic and require the
/// result to be held. Anything else yields out-of-bounds, which is
/// sticky.
pub struct RegionalPositionExpr<'a, S: Space, R: Regional<S> + ?Sized> {
    region: &'a R,
    position: S::Position,
}

impl<'a, S: Space, R: Regional<S> + ?Sized> RegionalPositionExpr<'a, S, R> {
    /// Start at `position`.
    ///
    /// Positions inside a hole are kept so stepping can jump from them;
    /// positions outside `[start, end]` start out of bounds.
    pub fn new(region: &'a R, position: S::Position) -> Self {
        let within = !region.is_empty()
            && region.space().contains_position(&position)
            && region.start() <= position
            && position <= region.end();
        let position = if within {
            position
        } else {
            region.space().out_of_bounds()
        };
        Self { region, position }
    }

    /// The current position.
    pub fn position(&self) -> S::Position {
        self.position.clone()
    }

    /// Consume the expression, returning the current position.
    pub fn into_position(self) -> S::Position {
        self.position
    }

    /// Returns `true` once a step has left the region.
    pub fn is_out_of_bounds(&self) -> bool {
        self.position == self.region.space().out_of_bounds()
    }

    fn moved(mut self, position: Option<S::Position>) -> Self {
        self.position = position.unwrap_or_else(|| self.region.space().out_of_bounds());
        self
    }

    /// Start of sub-region `index`, if it exists.
    fn start_of(&self, index: usize) -> Option<S::Position> {
        self.region.sub_region(index).map(Region::start)
    }

    /// End of the sub-region before insertion point `index`, if any.
    fn end_before(&self, index: usize) -> Option<S::Position> {
        let before = index.checked_sub(1)?;
        self.region.sub_region(before).map(Region::end)
    }

    /// Step to the following held position.
    pub fn next(self) -> Self {
        if self.is_out_of_bounds() {
            return self;
        }
        let space = self.region.space();
        let following = match self.region.find_sub_region(&self.position) {
            Ok(_) => space
                .offset(&self.position, &space.one())
                .filter(|p| space.contains_position(p))
                .and_then(|candidate| match self.region.find_sub_region(&candidate) {
                    Ok(_) => Some(candidate),
                    Err(k) => self.start_of(k),
                }),
            Err(k) => self.start_of(k),
        };
        self.moved(following)
    }

    /// Step to the preceding held position.
    pub fn previous(self) -> Self {
        if self.is_out_of_bounds() {
            return self;
        }
        let space = self.region.space();
        let preceding = match self.region.find_sub_region(&self.position) {
            Ok(_) => space
                .retreat(&self.position, &space.one())
                .filter(|p| space.contains_position(p))
                .and_then(|candidate| match self.region.find_sub_region(&candidate) {
                    Ok(_) => Some(candidate),
                    Err(k) => self.end_before(k),
                }),
            Err(k) => self.end_before(k),
        };
        self.moved(preceding)
    }

    /// Move forward by `size`; the result must be held.
    pub fn add(self, size: &S::Size) -> Self {
        if self.is_out_of_bounds() {
            return self;
        }
        let stepped = self
            .region
            .space()
            .offset(&self.position, size)
            .filter(|p| self.region.contains(p));
        self.moved(stepped)
    }

    /// Move backward by `size`; the result must be held.
    pub fn subtract(self, size: &S::Size) -> Self {
        if self.is_out_of_bounds() {
            return self;
        }
        let stepped = self
            .region
            .space()
            .retreat(&self.position, size)
            .filter(|p| self.region.contains(p));
        self.moved(stepped)
    }
}

/// Ordered traversal of every position a region holds.
///
/// Created by [`Regional::positions`]. Holes between sub-regions are
/// skipped. Once the last position has been yielded the sequence is
/// exhausted: [`Iterator::next`] keeps answering `None` and
/// [`try_next`](Self::try_next) reports [`RegionError::Exhausted`].
pub struct Positions<'a, S: Space, R: Regional<S> + ?Sized> {
    region: &'a R,
    pending: Option<S::Position>,
}

impl<'a, S: Space, R: Regional<S> + ?Sized> Positions<'a, S, R> {
    /// A fresh traversal of `region`.
    pub fn new(region: &'a R) -> Self {
        let pending = (!region.is_empty()).then(|| region.start());
        Self { region, pending }
    }

    /// Returns `true` if another position remains.
    pub fn has_next(&self) -> bool {
        self.pending.is_some()
    }

    /// The next position, or [`RegionError::Exhausted`] past the end.
    pub fn try_next(&mut self) -> Result<S::Position, RegionError> {
        self.next().ok_or(RegionError::Exhausted)
    }
}

impl<S: Space, R: Regional<S> + ?Sized> Iterator for Positions<'_, S, R> {
    type Item = S::Position;

    fn next(&mut self) -> Option<S::Position> {
        let current = self.pending.take()?;
        let following = RegionalPositionExpr::new(self.region, current.clone()).next();
        if !following.is_out_of_bounds() {
            self.pending = Some(following.into_position());
        }
        Some(current)
    }
}

impl<S: Space, R: Regional<S> + ?Sized> FusedIterator for Positions<'_, S, R> {}
