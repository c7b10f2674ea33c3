//! Contiguous regions and region algebra.

use std::cmp::{max, min};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::criterion::Criterion;
use crate::regional::{Positions, Regional};
use crate::space::Space;
use crate::sparse::{SparseRegion, SparseRegionBuilder};

/// A contiguous, inclusive range `[start, end]` of positions in one space.
///
/// A region is either empty or satisfies `start <= end` with both
/// endpoints valid. Construction never fails: invalid or reversed
/// endpoints produce the empty region. An empty region reports
/// out-of-bounds for both endpoints and `none()` for its size.
///
/// Equality holds when both regions live in the same space instance and
/// have the same endpoints.
#[derive(Clone)]
pub struct Region<S: Space> {
    space: S,
    span: Option<(S::Position, S::Position)>,
}

impl<S: Space> Region<S> {
    /// The region `[start, end]`, or empty if either endpoint is invalid
    /// or `start > end`.
    pub fn new(space: S, start: S::Position, end: S::Position) -> Self {
        let valid = space.contains_position(&start) && space.contains_position(&end);
        let span = if valid && start <= end {
            Some((start, end))
        } else {
            None
        };
        Self { space, span }
    }

    /// The empty region of `space`.
    pub fn empty(space: S) -> Self {
        Self { space, span: None }
    }

    /// The region holding exactly `position`.
    pub fn single(space: S, position: S::Position) -> Self {
        Self::new(space, position.clone(), position)
    }

    /// The owning space.
    pub fn space(&self) -> &S {
        &self.space
    }

    /// Borrowed endpoints, or `None` when empty.
    pub fn bounds(&self) -> Option<(&S::Position, &S::Position)> {
        self.span.as_ref().map(|(s, e)| (s, e))
    }

    /// First position, or out-of-bounds when empty.
    pub fn start(&self) -> S::Position {
        match &self.span {
            Some((start, _)) => start.clone(),
            None => self.space.out_of_bounds(),
        }
    }

    /// Last position, or out-of-bounds when empty.
    pub fn end(&self) -> S::Position {
        match &self.span {
            Some((_, end)) => end.clone(),
            None => self.space.out_of_bounds(),
        }
    }

    /// Number of positions, as a space size. `none()` when empty.
    pub fn size(&self) -> S::Size {
        self.span
            .as_ref()
            .and_then(|(start, end)| self.space.distance(start, end))
            .and_then(|span| self.space.size_add(&span, &self.space.one()))
            .unwrap_or_else(|| self.space.none())
    }

    /// Returns `true` if the region holds no positions.
    pub fn is_empty(&self) -> bool {
        self.span.is_none()
    }

    /// Returns `true` if `position` is a valid position in `[start, end]`.
    ///
    /// The out-of-bounds sentinel is never contained.
    pub fn contains(&self, position: &S::Position) -> bool {
        match &self.span {
            Some((start, end)) => {
                start <= position && position <= end && self.space.contains_position(position)
            }
            None => false,
        }
    }

    /// Returns `true` if every position of `that` lies in `self`.
    ///
    /// The empty region is contained in every region of the same space.
    pub fn contains_region(&self, that: &Region<S>) -> bool {
        if !self.space.topology_eq(&that.space) {
            return false;
        }
        match that.bounds() {
            None => true,
            Some((start, end)) => self.contains(start) && self.contains(end),
        }
    }

    /// Region algebra starting at this region.
    pub fn region_expr(&self) -> RegionExpr<S> {
        RegionExpr::new(self.clone())
    }
}

impl<S: Space> Regional<S> for Region<S> {
    fn space(&self) -> &S {
        &self.space
    }

    fn start(&self) -> S::Position {
        Region::start(self)
    }

    fn end(&self) -> S::Position {
        Region::end(self)
    }

    fn size(&self) -> S::Size {
        Region::size(self)
    }

    fn num_regions(&self) -> usize {
        usize::from(self.span.is_some())
    }

    fn sub_region(&self, index: usize) -> Option<&Region<S>> {
        (index == 0 && self.span.is_some()).then_some(self)
    }

    fn find_sub_region(&self, target: &S::Position) -> Result<usize, usize> {
        let Some((start, end)) = self.bounds() else {
            return Err(0);
        };
        if !self.space.contains_position(target) || target > end {
            Err(1)
        } else if target < start {
            Err(0)
        } else {
            Ok(0)
        }
    }

    fn contains(&self, position: &S::Position) -> bool {
        Region::contains(self, position)
    }
}

impl<S: Space> PartialEq for Region<S> {
    fn eq(&self, other: &Self) -> bool {
        self.space.topology_eq(&other.space) && self.span == other.span
    }
}

impl<S: Space> Eq for Region<S> {}

impl<S: Space> Hash for Region<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.span.hash(state);
    }
}

impl<S: Space> fmt::Debug for Region<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.span {
            Some((start, end)) => write!(f, "[{start:?}..={end:?}]"),
            None => write!(f, "[empty]"),
        }
    }
}

impl<'a, S: Space> IntoIterator for &'a Region<S> {
    type Item = S::Position;
    type IntoIter = Positions<'a, S, Region<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.positions()
    }
}

/// Region algebra over one contiguous region.
///
/// Created by [`Space::region_expr`] or [`Region::region_expr`]. Operands
/// from a different space instance are treated as empty; results that
/// cannot be represented are empty.
#[derive(Clone, Debug)]
pub struct RegionExpr<S: Space> {
    region: Region<S>,
}

impl<S: Space> RegionExpr<S> {
    /// Start an expression at `region`.
    pub fn new(region: Region<S>) -> Self {
        Self { region }
    }

    /// The region this expression operates on.
    pub fn region(&self) -> &Region<S> {
        &self.region
    }

    /// Consume the expression, returning its region.
    pub fn into_region(self) -> Region<S> {
        self.region
    }

    fn space(&self) -> &S {
        &self.region.space
    }

    /// `that`, or `None` if it belongs to another space instance.
    fn same_space<'r>(&self, that: &'r Region<S>) -> Option<&'r Region<S>> {
        self.space().topology_eq(&that.space).then_some(that)
    }

    fn sparse(&self, pieces: Vec<Region<S>>) -> SparseRegion<S> {
        SparseRegion::merged(self.space().clone(), pieces)
    }

    /// Positions in both `self` and `that`.
    pub fn intersection(&self, that: &Region<S>) -> Region<S> {
        let space = self.space().clone();
        let Some(that) = self.same_space(that) else {
            return Region::empty(space);
        };
        match (self.region.bounds(), that.bounds()) {
            (Some((a_start, a_end)), Some((b_start, b_end))) => {
                let start = max(a_start, b_start).clone();
                let end = min(a_end, b_end).clone();
                Region::new(space, start, end)
            }
            _ => Region::empty(space),
        }
    }

    /// Positions in `self` or `that`, merged when they touch.
    pub fn union(&self, that: &Region<S>) -> SparseRegion<S> {
        let mut pieces = vec![self.region.clone()];
        if let Some(that) = self.same_space(that) {
            pieces.push(that.clone());
        }
        self.sparse(pieces)
    }

    /// Positions in `self` but not in `that`.
    pub fn subtract(&self, that: &Region<S>) -> SparseRegion<S> {
        let pieces = match self.same_space(that) {
            Some(that) => self.remainder(that),
            None => vec![self.region.clone()],
        };
        self.sparse(pieces)
    }

    /// Positions in exactly one of `self` and `that`.
    pub fn difference(&self, that: &Region<S>) -> SparseRegion<S> {
        let Some(that) = self.same_space(that) else {
            return self.sparse(vec![self.region.clone()]);
        };
        let mut pieces = self.remainder(that);
        pieces.extend(that.region_expr().remainder(&self.region));
        self.sparse(pieces)
    }

    /// Every valid position of the space not in `self`.
    pub fn invert(&self) -> SparseRegion<S> {
        let all = self.space().all();
        self.sparse(all.region_expr().remainder(&self.region))
    }

    /// The positions of `self` matching `criterion`, as maximal runs.
    pub fn filter<C: Criterion<S>>(&self, criterion: C) -> SparseRegion<S> {
        self.region.search(criterion).find_all()
    }

    /// Concatenate `that` onto a sparse-region builder seeded with `self`.
    pub fn concatenate(&self, that: &Region<S>) -> SparseRegionBuilder<S> {
        SparseRegionBuilder::new(self.space().clone())
            .concatenate(&self.region)
            .concatenate(that)
    }

    /// Grow or shrink the region symmetrically about its centre until it
    /// holds `size` positions.
    ///
    /// Any odd remainder goes to the end. Empty if `size` is zero, the
    /// region is empty, or the grown region would leave the space.
    pub fn scale(&self, size: &S::Size) -> Region<S> {
        let space = self.space();
        let Some((start, end)) = self.region.bounds() else {
            return space.empty();
        };
        if *size == space.none() {
            return space.empty();
        }
        let current = self.region.size();
        let growing = *size > current;
        let delta = if growing {
            space.size_subtract(size, &current)
        } else {
            space.size_subtract(&current, size)
        };
        let halves = delta.and_then(|delta| {
            let front = space.size_divide(&delta, 2.0)?;
            let back = space.size_subtract(&delta, &front)?;
            Some((front, back))
        });
        let Some((front, back)) = halves else {
            return space.empty();
        };
        let scaled = if growing {
            space.retreat(start, &front).zip(space.offset(end, &back))
        } else {
            space.offset(start, &front).zip(space.retreat(end, &back))
        };
        match scaled {
            Some((start, end)) => Region::new(space.clone(), start, end),
            None => space.empty(),
        }
    }

    /// Split into `pieces` contiguous regions of near-equal size.
    ///
    /// Sizes differ by at most one unit; the larger pieces come first.
    /// Asking for more pieces than positions yields one piece per
    /// position. Zero pieces, or an empty region, yield nothing.
    pub fn split_into(&self, pieces: usize) -> Vec<Region<S>> {
        let space = self.space();
        if pieces == 0 || self.region.is_empty() {
            return Vec::new();
        }
        if pieces == 1 {
            return vec![self.region.clone()];
        }
        let total = self.region.size();
        let Some(base) = space.size_divide(&total, pieces as f64) else {
            return Vec::new();
        };
        let mut extras = space
            .size_multiply(&base, pieces as f64)
            .and_then(|covered| space.size_subtract(&total, &covered))
            .unwrap_or_else(|| space.none());
        let one = space.one();

        let mut out = Vec::with_capacity(pieces);
        let mut cursor = self.region.start();
        for _ in 0..pieces {
            let this_size = if extras != space.none() {
                extras = space.size_subtract(&extras, &one).unwrap_or_else(|| space.none());
                space.size_add(&base, &one)
            } else {
                Some(base.clone())
            };
            let Some(this_size) = this_size.filter(|s| *s != space.none()) else {
                break;
            };
            let end = space
                .offset(&cursor, &this_size)
                .and_then(|next| space.retreat(&next, &one))
                .or_else(|| self.last_position_from(&cursor, &this_size));
            let Some(end) = end else { break };
            out.push(Region::new(space.clone(), cursor.clone(), end.clone()));
            match space.offset(&end, &one) {
                Some(next) if self.region.contains(&next) => cursor = next,
                _ => break,
            }
        }
        out
    }

    /// Split into consecutive regions of `size` positions.
    ///
    /// The final piece holds whatever remains. A zero size yields nothing;
    /// a size at least as large as the region yields the region itself.
    pub fn split_by(&self, size: &S::Size) -> Vec<Region<S>> {
        let space = self.space();
        if *size == space.none() || self.region.is_empty() {
            return Vec::new();
        }
        if *size >= self.region.size() {
            return vec![self.region.clone()];
        }
        let one = space.one();
        let region_end = self.region.end();

        let mut out = Vec::new();
        let mut cursor = self.region.start();
        loop {
            let next_start = space
                .offset(&cursor, size)
                .filter(|next| self.region.contains(next));
            match next_start {
                Some(next) => {
                    let end = space.retreat(&next, &one).unwrap_or_else(|| next.clone());
                    out.push(Region::new(space.clone(), cursor, end));
                    cursor = next;
                }
                None => {
                    out.push(Region::new(space.clone(), cursor, region_end));
                    break;
                }
            }
        }
        out
    }

    /// Last position of a run of `size` starting at `cursor` that ends
    /// exactly at the region end, for runs whose successor would leave
    /// the space.
    fn last_position_from(&self, cursor: &S::Position, size: &S::Size) -> Option<S::Position> {
        let space = self.space();
        let end = self.region.end();
        let run = space
            .distance(cursor, &end)
            .and_then(|d| space.size_add(&d, &space.one()))?;
        (run == *size).then_some(end)
    }

    /// `self` with `that` removed, as at most two ordered pieces.
    fn remainder(&self, that: &Region<S>) -> Vec<Region<S>> {
        let space = self.space();
        let Some((start, end)) = self.region.bounds() else {
            return Vec::new();
        };
        let Some((cut_start, cut_end)) = that.bounds() else {
            return vec![self.region.clone()];
        };
        if cut_end < start || cut_start > end {
            return vec![self.region.clone()];
        }
        let one = space.one();
        let mut pieces = Vec::with_capacity(2);
        if start < cut_start {
            if let Some(before) = space.retreat(cut_start, &one) {
                pieces.push(Region::new(space.clone(), start.clone(), before));
            }
        }
        if cut_end < end {
            if let Some(after) = space.offset(cut_end, &one) {
                pieces.push(Region::new(space.clone(), after, end.clone()));
            }
        }
        pieces
    }
}
