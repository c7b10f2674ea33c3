//! Position predicates for region search.

use crate::space::Space;

/// A predicate over the positions of space `S`.
///
/// A criterion may also name a single [`target`](Self::target) position.
/// Searches use the target to locate a match by binary search over
/// sub-regions instead of walking every position.
pub trait Criterion<S: Space> {
    /// Returns `true` if `position` satisfies the criterion.
    fn matches(&self, position: &S::Position) -> bool;

    /// The only position this criterion can match, if it is that specific.
    fn target(&self) -> Option<&S::Position> {
        None
    }
}

impl<S: Space, C: Criterion<S> + ?Sized> Criterion<S> for &C {
    fn matches(&self, position: &S::Position) -> bool {
        (**self).matches(position)
    }

    fn target(&self) -> Option<&S::Position> {
        (**self).target()
    }
}

/// Matches exactly one position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpecificPosition<P>(pub P);

impl<S: Space> Criterion<S> for SpecificPosition<S::Position> {
    fn matches(&self, position: &S::Position) -> bool {
        *position == self.0
    }

    fn target(&self) -> Option<&S::Position> {
        Some(&self.0)
    }
}

/// Matches every position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnyPosition;

impl<S: Space> Criterion<S> for AnyPosition {
    fn matches(&self, _position: &S::Position) -> bool {
        true
    }
}

/// Matches positions for which a closure answers `true`.
#[derive(Clone, Copy, Debug)]
pub struct Matching<F>(pub F);

impl<S, F> Criterion<S> for Matching<F>
where
    S: Space,
    F: Fn(&S::Position) -> bool,
{
    fn matches(&self, position: &S::Position) -> bool {
        (self.0)(position)
    }
}

/// Matches positions the wrapped criterion rejects.
#[derive(Clone, Copy, Debug)]
pub struct Not<C>(pub C);

impl<S: Space, C: Criterion<S>> Criterion<S> for Not<C> {
    fn matches(&self, position: &S::Position) -> bool {
        !self.0.matches(position)
    }
}
