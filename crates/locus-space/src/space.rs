//! The core `Space` trait and the `Position`/`Size` capability traits.

use std::fmt::Debug;
use std::hash::Hash;

use locus_core::SpaceInstanceId;

use crate::expr::{PositionExpr, SizeExpr};
use crate::region::{Region, RegionExpr};
use crate::sparse::SparseRegionBuilder;

/// A single addressable point within a [`Space`].
///
/// Positions are immutable values, totally ordered within their space and
/// compared/hashed by coordinate. Blanket-implemented for every type with
/// the required capabilities.
pub trait Position: Clone + Eq + Ord + Hash + Debug + Send + Sync + 'static {}

impl<T> Position for T where T: Clone + Eq + Ord + Hash + Debug + Send + Sync + 'static {}

/// A displacement or extent between two positions of a [`Space`].
///
/// Blanket-implemented for every type with the required capabilities.
pub trait Size: Clone + Eq + Ord + Hash + Debug + Send + Sync + 'static {}

impl<T> Size for T where T: Clone + Eq + Ord + Hash + Debug + Send + Sync + 'static {}

/// Factory and law-giver for one coordinate universe.
///
/// A space defines the ordering of its positions, the unit step
/// [`one`](Self::one), and the sentinel values the arithmetic layer
/// answers with instead of failing: [`out_of_bounds`](Self::out_of_bounds)
/// for positions, [`none`](Self::none) for sizes, and
/// [`empty`](Self::empty) for regions.
///
/// Implementors supply the primitive operations below, returning `None`
/// whenever a result would leave the space. The expression layer
/// ([`PositionExpr`], [`SizeExpr`], [`RegionExpr`]) turns those `None`s
/// into sentinels, so callers can chain arithmetic without per-step
/// bounds checks.
///
/// # Laws
///
/// - Positions are totally ordered by `Ord`, and every valid position `p`
///   satisfies `min() <= p <= max()`.
/// - `out_of_bounds()` is never a valid position.
/// - Size addition is associative and `none()` is its identity.
/// - While in bounds, `offset(retreat(p, s), s) == p` and
///   `retreat(offset(p, s), s) == p`.
/// - `offset(p, one())` is the immediate successor of `p`: no valid
///   position lies strictly between them.
///
/// `locus-test-utils` ships a compliance suite that checks these laws
/// for any implementation.
///
/// # Thread Safety
///
/// Spaces are immutable descriptions and are shared freely between
/// threads; `Send + Sync` is required.
pub trait Space: Clone + Debug + Send + Sync + 'static {
    /// Point type of this space.
    type Position: Position;

    /// Extent type of this space.
    type Size: Size;

    /// Unique instance identifier for this space object.
    ///
    /// Used to detect regions from a different space instance being mixed
    /// into an operation.
    fn instance_id(&self) -> SpaceInstanceId;

    /// Smallest valid position.
    fn min(&self) -> Self::Position;

    /// Largest valid position.
    fn max(&self) -> Self::Position;

    /// Sentinel answered by any position arithmetic that leaves the space.
    fn out_of_bounds(&self) -> Self::Position;

    /// The zero size. Also the sentinel for failed size arithmetic.
    fn none(&self) -> Self::Size;

    /// The unit step between consecutive positions.
    fn one(&self) -> Self::Size;

    /// `position + size`, or `None` if the result leaves the space.
    fn offset(&self, position: &Self::Position, size: &Self::Size) -> Option<Self::Position>;

    /// `position - size`, or `None` if the result leaves the space.
    fn retreat(&self, position: &Self::Position, size: &Self::Size) -> Option<Self::Position>;

    /// The size `to - from`, or `None` if `to < from`.
    fn distance(&self, from: &Self::Position, to: &Self::Position) -> Option<Self::Size>;

    /// `a + b`, or `None` on overflow.
    fn size_add(&self, a: &Self::Size, b: &Self::Size) -> Option<Self::Size>;

    /// `a - b`, or `None` if `b > a`.
    fn size_subtract(&self, a: &Self::Size, b: &Self::Size) -> Option<Self::Size>;

    /// `size * factor`, or `None` if the factor is negative or not finite.
    fn size_multiply(&self, size: &Self::Size, factor: f64) -> Option<Self::Size>;

    /// `size / divisor`, or `None` if the divisor is not strictly positive.
    fn size_divide(&self, size: &Self::Size, divisor: f64) -> Option<Self::Size>;

    /// `size mod modulus`, or `None` if the modulus is zero.
    fn size_modulo(&self, size: &Self::Size, modulus: &Self::Size) -> Option<Self::Size>;

    /// Dimensionless ratio `size / unit`; `NaN` if `unit` is zero.
    fn ratio(&self, size: &Self::Size, unit: &Self::Size) -> f64;

    /// Alias for [`none`](Self::none).
    fn zero(&self) -> Self::Size {
        self.none()
    }

    /// Reference position for offsets; defaults to [`min`](Self::min).
    fn origin(&self) -> Self::Position {
        self.min()
    }

    /// Returns `true` if `self` and `other` describe the same universe.
    ///
    /// Defaults to instance identity.
    fn topology_eq(&self, other: &Self) -> bool {
        self.instance_id() == other.instance_id()
    }

    /// Returns `true` if `position` is a valid, in-bounds position.
    fn contains_position(&self, position: &Self::Position) -> bool {
        *position != self.out_of_bounds() && self.min() <= *position && *position <= self.max()
    }

    /// The region `[start, end]`, or the empty region if the endpoints are
    /// invalid or reversed.
    fn region(&self, start: Self::Position, end: Self::Position) -> Region<Self> {
        Region::new(self.clone(), start, end)
    }

    /// The empty region of this space.
    fn empty(&self) -> Region<Self> {
        Region::empty(self.clone())
    }

    /// The region spanning every valid position.
    fn all(&self) -> Region<Self> {
        Region::new(self.clone(), self.min(), self.max())
    }

    /// Unbounded arithmetic starting at `position`.
    fn expr(&self, position: Self::Position) -> PositionExpr<'_, Self> {
        PositionExpr::new(self, position)
    }

    /// Size arithmetic starting at `size`.
    fn size_expr(&self, size: Self::Size) -> SizeExpr<'_, Self> {
        SizeExpr::new(self, size)
    }

    /// Region algebra starting at `region`.
    ///
    /// A region from a different space instance starts the expression at
    /// the empty region.
    fn region_expr(&self, region: &Region<Self>) -> RegionExpr<Self> {
        if region.space().topology_eq(self) {
            RegionExpr::new(region.clone())
        } else {
            RegionExpr::new(self.empty())
        }
    }

    /// A builder for sparse regions of this space.
    fn sparse_region_builder(&self) -> SparseRegionBuilder<Self> {
        SparseRegionBuilder::new(self.clone())
    }
}
