//! Chainable position and size arithmetic with sentinel propagation.
//!
//! Expressions never fail. A position step that leaves the space yields
//! [`Space::out_of_bounds`], and out-of-bounds is sticky: every further
//! step keeps it. Size arithmetic that cannot be represented yields
//! [`Space::none`].

use crate::region::{Region, RegionExpr};
use crate::space::Space;

/// Unbounded position arithmetic within one space.
///
/// Created by [`Space::expr`]. Steps consume and return the expression so
/// arithmetic chains read left to right:
///
/// ```ignore
/// let p = space.expr(start).add(&step).next().position();
/// ```
#[derive(Clone, Debug)]
pub struct PositionExpr<'a, S: Space> {
    space: &'a S,
    position: S::Position,
}

impl<'a, S: Space> PositionExpr<'a, S> {
    /// Start an expression at `position`. Invalid positions start out of
    /// bounds.
    pub fn new(space: &'a S, position: S::Position) -> Self {
        let position = if space.contains_position(&position) {
            position
        } else {
            space.out_of_bounds()
        };
        Self { space, position }
    }

    /// The space this expression computes in.
    pub fn space(&self) -> &'a S {
        self.space
    }

    /// The current position.
    pub fn position(&self) -> S::Position {
        self.position.clone()
    }

    /// Consume the expression, returning the current position.
    pub fn into_position(self) -> S::Position {
        self.position
    }

    /// Returns `true` once a step has left the space.
    pub fn is_out_of_bounds(&self) -> bool {
        self.position == self.space.out_of_bounds()
    }

    fn settle(mut self, stepped: Option<S::Position>) -> Self {
        self.position = match stepped {
            Some(p) if self.space.contains_position(&p) => p,
            _ => self.space.out_of_bounds(),
        };
        self
    }

    /// Move forward by `size`.
    pub fn add(self, size: &S::Size) -> Self {
        if self.is_out_of_bounds() {
            return self;
        }
        let stepped = self.space.offset(&self.position, size);
        self.settle(stepped)
    }

    /// Move backward by `size`.
    pub fn subtract(self, size: &S::Size) -> Self {
        if self.is_out_of_bounds() {
            return self;
        }
        let stepped = self.space.retreat(&self.position, size);
        self.settle(stepped)
    }

    /// Move forward by one unit.
    pub fn next(self) -> Self {
        let one = self.space.one();
        self.add(&one)
    }

    /// Move backward by one unit.
    pub fn previous(self) -> Self {
        let one = self.space.one();
        self.subtract(&one)
    }

    /// The size from `that` up to the current position.
    ///
    /// Yields `none()` when either end is invalid or `that` lies after the
    /// current position.
    pub fn distance_from(&self, that: &S::Position) -> SizeExpr<'a, S> {
        let size = if self.is_out_of_bounds() || !self.space.contains_position(that) {
            None
        } else {
            self.space.distance(that, &self.position)
        };
        SizeExpr::settled(self.space, size)
    }

    /// The current position's offset from the origin, reduced modulo `size`.
    pub fn modulo(&self, size: &S::Size) -> SizeExpr<'a, S> {
        let size = if self.is_out_of_bounds() {
            None
        } else {
            self.space
                .distance(&self.space.origin(), &self.position)
                .and_then(|offset| self.space.size_modulo(&offset, size))
        };
        SizeExpr::settled(self.space, size)
    }

    /// Region algebra over `[current, that]`.
    pub fn to(&self, that: S::Position) -> RegionExpr<S> {
        RegionExpr::new(Region::new(self.space.clone(), self.position.clone(), that))
    }
}

/// Size arithmetic within one space.
///
/// Created by [`Space::size_expr`]. Unrepresentable results become
/// [`Space::none`].
#[derive(Clone, Debug)]
pub struct SizeExpr<'a, S: Space> {
    space: &'a S,
    size: S::Size,
}

impl<'a, S: Space> SizeExpr<'a, S> {
    /// Start an expression at `size`.
    pub fn new(space: &'a S, size: S::Size) -> Self {
        Self { space, size }
    }

    fn settled(space: &'a S, size: Option<S::Size>) -> Self {
        let size = size.unwrap_or_else(|| space.none());
        Self { space, size }
    }

    /// The current size.
    pub fn size(&self) -> S::Size {
        self.size.clone()
    }

    /// Consume the expression, returning the current size.
    pub fn into_size(self) -> S::Size {
        self.size
    }

    /// Returns `true` if the current size is zero.
    pub fn is_none(&self) -> bool {
        self.size == self.space.none()
    }

    /// `self + size`.
    pub fn add(self, size: &S::Size) -> Self {
        let sum = self.space.size_add(&self.size, size);
        Self::settled(self.space, sum)
    }

    /// `self - size`.
    pub fn subtract(self, size: &S::Size) -> Self {
        let difference = self.space.size_subtract(&self.size, size);
        Self::settled(self.space, difference)
    }

    /// `self * factor`.
    pub fn multiply(self, factor: f64) -> Self {
        let product = self.space.size_multiply(&self.size, factor);
        Self::settled(self.space, product)
    }

    /// `self / divisor`.
    pub fn divide(self, divisor: f64) -> Self {
        let quotient = self.space.size_divide(&self.size, divisor);
        Self::settled(self.space, quotient)
    }

    /// `self mod modulus`.
    pub fn modulo(self, modulus: &S::Size) -> Self {
        let remainder = self.space.size_modulo(&self.size, modulus);
        Self::settled(self.space, remainder)
    }

    /// Dimensionless ratio `self / unit`.
    pub fn ratio(&self, unit: &S::Size) -> f64 {
        self.space.ratio(&self.size, unit)
    }
}
