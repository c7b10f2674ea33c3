//! Concrete spaces for exercising the `Space` contract.

use locus_core::SpaceInstanceId;
use locus_space::Space;

/// Integer multiplier for `factor`, if it is a whole, representable
/// number.
fn whole(factor: f64) -> Option<u64> {
    (factor.is_finite() && factor >= 0.0 && factor.fract() == 0.0 && factor <= u64::MAX as f64)
        .then_some(factor as u64)
}

fn scale(size: u64, factor: f64) -> Option<u64> {
    if let Some(n) = whole(factor) {
        return size.checked_mul(n);
    }
    let scaled = (size as f64 * factor).floor();
    (factor.is_finite() && factor >= 0.0 && scaled <= u64::MAX as f64).then_some(scaled as u64)
}

fn shrink(size: u64, divisor: f64) -> Option<u64> {
    if !(divisor.is_finite() && divisor > 0.0) {
        return None;
    }
    match whole(divisor) {
        Some(n) => Some(size / n),
        None => {
            let shrunk = (size as f64 / divisor).floor();
            (shrunk <= u64::MAX as f64).then_some(shrunk as u64)
        }
    }
}

fn ratio(size: u64, unit: u64) -> f64 {
    if unit == 0 {
        f64::NAN
    } else {
        size as f64 / unit as f64
    }
}

/// A line of `len` positions `0..len`, sized in position counts.
///
/// `u64::MAX` is the out-of-bounds sentinel, so `len` may be at most
/// `u64::MAX`.
///
/// # Examples
///
/// ```
/// use locus_space::Space;
/// use locus_test_utils::LinearSpace;
///
/// let line = LinearSpace::new(16);
/// assert_eq!(line.max(), 15);
/// assert_eq!(line.expr(15).next().position(), line.out_of_bounds());
/// ```
#[derive(Clone, Debug)]
pub struct LinearSpace {
    len: u64,
    instance_id: SpaceInstanceId,
}

impl LinearSpace {
    /// The out-of-bounds sentinel.
    pub const OUT_OF_BOUNDS: u64 = u64::MAX;

    /// A line of `len` positions.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero.
    pub fn new(len: u64) -> Self {
        assert!(len > 0, "LinearSpace needs at least one position");
        Self {
            len,
            instance_id: SpaceInstanceId::next(),
        }
    }

    /// The largest line this type can describe.
    pub fn maximal() -> Self {
        Self::new(u64::MAX)
    }

    /// Number of positions.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Always `false`; construction rejects empty lines.
    pub fn is_empty(&self) -> bool {
        false
    }

    fn valid(&self, position: u64) -> Option<u64> {
        (position < self.len).then_some(position)
    }
}

impl Space for LinearSpace {
    type Position = u64;
    type Size = u64;

    fn instance_id(&self) -> SpaceInstanceId {
        self.instance_id
    }

    fn min(&self) -> u64 {
        0
    }

    fn max(&self) -> u64 {
        self.len - 1
    }

    fn out_of_bounds(&self) -> u64 {
        Self::OUT_OF_BOUNDS
    }

    fn none(&self) -> u64 {
        0
    }

    fn one(&self) -> u64 {
        1
    }

    fn offset(&self, position: &u64, size: &u64) -> Option<u64> {
        self.valid(*position)?;
        position.checked_add(*size).and_then(|p| self.valid(p))
    }

    fn retreat(&self, position: &u64, size: &u64) -> Option<u64> {
        self.valid(*position)?;
        position.checked_sub(*size)
    }

    fn distance(&self, from: &u64, to: &u64) -> Option<u64> {
        to.checked_sub(*from)
    }

    fn size_add(&self, a: &u64, b: &u64) -> Option<u64> {
        a.checked_add(*b)
    }

    fn size_subtract(&self, a: &u64, b: &u64) -> Option<u64> {
        a.checked_sub(*b)
    }

    fn size_multiply(&self, size: &u64, factor: f64) -> Option<u64> {
        scale(*size, factor)
    }

    fn size_divide(&self, size: &u64, divisor: f64) -> Option<u64> {
        shrink(*size, divisor)
    }

    fn size_modulo(&self, size: &u64, modulus: &u64) -> Option<u64> {
        size.checked_rem(*modulus)
    }

    fn ratio(&self, size: &u64, unit: &u64) -> f64 {
        ratio(*size, *unit)
    }
}

/// A `rows × cols` grid addressed by `(row, col)`, ordered row-major.
///
/// Sizes count cells in row-major order, so stepping past the end of a
/// row continues at the start of the next one.
#[derive(Clone, Debug)]
pub struct GridSpace {
    rows: u32,
    cols: u32,
    instance_id: SpaceInstanceId,
}

impl GridSpace {
    /// The out-of-bounds sentinel.
    pub const OUT_OF_BOUNDS: (u32, u32) = (u32::MAX, u32::MAX);

    /// A grid with `rows` rows of `cols` cells.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or `u32::MAX`.
    pub fn new(rows: u32, cols: u32) -> Self {
        assert!(rows > 0 && cols > 0, "GridSpace needs at least one cell");
        assert!(
            rows < u32::MAX && cols < u32::MAX,
            "u32::MAX is reserved for the out-of-bounds sentinel"
        );
        Self {
            rows,
            cols,
            instance_id: SpaceInstanceId::next(),
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of cells per row.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    fn cell_count(&self) -> u64 {
        u64::from(self.rows) * u64::from(self.cols)
    }

    fn rank(&self, (row, col): (u32, u32)) -> Option<u64> {
        (row < self.rows && col < self.cols)
            .then(|| u64::from(row) * u64::from(self.cols) + u64::from(col))
    }

    fn unrank(&self, rank: u64) -> Option<(u32, u32)> {
        if rank >= self.cell_count() {
            return None;
        }
        let cols = u64::from(self.cols);
        let row = u32::try_from(rank / cols).ok()?;
        let col = u32::try_from(rank % cols).ok()?;
        Some((row, col))
    }
}

impl Space for GridSpace {
    type Position = (u32, u32);
    type Size = u64;

    fn instance_id(&self) -> SpaceInstanceId {
        self.instance_id
    }

    fn min(&self) -> (u32, u32) {
        (0, 0)
    }

    fn max(&self) -> (u32, u32) {
        (self.rows - 1, self.cols - 1)
    }

    fn out_of_bounds(&self) -> (u32, u32) {
        Self::OUT_OF_BOUNDS
    }

    fn contains_position(&self, position: &(u32, u32)) -> bool {
        self.rank(*position).is_some()
    }

    fn none(&self) -> u64 {
        0
    }

    fn one(&self) -> u64 {
        1
    }

    fn offset(&self, position: &(u32, u32), size: &u64) -> Option<(u32, u32)> {
        let rank = self.rank(*position)?.checked_add(*size)?;
        self.unrank(rank)
    }

    fn retreat(&self, position: &(u32, u32), size: &u64) -> Option<(u32, u32)> {
        let rank = self.rank(*position)?.checked_sub(*size)?;
        self.unrank(rank)
    }

    fn distance(&self, from: &(u32, u32), to: &(u32, u32)) -> Option<u64> {
        self.rank(*to)?.checked_sub(self.rank(*from)?)
    }

    fn size_add(&self, a: &u64, b: &u64) -> Option<u64> {
        a.checked_add(*b)
    }

    fn size_subtract(&self, a: &u64, b: &u64) -> Option<u64> {
        a.checked_sub(*b)
    }

    fn size_multiply(&self, size: &u64, factor: f64) -> Option<u64> {
        scale(*size, factor)
    }

    fn size_divide(&self, size: &u64, divisor: f64) -> Option<u64> {
        shrink(*size, divisor)
    }

    fn size_modulo(&self, size: &u64, modulus: &u64) -> Option<u64> {
        size.checked_rem(*modulus)
    }

    fn ratio(&self, size: &u64, unit: &u64) -> f64 {
        ratio(*size, *unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_bounds() {
        let line = LinearSpace::new(10);
        assert_eq!(line.min(), 0);
        assert_eq!(line.max(), 9);
        assert!(!line.contains_position(&10));
        assert!(!line.contains_position(&LinearSpace::OUT_OF_BOUNDS));
    }

    #[test]
    fn linear_offset_leaves_space_at_end() {
        let line = LinearSpace::new(10);
        assert_eq!(line.offset(&8, &1), Some(9));
        assert_eq!(line.offset(&9, &1), None);
        assert_eq!(line.retreat(&0, &1), None);
    }

    #[test]
    fn linear_divide_floors() {
        let line = LinearSpace::new(10);
        assert_eq!(line.size_divide(&7, 2.0), Some(3));
        assert_eq!(line.size_divide(&7, 0.0), None);
        assert_eq!(line.size_multiply(&7, 1.5), Some(10));
        assert_eq!(line.size_multiply(&7, -1.0), None);
    }

    #[test]
    fn ratio_against_zero_is_nan() {
        let line = LinearSpace::new(10);
        assert!(line.ratio(&4, &0).is_nan());
        assert_eq!(line.ratio(&4, &2), 2.0);
    }

    #[test]
    fn grid_steps_wrap_rows() {
        let grid = GridSpace::new(3, 4);
        assert_eq!(grid.offset(&(0, 3), &1), Some((1, 0)));
        assert_eq!(grid.retreat(&(1, 0), &1), Some((0, 3)));
        assert_eq!(grid.offset(&(2, 3), &1), None);
        assert_eq!(grid.distance(&(0, 1), &(2, 0)), Some(7));
        assert_eq!(grid.distance(&(2, 0), &(0, 1)), None);
    }

    #[test]
    fn grid_rejects_cells_outside_dimensions() {
        let grid = GridSpace::new(3, 4);
        assert!(grid.contains_position(&(2, 3)));
        assert!(!grid.contains_position(&(0, 4)));
        assert!(!grid.contains_position(&GridSpace::OUT_OF_BOUNDS));
    }

    #[test]
    fn distinct_instances_are_not_topology_equal() {
        let a = LinearSpace::new(8);
        let b = LinearSpace::new(8);
        assert!(a.topology_eq(&a.clone()));
        assert!(!a.topology_eq(&b));
    }
}
