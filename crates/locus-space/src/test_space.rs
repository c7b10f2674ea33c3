//! Minimal space for unit tests inside this crate.

use locus_core::SpaceInstanceId;

use crate::space::Space;

/// Positions `0..len` as `u32`, sized in `u32` counts.
#[derive(Clone, Debug)]
pub(crate) struct Ticks {
    len: u32,
    id: SpaceInstanceId,
}

impl Ticks {
    pub(crate) fn new(len: u32) -> Self {
        Self {
            len,
            id: SpaceInstanceId::next(),
        }
    }

    fn valid(&self, p: u32) -> Option<u32> {
        (p < self.len).then_some(p)
    }
}

impl Space for Ticks {
    type Position = u32;
    type Size = u32;

    fn instance_id(&self) -> SpaceInstanceId {
        self.id
    }

    fn min(&self) -> u32 {
        0
    }

    fn max(&self) -> u32 {
        self.len - 1
    }

    fn out_of_bounds(&self) -> u32 {
        u32::MAX
    }

    fn none(&self) -> u32 {
        0
    }

    fn one(&self) -> u32 {
        1
    }

    fn offset(&self, p: &u32, s: &u32) -> Option<u32> {
        self.valid(*p)?;
        p.checked_add(*s).and_then(|q| self.valid(q))
    }

    fn retreat(&self, p: &u32, s: &u32) -> Option<u32> {
        self.valid(*p)?;
        p.checked_sub(*s)
    }

    fn distance(&self, from: &u32, to: &u32) -> Option<u32> {
        to.checked_sub(*from)
    }

    fn size_add(&self, a: &u32, b: &u32) -> Option<u32> {
        a.checked_add(*b)
    }

    fn size_subtract(&self, a: &u32, b: &u32) -> Option<u32> {
        a.checked_sub(*b)
    }

    fn size_multiply(&self, s: &u32, factor: f64) -> Option<u32> {
        let scaled = (f64::from(*s) * factor).floor();
        (scaled >= 0.0 && scaled <= f64::from(u32::MAX)).then_some(scaled as u32)
    }

    fn size_divide(&self, s: &u32, divisor: f64) -> Option<u32> {
        if divisor <= 0.0 {
            return None;
        }
        self.size_multiply(s, 1.0 / divisor)
    }

    fn size_modulo(&self, s: &u32, m: &u32) -> Option<u32> {
        s.checked_rem(*m)
    }

    fn ratio(&self, s: &u32, unit: &u32) -> f64 {
        f64::from(*s) / f64::from(*unit)
    }
}
