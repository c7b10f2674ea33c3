//! Space and buffer contract compliance checks.
//!
//! These functions verify that an implementation satisfies the invariants
//! its trait promises. Each takes the implementation under test plus a
//! handful of sample values; [`run_full_compliance`] runs every space
//! check at once.

use std::collections::HashSet;

use locus_buffer::Buffer;
use locus_core::{BufferError, Field, RegionError};
use locus_space::{Region, Regional, Space, SparseRegion};

/// Assert that `min()` and `max()` are valid, ordered, and that the
/// sentinel is not a valid position.
pub fn assert_bounds_valid<S: Space>(space: &S) {
    let (min, max) = (space.min(), space.max());
    assert!(space.contains_position(&min), "min {min:?} is not valid");
    assert!(space.contains_position(&max), "max {max:?} is not valid");
    assert!(min <= max, "min {min:?} > max {max:?}");
    let oob = space.out_of_bounds();
    assert!(
        !space.contains_position(&oob),
        "out_of_bounds {oob:?} is a valid position"
    );
}

/// Assert that stepping off either end of the space yields out-of-bounds
/// and that the sentinel is sticky.
pub fn assert_edges_yield_out_of_bounds<S: Space>(space: &S) {
    let oob = space.out_of_bounds();
    assert_eq!(space.expr(space.max()).next().position(), oob);
    assert_eq!(space.expr(space.min()).previous().position(), oob);
    assert_eq!(space.expr(oob.clone()).previous().next().position(), oob);
}

/// Assert `expr(p).add(s).subtract(s) == p` whenever the step stays in
/// bounds.
pub fn assert_offset_retreat_inverse<S: Space>(space: &S, positions: &[S::Position], sizes: &[S::Size]) {
    for p in positions {
        for s in sizes {
            let forward = space.expr(p.clone()).add(s);
            if forward.is_out_of_bounds() {
                continue;
            }
            let back = forward.subtract(s).position();
            assert_eq!(&back, p, "add({s:?}) then subtract({s:?}) from {p:?} gave {back:?}");
        }
    }
}

/// Assert that `offset(p, one())` is the immediate successor of `p`:
/// strictly greater and at distance one.
pub fn assert_one_is_successor<S: Space>(space: &S, positions: &[S::Position]) {
    let one = space.one();
    for p in positions {
        if let Some(next) = space.offset(p, &one) {
            assert!(next > *p, "offset({p:?}, one) = {next:?} is not greater");
            assert_eq!(space.distance(p, &next), Some(one.clone()));
        }
    }
}

/// Assert that size addition is associative with `none()` as identity.
pub fn assert_size_addition_laws<S: Space>(space: &S, sizes: &[S::Size]) {
    let zero = space.none();
    for a in sizes {
        assert_eq!(space.size_add(a, &zero).as_ref(), Some(a), "{a:?} + none != {a:?}");
        for b in sizes {
            for c in sizes {
                let left = space.size_add(a, b).and_then(|ab| space.size_add(&ab, c));
                let right = space.size_add(b, c).and_then(|bc| space.size_add(a, &bc));
                assert_eq!(left, right, "({a:?} + {b:?}) + {c:?} != {a:?} + ({b:?} + {c:?})");
            }
        }
    }
}

/// Assert that `add` preserves order: `p1 < p2` implies
/// `p1 + s <= p2 + s` while both stay in bounds.
pub fn assert_add_monotonic<S: Space>(space: &S, positions: &[S::Position], sizes: &[S::Size]) {
    for p1 in positions {
        for p2 in positions.iter().filter(|p2| *p2 > p1) {
            for s in sizes {
                let a = space.expr(p1.clone()).add(s);
                let b = space.expr(p2.clone()).add(s);
                if a.is_out_of_bounds() || b.is_out_of_bounds() {
                    continue;
                }
                assert!(
                    a.position() < b.position(),
                    "{p1:?} < {p2:?} but {:?} >= {:?} after adding {s:?}",
                    a.position(),
                    b.position()
                );
            }
        }
    }
}

/// Assert the region sentinels: `empty()` reports out-of-bounds ends and
/// `none()` size, and reversed endpoints build the empty region.
pub fn assert_region_sentinels<S: Space>(space: &S) {
    let empty = space.empty();
    assert!(empty.is_empty());
    assert_eq!(empty.start(), space.out_of_bounds());
    assert_eq!(empty.end(), space.out_of_bounds());
    assert_eq!(empty.size(), space.none());
    assert_eq!(empty.positions().count(), 0);

    let all = space.all();
    assert!(!all.is_empty());
    if space.min() != space.max() {
        assert!(space.region(space.max(), space.min()).is_empty());
    }
}

/// Assert that traversal of `regional` visits only contained positions,
/// in strictly increasing order, with no repeats, and ends exhausted.
pub fn assert_traversal_ordered<S: Space, R: Regional<S>>(regional: &R) {
    let mut positions = regional.positions();
    let mut previous: Option<S::Position> = None;
    let mut seen = HashSet::new();
    for p in positions.by_ref() {
        assert!(regional.contains(&p), "visited {p:?}, which is not contained");
        if let Some(prev) = &previous {
            assert!(p > *prev, "visited {p:?} after {prev:?}");
        }
        assert!(seen.insert(p.clone()), "visited {p:?} twice");
        previous = Some(p);
    }
    assert_eq!(positions.try_next(), Err(RegionError::Exhausted));
}

/// Assert the signed sub-region search invariant for every target:
/// `r >= 0` implies `region(r)` contains the target; `r < 0` implies the
/// target lies in the gap at insertion point `-1 - r`.
pub fn assert_sub_region_search<S: Space>(sparse: &SparseRegion<S>, targets: &[S::Position]) {
    for target in targets {
        let r = sparse.find_sub_region_index(target);
        if r >= 0 {
            let region = sparse.region(r as usize);
            assert!(region.contains(target), "region({r}) does not contain {target:?}");
            continue;
        }
        let k = (-1 - r) as usize;
        assert!(k <= sparse.num_regions(), "insertion point {k} past the end");
        if !sparse.space().contains_position(target) {
            assert_eq!(k, sparse.num_regions());
            continue;
        }
        if k > 0 {
            assert!(sparse.region(k - 1).end() < *target);
        }
        if k < sparse.num_regions() {
            assert!(*target < sparse.region(k).start());
        }
    }
}

/// Run every space check on `space` with the given samples.
pub fn run_full_compliance<S: Space>(space: &S, positions: &[S::Position], sizes: &[S::Size]) {
    assert_bounds_valid(space);
    assert_edges_yield_out_of_bounds(space);
    assert_offset_retreat_inverse(space, positions, sizes);
    assert_one_is_successor(space, positions);
    assert_size_addition_laws(space, sizes);
    assert_add_monotonic(space, positions, sizes);
    assert_region_sentinels(space);
}

// ── Buffer checks ───────────────────────────────────────────────

/// Assert that every slot of a fresh buffer reads as null and that
/// capacity matches the region.
pub fn assert_fresh_buffer_is_null<S: Space, F: Field, B: Buffer<S, F>>(buffer: &B) {
    assert_eq!(buffer.capacity(), buffer.region().positions().count());
    for p in buffer.region() {
        assert!(buffer.get(&p).is_null(), "fresh slot {p:?} is not null");
    }
}

/// Assert that `set(p, f)` followed by `get(p)` returns `f` for every
/// position, through [`Buffer::store`], and that `index_of` is stable.
pub fn assert_set_get_round_trip<S, F, B>(mut buffer: B, make: impl Fn(usize) -> F) -> B
where
    S: Space,
    F: Field,
    B: Buffer<S, F>,
{
    let positions: Vec<S::Position> = buffer.region().positions().collect();
    for (i, p) in positions.iter().enumerate() {
        assert_eq!(buffer.index_of(p), Some(i));
        buffer
            .store(p.clone(), make(i))
            .unwrap_or_else(|e| panic!("store at {p:?} failed: {e}"));
    }
    for (i, p) in positions.iter().enumerate() {
        assert_eq!(buffer.get(p), make(i), "slot {p:?} lost its Field");
        assert_eq!(buffer.index_of(p), Some(i));
    }
    buffer
}

/// Assert that writing outside the region fails with overflow and leaves
/// the buffer unchanged.
pub fn assert_overflow_rejected<S, F, B>(buffer: &mut B, outside: &S::Position, field: F)
where
    S: Space,
    F: Field,
    B: Buffer<S, F>,
{
    let before: Vec<F> = buffer.region().positions().map(|p| buffer.get(&p)).collect();
    let id = buffer.id();
    match buffer.set(outside.clone(), field) {
        Err(BufferError::Overflow { buffer: failed, .. }) => assert_eq!(failed, id),
        Err(other) => panic!("expected overflow, got {other}"),
        Ok(_) => panic!("write at {outside:?} was accepted"),
    }
    let after: Vec<F> = buffer.region().positions().map(|p| buffer.get(&p)).collect();
    assert_eq!(before, after, "rejected write modified the buffer");
    assert!(buffer.get(outside).is_null());
    assert_eq!(buffer.index_of(outside), None);
}

/// The region a buffer check runs over: `[start, start + len - 1]`.
pub fn region_of<S: Space>(space: &S, start: S::Position, len: &S::Size) -> Region<S> {
    let end = space
        .expr(start.clone())
        .add(len)
        .previous()
        .position();
    space.region(start, end)
}
