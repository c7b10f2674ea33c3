//! Address spaces and regions for locus.
//!
//! This crate defines the [`Space`] trait, the factory and law-giver
//! for one coordinate universe, along with the region types built
//! on top of it.
//!
//! # Sentinels
//!
//! Arithmetic never fails. Leaving the space yields
//! [`Space::out_of_bounds`], an unrepresentable size yields
//! [`Space::none`], and an impossible region yields the empty region.
//! Errors are reserved for construction boundaries ([`SparseRegionBuilder::build`])
//! and exhausted sequences ([`Positions::try_next`]).
//!
//! # Regions
//!
//! - [`Region`]: one contiguous inclusive range `[start, end]`
//! - [`SparseRegion`]: ordered, disjoint, non-adjacent contiguous regions
//!
//! Both implement [`Regional`], which provides bounded stepping
//! ([`RegionalPositionExpr`]), ordered traversal ([`Positions`]) and
//! predicate search ([`Search`] with a [`Criterion`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod criterion;
pub mod expr;
pub mod region;
pub mod regional;
pub mod search;
pub mod space;
pub mod sparse;

#[cfg(test)]
mod test_space;

pub use criterion::{AnyPosition, Criterion, Matching, Not, SpecificPosition};
pub use expr::{PositionExpr, SizeExpr};
pub use region::{Region, RegionExpr};
pub use regional::{Positions, Regional, RegionalPositionExpr};
pub use search::Search;
pub use space::{Position, Size, Space};
pub use sparse::{SparseRegion, SparseRegionBuilder};

// Compile-time assertion: regions are shareable across threads whenever
// their space is.
const _: () = {
    #[allow(dead_code)]
    fn assert_send_sync<T: Send + Sync>() {}
    #[allow(dead_code)]
    fn check<S: Space>() {
        assert_send_sync::<Region<S>>();
        assert_send_sync::<SparseRegion<S>>();
    }
};
