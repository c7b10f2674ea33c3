//! Locus: ordered address spaces, sparse regions, and position-addressed
//! Field buffers.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all locus sub-crates. For most users, adding `locus` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use locus::prelude::*;
//! use locus_test_utils::LinearSpace;
//!
//! // A line of 32 positions with two runs and a hole between them.
//! let space = LinearSpace::new(32);
//! let runs = space
//!     .sparse_region_builder()
//!     .concatenate(&space.region(0, 4))
//!     .concatenate(&space.region(10, 14))
//!     .build()
//!     .unwrap();
//!
//! // Stepping jumps the hole; leaving the region is out-of-bounds.
//! assert_eq!(runs.expr(4).next().position(), 10);
//! assert!(runs.expr(14).next().is_out_of_bounds());
//!
//! // Search by predicate, collecting maximal matching runs.
//! let odd = runs.search(Matching(|p: &u64| p % 2 == 1)).find_all();
//! assert_eq!(odd.positions().collect::<Vec<_>>(), vec![1, 3, 11, 13]);
//!
//! // Store Fields in a buffer over one run.
//! let mut buffer: ArrayBuffer<_, Option<&str>> = ArrayBuffer::new(runs.region(1)).unwrap();
//! buffer.store(12, Some("payload")).unwrap();
//! assert_eq!(buffer.get(&12), Some("payload"));
//! assert!(buffer.get(&3).is_null());
//! assert!(buffer.store(3, Some("elsewhere")).is_err());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `locus-core` | Field contract, IDs, error types |
//! | [`space`] | `locus-space` | Space trait, regions, expressions, search |
//! | [`buffer`] | `locus-buffer` | Buffer trait, backends, index, tools |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, IDs and errors (`locus-core`).
///
/// Contains the [`types::Field`] contract and the
/// [`types::RegionError`] and [`types::BufferError`] error types.
pub use locus_core as types;

/// Address spaces and regions (`locus-space`).
///
/// Provides the [`space::Space`] trait, [`space::Region`],
/// [`space::SparseRegion`], and the expression and search layers built on
/// [`space::Regional`].
pub use locus_space as space;

/// Position-addressed Field storage (`locus-buffer`).
///
/// [`buffer::ArrayBuffer`] writes in place, [`buffer::PersistentBuffer`]
/// copies on write, and [`buffer::SyncBuffer`] shares either between
/// threads. Whole-buffer operations live in [`buffer::tools`].
pub use locus_buffer as buffer;

/// Common imports for typical locus usage.
///
/// ```rust
/// use locus::prelude::*;
/// ```
///
/// This imports the core traits, the region types, the standard criteria,
/// and the buffer backends.
pub mod prelude {
    // Core contract and errors
    pub use locus_core::{BufferError, Field, RegionError};

    // Spaces and regions
    pub use locus_space::{Region, Regional, Space, SparseRegion, SparseRegionBuilder};

    // Search
    pub use locus_space::{AnyPosition, Criterion, Matching, Not, SpecificPosition};

    // Buffers
    pub use locus_buffer::{
        AnyBuffer, ArrayBuffer, Backend, Buffer, BufferConfig, FieldEquals, IndexedBuffer,
        PersistentBuffer, SetOutcome, SyncBuffer,
    };
}
