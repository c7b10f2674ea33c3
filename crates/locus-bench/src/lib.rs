//! Benchmark profiles for locus.
//!
//! - [`striped_region`]: a sparse region of evenly spaced runs, the shape
//!   that stresses hole-skipping traversal and sub-region search
//! - [`filled_buffer`]: a buffer over a region with every slot set

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use locus_buffer::{AnyBuffer, Backend, Buffer, BufferConfig};
use locus_space::{Region, Regional, Space, SparseRegion};
use locus_test_utils::LinearSpace;

/// `runs` runs of `width` positions, each followed by a hole of `gap`.
///
/// The line is sized to fit exactly.
pub fn striped_region(runs: u64, width: u64, gap: u64) -> SparseRegion<LinearSpace> {
    let stride = width + gap;
    let space = LinearSpace::new(runs * stride);
    let pieces = (0..runs).map(|i| {
        let start = i * stride;
        space.region(start, start + width - 1)
    });
    SparseRegion::new(space.clone(), pieces).unwrap_or_else(|_| SparseRegion::empty(space))
}

/// A buffer of `backend` covering `region`, with slot `i` holding `i`.
///
/// # Panics
///
/// Panics if the region exceeds the default capacity.
pub fn filled_buffer(
    region: Region<LinearSpace>,
    backend: Backend,
) -> AnyBuffer<LinearSpace, Option<u64>> {
    let mut buffer = BufferConfig::new()
        .with_backend(backend)
        .build(region)
        .expect("benchmark region fits the default capacity");
    let positions: Vec<u64> = buffer.region().positions().collect();
    for (i, p) in positions.into_iter().enumerate() {
        buffer
            .store(p, Some(i as u64))
            .expect("position comes from the buffer's own region");
    }
    buffer
}
