//! Ready-made regions and buffers.
//!
//! The standard sparse fixture is `{[0, 4], [10, 14]}` on a line of 32
//! positions: two five-position sub-regions with a five-position hole.

use locus_buffer::{ArrayBuffer, Buffer, PersistentBuffer};
use locus_space::{Region, Regional, Space, SparseRegion};

use crate::spaces::LinearSpace;

/// Length of the line the fixtures live on.
pub const LINE_LEN: u64 = 32;

/// A fresh line of [`LINE_LEN`] positions.
pub fn line() -> LinearSpace {
    LinearSpace::new(LINE_LEN)
}

/// `{[0, 4], [10, 14]}` in `space`.
pub fn two_runs(space: &LinearSpace) -> SparseRegion<LinearSpace> {
    space
        .sparse_region_builder()
        .concatenate(&space.region(0, 4))
        .concatenate(&space.region(10, 14))
        .build()
        .expect("fixture regions share one space")
}

/// Sparse region of the given inclusive runs in `space`.
pub fn runs(space: &LinearSpace, runs: &[(u64, u64)]) -> SparseRegion<LinearSpace> {
    SparseRegion::new(
        space.clone(),
        runs.iter().map(|&(start, end)| space.region(start, end)),
    )
    .expect("fixture regions share one space")
}

/// An array buffer over `region` with `fields[i]` stored at the `i`-th
/// position.
pub fn array_with(region: Region<LinearSpace>, fields: &[u32]) -> ArrayBuffer<LinearSpace, Option<u32>> {
    let mut buffer = ArrayBuffer::new(region).expect("fixture region fits");
    fill(&mut buffer, fields);
    buffer
}

/// A persistent buffer over `region` with `fields[i]` stored at the `i`-th
/// position.
pub fn persistent_with(
    region: Region<LinearSpace>,
    fields: &[u32],
) -> PersistentBuffer<LinearSpace, Option<u32>> {
    let mut buffer = PersistentBuffer::new(region).expect("fixture region fits");
    fill(&mut buffer, fields);
    buffer
}

fn fill<B: Buffer<LinearSpace, Option<u32>>>(buffer: &mut B, fields: &[u32]) {
    let positions: Vec<u64> = buffer.region().positions().collect();
    for (position, field) in positions.into_iter().zip(fields) {
        buffer
            .store(position, Some(*field))
            .expect("fixture position is in region");
    }
}

/// The Fields of `buffer` in region order, nulls included.
pub fn contents<S: Space, B: Buffer<S, Option<u32>>>(buffer: &B) -> Vec<Option<u32>> {
    buffer.region().positions().map(|p| buffer.get(&p)).collect()
}
