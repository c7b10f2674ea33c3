//! Whole-buffer operations built on the [`Buffer`] contract.
//!
//! Every write goes through [`Buffer::store`], so these work unchanged on
//! in-place and copy-on-write backends: the `&mut B` passed in is rebound
//! whenever a write produces a new instance.

use locus_core::{BufferError, Field};
use locus_space::{Criterion, Region, Regional, Space};
use tracing::trace;

use crate::buffer::{check_space, overflow, Buffer};

/// Store `field` in the first null slot strictly after `after`.
///
/// An out-of-bounds `after` means "before the first slot": the search
/// starts at the region's first position instead of failing, so the first
/// slot can be appended to. Returns the position written.
///
/// # Errors
///
/// Returns [`BufferError::NowhereToAppend`] if no null slot follows
/// `after`.
pub fn append<S, F, B>(
    buffer: &mut B,
    after: &S::Position,
    field: F,
) -> Result<S::Position, BufferError>
where
    S: Space,
    F: Field,
    B: Buffer<S, F>,
{
    let from_start = *after == buffer.region().space().out_of_bounds();
    let slot = buffer
        .region()
        .positions()
        .skip_while(|p| !from_start && p <= after)
        .find(|p| buffer.get(p).is_null());
    match slot {
        Some(position) => {
            buffer.store(position.clone(), field)?;
            Ok(position)
        }
        None => Err(BufferError::NowhereToAppend {
            buffer: buffer.id(),
            after: format!("{after:?}"),
        }),
    }
}

/// Null every slot.
///
/// # Errors
///
/// Propagates any write error from the backend.
pub fn clear<S, F, B>(buffer: &mut B) -> Result<(), BufferError>
where
    S: Space,
    F: Field,
    B: Buffer<S, F>,
{
    let occupied: Vec<S::Position> = buffer
        .region()
        .positions()
        .filter(|p| !buffer.get(p).is_null())
        .collect();
    for position in occupied {
        buffer.store(position, F::null())?;
    }
    Ok(())
}

/// Move every non-null Field towards the start of the region, keeping
/// their order.
///
/// Returns the first null position afterwards, or out-of-bounds if the
/// buffer is full.
///
/// # Errors
///
/// Propagates any write error from the backend.
pub fn compact<S, F, B>(buffer: &mut B) -> Result<S::Position, BufferError>
where
    S: Space,
    F: Field,
    B: Buffer<S, F>,
{
    let positions: Vec<S::Position> = buffer.region().positions().collect();
    let packed: Vec<F> = positions
        .iter()
        .map(|p| buffer.get(p))
        .filter(|f| !f.is_null())
        .collect();
    for (i, position) in positions.iter().enumerate() {
        let wanted = packed.get(i).cloned().unwrap_or_else(F::null);
        if buffer.get(position) != wanted {
            buffer.store(position.clone(), wanted)?;
        }
    }
    Ok(positions
        .get(packed.len())
        .cloned()
        .unwrap_or_else(|| buffer.region().space().out_of_bounds()))
}

/// Copy Fields pairwise from `source_region` of `source` into
/// `target_region` of `target`, in position order, until either region
/// runs out.
///
/// Returns the part of `target_region` written (empty if nothing was).
/// Nothing is written unless every target position is addressable.
///
/// # Errors
///
/// Returns [`BufferError::SpaceMismatch`] if a region belongs to a
/// different space instance than its buffer, or [`BufferError::Overflow`]
/// if a target position lies outside `target`.
pub fn copy<S, F, A, B, R>(
    source: &A,
    source_region: &R,
    target: &mut B,
    target_region: &Region<S>,
) -> Result<Region<S>, BufferError>
where
    S: Space,
    F: Field,
    A: Buffer<S, F>,
    B: Buffer<S, F>,
    R: Regional<S>,
{
    let source_space = source.region().space();
    if !source_region.space().topology_eq(source_space) {
        return Err(BufferError::SpaceMismatch {
            expected: source_space.instance_id(),
            found: source_region.space().instance_id(),
        });
    }
    let writes: Vec<(S::Position, F)> = source_region
        .positions()
        .zip(target_region.positions())
        .map(|(from, to)| (to, source.get(&from)))
        .collect();
    write_run(target, target_region, writes)
}

/// Copy `fields` into `target_region` of `target`, in position order,
/// until either runs out.
///
/// Returns the part of `target_region` written (empty if nothing was).
/// Nothing is written unless every target position is addressable.
///
/// # Errors
///
/// Returns [`BufferError::SpaceMismatch`] if `target_region` belongs to a
/// different space instance than `target`, or [`BufferError::Overflow`]
/// if a target position lies outside `target`.
pub fn copy_from_slice<S, F, B>(
    fields: &[F],
    target: &mut B,
    target_region: &Region<S>,
) -> Result<Region<S>, BufferError>
where
    S: Space,
    F: Field,
    B: Buffer<S, F>,
{
    let writes: Vec<(S::Position, F)> = target_region
        .positions()
        .zip(fields.iter().cloned())
        .collect();
    write_run(target, target_region, writes)
}

fn write_run<S, F, B>(
    target: &mut B,
    target_region: &Region<S>,
    writes: Vec<(S::Position, F)>,
) -> Result<Region<S>, BufferError>
where
    S: Space,
    F: Field,
    B: Buffer<S, F>,
{
    let space = target.region().space().clone();
    check_space(&space, target_region)?;
    if let Some((position, _)) = writes.iter().find(|(p, _)| !target.contains(p)) {
        return Err(overflow(target.id(), target.region(), position));
    }
    let last = writes.last().map(|(p, _)| p.clone());
    trace!(buffer = %target.id(), slots = writes.len(), "copying into buffer");
    for (position, field) in writes {
        target.store(position, field)?;
    }
    Ok(match last {
        Some(last) => Region::new(space, target_region.start(), last),
        None => Region::empty(space),
    })
}

/// The Field at the first position of `regional` matching `criterion`.
///
/// Null if nothing matches or the match is not addressable in `buffer`.
pub fn find_and_get<S, F, B, R, C>(buffer: &B, regional: &R, criterion: C) -> F
where
    S: Space,
    F: Field,
    B: Buffer<S, F>,
    R: Regional<S>,
    C: Criterion<S>,
{
    buffer.get(&regional.search(criterion).find())
}

/// Remove and return the Field at the first position of `regional`
/// matching `criterion`.
///
/// Null, with nothing written, if nothing matches or the slot is already
/// null.
///
/// # Errors
///
/// Propagates any write error from the backend.
pub fn find_and_remove<S, F, B, R, C>(
    buffer: &mut B,
    regional: &R,
    criterion: C,
) -> Result<F, BufferError>
where
    S: Space,
    F: Field,
    B: Buffer<S, F>,
    R: Regional<S>,
    C: Criterion<S>,
{
    let position = regional.search(criterion).find();
    let field = buffer.get(&position);
    if !field.is_null() {
        buffer.store(position, F::null())?;
    }
    Ok(field)
}

/// Render the slots in region order, collapsing runs of nulls.
///
/// ```text
/// [Some(1), null x 3, Some(2)]
/// ```
pub fn render<S, F, B>(buffer: &B) -> String
where
    S: Space,
    F: Field,
    B: Buffer<S, F>,
{
    let mut parts = Vec::new();
    let mut nulls = 0usize;
    for position in buffer.region() {
        let field = buffer.get(&position);
        if field.is_null() {
            nulls += 1;
            continue;
        }
        if nulls > 0 {
            parts.push(format!("null x {nulls}"));
            nulls = 0;
        }
        parts.push(format!("{field:?}"));
    }
    if nulls > 0 {
        parts.push(format!("null x {nulls}"));
    }
    format!("[{}]", parts.join(", "))
}
