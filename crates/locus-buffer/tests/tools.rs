use locus_buffer::tools::{
    append, clear, compact, copy, copy_from_slice, find_and_get, find_and_remove, render,
};
use locus_buffer::{ArrayBuffer, Buffer, FieldEquals, PersistentBuffer};
use locus_core::BufferError;
use locus_space::{Matching, Regional, Space};
use locus_test_utils::fixtures::{array_with, contents, line, persistent_with, runs};
use locus_test_utils::LinearSpace;

const OOB: u64 = LinearSpace::OUT_OF_BOUNDS;

fn holed<B: Buffer<LinearSpace, Option<u32>>>(mut buffer: B) -> B {
    for (position, field) in [(0, 1), (2, 2), (4, 3)] {
        buffer.store(position, Some(field)).unwrap();
    }
    buffer
}

#[test]
fn append_fills_the_next_null_slot() {
    let space = line();
    let mut buffer = array_with(space.region(0, 5), &[1, 2]);
    assert_eq!(append(&mut buffer, &OOB, Some(9)).unwrap(), 2);
    assert_eq!(append(&mut buffer, &3, Some(8)).unwrap(), 4);
    assert_eq!(append(&mut buffer, &4, Some(7)).unwrap(), 5);
    assert_eq!(append(&mut buffer, &OOB, Some(6)).unwrap(), 3);
    assert_eq!(
        contents(&buffer),
        vec![Some(1), Some(2), Some(9), Some(6), Some(8), Some(7)]
    );
}

#[test]
fn append_to_a_full_tail_fails() {
    let space = line();
    let mut buffer = persistent_with(space.region(0, 3), &[1, 2, 3]);
    let id = buffer.id();
    let err = append(&mut buffer, &3, Some(4)).unwrap_err();
    assert_eq!(
        err,
        BufferError::NowhereToAppend {
            buffer: id,
            after: "3".to_string()
        }
    );
    assert_eq!(append(&mut buffer, &1, Some(4)).unwrap(), 3);
    assert!(append(&mut buffer, &OOB, Some(5)).is_err());
}

#[test]
fn clear_nulls_every_slot() {
    let space = line();
    let mut array = array_with(space.region(0, 3), &[1, 2, 3, 4]);
    clear(&mut array).unwrap();
    assert!(contents(&array).iter().all(Option::is_none));

    let mut persistent = persistent_with(space.region(0, 3), &[1, 2, 3, 4]);
    let before = persistent.clone();
    clear(&mut persistent).unwrap();
    assert!(contents(&persistent).iter().all(Option::is_none));
    assert_eq!(contents(&before), vec![Some(1), Some(2), Some(3), Some(4)]);
}

#[test]
fn compact_packs_towards_the_start() {
    let space = line();
    let mut array = holed(array_with(space.region(0, 5), &[]));
    assert_eq!(compact(&mut array).unwrap(), 3);
    assert_eq!(
        contents(&array),
        vec![Some(1), Some(2), Some(3), None, None, None]
    );

    let mut persistent = holed(persistent_with(space.region(0, 5), &[]));
    assert_eq!(compact(&mut persistent).unwrap(), 3);
    assert_eq!(contents(&persistent), contents(&array));
}

#[test]
fn compact_of_a_full_buffer_is_out_of_bounds() {
    let space = line();
    let mut buffer = array_with(space.region(0, 2), &[1, 2, 3]);
    assert_eq!(compact(&mut buffer).unwrap(), OOB);
}

#[test]
fn copy_walks_both_regions_in_order() {
    let space = line();
    let source = array_with(space.region(0, 4), &[1, 2, 3, 4, 5]);
    let mut target = persistent_with(space.region(10, 15), &[]);
    let holes = runs(&space, &[(0, 1), (3, 4)]);

    let written = copy(&source, &holes, &mut target, &space.region(10, 15)).unwrap();
    assert_eq!(written, space.region(10, 13));
    assert_eq!(
        contents(&target),
        vec![Some(1), Some(2), Some(4), Some(5), None, None]
    );
}

#[test]
fn copy_stops_at_the_shorter_region() {
    let space = line();
    let source = array_with(space.region(0, 4), &[1, 2, 3, 4, 5]);
    let mut target = array_with(space.region(10, 15), &[]);
    let written = copy(&source, &space.region(0, 4), &mut target, &space.region(12, 13)).unwrap();
    assert_eq!(written, space.region(12, 13));
    assert_eq!(contents(&target), vec![None, None, Some(1), Some(2), None, None]);
}

#[test]
fn copy_outside_the_target_writes_nothing() {
    let space = line();
    let source = array_with(space.region(0, 4), &[1, 2, 3, 4, 5]);
    let mut target = array_with(space.region(10, 12), &[]);
    let err = copy(&source, source.region(), &mut target, &space.region(11, 15)).unwrap_err();
    assert!(matches!(err, BufferError::Overflow { .. }));
    assert!(contents(&target).iter().all(Option::is_none));
}

#[test]
fn copy_rejects_foreign_regions() {
    let space = line();
    let other = line();
    let source = array_with(space.region(0, 4), &[1, 2, 3, 4, 5]);
    let mut target = array_with(space.region(0, 4), &[]);

    let err = copy(&source, &other.region(0, 1), &mut target, &space.region(0, 1)).unwrap_err();
    assert!(matches!(err, BufferError::SpaceMismatch { .. }));
    let err = copy(&source, &space.region(0, 1), &mut target, &other.region(0, 1)).unwrap_err();
    assert!(matches!(err, BufferError::SpaceMismatch { .. }));
}

#[test]
fn copy_from_slice_fills_a_prefix() {
    let space = line();
    let mut buffer = array_with(space.region(0, 5), &[]);
    let written = copy_from_slice(&[Some(7), Some(8)], &mut buffer, &space.region(2, 5)).unwrap();
    assert_eq!(written, space.region(2, 3));
    assert_eq!(contents(&buffer), vec![None, None, Some(7), Some(8), None, None]);

    let nothing = copy_from_slice(&[], &mut buffer, &space.region(2, 5)).unwrap();
    assert!(nothing.is_empty());
}

#[test]
fn find_and_get_reads_the_first_match() {
    let space = line();
    let buffer = array_with(space.region(0, 9), &[0, 10, 20, 30, 40, 50, 60, 70, 80, 90]);
    let region = buffer.region().clone();
    assert_eq!(find_and_get(&buffer, &region, Matching(|p: &u64| *p > 4)), Some(50));
    assert_eq!(find_and_get(&buffer, &region, Matching(|p: &u64| *p > 20)), None);
    let holes = runs(&space, &[(0, 1), (6, 9)]);
    assert_eq!(find_and_get(&buffer, &holes, Matching(|p: &u64| *p >= 2)), Some(60));
}

#[test]
fn find_and_remove_nulls_the_slot() {
    let space = line();
    let mut buffer = persistent_with(space.region(0, 4), &[1, 2, 3, 4, 5]);
    let region = buffer.region().clone();
    let removed = find_and_remove(&mut buffer, &region, Matching(|p: &u64| p % 2 == 1)).unwrap();
    assert_eq!(removed, Some(2));
    assert_eq!(contents(&buffer), vec![Some(1), None, Some(3), Some(4), Some(5)]);
    let none = find_and_remove(&mut buffer, &region, Matching(|p: &u64| *p > 9)).unwrap();
    assert_eq!(none, None);
}

#[test]
fn field_equals_locates_stored_values() {
    let space = line();
    let buffer: ArrayBuffer<_, Option<u32>> = array_with(space.region(0, 5), &[4, 7, 4, 7, 7]);
    let region = buffer.region().clone();
    let sevens = region.search(FieldEquals::new(&buffer, Some(7))).find_all();
    assert_eq!(sevens.sub_regions(), &[space.region(1, 1), space.region(3, 4)]);
    assert_eq!(region.search(FieldEquals::new(&buffer, Some(9))).find(), OOB);

    let wider = space.region(0, 9);
    let nulls = wider.search(FieldEquals::new(&buffer, None)).find_all();
    assert_eq!(nulls, space.region(5, 5));
}

#[test]
fn render_collapses_null_runs() {
    let space = line();
    let buffer: PersistentBuffer<_, Option<u32>> = holed(persistent_with(space.region(0, 7), &[]));
    assert_eq!(render(&buffer), "[Some(1), null x 1, Some(2), null x 1, Some(3), null x 3]");
    let empty = array_with(space.region(0, 2), &[]);
    assert_eq!(render(&empty), "[null x 3]");
}
