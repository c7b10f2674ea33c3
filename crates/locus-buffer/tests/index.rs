use locus_buffer::{Buffer, FieldIndex, IndexedBuffer};
use locus_space::Space;
use locus_test_utils::fixtures::{array_with, line, persistent_with};
use locus_test_utils::LinearSpace;

#[test]
fn positions_of_lists_every_holder_in_order() {
    let space = line();
    let buffer = IndexedBuffer::new(array_with(space.region(0, 5), &[1, 2, 1, 3, 1]));
    assert!(!buffer.index().is_built());
    assert_eq!(buffer.positions_of(&Some(1)), &[0, 2, 4]);
    assert_eq!(buffer.positions_of(&Some(3)), &[3]);
    assert!(buffer.positions_of(&Some(9)).is_empty());
    assert!(buffer.positions_of(&None).is_empty());
    assert!(buffer.index().is_built());
    assert_eq!(buffer.index().distinct_fields(), Some(3));
}

#[test]
fn first_position_of_missing_field_is_out_of_bounds() {
    let space = line();
    let buffer = IndexedBuffer::new(array_with(space.region(0, 5), &[1, 2, 1]));
    assert_eq!(buffer.first_position_of(&Some(2)), 1);
    assert_eq!(buffer.first_position_of(&Some(5)), LinearSpace::OUT_OF_BOUNDS);
}

#[test]
fn writes_invalidate_the_index() {
    let space = line();
    let mut buffer = IndexedBuffer::new(array_with(space.region(0, 5), &[1, 2]));
    assert_eq!(buffer.positions_of(&Some(1)), &[0]);
    buffer.store(4, Some(1)).unwrap();
    assert!(!buffer.index().is_built());
    assert_eq!(buffer.positions_of(&Some(1)), &[0, 4]);
    buffer.store(0, None).unwrap();
    assert_eq!(buffer.positions_of(&Some(1)), &[4]);
}

#[test]
fn failed_writes_keep_the_index() {
    let space = line();
    let mut buffer = IndexedBuffer::new(array_with(space.region(0, 5), &[1]));
    assert_eq!(buffer.positions_of(&Some(1)), &[0]);
    assert!(buffer.store(6, Some(1)).is_err());
    assert!(buffer.index().is_built());
}

#[test]
fn copy_on_write_produces_a_fresh_index() {
    let space = line();
    let mut original = IndexedBuffer::new(persistent_with(space.region(0, 3), &[7]));
    assert_eq!(original.positions_of(&Some(7)), &[0]);

    let updated = original
        .set(2, Some(7))
        .unwrap()
        .into_new_instance()
        .unwrap();
    assert!(original.index().is_built());
    assert_eq!(original.positions_of(&Some(7)), &[0]);
    assert!(!updated.index().is_built());
    assert_eq!(updated.positions_of(&Some(7)), &[0, 2]);
    assert_ne!(original.id(), updated.id());
}

#[test]
fn standalone_index_over_any_buffer() {
    let space = line();
    let buffer = persistent_with(space.region(3, 6), &[5, 6, 5]);
    let mut index = FieldIndex::new();
    assert_eq!(index.positions_of(&buffer, &Some(5)), &[3, 5]);
    assert_eq!(index.distinct_fields(), Some(2));
    index.invalidate();
    assert!(!index.is_built());
    assert_eq!(index.distinct_fields(), None);
}

#[test]
fn into_inner_removes_the_decoration() {
    let space = line();
    let buffer = IndexedBuffer::new(array_with(space.region(0, 1), &[8, 9]));
    let id = buffer.id();
    let inner = buffer.into_inner();
    assert_eq!(inner.id(), id);
    assert_eq!(inner.as_slice(), &[Some(8), Some(9)]);
}
