use locus_space::{AnyPosition, Matching, Not, Regional, Space, SpecificPosition};
use locus_test_utils::fixtures::{line, two_runs};
use locus_test_utils::LinearSpace;

const OOB: u64 = LinearSpace::OUT_OF_BOUNDS;

#[test]
fn specific_position_uses_the_target() {
    let space = line();
    let sparse = two_runs(&space);
    let hit = sparse.search(SpecificPosition(12u64));
    assert_eq!(hit.find(), 12);
    assert_eq!(hit.find_sub_region_index(), 1);

    let miss = sparse.search(SpecificPosition(7u64));
    assert_eq!(miss.find(), OOB);
    assert_eq!(miss.find_sub_region(), Err(2));
    assert_eq!(miss.find_sub_region_index(), -3);
    assert!(miss.find_all().is_empty());
}

#[test]
fn first_match_in_position_order() {
    let space = line();
    let sparse = two_runs(&space);
    let after_three = sparse.search(Matching(|p: &u64| *p > 3));
    assert_eq!(after_three.find(), 4);
    assert_eq!(after_three.find_sub_region_index(), 0);

    let late = sparse.search(Matching(|p: &u64| *p >= 5));
    assert_eq!(late.find(), 10);
    assert_eq!(late.find_sub_region(), Ok(1));
}

#[test]
fn no_match_is_out_of_bounds() {
    let space = line();
    let sparse = two_runs(&space);
    let search = sparse.search(Matching(|p: &u64| *p > 20));
    assert_eq!(search.find(), OOB);
    assert_eq!(search.find_sub_region_index(), -3);
    assert!(search.find_all().is_empty());
}

#[test]
fn find_all_never_bridges_holes() {
    let space = line();
    let sparse = two_runs(&space);
    let found = sparse
        .search(Matching(|p: &u64| (3..=11).contains(p)))
        .find_all();
    assert_eq!(found.sub_regions(), &[space.region(3, 4), space.region(10, 11)]);
}

#[test]
fn any_position_finds_everything() {
    let space = line();
    let sparse = two_runs(&space);
    assert_eq!(sparse.search(AnyPosition).find(), 0);
    assert_eq!(sparse.search(AnyPosition).find_all(), sparse);
    assert!(space.empty().search(AnyPosition).find_all().is_empty());
}

#[test]
fn not_complements_within_the_region() {
    let space = line();
    let sparse = two_runs(&space);
    let odd = Matching(|p: &u64| p % 2 == 1);
    let even = sparse.search(Not(odd)).find_all();
    assert_eq!(even.positions().collect::<Vec<_>>(), vec![0, 2, 4, 10, 12, 14]);
}

#[test]
fn criteria_by_reference() {
    let space = line();
    let region = space.region(0, 9);
    let criterion = Matching(|p: &u64| p % 4 == 3);
    assert_eq!(region.search(&criterion).find(), 3);
    assert_eq!(region.search(&criterion).find_all().num_regions(), 2);
}

#[test]
fn specific_find_all_is_a_single_position() {
    let space = line();
    let sparse = two_runs(&space);
    assert_eq!(
        sparse.search(SpecificPosition(3u64)).find_all(),
        space.region(3, 3)
    );
}
