use std::sync::Arc;
use std::thread;

use locus_buffer::tools::append;
use locus_buffer::{ArrayBuffer, Buffer, PersistentBuffer, SyncBuffer};
use locus_space::{Regional, Space};
use locus_test_utils::fixtures::contents;
use locus_test_utils::LinearSpace;

const WRITERS: u64 = 128;

fn hammer<B>(shared: Arc<SyncBuffer<LinearSpace, Option<u64>, B>>)
where
    B: Buffer<LinearSpace, Option<u64>> + Send + 'static,
{
    let handles: Vec<_> = (0..WRITERS)
        .map(|i| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                shared.set(i, Some(i * 3)).unwrap();
                assert_eq!(shared.get(&i), Some(i * 3));
                assert!(shared.set(WRITERS + 1000, Some(i)).is_err());
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    for i in 0..WRITERS {
        assert_eq!(shared.get(&i), Some(i * 3), "writer {i} lost its Field");
    }
}

#[test]
fn concurrent_writers_on_an_array_buffer() {
    let space = LinearSpace::new(WRITERS * 2);
    let buffer: ArrayBuffer<_, Option<u64>> =
        ArrayBuffer::new(space.region(0, WRITERS - 1)).unwrap();
    hammer(Arc::new(SyncBuffer::new(buffer)));
}

#[test]
fn concurrent_writers_on_a_persistent_buffer() {
    let space = LinearSpace::new(WRITERS * 2);
    let buffer: PersistentBuffer<_, Option<u64>> =
        PersistentBuffer::new(space.region(0, WRITERS - 1)).unwrap();
    let first = buffer.id();
    let shared = Arc::new(SyncBuffer::new(buffer));
    hammer(Arc::clone(&shared));
    assert_ne!(shared.id(), first);
}

#[test]
fn concurrent_appends_claim_distinct_slots() {
    let space = LinearSpace::new(WRITERS * 2);
    let buffer: PersistentBuffer<_, Option<u64>> =
        PersistentBuffer::new(space.region(0, WRITERS - 1)).unwrap();
    let shared = Arc::new(SyncBuffer::new(buffer));
    let handles: Vec<_> = (0..WRITERS)
        .map(|i| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                shared
                    .with_mut(|b| append(b, &LinearSpace::OUT_OF_BOUNDS, Some(i)))
                    .unwrap()
            })
        })
        .collect();
    let mut claimed: Vec<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    claimed.sort_unstable();
    assert_eq!(claimed, (0..WRITERS).collect::<Vec<_>>());

    let buffer = Arc::try_unwrap(shared).unwrap().into_inner();
    let mut stored: Vec<u64> = contents_u64(&buffer);
    stored.sort_unstable();
    assert_eq!(stored, (0..WRITERS).collect::<Vec<_>>());
}

fn contents_u64<B: Buffer<LinearSpace, Option<u64>>>(buffer: &B) -> Vec<u64> {
    buffer
        .region()
        .positions()
        .filter_map(|p| buffer.get(&p))
        .collect()
}

#[test]
fn poisoned_lock_is_recovered() {
    let space = LinearSpace::new(8);
    let buffer: ArrayBuffer<_, Option<u32>> = ArrayBuffer::new(space.region(0, 7)).unwrap();
    let shared = Arc::new(SyncBuffer::new(buffer));
    shared.set(0, Some(1)).unwrap();

    let poisoner = Arc::clone(&shared);
    let result = thread::spawn(move || {
        poisoner.with_mut(|_| panic!("writer died holding the lock"));
    })
    .join();
    assert!(result.is_err());

    assert_eq!(shared.get(&0), Some(1));
    shared.set(1, Some(2)).unwrap();
    let mut expected = vec![None; 8];
    expected[0] = Some(1);
    expected[1] = Some(2);
    assert_eq!(shared.with(|b| contents(b)), expected);
}

#[test]
fn region_and_capacity_need_no_lock() {
    let space = LinearSpace::new(8);
    let buffer: ArrayBuffer<_, Option<u32>> = ArrayBuffer::new(space.region(2, 5)).unwrap();
    let shared = SyncBuffer::from(buffer);
    assert_eq!(shared.capacity(), 4);
    assert_eq!(shared.region(), &space.region(2, 5));
    assert_eq!(shared.index_of(&3), Some(1));
    assert_eq!(shared.index_of(&6), None);
}

#[test]
#[should_panic(expected = "shared buffer rebound")]
fn with_mut_rejects_a_buffer_over_another_region() {
    let space = LinearSpace::new(16);
    let shared: SyncBuffer<_, Option<u64>, _> =
        SyncBuffer::new(ArrayBuffer::new(space.region(0, 7)).unwrap());
    shared.with_mut(|buffer| *buffer = ArrayBuffer::new(space.region(0, 3)).unwrap());
}

#[test]
fn with_mut_may_rebind_within_the_region() {
    let space = LinearSpace::new(16);
    let shared: SyncBuffer<_, Option<u64>, _> =
        SyncBuffer::new(PersistentBuffer::new(space.region(0, 7)).unwrap());
    let before = shared.id();
    shared.with_mut(|buffer| buffer.store(2, Some(9)).unwrap());
    assert_ne!(shared.id(), before);
    assert_eq!(shared.get(&2), Some(9));
    assert_eq!(shared.region(), &space.region(0, 7));
}
