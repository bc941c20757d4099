//! Partitioner invariants: exact coverage, balance, clamping, determinism.

use parle::{partition, partition_count};

#[test]
fn partitions_cover_rows_exactly_once() {
    for (height, workers) in [(100u32, 4usize), (7, 3), (1, 1), (1080, 8), (13, 13)] {
        let parts = partition(64, height, workers);

        let mut next_row = 0u32;
        let mut next_pixel = 0usize;
        for (i, p) in parts.iter().enumerate() {
            assert_eq!(p.index, i);
            assert_eq!(p.start_row, next_row, "gap or overlap at partition {i}");
            assert_eq!(p.pixel_offset, next_pixel);
            assert_eq!(p.pixel_count, p.row_count as usize * 64);
            assert!(p.row_count >= 1);
            next_row += p.row_count;
            next_pixel += p.pixel_count;
        }
        assert_eq!(next_row, height);
    }
}

#[test]
fn load_is_balanced_within_one_row() {
    let parts = partition(10, 100, 7);
    let min = parts.iter().map(|p| p.row_count).min().unwrap();
    let max = parts.iter().map(|p| p.row_count).max().unwrap();
    assert!(max - min <= 1);

    // The first `height % workers` partitions take the extra row.
    assert_eq!(parts[0].row_count, 15);
    assert_eq!(parts[6].row_count, 14);
}

#[test]
fn workers_beyond_height_are_clamped() {
    assert_eq!(partition_count(5, 100), 5);
    let parts = partition(8, 5, 100);
    assert_eq!(parts.len(), 5);
    assert!(parts.iter().all(|p| p.row_count == 1));
}

#[test]
fn zero_workers_behaves_as_one() {
    assert_eq!(partition_count(10, 0), 1);
    let parts = partition(4, 10, 0);
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0].row_count, 10);
}

#[test]
fn zero_height_yields_no_partitions() {
    assert_eq!(partition_count(0, 4), 0);
    assert!(partition(64, 0, 4).is_empty());
}

#[test]
fn same_inputs_yield_same_boundaries() {
    let a = partition(1920, 1080, 6);
    let b = partition(1920, 1080, 6);
    assert_eq!(a, b);
}
