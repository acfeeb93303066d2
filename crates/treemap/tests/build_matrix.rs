use std::cmp::Ordering;

use treemap::TreeMap;

#[test]
fn build_from_sorted_sizes() {
    for n in [0usize, 1, 2, 3, 4, 5, 6, 7, 8, 15, 16, 31, 100, 1000] {
        let map = TreeMap::from_sorted_iter(n, (0..n as i32).map(|k| (k, k * 2)));
        assert_eq!(map.len(), n, "n = {n}");
        map.assert_valid().unwrap_or_else(|e| panic!("n = {n}: {e}"));

        let keys: Vec<_> = map.keys().copied().collect();
        let expected: Vec<_> = (0..n as i32).collect();
        assert_eq!(keys, expected, "n = {n}");
    }
}

#[test]
fn build_takes_exactly_n_entries() {
    let entries: Vec<(i32, i32)> = (0..10).map(|k| (k, k)).collect();
    let map = TreeMap::from_sorted_iter(3, entries.into_iter());
    assert_eq!(map.len(), 3);
    let keys: Vec<_> = map.keys().copied().collect();
    assert_eq!(keys, vec![0, 1, 2]);
}

#[test]
fn build_with_comparator() {
    let cmp = |a: &i32, b: &i32| b.cmp(a);
    let map: TreeMap<i32, i32, _> =
        TreeMap::from_sorted_iter_with(cmp, 5, (0..5).rev().map(|k| (k, k)));
    map.assert_valid().unwrap();
    let keys: Vec<_> = map.keys().copied().collect();
    assert_eq!(keys, vec![4, 3, 2, 1, 0]);
    assert_eq!(map.comparator()(&1, &2), Ordering::Greater);
}

#[test]
fn from_iterator_sorts_unordered_input() {
    let map: TreeMap<i32, &str> = [(5, "e"), (1, "a"), (3, "c"), (2, "b"), (4, "d")]
        .into_iter()
        .collect();
    map.assert_valid().unwrap();
    let keys: Vec<_> = map.keys().copied().collect();
    assert_eq!(keys, vec![1, 2, 3, 4, 5]);
}

#[test]
fn bulk_built_map_supports_edits() {
    let mut map = TreeMap::from_sorted_iter(100, (0..100).map(|k| (k, k)));
    for k in (0..100).step_by(3) {
        assert_eq!(map.remove(&k), Some(k));
    }
    map.assert_valid().unwrap();
    for k in 200..220 {
        map.insert(k, k);
    }
    map.assert_valid().unwrap();
    assert_eq!(map.len(), 100 - 34 + 20);
}
