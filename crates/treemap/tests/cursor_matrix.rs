use std::ops::Bound::Included;

use treemap::{TreeMap, TreeMapError};

#[test]
fn cursor_walks_in_order() {
    let map: TreeMap<i32, i32> = [(2, 20), (1, 10), (3, 30)].into_iter().collect();
    let mut cursor = map.cursor();

    let mut seen = Vec::new();
    while let Some((k, v)) = cursor.advance(&map).unwrap() {
        seen.push((*k, *v));
    }
    assert_eq!(seen, vec![(1, 10), (2, 20), (3, 30)]);
    // Exhausted cursors stay exhausted.
    assert_eq!(cursor.advance(&map).unwrap(), None);
}

#[test]
fn descending_cursor_matrix() {
    let map: TreeMap<i32, i32> = (1..=5).map(|k| (k, k)).collect();
    let mut cursor = map.cursor_desc();

    let mut seen = Vec::new();
    while let Some((k, _)) = cursor.advance(&map).unwrap() {
        seen.push(*k);
    }
    assert_eq!(seen, vec![5, 4, 3, 2, 1]);
}

#[test]
fn fail_fast_on_external_insert() {
    let mut map: TreeMap<i32, i32> = (0..10).map(|k| (k, k)).collect();
    let mut cursor = map.cursor();
    assert!(cursor.advance(&map).unwrap().is_some());

    map.insert(100, 100);
    assert_eq!(
        cursor.advance(&map),
        Err(TreeMapError::ConcurrentStructuralChange)
    );
}

#[test]
fn fail_fast_on_external_remove() {
    let mut map: TreeMap<i32, i32> = (0..10).map(|k| (k, k)).collect();
    let mut cursor = map.cursor();

    map.remove(&7);
    assert_eq!(
        cursor.advance(&map),
        Err(TreeMapError::ConcurrentStructuralChange)
    );
}

#[test]
fn value_replacement_is_not_structural() {
    let mut map: TreeMap<i32, i32> = (0..5).map(|k| (k, k)).collect();
    let mut cursor = map.cursor();

    // Same key: value replaced in place, no structural change.
    map.insert(3, 333);
    let mut seen = Vec::new();
    while let Some((k, v)) = cursor.advance(&map).unwrap() {
        seen.push((*k, *v));
    }
    assert_eq!(seen, vec![(0, 0), (1, 1), (2, 2), (3, 333), (4, 4)]);
}

#[test]
fn cursor_remove_keeps_cursor_valid() {
    let mut map: TreeMap<i32, i32> = (0..10).map(|k| (k, k)).collect();
    let mut cursor = map.cursor();

    // Remove every even key through the cursor.
    let mut kept = Vec::new();
    loop {
        let Some((k, _)) = cursor.advance(&map).unwrap() else {
            break;
        };
        let k = *k;
        if k % 2 == 0 {
            cursor.remove(&mut map).unwrap();
        } else {
            kept.push(k);
        }
    }

    assert_eq!(kept, vec![1, 3, 5, 7, 9]);
    assert_eq!(map.len(), 5);
    let keys: Vec<_> = map.keys().copied().collect();
    assert_eq!(keys, vec![1, 3, 5, 7, 9]);
    map.assert_valid().unwrap();
}

#[test]
fn cursor_remove_two_child_node() {
    // Balanced build over 1..=7: the root holds 4 with two children.
    let mut map = TreeMap::from_sorted_iter(7, (1..=7).map(|k| (k, k)));

    let mut cursor = map.cursor();
    let mut seen = Vec::new();
    loop {
        let Some((k, _)) = cursor.advance(&map).unwrap() else {
            break;
        };
        let k = *k;
        seen.push(k);
        if k == 4 {
            cursor.remove(&mut map).unwrap();
        }
    }

    // The successor takes the removed node's place and the traversal
    // continues without skipping or repeating.
    assert_eq!(seen, vec![1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(map.len(), 6);
    assert!(!map.contains_key(&4));
    map.assert_valid().unwrap();
}

#[test]
fn descending_cursor_remove_two_child_node() {
    // Balanced build over 1..=7: the root holds 4 with two children. A
    // removal mid-descent frees the successor's slot, which sits on the
    // already-visited side; the pending predecessor must be unaffected.
    let mut map = TreeMap::from_sorted_iter(7, (1..=7).map(|k| (k, k)));

    let mut cursor = map.cursor_desc();
    let mut seen = Vec::new();
    loop {
        let Some((k, _)) = cursor.advance(&map).unwrap() else {
            break;
        };
        let k = *k;
        seen.push(k);
        if k == 4 {
            cursor.remove(&mut map).unwrap();
        }
    }

    assert_eq!(seen, vec![7, 6, 5, 4, 3, 2, 1]);
    assert_eq!(map.len(), 6);
    assert!(!map.contains_key(&4));
    let keys: Vec<_> = map.keys().copied().collect();
    assert_eq!(keys, vec![1, 2, 3, 5, 6, 7]);
    map.assert_valid().unwrap();
}

#[test]
fn cursor_remove_state_errors() {
    let mut map: TreeMap<i32, i32> = (0..5).map(|k| (k, k)).collect();

    // Nothing yielded yet.
    let mut cursor = map.cursor();
    assert_eq!(
        cursor.remove(&mut map),
        Err(TreeMapError::IllegalIteratorState)
    );

    // Double removal of the same element.
    let mut cursor = map.cursor();
    cursor.advance(&map).unwrap();
    cursor.remove(&mut map).unwrap();
    assert_eq!(
        cursor.remove(&mut map),
        Err(TreeMapError::IllegalIteratorState)
    );

    // The cursor is still usable after its own removals.
    assert!(cursor.advance(&map).unwrap().is_some());
    map.assert_valid().unwrap();
}

#[test]
fn range_cursor_stops_at_fence() {
    let mut map = TreeMap::from_sorted_iter(9, (1..=9).map(|k| (k, k)));
    let view = map.sub_map(Included(3), Included(6)).unwrap();
    let mut cursor = view.cursor();
    drop(view);

    let mut seen = Vec::new();
    while let Some((k, _)) = cursor.advance(&map).unwrap() {
        seen.push(*k);
    }
    assert_eq!(seen, vec![3, 4, 5, 6]);
}

#[test]
fn range_cursor_remove_when_successor_is_fence() {
    // Tree over 1..=7 puts 4 at the root with two children; the range
    // [3, 4] has fence node 5, which is also 4's in-order successor.
    let mut map = TreeMap::from_sorted_iter(7, (1..=7).map(|k| (k, k)));
    let mut cursor = {
        let view = map.sub_map(Included(3), Included(4)).unwrap();
        view.cursor()
    };

    let mut seen = Vec::new();
    loop {
        let Some((k, _)) = cursor.advance(&map).unwrap() else {
            break;
        };
        seen.push(*k);
        cursor.remove(&mut map).unwrap();
    }

    assert_eq!(seen, vec![3, 4]);
    assert_eq!(map.len(), 5);
    assert!(map.contains_key(&5));
    let keys: Vec<_> = map.keys().copied().collect();
    assert_eq!(keys, vec![1, 2, 5, 6, 7]);
    map.assert_valid().unwrap();
}

#[test]
fn descending_range_cursor_matrix() {
    let mut map: TreeMap<i32, i32> = (1..=9).map(|k| (k, k)).collect();
    let mut cursor = {
        let view = map
            .sub_map(Included(3), Included(6))
            .unwrap()
            .descending();
        view.cursor()
    };

    let mut seen = Vec::new();
    while let Some((k, _)) = cursor.advance(&map).unwrap() {
        seen.push(*k);
    }
    assert_eq!(seen, vec![6, 5, 4, 3]);
}

#[test]
fn descending_cursor_remove_matrix() {
    let mut map: TreeMap<i32, i32> = (1..=7).map(|k| (k, k)).collect();
    let mut cursor = map.cursor_desc();

    let mut seen = Vec::new();
    loop {
        let Some((k, _)) = cursor.advance(&map).unwrap() else {
            break;
        };
        let k = *k;
        seen.push(k);
        if k % 2 == 1 {
            cursor.remove(&mut map).unwrap();
        }
    }

    assert_eq!(seen, vec![7, 6, 5, 4, 3, 2, 1]);
    let keys: Vec<_> = map.keys().copied().collect();
    assert_eq!(keys, vec![2, 4, 6]);
    map.assert_valid().unwrap();
}
