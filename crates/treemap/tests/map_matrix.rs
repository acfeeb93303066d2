use treemap::{TreeMap, TreeMapError};

#[test]
fn insert_get_replace_matrix() {
    let mut map = TreeMap::<i32, &str>::new();
    assert_eq!(map.insert(1, "one"), None);
    assert_eq!(map.insert(3, "three"), None);
    assert_eq!(map.insert(2, "two"), None);
    assert_eq!(map.len(), 3);

    assert_eq!(map.get(&2), Some(&"two"));
    assert_eq!(map.get(&4), None);

    // Replacement keeps the node, returns the previous value.
    assert_eq!(map.insert(2, "TWO"), Some("two"));
    assert_eq!(map.len(), 3);
    assert_eq!(map.get(&2), Some(&"TWO"));

    map.assert_valid().unwrap();
}

#[test]
fn remove_matrix() {
    let mut map = TreeMap::<i32, i32>::new();
    for k in [5, 1, 9, 3, 7, 2, 8] {
        map.insert(k, k * 10);
    }

    assert_eq!(map.remove(&3), Some(30));
    assert_eq!(map.remove(&3), None);
    assert_eq!(map.remove(&42), None);
    assert_eq!(map.len(), 6);
    assert!(!map.contains_key(&3));

    map.assert_valid().unwrap();
}

#[test]
fn contains_value_is_linear_scan() {
    let mut map = TreeMap::<i32, &str>::new();
    map.insert(1, "a");
    map.insert(2, "b");

    assert!(map.contains_value(&"b"));
    assert!(!map.contains_value(&"z"));
}

#[test]
fn first_last_key_matrix() {
    let mut map = TreeMap::<i32, ()>::new();
    assert_eq!(map.first_key(), Err(TreeMapError::NoSuchElement));
    assert_eq!(map.last_key(), Err(TreeMapError::NoSuchElement));
    assert_eq!(map.first_entry(), None);
    assert_eq!(map.last_entry(), None);

    for k in [4, 2, 6] {
        map.insert(k, ());
    }
    assert_eq!(map.first_key(), Ok(&2));
    assert_eq!(map.last_key(), Ok(&6));
    assert_eq!(map.first_entry(), Some((&2, &())));
    assert_eq!(map.last_entry(), Some((&6, &())));
}

#[test]
fn poll_drains_in_order() {
    let mut map: TreeMap<i32, i32> = (0..50).map(|k| (k, k)).collect();

    let mut drained = Vec::new();
    while let Some((k, _)) = map.poll_first() {
        drained.push(k);
        map.assert_valid().unwrap();
    }
    assert_eq!(drained, (0..50).collect::<Vec<_>>());
    assert_eq!(map.len(), 0);
    assert!(map.is_empty());

    let mut map: TreeMap<i32, i32> = (0..50).map(|k| (k, k)).collect();
    let mut drained = Vec::new();
    while let Some((k, _)) = map.poll_last() {
        drained.push(k);
    }
    assert_eq!(drained, (0..50).rev().collect::<Vec<_>>());
    assert!(map.is_empty());
}

#[test]
fn clear_matrix() {
    let mut map: TreeMap<i32, i32> = (0..10).map(|k| (k, k)).collect();
    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.len(), 0);
    assert_eq!(map.get(&3), None);
    map.assert_valid().unwrap();

    map.insert(1, 1);
    assert_eq!(map.len(), 1);
    map.assert_valid().unwrap();
}

#[test]
fn iteration_matrix() {
    let mut map = TreeMap::<String, i32>::new();
    map.insert("b".to_string(), 2);
    map.insert("a".to_string(), 1);
    map.insert("c".to_string(), 3);

    let entries: Vec<_> = map.iter().map(|(k, v)| (k.clone(), *v)).collect();
    assert_eq!(
        entries,
        vec![
            ("a".to_string(), 1),
            ("b".to_string(), 2),
            ("c".to_string(), 3)
        ]
    );

    let keys: Vec<_> = map.keys().cloned().collect();
    assert_eq!(keys, vec!["a", "b", "c"]);

    let back: Vec<_> = map.descending_keys().cloned().collect();
    assert_eq!(back, vec!["c", "b", "a"]);

    let values: Vec<_> = map.values().copied().collect();
    assert_eq!(values, vec![1, 2, 3]);

    map.assert_valid().unwrap();
}

#[test]
fn custom_comparator_matrix() {
    let mut map = TreeMap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    for k in [1, 2, 3, 4] {
        map.insert(k, ());
    }

    let keys: Vec<_> = map.keys().copied().collect();
    assert_eq!(keys, vec![4, 3, 2, 1]);
    assert_eq!(map.first_key(), Ok(&4));
    assert_eq!(map.last_key(), Ok(&1));
    map.assert_valid().unwrap();
}

#[test]
fn extend_and_from_iterator_matrix() {
    let mut map: TreeMap<i32, i32> = [(2, 20), (1, 10)].into_iter().collect();
    map.extend([(3, 30), (1, 11)]);

    let entries: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(entries, vec![(1, 11), (2, 20), (3, 30)]);
    map.assert_valid().unwrap();
}

#[test]
fn into_iter_drains_ascending() {
    let map: TreeMap<i32, i32> = [(3, 3), (1, 1), (2, 2)].into_iter().collect();
    let drained: Vec<_> = map.into_iter().collect();
    assert_eq!(drained, vec![(1, 1), (2, 2), (3, 3)]);
}

#[test]
fn clone_and_eq_matrix() {
    let map: TreeMap<i32, i32> = (0..20).map(|k| (k, k * k)).collect();
    let copy = map.clone();
    assert_eq!(map, copy);
    copy.assert_valid().unwrap();

    let mut other = copy;
    other.insert(5, -1);
    assert_ne!(map, other);
}

#[test]
fn debug_format_matrix() {
    let mut map = TreeMap::<i32, &str>::new();
    map.insert(1, "a");
    map.insert(2, "b");
    assert_eq!(format!("{map:?}"), r#"{1: "a", 2: "b"}"#);
}

#[test]
fn get_mut_matrix() {
    let mut map = TreeMap::<i32, i32>::new();
    map.insert(7, 0);
    *map.get_mut(&7).unwrap() += 5;
    assert_eq!(map.get(&7), Some(&5));
    assert_eq!(map.get_mut(&8), None);
}
