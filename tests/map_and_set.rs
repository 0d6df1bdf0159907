use multitree::{TreeMap, TreeSet};

#[test]
fn map_overwrites_instead_of_duplicating() {
    let mut map = TreeMap::new();
    assert_eq!(map.insert("b", 1), None);
    let handle = map.handle_of(&"b").unwrap();
    assert_eq!(map.insert("b", 2), Some(1));
    assert_eq!(map.insert("a", 3), None);

    assert_eq!(map.len(), 2);
    // overwriting keeps the entry in place
    assert_eq!(map.handle_of(&"b"), Some(handle));
    assert_eq!(map.get(&"b"), Some(&2));
    map.assert_correctness();
}

#[test]
fn map_default_slots() {
    let mut map: TreeMap<char, Vec<usize>> = TreeMap::new();
    for (i, c) in "abracadabra".chars().enumerate() {
        map.get_or_insert_default(c).push(i);
    }
    assert_eq!(map.len(), 5);
    assert_eq!(map.get(&'a'), Some(&vec![0, 3, 5, 7, 10]));
    assert_eq!(map.get(&'d'), Some(&vec![6]));
    assert!(map.get_or_insert_default('z').is_empty());
    assert_eq!(map.len(), 6);
    map.assert_correctness();
}

#[test]
fn map_removal() {
    let mut map: TreeMap<_, _> = (0..10).map(|x| (x, x * x)).collect();
    assert!(map.erase(&3));
    assert!(!map.erase(&3));
    assert_eq!(map.remove(&4), Some(16));
    assert_eq!(map.remove(&4), None);
    assert!(!map.contains_key(&4));
    assert!(map.find(&4) == map.end());
    assert_eq!(map.len(), 8);

    *map.get_mut(&5).unwrap() = 0;
    *map.find_mut(&6).value_mut() += 1;
    assert_eq!(map.values().copied().collect::<Vec<_>>(), vec![0, 1, 4, 0, 37, 49, 64, 81]);

    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.get(&5), None);
}

#[test]
fn map_traits() {
    let map: TreeMap<_, _> = vec![(2, 'x'), (1, 'y'), (2, 'z')].into_iter().collect();
    assert_eq!(map.len(), 2);
    assert_eq!(format!("{:?}", map), "{1: 'y', 2: 'z'}");

    let mut copy = map.clone();
    assert_eq!(copy, map);
    copy.try_insert(3, 'w').unwrap();
    assert_ne!(copy, map);

    let keys: Vec<_> = (&copy).into_iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, vec![1, 2, 3]);
    assert_eq!(copy.into_iter().collect::<Vec<_>>(), vec![(1, 'y'), (2, 'z'), (3, 'w')]);
}

#[test]
fn set_keeps_one_of_each() {
    let mut set: TreeSet<_> = "mississippi".chars().collect();
    assert_eq!(set.len(), 4);
    assert_eq!(set.iter().collect::<String>(), "imps");
    assert_eq!(format!("{:?}", set), "{'i', 'm', 'p', 's'}");

    assert!(!set.insert('s'));
    assert!(set.contains(&'p'));
    assert_eq!(set.get(&'p'), Some(&'p'));
    assert!(set.erase(&'p'));
    assert!(!set.erase(&'p'));
    assert_eq!(set.remove(&'m'), Some('m'));
    assert_eq!(set.remove(&'m'), None);
    set.insert('m');
    assert!(!set.contains(&'p'));
    assert!(set.find(&'p') == set.end());
    set.assert_correctness();

    let copy = set.clone();
    set.clear();
    assert!(set.is_empty());
    assert_eq!(copy.into_iter().collect::<Vec<_>>(), vec!['i', 'm', 's']);
}
