use rand::Rng;
use randomized_treap::Treap;
use std::collections::BTreeSet;
use std::vec::Vec;

fn scenario() -> Treap<i32> {
    let mut treap = Treap::new();
    for key in &[5, 3, 8, 2, 4, 7, 9] {
        treap.insert(*key).unwrap();
    }
    treap
}

#[test]
fn int_test_treap() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut treap = Treap::with_seed([2, 2, 2, 2]);
    let mut expected = BTreeSet::new();

    for _ in 0..100_000 {
        let key = rng.gen::<i32>() % 10_000;
        assert_eq!(treap.insert(key).unwrap(), expected.insert(key));
    }
    assert_eq!(treap.len(), expected.len());
    assert_eq!(treap.min(), expected.iter().next());
    assert_eq!(treap.max(), expected.iter().next_back());

    for key in &expected {
        assert!(treap.search(key));
    }

    for _ in 0..50_000 {
        let key = rng.gen::<i32>() % 10_000;
        assert_eq!(treap.erase(&key), expected.remove(&key));
        assert!(!treap.search(&key));
    }

    assert_eq!(treap.len(), expected.len());
    assert!(treap.iter().eq(expected.iter()));
}

#[test]
fn test_scenario() {
    let mut treap = scenario();
    assert!(treap.search(&5));
    assert!(!treap.search(&6));
    assert_eq!(
        treap.iter().cloned().collect::<Vec<i32>>(),
        vec![2, 3, 4, 5, 7, 8, 9],
    );

    treap.erase(&3);
    assert!(!treap.search(&3));
    assert_eq!(
        treap.iter().cloned().collect::<Vec<i32>>(),
        vec![2, 4, 5, 7, 8, 9],
    );
}

#[test]
fn test_duplicate_insert() {
    let mut treap = Treap::new();
    assert!(treap.insert(4).unwrap());
    assert!(treap.search(&4));
    assert!(!treap.insert(4).unwrap());
    assert!(treap.search(&4));
    assert_eq!(treap.iter().collect::<Vec<&i32>>(), vec![&4]);
}

#[test]
fn test_erase_keeps_others() {
    let mut treap = scenario();
    assert!(treap.erase(&8));
    for key in &[5, 3, 2, 4, 7, 9] {
        assert!(treap.search(key));
    }
    assert!(!treap.search(&8));
}

#[test]
fn test_erase_absent() {
    let mut treap = scenario();
    let before = treap.clone();
    assert!(!treap.erase(&100));
    assert_eq!(treap, before);
    assert_eq!(treap.len(), 7);
}

#[test]
fn test_iteration_restartable() {
    let treap = scenario();
    let first = treap.iter().collect::<Vec<&i32>>();
    let second = treap.iter().collect::<Vec<&i32>>();
    assert_eq!(first, second);

    let mut by_ref = Vec::new();
    for key in &treap {
        by_ref.push(*key);
    }
    assert_eq!(by_ref, vec![2, 3, 4, 5, 7, 8, 9]);
}

#[test]
fn test_iteration_suspends() {
    let treap = scenario();
    let mut iter = treap.iter();
    assert_eq!(iter.next(), Some(&2));
    assert_eq!(iter.next(), Some(&3));
    let rest = iter.collect::<Vec<&i32>>();
    assert_eq!(rest, vec![&4, &5, &7, &8, &9]);
}

#[test]
fn test_empty_iteration() {
    let treap: Treap<i64> = Treap::new();
    assert_eq!(treap.iter().next(), None);
    assert_eq!(treap.into_iter().next(), None);
}

#[test]
fn test_deep_copy_independent() {
    let mut a = Treap::new();
    for key in &[5, 10, 3] {
        a.insert(*key).unwrap();
    }
    let mut b = a.clone();
    b.erase(&5);

    assert!(a.search(&5));
    assert!(!b.search(&5));
    assert!(a.search(&10) && a.search(&3));
    assert!(b.search(&10) && b.search(&3));
}

#[test]
fn test_move_transfers_nodes() {
    let mut a = Treap::new();
    for key in &[5, 10, 3] {
        a.insert(*key).unwrap();
    }
    let mut b = Treap::new();
    b.move_from(&mut a);

    for key in &[5, 10, 3] {
        assert!(!a.search(key));
        assert!(b.search(key));
    }

    let c = std::mem::take(&mut b);
    assert!(b.is_empty());
    assert_eq!(c.len(), 3);
}

#[test]
fn test_self_copy_assignment() {
    let mut a = scenario();
    let snapshot = a.clone();
    a = a.clone();
    assert_eq!(a, snapshot);
    let copy = a.try_clone().unwrap();
    a.assign_from(&copy).unwrap();
    assert_eq!(a, snapshot);
}

#[test]
fn test_float_treap() {
    let mut treap = Treap::new();
    for key in &[0.5f32, -2.25, 3.0, 0.5] {
        treap.insert(*key).unwrap();
    }
    assert_eq!(treap.to_string(), "-2.25 0.5 3");
    assert!(treap.erase(&0.5));
    assert!(!treap.search(&0.5));
}

#[test]
fn test_owning_iteration() {
    let treap: Treap<i8> = vec![3, -7, 1, 3].into_iter().collect();
    assert_eq!(treap.into_iter().collect::<Vec<i8>>(), vec![-7, 1, 3]);
}
