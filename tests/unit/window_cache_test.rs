use super::common::*;
use velodegree::window::DEFAULT_WINDOW_SIZE;

#[test]
fn test_default_window_is_sixty_seconds() {
    let cache: WindowCache = WindowCache::new(DEFAULT_WINDOW_SIZE).unwrap();
    assert_eq!(cache.size(), 60);
    assert_eq!(cache.bucket_occupancy(), vec![0; 60]);
}

#[test]
fn test_edge_key_ignores_direction() {
    assert_eq!(key("second", "first"), key("first", "second"));
    assert_eq!(key("second", "first").endpoints(), (&node("first"), &node("second")));
    assert_eq!(edge("b", "a", 3).key(), edge("a", "b", 9).key());
}

#[test]
fn test_three_event_scenario_diff() {
    let mut cache = WindowCache::new(60).unwrap();
    assert_eq!(cache.update(&edge("a", "b", 0)), diff_of(&[("a", "b", 1)]));
    assert_eq!(cache.update(&edge("a", "c", 10)), diff_of(&[("a", "c", 1)]));

    // Window ending at 70 starts at 11; (a,c)@10 expires along with (a,b)@0
    let diff = cache.update(&edge("b", "c", 70));
    assert_eq!(cache.lower_bound(), 11);
    assert_eq!(
        diff,
        diff_of(&[("a", "b", -1), ("a", "c", -1), ("b", "c", 1)])
    );
    assert_eq!(diff.to_string(), "{(a, b): -1, (a, c): -1, (b, c): +1}");
    assert_eq!(cache.active_edges(), 1);
    assert_eq!(cache.timestamp_of(&key("b", "c")), Some(70));
}

#[test]
fn test_reversed_edge_refreshes_instead_of_activating() {
    let mut cache = WindowCache::new(60).unwrap();
    assert_eq!(cache.update(&edge("Ying-Mo", "Maryann-Berry", 10)).activations(), 1);

    let diff = cache.update(&edge("Maryann-Berry", "Ying-Mo", 20));
    assert!(diff.is_empty());
    assert_eq!(cache.active_edges(), 1);
    assert_eq!(cache.timestamp_of(&key("Ying-Mo", "Maryann-Berry")), Some(20));
}

#[test]
fn test_lower_bound_only_moves_forward() {
    let mut cache = WindowCache::new(60).unwrap();
    cache.update(&edge("a", "b", 200));
    assert_eq!(cache.lower_bound(), 141);

    // In-window and stale observations leave the bound alone
    cache.update(&edge("a", "c", 150));
    cache.update(&edge("a", "d", 10));
    assert_eq!(cache.lower_bound(), 141);

    cache.update(&edge("a", "e", 201));
    assert_eq!(cache.lower_bound(), 142);
}

#[test]
fn test_window_boundary_is_inclusive() {
    let mut cache = WindowCache::new(60).unwrap();
    cache.update(&edge("a", "b", 100));

    // 100 is exactly the lower bound of a window ending at 159
    let diff = cache.update(&edge("c", "d", 159));
    assert_eq!(cache.lower_bound(), 100);
    assert_eq!(diff.evictions(), 0);
    assert!(cache.contains(&key("a", "b")));

    let diff = cache.update(&edge("c", "d", 160));
    assert_eq!(diff.get(&key("a", "b")), Some(-1));
    assert!(!cache.contains(&key("a", "b")));
}

#[test]
fn test_stale_record_classified_behind() {
    let mut cache = WindowCache::new(60).unwrap();
    cache.update(&edge("a", "b", 65));
    assert_eq!(cache.classify(3), WindowPosition::Behind);
    assert_eq!(cache.classify(6), WindowPosition::Within);
    assert_eq!(cache.classify(66), WindowPosition::Ahead);

    let before = cache.stats();
    assert!(cache.update(&edge("Ying-Mo", "Jordan-Gruber", 3)).is_empty());
    assert_eq!(cache.stats(), before);
}

#[test]
fn test_out_of_order_within_window_activates() {
    let mut cache = WindowCache::new(60).unwrap();
    cache.update(&edge("a", "b", 100));

    let diff = cache.update(&edge("c", "d", 45));
    assert_eq!(diff.get(&key("c", "d")), Some(1));
    assert_eq!(cache.timestamp_of(&key("c", "d")), Some(45));

    // Advancing past it evicts it first, before the later edge
    let diff = cache.update(&edge("e", "f", 105));
    assert_eq!(cache.lower_bound(), 46);
    assert_eq!(diff.get(&key("c", "d")), Some(-1));
    assert!(cache.contains(&key("a", "b")));
}

#[test]
fn test_large_jump_clears_whole_window() {
    let mut cache = WindowCache::new(5).unwrap();
    for (i, peer) in ["b", "c", "d", "e"].iter().enumerate() {
        cache.update(&edge("a", peer, i as i64));
    }
    assert_eq!(cache.active_edges(), 4);

    let diff = cache.update(&edge("x", "y", 1_459_217_117));
    assert_eq!(diff.evictions(), 4);
    assert_eq!(diff.activations(), 1);
    assert_eq!(cache.active_edges(), 1);
    assert_eq!(cache.bucket_occupancy().iter().sum::<usize>(), 1);
    assert_eq!(cache.bucket_occupancy().last(), Some(&1));
}

#[test]
fn test_integer_node_ids() {
    let mut cache: WindowCache<u32> = WindowCache::new(10).unwrap();
    let diff = cache.update(&Edge::new(7, 3, 0));
    assert_eq!(diff.get(&EdgeKey::new(3, 7)), Some(1));
    assert_eq!(diff.to_string(), "{(3, 7): +1}");

    let diff = cache.update(&Edge::new(1, 2, 10));
    assert_eq!(diff.to_string(), "{(1, 2): +1, (3, 7): -1}");
}

#[test]
fn test_self_loop_is_one_edge() {
    let mut cache = WindowCache::new(60).unwrap();
    let diff = cache.update(&edge("a", "a", 0));
    assert_eq!(diff.get(&key("a", "a")), Some(1));
    assert!(cache.update(&edge("a", "a", 1)).is_empty());
}
