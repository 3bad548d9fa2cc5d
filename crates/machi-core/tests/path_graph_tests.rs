//! Integration tests for the point/path graph
//!
//! Structural invariants are checked after every mutation through
//! `assert_path_invariants`, and the street-layout generator is exercised
//! end to end.

use glam::DVec3;
use machi_core::graph::{Graph, PathId, PointId};
use machi_core::layout::{StreetLayoutConfig, StreetNetworkGenerator};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

fn point(graph: &mut Graph, x: f64, y: f64, z: f64) -> PointId {
    graph.new_point(DVec3::new(x, y, z)).unwrap()
}

fn path_between(graph: &mut Graph, from: DVec3, to: DVec3) -> PathId {
    let start = graph.new_point(from).unwrap();
    let finish = graph.new_point(to).unwrap();
    graph.new_path(start, finish).unwrap()
}

/// Walk both directions and check links, counts and back-references
fn assert_path_invariants(graph: &Graph, path: PathId) {
    let start = graph.path_start(path).unwrap();
    let finish = graph.path_finish(path).unwrap();
    let steps = graph.count_intermediate(path) + 1;

    assert_eq!(graph.previous(start), None);
    assert_eq!(graph.next(finish), None);

    let forward: Vec<_> = graph.iter_forward(start).collect();
    assert_eq!(forward.len(), steps);
    assert_eq!(forward.last().map(|&(_, p)| p), Some(finish));

    let reverse: Vec<_> = graph.iter_reverse(finish).collect();
    assert_eq!(reverse.len(), steps);
    assert_eq!(reverse.last().map(|&(_, p)| p), Some(start));

    for p in graph.all_points(path) {
        assert_eq!(graph.point_path(p), Some(path));
        if let Some(next) = graph.next(p) {
            assert_eq!(graph.previous(next), Some(p));
        }
    }
}

// ============================================================================
// Comparator
// ============================================================================

#[test]
fn test_comparator_is_irreflexive_and_asymmetric() {
    let mut graph = Graph::new();
    let mut rng = Xoshiro256StarStar::seed_from_u64(99);
    let mut points = Vec::new();
    for _ in 0..20 {
        // Coarse grid so plenty of positions coincide
        let x = (rand::Rng::gen_range(&mut rng, 0..3)) as f64;
        let z = (rand::Rng::gen_range(&mut rng, 0..3)) as f64;
        points.push(point(&mut graph, x, 0.0, z));
    }

    for &p in &points {
        assert!(!graph.point_precedes(p, p));
        for &q in &points {
            assert!(!(graph.point_precedes(p, q) && graph.point_precedes(q, p)));
            if p != q {
                assert!(graph.point_precedes(p, q) || graph.point_precedes(q, p));
            }
        }
    }

    let sorted = graph.sort_points(&points);
    for pair in sorted.windows(2) {
        assert!(graph.point_precedes(pair[0], pair[1]));
    }
}

#[test]
fn test_sort_is_independent_of_input_order() {
    let mut graph = Graph::new();
    let points: Vec<_> = (0..10)
        .map(|i| point(&mut graph, (i % 3) as f64, 0.0, 0.0))
        .collect();
    let mut reversed = points.clone();
    reversed.reverse();
    assert_eq!(graph.sort_points(&points), graph.sort_points(&reversed));
}

// ============================================================================
// Structure
// ============================================================================

#[test]
fn test_invariants_hold_through_mutations() {
    let mut graph = Graph::new();
    let path = path_between(&mut graph, DVec3::ZERO, DVec3::new(10.0, 0.0, 0.0));
    assert_path_invariants(&graph, path);

    graph.subdivide(path, 1.0).unwrap();
    assert_path_invariants(&graph, path);

    let third = graph.get_point(path, 3).unwrap();
    assert!(graph.remove(path, third));
    assert_path_invariants(&graph, path);

    let extra = point(&mut graph, 2.5, 1.0, 0.0);
    assert!(graph.insert_at(path, 2, extra));
    assert_path_invariants(&graph, path);

    let tip = point(&mut graph, 11.0, 0.0, 0.0);
    assert!(graph.extend(path, tip));
    assert_path_invariants(&graph, path);

    let stop = graph.get_point(path, 6).unwrap();
    graph.cut_off(path, stop).unwrap();
    assert_path_invariants(&graph, path);

    assert_eq!(graph.shorten_by(path, 2), 2);
    assert_path_invariants(&graph, path);

    graph.clear_intermediate(path);
    assert_path_invariants(&graph, path);
}

#[test]
fn test_extend_then_shorten_is_structural_no_op() {
    let mut graph = Graph::new();
    let path = path_between(&mut graph, DVec3::ZERO, DVec3::new(6.0, 0.0, 0.0));
    graph.subdivide(path, 2.0).unwrap();
    let (start, finish) = (graph.path_start(path), graph.path_finish(path));
    let count = graph.count_intermediate(path);

    let tip = point(&mut graph, 8.0, 0.0, 0.0);
    assert!(graph.extend(path, tip));
    assert!(graph.shorten(path));

    assert_eq!(graph.path_start(path), start);
    assert_eq!(graph.path_finish(path), finish);
    assert_eq!(graph.count_intermediate(path), count);
    assert_path_invariants(&graph, path);
}

#[test]
fn test_extend_with_linked_point_drops_its_next_link() {
    let mut graph = Graph::new();
    let path = path_between(&mut graph, DVec3::ZERO, DVec3::new(1.0, 0.0, 0.0));
    let tip = point(&mut graph, 2.0, 0.0, 0.0);
    let stray = point(&mut graph, 50.0, 0.0, 0.0);
    graph.link(&[tip, stray]).unwrap();

    assert!(graph.extend(path, tip));

    assert_eq!(graph.next(tip), None);
    assert_eq!(graph.previous(stray), None);
    assert_eq!(graph.all_points(path).len(), graph.count_intermediate(path) + 2);
    assert!((graph.length(path) - 2.0).abs() < 1e-9);
    assert_path_invariants(&graph, path);
}

#[test]
fn test_split_then_transfer_back_reproduces_positions() {
    let mut graph = Graph::new();
    let path = path_between(&mut graph, DVec3::ZERO, DVec3::new(12.0, 0.0, 6.0));
    graph.make_wave(path, 6, 2.0, 1.3).unwrap();
    let original = graph.all_positions(path);

    let cut = graph.get_point(path, 3).unwrap();
    let tail = graph.split_at(path, cut).unwrap();
    assert_path_invariants(&graph, path);
    assert_path_invariants(&graph, tail);

    // Reassemble: extend to a point at the old finish, then move the tail's
    // intermediates in front of it
    let old_finish = graph.path_finish(tail).unwrap();
    let rejoin = graph.copy_point(old_finish).unwrap();
    assert!(graph.extend(path, rejoin));
    let first = graph.get_point(tail, 1).unwrap();
    let last = graph.get_point(tail, graph.count_intermediate(tail)).unwrap();
    assert!(graph.transfer_points_to(tail, path, first, last));

    assert_eq!(graph.all_positions(path), original);
    assert_path_invariants(&graph, path);
    assert_path_invariants(&graph, tail);
    assert!(!graph.has_intermediate(tail));
}

// ============================================================================
// Geometry
// ============================================================================

#[test]
fn test_length_scenario() {
    let mut graph = Graph::new();
    let path = path_between(&mut graph, DVec3::ZERO, DVec3::new(30.0, 40.0, 0.0));
    assert!((graph.length(path) - 50.0).abs() < 1e-9);

    let on_line = point(&mut graph, 15.0, 20.0, 0.0);
    assert!(graph.insert(path, on_line));
    assert!((graph.length(path) - 50.0).abs() < 1e-9);

    let off_line = point(&mut graph, 15.0, 20.0, 10.0);
    assert!(graph.insert_before(path, on_line, off_line));
    assert!(graph.length(path) > 50.0);
}

#[test]
fn test_subdivide_bound_on_irregular_path() {
    let mut graph = Graph::new();
    let path = path_between(&mut graph, DVec3::ZERO, DVec3::new(37.0, 3.0, -21.0));
    let a = point(&mut graph, 5.0, 1.0, 9.0);
    let b = point(&mut graph, 17.5, -2.0, 4.0);
    assert!(graph.insert(path, a));
    assert!(graph.insert(path, b));

    graph.subdivide(path, 2.75).unwrap();
    let positions = graph.all_positions(path);
    for pair in positions.windows(2) {
        assert!(pair[0].distance(pair[1]) <= 2.75 + 1e-9);
    }
    assert_eq!(graph.subdivide(path, 2.75), Ok(0));
    assert_path_invariants(&graph, path);
}

#[test]
fn test_unsubdivide_never_removes_significant_points() {
    let mut graph = Graph::new();
    let path = path_between(&mut graph, DVec3::ZERO, DVec3::new(30.0, 0.0, 0.0));
    graph.subdivide(path, 3.0).unwrap();

    let root = graph.get_point(path, 4).unwrap();
    let tip = point(&mut graph, 12.0, 0.0, 10.0);
    graph.branch(root, tip).unwrap();

    let pinned = graph.get_point(path, 7).unwrap();
    let marker = point(&mut graph, 0.0, 0.0, 0.0);
    graph.attach(pinned, &[marker]).unwrap();

    let start = graph.path_start(path).unwrap();
    let finish = graph.path_finish(path).unwrap();
    graph.unsubdivide(path, std::f64::consts::PI).unwrap();

    assert_eq!(graph.all_points(path), vec![start, root, pinned, finish]);
    assert_path_invariants(&graph, path);
}

#[test]
fn test_attachment_scenario() {
    let mut graph = Graph::new();
    let p1 = point(&mut graph, 0.0, 0.0, 0.0);
    let p2 = point(&mut graph, 1.0, 1.0, 1.0);
    graph.attach(p1, &[p2]).unwrap();
    graph.set_position(p1, DVec3::splat(5.0)).unwrap();
    assert_eq!(graph.position(p2), Some(DVec3::splat(5.0)));
}

#[test]
fn test_wave_scenario() {
    let mut graph = Graph::new();
    let path = path_between(&mut graph, DVec3::ZERO, DVec3::new(100.0, 0.0, 0.0));
    graph.make_wave(path, 10, 5.0, 2.0).unwrap();

    assert_eq!(graph.count_intermediate(path), 9);
    let positions = graph.all_positions(path);
    assert!(positions.iter().any(|p| p.z.abs() > 1e-6));
    assert_path_invariants(&graph, path);
}

#[test]
fn test_slanted_scenario() {
    let mut graph = Graph::new();
    let path = path_between(&mut graph, DVec3::ZERO, DVec3::new(20.0, 0.0, 10.0));
    graph.make_slanted(path).unwrap();
    assert_eq!(
        graph.all_positions(path),
        vec![
            DVec3::ZERO,
            DVec3::new(10.0, 0.0, 10.0),
            DVec3::new(20.0, 0.0, 10.0)
        ]
    );

    let aligned = path_between(&mut graph, DVec3::ZERO, DVec3::new(0.0, 0.0, 25.0));
    graph.make_slanted(aligned).unwrap();
    assert_eq!(graph.count_intermediate(aligned), 0);
}

// ============================================================================
// Street layout
// ============================================================================

#[test]
fn test_generated_networks_are_valid_trees() {
    for name in StreetLayoutConfig::PRESETS {
        let config = StreetLayoutConfig::preset(name).unwrap();
        let generator = StreetNetworkGenerator::from_config(2024, config);
        let mut graph = Graph::new();
        let network = generator.generate(&mut graph).unwrap();

        for &street in &network.streets {
            assert_path_invariants(&graph, street);
        }
        for &street in &network.streets[1..] {
            let root = graph.branch_root(street).unwrap();
            let start = graph.path_start(street).unwrap();
            assert!(graph.is_attached(root, start));
            assert_eq!(graph.position(root), graph.position(start));
        }

        let snapshot = network.snapshot(&graph).unwrap();
        assert_eq!(snapshot.path_count(), network.streets.len());
    }
}

#[test]
fn test_same_seed_same_town() {
    let generator = StreetNetworkGenerator::from_config(
        31337,
        StreetLayoutConfig::preset_diagonal_suburb(),
    );
    let mut first = Graph::new();
    let mut second = Graph::with_first_id(1000);
    let a = generator.generate(&mut first).unwrap();
    let b = generator.generate(&mut second).unwrap();

    let positions = |graph: &Graph, streets: &[PathId]| -> Vec<Vec<DVec3>> {
        streets.iter().map(|&s| graph.all_positions(s)).collect()
    };
    assert_eq!(positions(&first, &a.streets), positions(&second, &b.streets));

    let other = StreetNetworkGenerator::from_config(
        31338,
        StreetLayoutConfig::preset_diagonal_suburb(),
    );
    let mut third = Graph::new();
    let c = other.generate(&mut third).unwrap();
    assert_ne!(positions(&first, &a.streets), positions(&third, &c.streets));
}
