use std::collections::BTreeSet;

use planar_physics::collision::broadphase::{insertion_sort_by_start, BroadPhase};
use planar_physics::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_boundaries(rng: &mut StdRng, count: usize) -> Vec<Boundary> {
    (0..count)
        .map(|_| {
            let shape = match rng.gen_range(0..3) {
                0 => Shape::circle(rng.gen_range(0.5..4.0)),
                1 => Shape::rectangle(rng.gen_range(0.5..6.0), rng.gen_range(0.5..6.0)),
                _ => Shape::polygon(vec![
                    DVec2::new(-1.0, -1.0),
                    DVec2::new(2.0, -0.5),
                    DVec2::new(0.0, 1.5),
                ]),
            };
            let height = if rng.gen_bool(0.1) { 0.0 } else { rng.gen_range(0.5..3.0) };
            let mut boundary = Boundary::new(shape).with_height(height);
            let at = Point::new(
                rng.gen_range(-50.0..50.0),
                rng.gen_range(-50.0..50.0),
                rng.gen_range(0.0..4.0),
            );
            boundary.update_projections(at);
            boundary
        })
        .collect()
}

fn normalized(pairs: &[(usize, usize)]) -> BTreeSet<(usize, usize)> {
    pairs.iter().map(|&(a, b)| (a.min(b), a.max(b))).collect()
}

#[test]
fn sweep_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for round in 0..20 {
        let boundaries = random_boundaries(&mut rng, 120);

        let mut sorted: Vec<usize> = (0..boundaries.len()).collect();
        insertion_sort_by_start(&mut sorted, |i| Some(boundaries[i].projections().x));
        assert!(sorted
            .windows(2)
            .all(|w| boundaries[w[0]].projections().x.start <= boundaries[w[1]].projections().x.start));

        let mut broad_phase = BroadPhase::new();
        let found = normalized(broad_phase.find_pairs(&sorted, |i| boundaries.get(i)));

        let mut expected = BTreeSet::new();
        for i in 0..boundaries.len() {
            for j in i + 1..boundaries.len() {
                let (a, b) = (&boundaries[i], &boundaries[j]);
                if a.projections().overlaps_planar(b.projections()) && a.is_coplanar(b) {
                    expected.insert((i, j));
                }
            }
        }
        assert_eq!(found, expected, "round {round}");
    }
}

#[test]
fn nearly_sorted_input_stays_stable() {
    let starts = [0.0, 1.0, 1.0, 3.0, 2.5, 4.0];
    let mut items: Vec<usize> = (0..starts.len()).collect();
    insertion_sort_by_start(&mut items, |i| Some(Interval::new(starts[i], starts[i] + 1.0)));
    assert_eq!(items, vec![0, 1, 2, 4, 3, 5]);
}

#[test]
fn interval_overlap_is_symmetric() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..500 {
        let a = Interval::spanning(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0));
        let b = Interval::spanning(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0));
        assert_eq!(a.overlaps(&b), b.overlaps(&a));
        assert_eq!(a.overlaps(&b), a.distance(&b) <= 0.0);
    }
}
