//! Property tests for the DTW aligner over random sequences


use motion_coach::{dtw::dtw, frame::Frame, metric::frame_distance};
use rand::{rngs::StdRng, Rng, SeedableRng};
use test_helpers::{raised_right_wrist, rotated_pose, standing_pose};

const TOLERANCE: f64 = 1e-9;

fn abs_diff(a: &f64, b: &f64) -> f64 {
    (a - b).abs()
}

fn random_sequence(rng: &mut StdRng, len: usize) -> Vec<f64> {
    (0..len).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

/// Exhaustive minimum over every monotone path, for small inputs
fn brute_force_cost(x: &[f64], y: &[f64], i: usize, j: usize) -> f64 {
    let here = abs_diff(&x[i], &y[j]);
    if i == 0 && j == 0 {
        return here;
    }
    let mut best = f64::INFINITY;
    if i > 0 && j > 0 {
        best = best.min(brute_force_cost(x, y, i - 1, j - 1));
    }
    if i > 0 {
        best = best.min(brute_force_cost(x, y, i - 1, j));
    }
    if j > 0 {
        best = best.min(brute_force_cost(x, y, i, j - 1));
    }
    here + best
}

#[test]
fn test_path_is_monotone_and_anchored() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..200 {
        let m = rng.gen_range(1..12);
        let n = rng.gen_range(1..12);
        let x = random_sequence(&mut rng, m);
        let y = random_sequence(&mut rng, n);

        let alignment = dtw(&x, &y, abs_diff);
        let path = &alignment.path;

        assert_eq!(path.first(), Some(&(0, 0)));
        assert_eq!(path.last(), Some(&(m - 1, n - 1)));
        assert!(path.len() >= m.max(n));
        assert!(path.len() <= m + n - 1);

        for pair in path.windows(2) {
            let (di, dj) = (pair[1].0 - pair[0].0, pair[1].1 - pair[0].1);
            assert!(
                matches!((di, dj), (1, 1) | (1, 0) | (0, 1)),
                "invalid step {:?} -> {:?}",
                pair[0],
                pair[1]
            );
        }
    }
}

#[test]
fn test_cost_is_sum_along_path() {
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..200 {
        let m = rng.gen_range(1..10);
        let n = rng.gen_range(1..10);
        let x = random_sequence(&mut rng, m);
        let y = random_sequence(&mut rng, n);

        let alignment = dtw(&x, &y, abs_diff);
        let along_path: f64 = alignment.path.iter().map(|&(i, j)| abs_diff(&x[i], &y[j])).sum();

        assert!((alignment.cost - along_path).abs() < TOLERANCE);
    }
}

#[test]
fn test_cost_is_minimal() {
    let mut rng = StdRng::seed_from_u64(23);

    for _ in 0..50 {
        let m = rng.gen_range(1..6);
        let n = rng.gen_range(1..6);
        let x = random_sequence(&mut rng, m);
        let y = random_sequence(&mut rng, n);

        let alignment = dtw(&x, &y, abs_diff);
        let expected = brute_force_cost(&x, &y, m - 1, n - 1);

        assert!(
            (alignment.cost - expected).abs() < TOLERANCE,
            "dtw {} vs exhaustive {}",
            alignment.cost,
            expected
        );
    }
}

#[test]
fn test_cost_is_symmetric() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..100 {
        let (m, n) = (rng.gen_range(1..10), rng.gen_range(1..10));
        let x = random_sequence(&mut rng, m);
        let y = random_sequence(&mut rng, n);

        let forward = dtw(&x, &y, abs_diff).cost;
        let backward = dtw(&y, &x, abs_diff).cost;
        assert!((forward - backward).abs() < TOLERANCE);
    }
}

#[test]
fn test_time_shifted_sequence_aligns_for_free() {
    let x = [0.0, 0.0, 1.0, 2.0, 3.0, 3.0];
    let y = [0.0, 1.0, 1.0, 2.0, 3.0];

    let alignment = dtw(&x, &y, abs_diff);
    assert_eq!(alignment.cost, 0.0);
    for &(i, j) in &alignment.path {
        assert_eq!(x[i], y[j]);
    }
}

#[test]
fn test_aligns_pose_frames() {
    let frames: Vec<Frame> = (0..5).map(|i| rotated_pose(i as f64 * 0.1)).collect();
    let alignment = dtw(&frames, &frames, frame_distance);

    assert!(alignment.cost.abs() < TOLERANCE);
    assert_eq!(alignment.path, (0..5).map(|i| (i, i)).collect::<Vec<_>>());
}

#[test]
fn test_pose_cost_counts_each_deviating_pair() {
    let reference = vec![standing_pose(); 3];
    let user = vec![raised_right_wrist(); 3];
    let single = frame_distance(&standing_pose(), &raised_right_wrist());

    let alignment = dtw(&reference, &user, frame_distance);
    assert!(single > 0.0);
    assert!((alignment.cost - 3.0 * single).abs() < TOLERANCE);
    assert_eq!(alignment.path, vec![(0, 0), (1, 1), (2, 2)]);
}
