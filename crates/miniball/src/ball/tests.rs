use super::*;
use crate::points::{random_ball_points, random_point_set, ArrayPointSet, PointSet};
use nalgebra::DMatrix;
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

fn pts(rows: &[&[f64]]) -> ArrayPointSet {
    let rows: Vec<Vec<f64>> = rows.iter().map(|r| r.to_vec()).collect();
    ArrayPointSet::from_rows(&rows).unwrap()
}

fn dist(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Containment, boundary tightness and center-in-hull, all relative to the radius.
fn assert_is_miniball<P: PointSet + ?Sized>(mb: &Miniball<'_, P>, points: &P, tol: f64) {
    let r = mb.radius();
    let slack = tol * r.max(1.0);
    let c = mb.center();
    for i in 0..points.size() {
        let p: Vec<f64> = (0..points.dimension()).map(|j| points.coord(i, j)).collect();
        let d = dist(&p, c);
        assert!(d <= r + slack, "point {i} at {d} outside radius {r}");
    }
    for &i in &mb.support() {
        let p: Vec<f64> = (0..points.dimension()).map(|j| points.coord(i, j)).collect();
        assert!((dist(&p, c) - r).abs() <= slack, "support point {i} off the boundary");
    }
    let q = mb.verify();
    assert!(q.min_convex_coefficient() >= -tol, "{q}");
    assert!(q.max_overlength() <= tol, "{q}");
    assert!(q.max_underlength() <= tol, "{q}");
    assert!((mb.squared_radius() - r * r).abs() <= slack * r.max(1.0));
}

#[test]
fn two_points_scenario() {
    let s = pts(&[&[1.0, 2.0], &[5.0, 2.0]]);
    let mb = Miniball::new(&s);
    assert!(!mb.is_empty());
    assert!(dist(mb.center(), &[3.0, 2.0]) < 1e-12);
    assert!((mb.radius() - 2.0).abs() < 1e-12);
    assert!((mb.squared_radius() - 4.0).abs() < 1e-12);
    assert_eq!(mb.support_size(), 2);
    let mut support = mb.support();
    support.sort_unstable();
    assert_eq!(support, vec![0, 1]);
    assert_eq!(mb.iterations(), 2);
    assert_is_miniball(&mb, &s, 1e-12);
}

#[test]
fn acute_triangle_uses_the_circumcircle() {
    let s = pts(&[&[0.0, 0.0], &[2.0, 0.0], &[1.0, 2.0]]);
    let mb = Miniball::new(&s);
    assert!(dist(mb.center(), &[1.0, 0.75]) < 1e-12);
    assert!((mb.radius() - 1.25).abs() < 1e-12);
    assert_eq!(mb.support_size(), 3);
    assert_is_miniball(&mb, &s, 1e-12);
}

#[test]
fn obtuse_triangle_uses_the_longest_edge() {
    let s = pts(&[&[0.0, 0.0], &[4.0, 0.0], &[2.0, 0.5]]);
    let mb = Miniball::new(&s);
    assert!(dist(mb.center(), &[2.0, 0.0]) < 1e-12);
    assert!((mb.radius() - 2.0).abs() < 1e-12);
    assert_eq!(mb.support_size(), 2);
    assert!(!mb.support().contains(&2));
}

#[test]
fn single_point_has_radius_zero() {
    let s = pts(&[&[5.0, 5.0]]);
    let mb = Miniball::new(&s);
    assert_eq!(mb.center(), &[5.0, 5.0]);
    assert_eq!(mb.radius(), 0.0);
    assert_eq!(mb.support_size(), 1);
    assert_eq!(mb.iterations(), 1);
}

#[test]
fn coincident_points_converge_in_one_iteration() {
    let row: &[f64] = &[3.0, 1.0, 0.0];
    let s = pts(&[row; 6]);
    let mb = Miniball::new(&s);
    assert_eq!(mb.center(), &[3.0, 1.0, 0.0]);
    assert_eq!(mb.radius(), 0.0);
    assert_eq!(mb.support_size(), 1);
    assert_eq!(mb.iterations(), 1);
    let q = mb.verify();
    assert_eq!(q.max_overlength(), 0.0);
    assert_eq!(q.max_underlength(), 0.0);
}

#[test]
fn duplicate_with_third_point() {
    let s = pts(&[&[3.0, 1.0], &[3.0, 1.0], &[1.0, 0.0]]);
    let mb = Miniball::new(&s);
    assert!(dist(mb.center(), &[2.0, 0.5]) < 1e-12);
    assert!((mb.squared_radius() - 1.25).abs() < 1e-12);
}

#[test]
fn empty_point_set_is_an_empty_ball() {
    let s = ArrayPointSet::new(3, 0);
    let mb = Miniball::new(&s);
    assert!(mb.is_empty());
    assert_eq!(mb.size(), 0);
    assert_eq!(mb.iterations(), 0);
    assert_eq!(mb.support_size(), 0);
    assert!(mb.support().is_empty());
    assert_eq!(mb.to_string(), "Miniball [empty]");
}

#[test]
#[should_panic(expected = "empty point set")]
fn radius_of_empty_ball_panics() {
    let s = ArrayPointSet::new(2, 0);
    let _ = Miniball::new(&s).radius();
}

#[test]
fn unit_square_keeps_co_spherical_corners() {
    let s = pts(&[&[0.0, 0.0], &[1.0, 0.0], &[1.0, 1.0], &[0.0, 1.0]]);
    let mb = Miniball::new(&s);
    assert!(dist(mb.center(), &[0.5, 0.5]) < 1e-12);
    assert!((mb.squared_radius() - 0.5).abs() < 1e-12);
    assert_is_miniball(&mb, &s, 1e-12);
}

#[test]
fn collinear_points_in_space() {
    let s = pts(&[
        &[1.0, 1.0, 1.0],
        &[0.0, 0.0, 0.0],
        &[3.0, 3.0, 3.0],
        &[2.0, 2.0, 2.0],
    ]);
    let mb = Miniball::new(&s);
    assert!(dist(mb.center(), &[1.5, 1.5, 1.5]) < 1e-12);
    assert!((mb.radius() - 1.5 * 3f64.sqrt()).abs() < 1e-12);
    let mut support = mb.support();
    support.sort_unstable();
    assert_eq!(support, vec![1, 2]);
}

#[test]
fn regular_simplex_vertices_all_support() {
    // unit vectors e_1..e_d in R^d: center (1/d, …, 1/d)
    let d = 6;
    let mut s = ArrayPointSet::new(d, d);
    for i in 0..d {
        s.set(i, i, 1.0);
    }
    let mb = Miniball::new(&s);
    let expected = vec![1.0 / d as f64; d];
    assert!(dist(mb.center(), &expected) < 1e-12);
    assert_eq!(mb.support_size(), d);
    assert_is_miniball(&mb, &s, 1e-12);
}

#[test]
fn random_sets_in_many_dimensions() {
    let mut rng = StdRng::seed_from_u64(31415);
    for &(d, n) in &[(2, 10), (3, 10), (5, 100), (10, 300), (25, 200), (60, 80)] {
        let s = random_point_set(d, n, &mut rng);
        let mb = Miniball::new(&s);
        assert!(mb.support_size() >= 2 && mb.support_size() <= d + 1);
        assert_is_miniball(&mb, &s, 1e-10);
    }
}

#[test]
fn almost_co_spherical_sets() {
    let mut rng = StdRng::seed_from_u64(2718);
    for &(d, n) in &[(3, 500), (10, 400), (30, 100)] {
        let s = random_ball_points(d, n, true, &mut rng);
        let mb = Miniball::new(&s);
        assert!(mb.radius() <= 1.0 + 1e-9);
        assert_is_miniball(&mb, &s, 1e-10);
    }
}

#[test]
fn dense_matrix_backing_gives_the_same_ball() {
    let mut rng = StdRng::seed_from_u64(11);
    let s = random_point_set(4, 60, &mut rng);
    let m = DMatrix::from_fn(s.size(), s.dimension(), |i, j| s.coord(i, j));
    let a = Miniball::new(&s);
    let b = Miniball::new(&m);
    assert_eq!(a.center(), b.center());
    assert_eq!(a.radius(), b.radius());
    assert_eq!(a.support(), b.support());
}

#[test]
fn verification_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(3);
    let s = random_point_set(7, 120, &mut rng);
    let mb = Miniball::new(&s);
    let first = mb.verify();
    let second = mb.verify();
    assert_eq!(first, second);
    assert_eq!(first.iterations(), mb.iterations());
    assert_eq!(first.support_size(), mb.support_size());
    assert!(first.qr_inconsistency() < 1e-10);
    assert!(first.console_fmt().contains("support size"));
    assert!(mb.to_string().starts_with("Miniball [center=("));
}

fn guarded() -> MiniballCfg {
    MiniballCfg {
        max_iterations: Some(10_000),
        ..MiniballCfg::default()
    }
}

#[test]
fn duplicate_support_point_in_space() {
    let s = pts(&[
        &[0.0, 1.0, 0.0],
        &[-1.0, -1.0, 0.0],
        &[1.0, 0.0, -1.0],
        &[0.0, 0.0, 1.0],
        &[-1.0, 0.0, 1.0],
        &[1.0, -1.0, 1.0],
        &[1.0, 1.0, 1.0],
        &[1.0, 1.0, 1.0],
    ]);
    let mb = Miniball::with_cfg(&s, guarded()).unwrap();
    assert_is_miniball(&mb, &s, 1e-10);
    let support = mb.support();
    assert!(!(support.contains(&6) && support.contains(&7)));
}

#[test]
fn cube_grids_with_repeated_corners() {
    for d in 2..=4usize {
        let mut rows = Vec::new();
        for k in 0..3usize.pow(d as u32) {
            let row: Vec<f64> = (0..d)
                .map(|j| ((k / 3usize.pow(j as u32)) % 3) as f64 - 1.0)
                .collect();
            rows.push(row);
        }
        rows.push(vec![-1.0; d]);
        rows.push(vec![1.0; d]);
        rows.push(vec![-1.0; d]);
        let s = ArrayPointSet::from_rows(&rows).unwrap();
        let mb = Miniball::with_cfg(&s, guarded()).unwrap();
        assert_is_miniball(&mb, &s, 1e-10);
        assert!((mb.squared_radius() - d as f64).abs() < 1e-10, "d={d}");
        assert!(dist(mb.center(), &vec![0.0; d]) < 1e-10, "d={d}");
    }
}

#[test]
fn iteration_cap_reports_non_convergence() {
    let mut rng = StdRng::seed_from_u64(42);
    let s = random_point_set(3, 50, &mut rng);
    let capped = MiniballCfg {
        max_iterations: Some(1),
        ..MiniballCfg::default()
    };
    match Miniball::with_cfg(&s, capped) {
        Err(err) => {
            assert_eq!(err, MiniballError::NotConverged { iterations: 1 });
            assert!(err.to_string().contains("1 iterations"));
        }
        Ok(_) => panic!("one iteration cannot settle 50 random points"),
    }

    let roomy = MiniballCfg {
        max_iterations: Some(10_000),
        ..MiniballCfg::default()
    };
    let mb = Miniball::with_cfg(&s, roomy).unwrap();
    assert_eq!(mb.radius(), Miniball::new(&s).radius());
}

#[test]
fn verbosity_does_not_change_the_result() {
    let mut rng = StdRng::seed_from_u64(8);
    let s = random_point_set(5, 40, &mut rng);
    let loud = MiniballCfg {
        verbosity: Verbosity::Debug,
        ..MiniballCfg::default()
    };
    let a = Miniball::with_cfg(&s, loud).unwrap();
    let b = Miniball::new(&s);
    assert_eq!(a.center(), b.center());
    assert_eq!(a.iterations(), b.iterations());
    assert!(MiniballCfg::default().verbosity == Verbosity::Silent);
    assert!(!MiniballCfg::default().logs(Verbosity::Info));
    assert!(loud.logs(Verbosity::Info));
}

/// Brute force in the plane: the miniball is fixed by two or three of the points.
fn brute_force_radius_2d(p: &[[f64; 2]]) -> f64 {
    let encloses =
        |c: [f64; 2], r: f64| p.iter().all(|q| dist(q, &c) <= r * (1.0 + 1e-9) + 1e-12);
    let mut best = f64::INFINITY;
    if p.len() == 1 {
        return 0.0;
    }
    for i in 0..p.len() {
        for j in i + 1..p.len() {
            let c = [(p[i][0] + p[j][0]) / 2.0, (p[i][1] + p[j][1]) / 2.0];
            let r = dist(&p[i], &c);
            if r < best && encloses(c, r) {
                best = r;
            }
            for k in j + 1..p.len() {
                let (a, b, cc) = (p[i], p[j], p[k]);
                let d = 2.0
                    * (a[0] * (b[1] - cc[1]) + b[0] * (cc[1] - a[1]) + cc[0] * (a[1] - b[1]));
                if d.abs() < 1e-9 {
                    continue;
                }
                let (a2, b2, c2) = (
                    a[0] * a[0] + a[1] * a[1],
                    b[0] * b[0] + b[1] * b[1],
                    cc[0] * cc[0] + cc[1] * cc[1],
                );
                let ux = (a2 * (b[1] - cc[1]) + b2 * (cc[1] - a[1]) + c2 * (a[1] - b[1])) / d;
                let uy = (a2 * (cc[0] - b[0]) + b2 * (a[0] - cc[0]) + c2 * (b[0] - a[0])) / d;
                let c = [ux, uy];
                let r = dist(&a, &c);
                if r < best && encloses(c, r) {
                    best = r;
                }
            }
        }
    }
    best
}

fn point_rows(
    dim: std::ops::RangeInclusive<usize>,
    n: std::ops::RangeInclusive<usize>,
) -> impl Strategy<Value = Vec<Vec<f64>>> {
    (dim, n).prop_flat_map(|(d, n)| {
        prop::collection::vec(prop::collection::vec(-10.0f64..10.0, d), n)
    })
}

/// Small integer grids in 2 to 6 dimensions with one row repeated: lots of co-spherical,
/// collinear and coincident points.
fn degenerate_rows() -> impl Strategy<Value = Vec<Vec<f64>>> {
    (2..=6usize, 2..=25usize)
        .prop_flat_map(|(d, n)| {
            (
                prop::collection::vec(prop::collection::vec(-2i32..=2, d), n),
                0..n,
            )
        })
        .prop_map(|(grid, k)| {
            let mut rows: Vec<Vec<f64>> = grid
                .iter()
                .map(|r| r.iter().map(|&x| x as f64).collect())
                .collect();
            rows.push(rows[k].clone());
            rows
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn degenerate_grids_terminate(rows in degenerate_rows()) {
        let s = ArrayPointSet::from_rows(&rows).unwrap();
        let mb = Miniball::with_cfg(&s, guarded());
        prop_assert!(mb.is_ok(), "{:?}", mb.as_ref().err());
        let mb = mb.unwrap();
        let r = mb.radius();
        let slack = 1e-10 * r.max(1.0);
        for row in &rows {
            prop_assert!(dist(row, mb.center()) <= r + slack);
        }
        for &i in &mb.support() {
            prop_assert!((dist(&rows[i], mb.center()) - r).abs() <= slack);
        }
        prop_assert!(mb.verify().min_convex_coefficient() >= -1e-10);
    }

    #[test]
    fn encloses_and_is_supported(rows in point_rows(1..=8, 1..=40)) {
        let s = ArrayPointSet::from_rows(&rows).unwrap();
        let mb = Miniball::new(&s);
        let r = mb.radius();
        let slack = 1e-10 * r.max(1.0);
        for row in &rows {
            prop_assert!(dist(row, mb.center()) <= r + slack);
        }
        for &i in &mb.support() {
            prop_assert!((dist(&rows[i], mb.center()) - r).abs() <= slack);
        }
        prop_assert!(mb.support_size() <= s.dimension() + 1);
        prop_assert!(mb.verify().min_convex_coefficient() >= -1e-10);
    }

    #[test]
    fn interval_in_one_dimension(xs in prop::collection::vec(-100.0f64..100.0, 1..30)) {
        let rows: Vec<Vec<f64>> = xs.iter().map(|&x| vec![x]).collect();
        let s = ArrayPointSet::from_rows(&rows).unwrap();
        let mb = Miniball::new(&s);
        let lo = xs.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mid = (lo + hi) / 2.0;
        prop_assert!((mb.center()[0] - mid).abs() <= 1e-12 * (1.0 + hi.abs() + lo.abs()));
        prop_assert!((mb.radius() - (hi - lo) / 2.0).abs() <= 1e-12 * (1.0 + hi - lo));
    }

    #[test]
    fn optimal_in_the_plane(
        p in prop::collection::vec(prop::array::uniform2(-5.0f64..5.0), 1..9)
    ) {
        let rows: Vec<Vec<f64>> = p.iter().map(|q| q.to_vec()).collect();
        let s = ArrayPointSet::from_rows(&rows).unwrap();
        let mb = Miniball::new(&s);
        let expected = brute_force_radius_2d(&p);
        prop_assert!((mb.radius() - expected).abs() <= 1e-8 * expected.max(1.0),
            "radius {} vs brute force {}", mb.radius(), expected);
    }
}
