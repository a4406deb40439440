use std::f64::consts::PI;

use lc_boundary::{Boundary, BoundaryError, BoundaryState, FieldKind, PointOrigin};
use lc_core::{LevelSet, Point2, StructuredGrid};

const SIDE: f64 = 40.0;

fn circle_case(spacing: f64, centre: Point2, radius: f64) -> (StructuredGrid, LevelSet) {
    let n = (SIDE / spacing).round() as usize;
    let grid = StructuredGrid::with_spacing(n, n, spacing).expect("valid grid");
    let field = LevelSet::circle(&grid, centre, radius);
    (grid, field)
}

fn discretised(grid: &StructuredGrid, field: &LevelSet) -> Boundary {
    let mut b = Boundary::new();
    b.discretise(grid, field, FieldKind::Primary)
        .expect("circle discretises");
    b
}

#[test]
fn centred_circle_is_one_closed_loop() {
    let (grid, field) = circle_case(1.0, Point2::new(20.3, 19.7), 10.2);
    let b = discretised(&grid, &field);

    assert!(b.n_points() > 0);
    assert_eq!(b.n_points(), b.n_segments());
    for p in &b.points {
        assert_eq!(p.n_segments(), 2);
        assert_eq!(p.n_neighbours(), 2);
        assert!(!p.is_domain);
    }

    let mut coords: Vec<(f64, f64)> = b.points.iter().map(|p| (p.coord.x, p.coord.y)).collect();
    coords.sort_by(|a, b| a.partial_cmp(b).expect("finite coordinates"));
    coords.dedup();
    assert_eq!(coords.len(), b.n_points());

    let contours = b.contours();
    assert_eq!(contours.len(), 1);
    assert!(contours[0].closed);
    assert_eq!(contours[0].points.len(), b.n_points());
    assert!((contours[0].length - b.length).abs() < 1e-9);
}

#[test]
fn length_matches_segment_and_perimeter_sums() {
    let (grid, field) = circle_case(0.5, Point2::new(19.1, 21.4), 8.3);
    let b = discretised(&grid, &field);

    let by_segment: f64 = b.segments.iter().map(|s| s.length).sum();
    let by_perimeter: f64 = (0..b.n_points())
        .map(|id| b.compute_perimeter(id).expect("discretised boundary"))
        .sum();
    let by_point_length: f64 = b.points.iter().map(|p| p.length).sum();

    assert!((b.length - by_segment).abs() < 1e-9);
    assert!((b.length - by_perimeter).abs() < 1e-9);
    assert!((b.length - by_point_length).abs() < 1e-9);
}

#[test]
fn circle_length_converges() {
    let centre = Point2::new(20.17, 19.83);
    let radius = 10.0;
    let exact = 2.0 * PI * radius;

    let errors: Vec<f64> = [1.0, 0.5, 0.25]
        .into_iter()
        .map(|h| {
            let (grid, field) = circle_case(h, centre, radius);
            let b = discretised(&grid, &field);
            (b.length - exact).abs() / exact
        })
        .collect();

    assert!(errors[0] < 1e-2, "coarse error {}", errors[0]);
    assert!(errors[2] < 1e-3, "fine error {}", errors[2]);
    assert!(errors[2] < errors[0]);
}

#[test]
fn rediscretising_is_bit_reproducible() {
    let (grid, field) = circle_case(0.5, Point2::new(20.0, 20.0), 7.77);

    let mut b = discretised(&grid, &field);
    let points = b.points.clone();
    let segments = b.segments.clone();
    let length = b.length;

    b.discretise(&grid, &field, FieldKind::Primary)
        .expect("circle discretises");

    assert_eq!(b.points, points);
    assert_eq!(b.segments, segments);
    assert_eq!(b.length.to_bits(), length.to_bits());
}

#[test]
fn circle_normals_point_at_the_centre() {
    let centre = Point2::new(20.2, 19.9);
    let (grid, field) = circle_case(0.5, centre, 9.0);
    let mut b = discretised(&grid, &field);
    b.compute_normal_vectors(&grid, &field).expect("normals");

    for p in &b.points {
        let expected = (centre - p.coord).normalize();
        assert!((p.normal.norm() - 1.0).abs() < 1e-9);
        assert!((p.normal - expected).norm() < 0.1);
    }
}

#[test]
fn circle_area_from_fractions() {
    let radius = 9.0;
    let (grid, field) = circle_case(0.5, Point2::new(20.4, 20.1), radius);
    let b = discretised(&grid, &field);

    let fractions = b.compute_area_fractions(&grid, &field).expect("fractions");
    let cell = grid.spacing() * grid.spacing();
    let area: f64 = fractions.iter().map(|f| f * cell).sum();

    let exact = PI * radius * radius;
    assert!((area - exact).abs() / exact < 1e-2);
    assert!(fractions.iter().all(|f| (0.0..=1.0).contains(f)));
}

#[test]
fn domain_cut_circle_is_an_open_chain() {
    let grid = StructuredGrid::new(10, 10).expect("valid grid");
    let field = LevelSet::circle(&grid, Point2::new(0.0, 0.0), 5.5);
    let mut b = Boundary::new();
    b.discretise(&grid, &field, FieldKind::Primary)
        .expect("quarter circle discretises");

    let ends: Vec<_> = b
        .points
        .iter()
        .filter(|p| p.n_neighbours() == 1)
        .collect();
    assert_eq!(ends.len(), 2);
    assert!(ends.iter().all(|p| p.is_domain));
    assert!(b.points.iter().all(|p| p.n_neighbours() > 0));

    let contours = b.contours();
    assert_eq!(contours.len(), 1);
    assert!(!contours[0].closed);
    assert_eq!(contours[0].points.len(), b.n_points());
}

#[test]
fn domain_zero_node_can_carry_two_segments() {
    // Material around the centre node touches the bottom side at node 1.
    let grid = StructuredGrid::new(2, 2).expect("valid grid");
    let values = vec![1.0, 0.0, 1.0, 1.0, -1.0, 1.0, 1.0, 1.0, 1.0];
    let field = LevelSet::from_vec(&grid, values).expect("valid field");

    let mut b = Boundary::new();
    b.discretise(&grid, &field, FieldKind::Primary)
        .expect("touching contour discretises");

    let touch = b
        .points
        .iter()
        .find(|p| p.origin == PointOrigin::Node(1))
        .expect("point on the zero node");
    assert!(touch.is_domain);
    assert_eq!(touch.coord, Point2::new(1.0, 0.0));
    assert_eq!(touch.n_segments(), 2);
    assert_eq!(touch.n_neighbours(), 2);

    let contours = b.contours();
    assert_eq!(contours.len(), 1);
    assert!(contours[0].closed);
    assert_eq!(contours[0].points.len(), 4);
    assert_eq!(b.n_points(), 4);
}

#[test]
fn pinched_contour_is_reported() {
    // Two inside nodes either side of a zero node: four segments meet there.
    let grid = StructuredGrid::new(2, 2).expect("valid grid");
    let values = vec![1.0, 1.0, 1.0, -1.0, 0.0, -1.0, 1.0, 1.0, 1.0];
    let field = LevelSet::from_vec(&grid, values).expect("valid field");

    let mut b = Boundary::new();
    let err = b
        .discretise(&grid, &field, FieldKind::Primary)
        .unwrap_err();

    assert_eq!(
        err,
        BoundaryError::NonManifoldPoint {
            point: 0,
            segments: 4
        }
    );
    assert_eq!(b.state(), BoundaryState::Invalid);
    assert_eq!(b.n_points(), 5);
    assert_eq!(
        b.compute_normal_vectors(&grid, &field),
        Err(BoundaryError::NotDiscretised)
    );
}

#[test]
fn primary_and_target_discretise_independently() {
    let grid = StructuredGrid::new(30, 30).expect("valid grid");
    let target = LevelSet::circle(&grid, Point2::new(15.0, 15.0), 6.1);
    let field = LevelSet::circle(&grid, Point2::new(14.6, 15.3), 8.2)
        .with_target(target.values().to_vec())
        .expect("matching target");

    let (primary, target) = std::thread::scope(|s| {
        let primary = s.spawn(|| {
            let mut b = Boundary::new();
            b.discretise(&grid, &field, FieldKind::Primary).map(|_| b)
        });
        let target = s.spawn(|| {
            let mut b = Boundary::new();
            b.discretise(&grid, &field, FieldKind::Target).map(|_| b)
        });
        (
            primary.join().expect("primary thread"),
            target.join().expect("target thread"),
        )
    });

    let primary = primary.expect("primary discretises");
    let target = target.expect("target discretises");
    assert_eq!(target.field_kind(), FieldKind::Target);
    assert!(primary.length > target.length);
    assert!((target.length - 2.0 * PI * 6.1).abs() / (2.0 * PI * 6.1) < 1e-2);
}
