use crate::geom::{CrossSection, ProfilePoint, Tolerance};

fn contains_point(section: &CrossSection, lateral: f64, vertical: f64) -> bool {
    let tol = Tolerance::default_geom();
    section.points().iter().any(|p| {
        tol.approx_eq_f64(p.lateral, lateral) && tol.approx_eq_f64(p.vertical, vertical)
    })
}

#[test]
fn rectangle_has_four_corners() {
    let section = CrossSection::rectangle(8.0, 1.0);
    assert_eq!(section.len(), 4);
    assert!(contains_point(&section, 4.0, 0.5));
    assert!(contains_point(&section, -4.0, 0.5));
    assert!(contains_point(&section, -4.0, -0.5));
    assert!(contains_point(&section, 4.0, -0.5));
}

#[test]
fn corner_is_mirrored_into_all_quadrants() {
    let corner = [
        ProfilePoint::new(0.10, 0.25),
        ProfilePoint::new(0.30, 0.50),
    ];
    let section = CrossSection::from_corner(&corner);

    assert_eq!(section.len(), 8);
    for p in &corner {
        assert!(contains_point(&section, p.lateral, p.vertical));
        assert!(contains_point(&section, -p.lateral, p.vertical));
        assert!(contains_point(&section, -p.lateral, -p.vertical));
        assert!(contains_point(&section, p.lateral, -p.vertical));
    }
}

#[test]
fn corner_points_on_an_axis_do_not_duplicate() {
    // A vertex on the vertical = 0 axis coincides with its mirror image.
    let corner = [
        ProfilePoint::new(0.10, 0.0),
        ProfilePoint::new(0.10, 0.25),
        ProfilePoint::new(0.30, 0.30),
        ProfilePoint::new(0.30, 0.50),
    ];
    let section = CrossSection::from_corner(&corner);

    // 4 quadrants x 4 points, minus the two on-axis collapses.
    assert_eq!(section.len(), 14);

    let tol = Tolerance::default_geom();
    for pair in section.points().windows(2) {
        assert!(
            !(tol.approx_eq_f64(pair[0].lateral, pair[1].lateral)
                && tol.approx_eq_f64(pair[0].vertical, pair[1].vertical)),
            "consecutive duplicate in ring"
        );
    }
}

#[test]
fn ring_centroid_sits_on_the_local_origin() {
    let section = CrossSection::from_corner(&[
        ProfilePoint::new(0.10, 0.0),
        ProfilePoint::new(0.10, 0.25),
        ProfilePoint::new(0.30, 0.50),
    ]);
    let (mut lateral, mut vertical) = (0.0, 0.0);
    for p in section.points() {
        lateral += p.lateral;
        vertical += p.vertical;
    }
    assert!(lateral.abs() < 1e-9);
    assert!(vertical.abs() < 1e-9);
}

#[test]
fn explicit_closing_vertex_is_popped() {
    let section = CrossSection::from_ring(vec![
        ProfilePoint::new(0.0, 0.0),
        ProfilePoint::new(1.0, 0.0),
        ProfilePoint::new(1.0, 1.0),
        ProfilePoint::new(0.0, 0.0),
    ]);
    assert_eq!(section.len(), 3);
}

#[test]
fn consecutive_duplicates_are_dropped() {
    let section = CrossSection::from_ring(vec![
        ProfilePoint::new(0.0, 0.0),
        ProfilePoint::new(0.0, 0.0),
        ProfilePoint::new(1.0, 0.0),
        ProfilePoint::new(1.0, 1.0),
        ProfilePoint::new(1.0, 1.0),
    ]);
    assert_eq!(section.len(), 3);
}
