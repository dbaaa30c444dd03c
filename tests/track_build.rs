use railgen::geom::{Point3, Tolerance, TrackMesh};
use railgen::track::{
    RailSide, SceneSink, TieTransform, TrackConfig, TrackError, build_track,
};

/// Records everything the builder publishes, in call order.
#[derive(Default)]
struct RecordingSink {
    ties: Option<(TrackMesh, Vec<TieTransform>)>,
    rails: Vec<(RailSide, TrackMesh)>,
}

impl SceneSink for RecordingSink {
    fn add_ties(&mut self, mesh: TrackMesh, transforms: Vec<TieTransform>) {
        self.ties = Some((mesh, transforms));
    }

    fn add_rail(&mut self, side: RailSide, mesh: TrackMesh) {
        self.rails.push((side, mesh));
    }
}

fn example_waypoints() -> [Point3; 3] {
    [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(10.0, 0.0, 0.0),
        Point3::new(20.0, 0.0, 10.0),
    ]
}

#[test]
fn full_build_publishes_ties_and_two_rails() {
    let mut sink = RecordingSink::default();
    let config = TrackConfig::default();
    let report =
        build_track(&example_waypoints(), &config, &mut sink).expect("build should succeed");

    let (tie_mesh, ties) = sink.ties.as_ref().expect("sink should have received ties");
    assert_eq!(ties.len(), report.tie_count);
    tie_mesh.validate().expect("tie mesh should validate");

    // Tie count is one tie per full step plus the starting tie.
    let expected = (report.track_length / config.tie_step).floor() as usize + 1;
    // The tie path is sampled denser than the rail path, so allow the length
    // estimate to straddle a step boundary.
    assert!(
        ties.len() == expected || ties.len() == expected + 1,
        "tie count {} inconsistent with length {}",
        ties.len(),
        report.track_length
    );
    assert!(ties.len() >= 13);

    assert_eq!(sink.rails.len(), 2);
    assert_eq!(sink.rails[0].0, RailSide::East);
    assert_eq!(sink.rails[1].0, RailSide::West);
    for (_, mesh) in &sink.rails {
        mesh.validate().expect("rail mesh should validate");
        assert_eq!(mesh.ring_count(), report.rail_ring_count);
    }

    // 2 waypoint segments at the default rail density of 8.
    assert_eq!(report.rail_ring_count, 2 * 8 + 1);
}

#[test]
fn rails_are_separated_by_the_gauge() {
    let mut sink = RecordingSink::default();
    let config = TrackConfig::default();
    build_track(&example_waypoints(), &config, &mut sink).expect("build should succeed");

    let east = &sink.rails[0].1;
    let west = &sink.rails[1].1;
    assert_eq!(east.ring_count(), west.ring_count());

    // The rail profile is symmetric, so ring centroids sit on the offset
    // centerlines; corresponding centroids are exactly one gauge apart.
    for ring in 0..east.ring_count() {
        let gap = east.ring_center(ring).distance_to(west.ring_center(ring));
        assert!(
            (gap - config.gauge).abs() < 1e-9,
            "ring {ring}: separation {gap}, expected {}",
            config.gauge
        );
    }
}

#[test]
fn rails_share_no_vertex_positions() {
    let mut sink = RecordingSink::default();
    build_track(&example_waypoints(), &TrackConfig::default(), &mut sink)
        .expect("build should succeed");

    let east = &sink.rails[0].1;
    let west = &sink.rails[1].1;
    let tol = Tolerance::default_geom();
    for a in &east.positions {
        for b in &west.positions {
            let pa = Point3::from_array(*a);
            let pb = Point3::from_array(*b);
            assert!(!tol.approx_eq_point3(pa, pb), "rails touch at {pa:?}");
        }
    }
}

#[test]
fn ties_sit_below_the_path() {
    let mut sink = RecordingSink::default();
    let config = TrackConfig::default();
    build_track(&example_waypoints(), &config, &mut sink).expect("build should succeed");

    let (_, ties) = sink.ties.expect("sink should have received ties");
    // The example path is flat at y = 0, so every tie sits at exactly -drop.
    for tie in &ties {
        assert!(
            (tie.position.y + config.tie_drop).abs() < 1e-9,
            "tie at y = {}",
            tie.position.y
        );
    }
}

#[test]
fn tie_mesh_matches_configured_box() {
    let mut sink = RecordingSink::default();
    let config = TrackConfig::default();
    build_track(&example_waypoints(), &config, &mut sink).expect("build should succeed");

    let (tie_mesh, _) = sink.ties.expect("sink should have received ties");
    assert_eq!(tie_mesh.ring_count(), 2);
    assert_eq!(tie_mesh.ring_len(), 4);

    let (mut min, mut max) = ([f64::MAX; 3], [f64::MIN; 3]);
    for p in &tie_mesh.positions {
        for axis in 0..3 {
            min[axis] = min[axis].min(p[axis]);
            max[axis] = max[axis].max(p[axis]);
        }
    }
    assert!((max[0] - min[0] - config.tie_width).abs() < 1e-9);
    assert!((max[1] - min[1] - config.tie_height).abs() < 1e-9);
    assert!((max[2] - min[2] - config.tie_depth).abs() < 1e-9);
}

#[test]
fn single_waypoint_fails_without_publishing() {
    let mut sink = RecordingSink::default();
    let err = build_track(&[Point3::ORIGIN], &TrackConfig::default(), &mut sink).unwrap_err();
    assert!(matches!(err, TrackError::Spline(_)));
    assert!(sink.ties.is_none());
    assert!(sink.rails.is_empty());
}

#[test]
fn sloped_track_keeps_gauge_separation() {
    // Climbing path; transported frames keep the rails one gauge apart.
    let waypoints = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(15.0, 3.0, 0.0),
        Point3::new(30.0, 3.0, 15.0),
    ];
    let mut sink = RecordingSink::default();
    let config = TrackConfig::default();
    build_track(&waypoints, &config, &mut sink).expect("build should succeed");

    let east = &sink.rails[0].1;
    let west = &sink.rails[1].1;
    for ring in 0..east.ring_count() {
        let gap = east.ring_center(ring).distance_to(west.ring_center(ring));
        assert!((gap - config.gauge).abs() < 1e-9);
    }
}
