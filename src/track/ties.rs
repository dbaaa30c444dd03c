//! Even tie placement along an arc-length path.

use serde::{Deserialize, Serialize};

use crate::geom::{ArcLengthPath, Point3, Tolerance};

#[derive(Debug, thiserror::Error)]
pub enum TieError {
    #[error("tie step must be finite and positive, got {step}")]
    InvalidStep { step: f64 },
}

/// Placement of a single tie: a world position and a yaw about the world Y
/// axis that aligns the tie's long side perpendicular to the path tangent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TieTransform {
    pub position: Point3,
    /// Rotation about world Y in radians; `0.0` faces down +Z.
    pub yaw: f64,
}

/// Walk `path` from its start in arc-length increments of `step`, emitting a
/// tie transform at each stop. The walk begins at distance 0 and ends at the
/// last multiple of `step` that fits; a trailing remainder shorter than `step`
/// gets no tie. Positions are dropped by `drop` below the path so the rail
/// surface sits above the ties.
///
/// Yaw comes from the horizontal projection of the path tangent. Where the
/// tangent is vertical the previous yaw is carried forward.
///
/// # Errors
/// Returns [`TieError::InvalidStep`] when `step` is not finite or not
/// positive.
pub fn layout_ties(
    path: &ArcLengthPath,
    step: f64,
    drop: f64,
) -> Result<Vec<TieTransform>, TieError> {
    if !step.is_finite() || step <= 0.0 {
        return Err(TieError::InvalidStep { step });
    }

    let tol = Tolerance::LOOSE;
    let total = path.length();
    let mut ties = Vec::with_capacity((total / step) as usize + 1);

    let mut yaw = 0.0;
    let mut distance = 0.0;
    // Absorb float drift at the far end so an exact final multiple still fits.
    while distance <= total + Tolerance::DEFAULT.eps {
        let t = (distance / total).min(1.0);
        let position = path.position_at(t);
        let tangent = path.tangent_at(t);
        if !tol.approx_zero_f64(tangent.x) || !tol.approx_zero_f64(tangent.z) {
            yaw = tangent.x.atan2(tangent.z);
        }
        ties.push(TieTransform {
            position: Point3::new(position.x, position.y - drop, position.z),
            yaw,
        });
        distance += step;
    }

    Ok(ties)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{ArcLengthPath, sample_waypoints};

    fn straight_path(length: f64) -> ArcLengthPath {
        let curve = sample_waypoints(
            &[Point3::ORIGIN, Point3::new(length, 0.0, 0.0)],
            8,
        )
        .expect("sampling should succeed");
        ArcLengthPath::build(&curve).expect("path build should succeed")
    }

    #[test]
    fn test_straight_path_tie_spacing() {
        let path = straight_path(10.0);
        let ties = layout_ties(&path, 2.0, 0.0).expect("layout should succeed");

        // Ties at 0, 2, 4, 6, 8, 10.
        assert_eq!(ties.len(), 6);
        for (i, pair) in ties.windows(2).enumerate() {
            let gap = pair[0].position.distance_to(pair[1].position);
            assert!(
                (gap - 2.0).abs() < 1e-9,
                "gap {i} was {gap}, expected 2.0"
            );
        }
    }

    #[test]
    fn test_remainder_shorter_than_step_gets_no_tie() {
        let path = straight_path(9.5);
        let ties = layout_ties(&path, 2.0, 0.0).expect("layout should succeed");

        // Ties at 0, 2, 4, 6, 8; the trailing 1.5 units stay empty.
        assert_eq!(ties.len(), 5);
        let last = ties.last().unwrap();
        assert!((last.position.x - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_drop_lowers_tie_positions() {
        let path = straight_path(4.0);
        let ties = layout_ties(&path, 2.0, 3.0).expect("layout should succeed");
        assert!(ties.iter().all(|tie| (tie.position.y + 3.0).abs() < 1e-9));
    }

    #[test]
    fn test_yaw_faces_along_horizontal_tangent() {
        // Heading +X: yaw = atan2(1, 0) = pi/2.
        let path = straight_path(4.0);
        let ties = layout_ties(&path, 2.0, 0.0).expect("layout should succeed");
        for tie in &ties {
            assert!((tie.yaw - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
        }
    }

    #[test]
    fn test_curved_path_keeps_arc_length_spacing() {
        // Gentle curve; chord distance between ties stays within a hair of
        // the arc-length step.
        let curve = sample_waypoints(
            &[
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(20.0, 0.0, 2.0),
                Point3::new(40.0, 0.0, 0.0),
            ],
            64,
        )
        .expect("sampling should succeed");
        let path = ArcLengthPath::build(&curve).expect("path build should succeed");
        let ties = layout_ties(&path, 2.0, 0.0).expect("layout should succeed");

        assert!(ties.len() >= 20);
        for pair in ties.windows(2) {
            let gap = pair[0].position.distance_to(pair[1].position);
            assert!((gap - 2.0).abs() < 5e-3, "gap was {gap}");
        }
    }

    #[test]
    fn test_zero_step_rejected() {
        let path = straight_path(10.0);
        let err = layout_ties(&path, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, TieError::InvalidStep { .. }));
    }

    #[test]
    fn test_negative_and_non_finite_step_rejected() {
        let path = straight_path(10.0);
        assert!(matches!(
            layout_ties(&path, -1.0, 0.0),
            Err(TieError::InvalidStep { .. })
        ));
        assert!(matches!(
            layout_ties(&path, f64::NAN, 0.0),
            Err(TieError::InvalidStep { .. })
        ));
    }

    #[test]
    fn test_path_shorter_than_step_places_single_tie() {
        let path = straight_path(1.0);
        let ties = layout_ties(&path, 2.0, 0.0).expect("layout should succeed");
        assert_eq!(ties.len(), 1);
        assert!(Tolerance::DEFAULT.approx_eq_point3(ties[0].position, Point3::ORIGIN));
    }
}
