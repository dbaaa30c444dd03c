//! Catmull-Rom sampling of waypoint polylines.
//!
//! Waypoints are interpolated (the curve passes through every waypoint) with a
//! uniform Catmull-Rom spline. Interior control points come straight from the
//! waypoint list; at the ends the first and last waypoints are duplicated, the
//! standard boundary handling that degrades to lower-order interpolation for
//! short waypoint lists. Each waypoint pair contributes `subdivisions` sampled
//! points; the final waypoint is appended once, so a list of `n` distinct
//! waypoints yields `(n - 1) * subdivisions + 1` samples.

use super::core::{Point3, Tolerance};

#[derive(Debug, thiserror::Error)]
pub enum SplineError {
    #[error("waypoint list requires at least 2 distinct finite points, got {count}")]
    InsufficientWaypoints { count: usize },
    #[error("waypoints must be finite")]
    NonFiniteWaypoint,
}

/// A densely sampled curve produced by [`sample_waypoints`].
///
/// The samples are ordered along the curve and free of consecutive duplicates,
/// which makes them directly usable as an extrusion spine or as input to
/// [`ArcLengthPath::build`](super::path::ArcLengthPath::build).
#[derive(Debug, Clone, PartialEq)]
pub struct SampledCurve {
    points: Vec<Point3>,
}

impl SampledCurve {
    pub(crate) fn from_points(points: Vec<Point3>) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Drop consecutive duplicate waypoints so zero-length spline segments never
/// reach the interpolator.
fn clean_waypoints(waypoints: &[Point3], tol: Tolerance) -> Result<Vec<Point3>, SplineError> {
    if waypoints
        .iter()
        .any(|p| !p.x.is_finite() || !p.y.is_finite() || !p.z.is_finite())
    {
        return Err(SplineError::NonFiniteWaypoint);
    }

    let mut cleaned: Vec<Point3> = Vec::with_capacity(waypoints.len());
    for p in waypoints.iter().copied() {
        if cleaned
            .last()
            .copied()
            .is_some_and(|prev| tol.approx_eq_point3(prev, p))
        {
            continue;
        }
        cleaned.push(p);
    }
    Ok(cleaned)
}

/// Evaluate one uniform Catmull-Rom segment from `p1` to `p2` at `u` in [0, 1].
fn catmull_rom(p0: Point3, p1: Point3, p2: Point3, p3: Point3, u: f64) -> Point3 {
    let u2 = u * u;
    let u3 = u2 * u;
    let w0 = 0.5 * (-u3 + 2.0 * u2 - u);
    let w1 = 0.5 * (3.0 * u3 - 5.0 * u2 + 2.0);
    let w2 = 0.5 * (-3.0 * u3 + 4.0 * u2 + u);
    let w3 = 0.5 * (u3 - u2);
    Point3::new(
        w0 * p0.x + w1 * p1.x + w2 * p2.x + w3 * p3.x,
        w0 * p0.y + w1 * p1.y + w2 * p2.y + w3 * p3.y,
        w0 * p0.z + w1 * p1.z + w2 * p2.z + w3 * p3.z,
    )
}

/// Sample a Catmull-Rom spline through `waypoints` at `subdivisions` points per
/// waypoint segment.
///
/// The returned curve starts exactly at the first waypoint, ends exactly at the
/// last, and passes through every interior waypoint. Consecutive duplicate
/// waypoints are dropped before interpolation; `subdivisions` is clamped to a
/// minimum of 1.
///
/// # Errors
/// Returns [`SplineError::InsufficientWaypoints`] when fewer than 2 distinct
/// waypoints remain after cleaning, and [`SplineError::NonFiniteWaypoint`] when
/// any coordinate is NaN or infinite.
pub fn sample_waypoints(
    waypoints: &[Point3],
    subdivisions: usize,
) -> Result<SampledCurve, SplineError> {
    let tol = Tolerance::default_geom();
    let cleaned = clean_waypoints(waypoints, tol)?;
    if cleaned.len() < 2 {
        return Err(SplineError::InsufficientWaypoints { count: cleaned.len() });
    }

    let subdivisions = subdivisions.max(1);
    let n = cleaned.len();
    let mut points: Vec<Point3> = Vec::with_capacity((n - 1) * subdivisions + 1);

    for seg in 0..n - 1 {
        // Duplicated endpoints stand in for the missing outer control points.
        let p0 = cleaned[seg.saturating_sub(1)];
        let p1 = cleaned[seg];
        let p2 = cleaned[seg + 1];
        let p3 = cleaned[(seg + 2).min(n - 1)];
        for step in 0..subdivisions {
            let u = step as f64 / subdivisions as f64;
            points.push(catmull_rom(p0, p1, p2, p3, u));
        }
    }
    points.push(cleaned[n - 1]);

    Ok(SampledCurve::from_points(points))
}
