//! End-to-end track construction.
//!
//! [`build_track`] turns a waypoint list into renderable geometry: a tie mesh
//! with one transform per tie, and two rail meshes offset from the centerline
//! by half the gauge. All geometry is computed before anything is handed to
//! the [`SceneSink`], so a failing stage leaves the sink untouched.

use serde::{Deserialize, Serialize};

use super::ties::{TieError, TieTransform, layout_ties};
use crate::geom::{
    ArcLengthPath, CrossSection, ExtrudeError, PathError, Point3, ProfilePoint, SampledCurve,
    SplineError, TrackMesh, extrude_profile, sample_waypoints,
};

#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    #[error(transparent)]
    Spline(#[from] SplineError),
    #[error(transparent)]
    Path(#[from] PathError),
    #[error(transparent)]
    Ties(#[from] TieError),
    #[error(transparent)]
    Extrude(#[from] ExtrudeError),
}

/// Which of the two rails a mesh belongs to.
///
/// `East` is the rail offset along the positive binormal; on a path heading
/// +X in a Y-up world that is the +Z side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RailSide {
    East,
    West,
}

/// Receiver for finished track geometry.
///
/// Implementations adapt the generated meshes to a renderer or exporter. The
/// sink is only called after every build stage has succeeded, in a fixed
/// order: ties first, then the east rail, then the west rail.
pub trait SceneSink {
    /// Receive the shared tie mesh and one transform per placed tie.
    fn add_ties(&mut self, mesh: TrackMesh, transforms: Vec<TieTransform>);

    /// Receive one finished rail mesh.
    fn add_rail(&mut self, side: RailSide, mesh: TrackMesh);
}

/// Track construction parameters.
///
/// Distances are in world units. Defaults match a coarse game-scale track:
/// ties every 2 units, dropped 3 units below the path, rails 6 units apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackConfig {
    /// Arc-length distance between consecutive ties.
    pub tie_step: f64,
    /// How far below the path tie centers sit.
    pub tie_drop: f64,
    /// Tie extent perpendicular to the track.
    pub tie_width: f64,
    /// Tie extent vertically.
    pub tie_height: f64,
    /// Tie extent along the track.
    pub tie_depth: f64,
    /// Lateral separation between the two rail centerlines.
    pub gauge: f64,
    /// Spline subdivisions per waypoint segment for the tie-placement path.
    pub tie_subdivisions: usize,
    /// Spline subdivisions per waypoint segment for the rail extrusions.
    pub rail_subdivisions: usize,
    /// Cross-section extruded along both rail centerlines.
    pub rail_profile: CrossSection,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            tie_step: 2.0,
            tie_drop: 3.0,
            tie_width: 8.0,
            tie_height: 1.0,
            tie_depth: 0.25,
            gauge: 6.0,
            tie_subdivisions: 32,
            rail_subdivisions: 8,
            rail_profile: standard_rail_profile(),
        }
    }
}

/// A flat-bottomed rail section roughly 0.6 units wide and 1.0 tall,
/// described by its upper-right quarter and mirrored into a full ring.
#[must_use]
pub fn standard_rail_profile() -> CrossSection {
    CrossSection::from_corner(&[
        ProfilePoint::new(0.10, 0.0),
        ProfilePoint::new(0.10, 0.25),
        ProfilePoint::new(0.30, 0.30),
        ProfilePoint::new(0.30, 0.50),
    ])
}

/// Summary of a finished build, for logging and sanity checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackReport {
    /// Number of tie transforms handed to the sink.
    pub tie_count: usize,
    /// Vertex rings in each rail mesh.
    pub rail_ring_count: usize,
    /// Centerline length at rail sampling density.
    pub track_length: f64,
}

/// Build a complete track through `waypoints` and hand the geometry to `sink`.
///
/// The waypoint spline is sampled twice at different densities: a dense pass
/// for tie placement (so arc-length stepping stays accurate) and a coarser
/// pass for the rail extrusions (each sample becomes a vertex ring). Rail
/// centerlines are the dense centerline offset by half the gauge along the
/// frame binormal on each side.
///
/// # Errors
/// Propagates the first failing stage; see [`TrackError`]. The sink receives
/// nothing on error.
pub fn build_track<S: SceneSink>(
    waypoints: &[Point3],
    config: &TrackConfig,
    sink: &mut S,
) -> Result<TrackReport, TrackError> {
    let tie_curve = sample_waypoints(waypoints, config.tie_subdivisions)?;
    let tie_path = ArcLengthPath::build(&tie_curve)?;
    let ties = layout_ties(&tie_path, config.tie_step, config.tie_drop)?;
    let tie_mesh = build_tie_mesh(config)?;

    let rail_curve = sample_waypoints(waypoints, config.rail_subdivisions)?;
    let rail_path = ArcLengthPath::build(&rail_curve)?;
    let (east_line, west_line) = offset_centerlines(&rail_path, config.gauge);

    #[cfg(feature = "parallel")]
    let (east, west) = rayon::join(
        || extrude_profile(&config.rail_profile, &east_line),
        || extrude_profile(&config.rail_profile, &west_line),
    );
    #[cfg(not(feature = "parallel"))]
    let (east, west) = (
        extrude_profile(&config.rail_profile, &east_line),
        extrude_profile(&config.rail_profile, &west_line),
    );
    let (east_mesh, east_diag) = east?;
    let (west_mesh, west_diag) = west?;

    for warning in east_diag.warnings.iter().chain(west_diag.warnings.iter()) {
        log::warn!("rail mesh: {warning}");
    }

    let report = TrackReport {
        tie_count: ties.len(),
        rail_ring_count: east_mesh.ring_count(),
        track_length: rail_path.length(),
    };
    log::debug!(
        "built track: {} ties, {} rail rings, length {:.3} ({} / {})",
        report.tie_count,
        report.rail_ring_count,
        report.track_length,
        east_diag.summary(),
        west_diag.summary(),
    );

    sink.add_ties(tie_mesh, ties);
    sink.add_rail(RailSide::East, east_mesh);
    sink.add_rail(RailSide::West, west_mesh);

    Ok(report)
}

/// The shared tie box, extruded from a rectangle along a straight spine of
/// `tie_depth` so it carries the same ring structure as the rails.
fn build_tie_mesh(config: &TrackConfig) -> Result<TrackMesh, TrackError> {
    let section = CrossSection::rectangle(config.tie_width, config.tie_height);
    let half = config.tie_depth * 0.5;
    let spine = SampledCurve::from_points(vec![
        Point3::new(0.0, 0.0, -half),
        Point3::new(0.0, 0.0, half),
    ]);
    let (mesh, _) = extrude_profile(&section, &spine)?;
    Ok(mesh)
}

/// Offset the centerline sideways by half the gauge on each side, reusing the
/// centerline's transported frames so both rails share the same orientation.
fn offset_centerlines(path: &ArcLengthPath, gauge: f64) -> (SampledCurve, SampledCurve) {
    let half = gauge * 0.5;
    let mut east = Vec::with_capacity(path.sample_count());
    let mut west = Vec::with_capacity(path.sample_count());
    for (point, frame) in path.points().iter().zip(path.frames()) {
        east.push(point.add_vec(frame.binormal.mul_scalar(half)));
        west.push(point.add_vec(frame.binormal.mul_scalar(-half)));
    }
    (
        SampledCurve::from_points(east),
        SampledCurve::from_points(west),
    )
}
