mod core;
mod extrude;
mod mesh;
mod path;
mod profile;
mod spline;

pub use core::{Point3, Tolerance, Vec3};
pub use extrude::{ExtrudeError, extrude_profile};
pub use mesh::{MeshDiagnostics, TrackMesh};
pub use path::{ArcLengthPath, PathError, PathFrame};
pub use profile::{CrossSection, ProfilePoint};
pub use spline::{SampledCurve, SplineError, sample_waypoints};

#[cfg(test)]
mod tests;
