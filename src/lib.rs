#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Procedural railway track geometry.
//!
//! Given an ordered list of waypoints, this crate interpolates a smooth
//! centerline through them, places evenly spaced ties along it, and extrudes
//! a rail cross-section along two gauge-offset paths. Output is plain indexed
//! triangle meshes handed to a caller-provided [`track::SceneSink`], so the
//! crate stays renderer-agnostic.
//!
//! The world is Y-up; waypoints typically live near the XZ plane but may
//! climb and dip freely. Path orientation uses parallel-transported frames,
//! so rails stay parallel and untwisted through slopes and turns.
//!
//! ```
//! use railgen::geom::Point3;
//! use railgen::track::{RailSide, SceneSink, TieTransform, TrackConfig, build_track};
//! use railgen::geom::TrackMesh;
//!
//! #[derive(Default)]
//! struct Collector {
//!     rails: Vec<TrackMesh>,
//! }
//!
//! impl SceneSink for Collector {
//!     fn add_ties(&mut self, _mesh: TrackMesh, _transforms: Vec<TieTransform>) {}
//!     fn add_rail(&mut self, _side: RailSide, mesh: TrackMesh) {
//!         self.rails.push(mesh);
//!     }
//! }
//!
//! let waypoints = [
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(10.0, 0.0, 0.0),
//!     Point3::new(20.0, 0.0, 10.0),
//! ];
//! let mut sink = Collector::default();
//! let report = build_track(&waypoints, &TrackConfig::default(), &mut sink).unwrap();
//! assert_eq!(sink.rails.len(), 2);
//! assert!(report.tie_count > 0);
//! ```

pub mod geom;
pub mod track;

pub use geom::{Point3, TrackMesh, Vec3};
pub use track::{RailSide, SceneSink, TrackConfig, TrackError, TrackReport, build_track};
