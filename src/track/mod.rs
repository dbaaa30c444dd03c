mod builder;
mod ties;

pub use builder::{
    RailSide, SceneSink, TrackConfig, TrackError, TrackReport, build_track, standard_rail_profile,
};
pub use ties::{TieError, TieTransform, layout_ties};
