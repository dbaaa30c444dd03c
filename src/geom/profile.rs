//! 2D cross-section profiles for extrusion.
//!
//! A profile lives in the local plane of a path frame: `lateral` maps to the
//! binormal axis and `vertical` to the normal axis. Profiles are closed rings;
//! the vertex list omits the repeated closing vertex, and consumers wrap
//! indices modulo the ring length.

use serde::{Deserialize, Serialize};

use super::core::Tolerance;

/// A 2D point in profile-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfilePoint {
    /// Offset along the frame binormal (sideways).
    pub lateral: f64,
    /// Offset along the frame normal (up).
    pub vertical: f64,
}

impl ProfilePoint {
    #[must_use]
    pub const fn new(lateral: f64, vertical: f64) -> Self {
        Self { lateral, vertical }
    }
}

/// A closed 2D cross-section, stored as a ring of distinct vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossSection {
    points: Vec<ProfilePoint>,
}

impl CrossSection {
    /// Build a section from an explicit vertex ring.
    ///
    /// Consecutive duplicates are dropped, and a repeated closing vertex
    /// (first == last) is popped so the ring stays implicit.
    #[must_use]
    pub fn from_ring(ring: Vec<ProfilePoint>) -> Self {
        let tol = Tolerance::default_geom();
        let approx_eq = |a: ProfilePoint, b: ProfilePoint| {
            tol.approx_eq_f64(a.lateral, b.lateral) && tol.approx_eq_f64(a.vertical, b.vertical)
        };

        let mut points: Vec<ProfilePoint> = Vec::with_capacity(ring.len());
        for p in ring {
            if points.last().copied().is_some_and(|prev| approx_eq(prev, p)) {
                continue;
            }
            points.push(p);
        }
        if points.len() > 2
            && points
                .first()
                .copied()
                .zip(points.last().copied())
                .is_some_and(|(a, b)| approx_eq(a, b))
        {
            points.pop();
        }

        Self { points }
    }

    /// Build a section symmetric about both local axes from a single corner.
    ///
    /// `corner` describes the (+lateral, +vertical) quadrant, ordered from the
    /// side of the section toward the top. The full ring is the corner walked
    /// through all four sign quadrants, so the result is mirror-symmetric by
    /// construction. Corner vertices lying on an axis collapse with their
    /// mirror image rather than duplicating.
    #[must_use]
    pub fn from_corner(corner: &[ProfilePoint]) -> Self {
        let mut ring: Vec<ProfilePoint> = Vec::with_capacity(corner.len() * 4);
        ring.extend_from_slice(corner);
        for p in corner.iter().rev() {
            ring.push(ProfilePoint::new(-p.lateral, p.vertical));
        }
        for p in corner {
            ring.push(ProfilePoint::new(-p.lateral, -p.vertical));
        }
        for p in corner.iter().rev() {
            ring.push(ProfilePoint::new(p.lateral, -p.vertical));
        }
        Self::from_ring(ring)
    }

    /// An axis-aligned rectangle centered on the local origin.
    #[must_use]
    pub fn rectangle(width: f64, height: f64) -> Self {
        Self::from_corner(&[ProfilePoint::new(width * 0.5, height * 0.5)])
    }

    #[must_use]
    pub fn points(&self) -> &[ProfilePoint] {
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
