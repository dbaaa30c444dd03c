//! Extrusion of a closed cross-section along a sampled path.
//!
//! One vertex ring is emitted per path sample, oriented by parallel-transport
//! frames so the section never twists or flips along the path. Adjacent rings
//! are stitched with two triangles per profile edge; the profile is closed, so
//! edges wrap around the ring. UVs carry normalized arc-length in `u` and the
//! profile vertex fraction in `v`, which keeps textures evenly stretched along
//! curves regardless of sample spacing.

use super::core::Tolerance;
use super::mesh::{MeshDiagnostics, TrackMesh, finalize_ring_mesh};
use super::path::{compute_arc_lengths, transport_frames};
use super::profile::CrossSection;
use super::spline::SampledCurve;

#[derive(Debug, thiserror::Error)]
pub enum ExtrudeError {
    #[error("cross-section requires at least 3 distinct vertices, got {count}")]
    DegenerateProfile { count: usize },
    #[error("extrusion path requires at least 2 samples, got {count}")]
    DegeneratePath { count: usize },
}

/// Extrude `profile` along `path`, producing a ring-structured mesh.
///
/// # Errors
/// Returns [`ExtrudeError::DegenerateProfile`] for sections with fewer than 3
/// distinct vertices and [`ExtrudeError::DegeneratePath`] for paths with fewer
/// than 2 samples.
pub fn extrude_profile(
    profile: &CrossSection,
    path: &SampledCurve,
) -> Result<(TrackMesh, MeshDiagnostics), ExtrudeError> {
    let tol = Tolerance::default_geom();
    let section = profile.points();
    if section.len() < 3 {
        return Err(ExtrudeError::DegenerateProfile { count: section.len() });
    }
    let samples = path.points();
    if samples.len() < 2 {
        return Err(ExtrudeError::DegeneratePath { count: samples.len() });
    }

    let frames = transport_frames(samples);
    let arc_lengths = compute_arc_lengths(samples);
    let total_length = arc_lengths.last().copied().unwrap_or(0.0).max(tol.eps);

    let ring_count = samples.len();
    let ring_len = section.len();

    let mut positions: Vec<[f64; 3]> = Vec::with_capacity(ring_count * ring_len);
    let mut uvs: Vec<[f64; 2]> = Vec::with_capacity(ring_count * ring_len);

    for (ring_idx, (sample, frame)) in samples.iter().zip(frames.iter()).enumerate() {
        let u = arc_lengths[ring_idx] / total_length;
        for (i, p) in section.iter().enumerate() {
            let world = sample
                .add_vec(frame.binormal.mul_scalar(p.lateral))
                .add_vec(frame.normal.mul_scalar(p.vertical));
            positions.push(world.to_array());
            uvs.push([u, i as f64 / ring_len as f64]);
        }
    }

    let mut indices: Vec<u32> = Vec::with_capacity((ring_count - 1) * ring_len * 6);
    for r in 0..ring_count - 1 {
        for i in 0..ring_len {
            let i_next = (i + 1) % ring_len;

            let i0 = (r * ring_len + i) as u32;
            let i1 = (r * ring_len + i_next) as u32;
            let i2 = ((r + 1) * ring_len + i_next) as u32;
            let i3 = ((r + 1) * ring_len + i) as u32;

            indices.extend_from_slice(&[i0, i1, i2]);
            indices.extend_from_slice(&[i0, i2, i3]);
        }
    }

    Ok(finalize_ring_mesh(
        positions,
        Some(uvs),
        indices,
        ring_count,
        ring_len,
        tol,
    ))
}
