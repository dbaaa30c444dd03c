use std::fmt;

use super::core::{Point3, Tolerance};

/// Indexed triangle mesh produced by profile extrusion.
///
/// Vertices are grouped into rings: one ring of `ring_len` vertices per path
/// sample, laid out consecutively in `positions`. UVs, when present, carry the
/// normalized arc-length along the path in `u` and the position around the
/// profile in `v`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackMesh {
    pub positions: Vec<[f64; 3]>,
    pub indices: Vec<u32>,
    pub uvs: Option<Vec<[f64; 2]>>,
    ring_count: usize,
    ring_len: usize,
}

impl TrackMesh {
    pub(crate) fn from_rings(
        positions: Vec<[f64; 3]>,
        indices: Vec<u32>,
        uvs: Option<Vec<[f64; 2]>>,
        ring_count: usize,
        ring_len: usize,
    ) -> Self {
        Self { positions, indices, uvs, ring_count, ring_len }
    }

    /// Number of vertex rings (one per path sample).
    #[must_use]
    pub fn ring_count(&self) -> usize {
        self.ring_count
    }

    /// Number of vertices in each ring (the profile vertex count).
    #[must_use]
    pub fn ring_len(&self) -> usize {
        self.ring_len
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Centroid of ring `ring`. For profiles symmetric about their local
    /// origin this is the point on the extrusion spine.
    ///
    /// # Panics
    /// Panics when `ring` is out of range.
    #[must_use]
    pub fn ring_center(&self, ring: usize) -> Point3 {
        assert!(ring < self.ring_count, "ring index out of range");
        let start = ring * self.ring_len;
        let mut sum = [0.0; 3];
        for p in &self.positions[start..start + self.ring_len] {
            sum[0] += p[0];
            sum[1] += p[1];
            sum[2] += p[2];
        }
        let inv = 1.0 / self.ring_len as f64;
        Point3::new(sum[0] * inv, sum[1] * inv, sum[2] * inv)
    }

    /// Returns true if any vertex position contains NaN or Inf values.
    #[must_use]
    pub fn has_invalid_vertices(&self) -> bool {
        self.positions
            .iter()
            .any(|p| !p[0].is_finite() || !p[1].is_finite() || !p[2].is_finite())
    }

    /// Returns true if all vertex indices are within bounds.
    #[must_use]
    pub fn has_valid_indices(&self) -> bool {
        let n = self.positions.len() as u32;
        self.indices.iter().all(|&i| i < n)
    }

    /// Returns true if indices represent a triangle list.
    #[must_use]
    pub fn has_triangle_indices(&self) -> bool {
        self.indices.len() % 3 == 0
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.has_triangle_indices() {
            return Err("mesh indices are not a triangle list (len % 3 != 0)".to_string());
        }
        if self.has_invalid_vertices() {
            return Err("mesh has invalid vertex coordinates (NaN/Inf)".to_string());
        }
        if !self.has_valid_indices() {
            return Err("mesh has out-of-bounds vertex indices".to_string());
        }
        if self.ring_count * self.ring_len != self.positions.len() {
            return Err("ring layout does not match vertex count".to_string());
        }
        if self.uvs.as_ref().is_some_and(|uvs| uvs.len() != self.positions.len()) {
            return Err("mesh uv buffer does not match vertex count".to_string());
        }
        Ok(())
    }

    /// Returns the position buffer as a flat slice: `[x0, y0, z0, x1, y1, z1, ...]`.
    ///
    /// This is a zero-copy view over `positions`, useful for renderer adapters
    /// that expect packed numeric buffers.
    #[must_use]
    pub fn positions_flat(&self) -> &[f64] {
        flatten_f64_array_slice::<3>(&self.positions)
    }

    /// Returns the UV buffer as a flat slice: `[u0, v0, u1, v1, ...]`.
    #[must_use]
    pub fn uvs_flat(&self) -> Option<&[f64]> {
        self.uvs.as_deref().map(flatten_f64_array_slice::<2>)
    }
}

fn flatten_f64_array_slice<const N: usize>(data: &[[f64; N]]) -> &[f64] {
    let count = data.len().checked_mul(N).unwrap_or(0);
    let ptr = data.as_ptr().cast::<f64>();
    // SAFETY: `[[f64; N]]` is stored contiguously, and we compute the element count as `len * N`.
    unsafe { std::slice::from_raw_parts(ptr, count) }
}

/// Quality report returned alongside every extruded mesh.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MeshDiagnostics {
    /// Total number of vertices in the mesh.
    pub vertex_count: usize,

    /// Total number of triangles in the mesh.
    pub triangle_count: usize,

    /// Number of zero-area triangles. These stay in the index buffer (renderers
    /// skip them); a non-zero count usually means coincident path samples.
    pub degenerate_triangle_count: usize,

    /// Human-readable warnings about mesh quality.
    pub warnings: Vec<String>,
}

impl MeshDiagnostics {
    /// Returns `true` if no degenerate triangles or warnings were recorded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.degenerate_triangle_count == 0 && self.warnings.is_empty()
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns a short summary string suitable for logging.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut parts = vec![format!("V:{} T:{}", self.vertex_count, self.triangle_count)];
        if self.degenerate_triangle_count > 0 {
            parts.push(format!("degenerate:{}", self.degenerate_triangle_count));
        }
        parts.join(" ")
    }
}

impl fmt::Display for MeshDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mesh Diagnostics:")?;
        writeln!(f, "  Vertices: {}", self.vertex_count)?;
        writeln!(f, "  Triangles: {}", self.triangle_count)?;
        if self.degenerate_triangle_count > 0 {
            writeln!(f, "  Degenerate triangles: {}", self.degenerate_triangle_count)?;
        }
        if !self.warnings.is_empty() {
            writeln!(f, "  Warnings:")?;
            for warning in &self.warnings {
                writeln!(f, "    - {warning}")?;
            }
        }
        Ok(())
    }
}

/// Assemble a ring-structured mesh and scan it for degenerate triangles.
pub(crate) fn finalize_ring_mesh(
    positions: Vec<[f64; 3]>,
    uvs: Option<Vec<[f64; 2]>>,
    indices: Vec<u32>,
    ring_count: usize,
    ring_len: usize,
    tol: Tolerance,
) -> (TrackMesh, MeshDiagnostics) {
    let mut degenerate_triangle_count = 0;
    for tri in indices.chunks_exact(3) {
        let a = Point3::from_array(positions[tri[0] as usize]);
        let b = Point3::from_array(positions[tri[1] as usize]);
        let c = Point3::from_array(positions[tri[2] as usize]);
        let area2 = b.sub_point(a).cross(c.sub_point(a)).length();
        if tol.is_zero_length(area2) {
            degenerate_triangle_count += 1;
        }
    }

    let mut warnings = Vec::new();
    if degenerate_triangle_count > 0 {
        warnings.push(format!(
            "mesh has {degenerate_triangle_count} zero-area triangles"
        ));
    }

    let mesh = TrackMesh::from_rings(positions, indices, uvs, ring_count, ring_len);
    let diagnostics = MeshDiagnostics {
        vertex_count: mesh.vertex_count(),
        triangle_count: mesh.triangle_count(),
        degenerate_triangle_count,
        warnings,
    };
    (mesh, diagnostics)
}
