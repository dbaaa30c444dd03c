//! Arc-length parameterized paths with rotation-minimizing frames.
//!
//! A [`SampledCurve`] is a bare point list; [`ArcLengthPath`] turns it into a
//! queryable path. Positions and orientation frames are addressed by a
//! normalized parameter `t` in `[0, 1]` that is proportional to distance
//! traveled along the curve, so `t = 0.5` is the halfway point by length no
//! matter how unevenly the samples are spaced.
//!
//! Orientation frames are built by parallel transport: the first frame is
//! anchored to the world up axis, and each subsequent normal is the previous
//! normal rotated by the minimal rotation that carries the previous tangent
//! onto the current one. Unlike frames derived independently from a fixed
//! reference axis, transported frames never flip when the tangent passes near
//! the reference direction.

use super::core::{Point3, Tolerance, Vec3};
use super::spline::SampledCurve;

#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("curve has fewer than 2 samples or zero total length")]
    EmptyCurve,
}

/// An orthonormal orientation frame at a point along a path.
///
/// `binormal` is the lateral axis (`tangent × normal`); with a Y-up world and a
/// mostly horizontal path the normal points up and the binormal points to the
/// side, which is the axis rail centerlines are offset along.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathFrame {
    pub tangent: Vec3,
    pub normal: Vec3,
    pub binormal: Vec3,
}

impl PathFrame {
    /// Build a frame from a tangent and a preferred up direction.
    ///
    /// Returns `None` when the tangent is parallel to `up` (the frame would be
    /// underdetermined) or when either input is degenerate.
    #[must_use]
    pub fn from_tangent_with_up(tangent: Vec3, up: Vec3) -> Option<Self> {
        let tangent = tangent.normalized()?;
        let binormal = tangent.cross(up).normalized()?;
        let normal = binormal.cross(tangent).normalized()?;
        Some(Self { tangent, normal, binormal })
    }
}

/// Rotate `v` by `angle` radians about the unit vector `axis` (Rodrigues).
fn rotate_about_axis(v: Vec3, axis: Vec3, angle: f64) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    v.mul_scalar(cos)
        .add(axis.cross(v).mul_scalar(sin))
        .add(axis.mul_scalar(axis.dot(v) * (1.0 - cos)))
}

/// Cumulative polyline length at every sample; entry 0 is always 0.
pub(crate) fn compute_arc_lengths(points: &[Point3]) -> Vec<f64> {
    let mut lengths = Vec::with_capacity(points.len());
    let mut total = 0.0;
    lengths.push(0.0);
    for pair in points.windows(2) {
        total += pair[0].distance_to(pair[1]);
        lengths.push(total);
    }
    lengths
}

/// Compute one orthonormal frame per sample by parallel transport.
///
/// The first frame is anchored to world up; when the initial tangent is
/// vertical an X-axis reference is used instead. Zero-length segments inherit
/// the previous tangent so the transport never divides by zero.
pub(crate) fn transport_frames(points: &[Point3]) -> Vec<PathFrame> {
    let tol = Tolerance::ZERO_LENGTH;
    let n = points.len();
    debug_assert!(n >= 2);

    let mut tangents: Vec<Vec3> = Vec::with_capacity(n);
    let mut last = Vec3::X;
    for i in 0..n {
        let dir = if i + 1 < n {
            points[i + 1].sub_point(points[i])
        } else {
            points[i].sub_point(points[i - 1])
        };
        last = dir.normalized().unwrap_or(last);
        tangents.push(last);
    }

    let first = PathFrame::from_tangent_with_up(tangents[0], Vec3::Y)
        .or_else(|| PathFrame::from_tangent_with_up(tangents[0], Vec3::X))
        .unwrap_or(PathFrame {
            tangent: Vec3::X,
            normal: Vec3::Y,
            binormal: Vec3::Z,
        });

    let mut frames = Vec::with_capacity(n);
    frames.push(first);

    for i in 1..n {
        let prev = frames[i - 1];
        let t_prev = tangents[i - 1];
        let t_cur = tangents[i];

        let axis = t_prev.cross(t_cur);
        let sin = axis.length();
        let cos = t_prev.dot(t_cur).clamp(-1.0, 1.0);

        let transported = if sin <= tol.eps {
            prev.normal
        } else {
            rotate_about_axis(prev.normal, axis.mul_scalar(1.0 / sin), sin.atan2(cos))
        };

        // Re-orthogonalize against the current tangent; transport alone drifts
        // over many small rotations.
        let normal = transported
            .sub(t_cur.mul_scalar(transported.dot(t_cur)))
            .normalized()
            .unwrap_or(prev.normal);
        let binormal = t_cur.cross(normal).normalized().unwrap_or(prev.binormal);
        let normal = binormal.cross(t_cur).normalized().unwrap_or(normal);

        frames.push(PathFrame { tangent: t_cur, normal, binormal });
    }

    frames
}

/// An arc-length parameterized path over a sampled curve.
#[derive(Debug, Clone)]
pub struct ArcLengthPath {
    points: Vec<Point3>,
    arc_lengths: Vec<f64>,
    total_length: f64,
    frames: Vec<PathFrame>,
}

impl ArcLengthPath {
    /// Build the cumulative length table and transported frames for `curve`.
    ///
    /// # Errors
    /// Returns [`PathError::EmptyCurve`] when the curve has fewer than 2
    /// samples or its total length is zero.
    pub fn build(curve: &SampledCurve) -> Result<Self, PathError> {
        let points = curve.points().to_vec();
        if points.len() < 2 {
            return Err(PathError::EmptyCurve);
        }

        let arc_lengths = compute_arc_lengths(&points);
        let total_length = arc_lengths.last().copied().unwrap_or(0.0);
        if Tolerance::ZERO_LENGTH.is_zero_length(total_length) {
            return Err(PathError::EmptyCurve);
        }

        let frames = transport_frames(&points);

        Ok(Self { points, arc_lengths, total_length, frames })
    }

    /// Total length of the path.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.total_length
    }

    /// Number of underlying samples.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.points.len()
    }

    /// The underlying sample points.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// The transported frame at every sample, in sample order.
    #[must_use]
    pub fn frames(&self) -> &[PathFrame] {
        &self.frames
    }

    /// Locate the segment containing normalized parameter `t` and the
    /// interpolation ratio inside it.
    fn locate(&self, t: f64) -> (usize, f64) {
        let target = t.clamp(0.0, 1.0) * self.total_length;
        let idx = self.arc_lengths.partition_point(|&len| len < target);
        let seg = idx.saturating_sub(1).min(self.points.len() - 2);
        let seg_len = self.arc_lengths[seg + 1] - self.arc_lengths[seg];
        if Tolerance::ZERO_LENGTH.is_zero_length(seg_len) {
            (seg, 0.0)
        } else {
            (seg, ((target - self.arc_lengths[seg]) / seg_len).clamp(0.0, 1.0))
        }
    }

    /// Position at normalized arc-length parameter `t` in `[0, 1]`.
    /// Out-of-range parameters clamp to the path ends.
    #[must_use]
    pub fn position_at(&self, t: f64) -> Point3 {
        let (seg, ratio) = self.locate(t);
        self.points[seg].lerp(self.points[seg + 1], ratio)
    }

    /// Unit tangent at normalized parameter `t`.
    #[must_use]
    pub fn tangent_at(&self, t: f64) -> Vec3 {
        self.frame_at(t).tangent
    }

    /// Unit normal at normalized parameter `t`.
    #[must_use]
    pub fn normal_at(&self, t: f64) -> Vec3 {
        self.frame_at(t).normal
    }

    /// Unit binormal (lateral axis) at normalized parameter `t`.
    #[must_use]
    pub fn binormal_at(&self, t: f64) -> Vec3 {
        self.frame_at(t).binormal
    }

    /// Full orientation frame at normalized parameter `t`, interpolated
    /// between the bracketing sample frames and re-orthonormalized.
    #[must_use]
    pub fn frame_at(&self, t: f64) -> PathFrame {
        let (seg, ratio) = self.locate(t);
        let a = self.frames[seg];
        let b = self.frames[seg + 1];

        let tangent = a.tangent.lerp(b.tangent, ratio).normalized().unwrap_or(a.tangent);
        let blended = a.normal.lerp(b.normal, ratio);
        let normal = blended
            .sub(tangent.mul_scalar(blended.dot(tangent)))
            .normalized()
            .unwrap_or(a.normal);
        let binormal = tangent.cross(normal).normalized().unwrap_or(a.binormal);
        let normal = binormal.cross(tangent).normalized().unwrap_or(normal);

        PathFrame { tangent, normal, binormal }
    }

    /// Curvature magnitude at normalized parameter `t`, from the circle
    /// circumscribing three consecutive samples around `t`.
    ///
    /// Returns `Some(0.0)` where the samples are locally collinear and `None`
    /// when the path has too few samples to bracket `t`.
    #[must_use]
    pub fn curvature_at(&self, t: f64) -> Option<f64> {
        let (a, b, c) = self.curvature_triple(t)?;
        let ab = b.sub_point(a);
        let ac = c.sub_point(a);
        let cross = ab.cross(ac);
        let area2 = cross.length();
        if Tolerance::ZERO_LENGTH.is_zero_length(area2) {
            return Some(0.0);
        }
        let la = b.distance_to(c);
        let lb = c.distance_to(a);
        let lc = a.distance_to(b);
        // R = abc / (4 * area); area = |AB x AC| / 2.
        Some((2.0 * area2) / (la * lb * lc))
    }

    /// Center of the circumscribed circle through three consecutive samples
    /// around `t`, or `None` where the samples are collinear.
    #[must_use]
    pub fn curvature_center_at(&self, t: f64) -> Option<Point3> {
        let (a, b, c) = self.curvature_triple(t)?;
        let la2 = b.sub_point(c).length_squared();
        let lb2 = c.sub_point(a).length_squared();
        let lc2 = a.sub_point(b).length_squared();

        // Barycentric circumcenter weights.
        let wa = la2 * (lb2 + lc2 - la2);
        let wb = lb2 * (lc2 + la2 - lb2);
        let wc = lc2 * (la2 + lb2 - lc2);
        let sum = wa + wb + wc;
        if Tolerance::ZERO_LENGTH.is_zero_length(sum) {
            return None;
        }
        Some(Point3::new(
            (wa * a.x + wb * b.x + wc * c.x) / sum,
            (wa * a.y + wb * b.y + wc * c.y) / sum,
            (wa * a.z + wb * b.z + wc * c.z) / sum,
        ))
    }

    /// Three consecutive samples bracketing `t`, clamped away from the ends.
    fn curvature_triple(&self, t: f64) -> Option<(Point3, Point3, Point3)> {
        if self.points.len() < 3 {
            return None;
        }
        let (seg, _) = self.locate(t);
        let mid = seg.clamp(1, self.points.len() - 2);
        Some((self.points[mid - 1], self.points[mid], self.points[mid + 1]))
    }
}
