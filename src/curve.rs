use crate::error::{Result, SubdivError};
use crate::point::{self, Point3};

/// A read-only parametric curve that attracts subdivision.
/// Must be Send + Sync to support parallel passes.
pub trait GuideCurve: Send + Sync + std::fmt::Debug {
    /// Parameter and position of the curve point closest to `point`.
    fn closest_point(&self, point: &Point3) -> (f64, Point3);

    /// Position at parameter `t`; parameters outside the domain are clamped.
    fn point_at(&self, t: f64) -> Point3;

    /// Parameter range `(start, end)`.
    fn domain(&self) -> (f64, f64);
}

/// A straight segment parameterized over `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSegment {
    pub start: Point3,
    pub end: Point3,
}

impl LineSegment {
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }
}

impl GuideCurve for LineSegment {
    fn closest_point(&self, point: &Point3) -> (f64, Point3) {
        let t = project_on_segment(self.start, self.end, *point);
        (t, point::lerp(self.start, self.end, t))
    }

    fn point_at(&self, t: f64) -> Point3 {
        point::lerp(self.start, self.end, t.clamp(0.0, 1.0))
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }
}

// Clamped parameter of the projection of `p` onto segment a-b.
fn project_on_segment(a: Point3, b: Point3, p: Point3) -> f64 {
    let v = point::sub(b, a);
    let w = point::sub(p, a);
    let c1 = point::dot(w, v);
    let c2 = point::dot(v, v);
    if c2 <= 0.0 { 0.0 } else { (c1 / c2).clamp(0.0, 1.0) }
}

/// A piecewise-linear curve parameterized by arc length.
///
/// Closed polylines include the segment from the last point back to the first.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    points: Vec<Point3>,
    closed: bool,
    // Arc length at the start of each segment, plus the total length at the end.
    lengths: Vec<f64>,
}

impl Polyline {
    pub fn new(points: Vec<Point3>, closed: bool) -> Result<Self> {
        if points.is_empty() {
            return Err(SubdivError::InvalidRange { name: "polyline points", value: 0.0 });
        }
        let n = points.len();
        let segments = if closed && n > 1 { n } else { n - 1 };
        let mut lengths = Vec::with_capacity(segments + 1);
        let mut total = 0.0;
        lengths.push(total);
        for i in 0..segments {
            total += point::distance(points[i], points[(i + 1) % n]);
            lengths.push(total);
        }
        Ok(Self { points, closed, lengths })
    }

    /// Builds a polyline from a flat array [x, y, z, x, y, z, ...].
    pub fn from_flat(coords: &[f64], closed: bool) -> Result<Self> {
        if coords.len() % 3 != 0 {
            return Err(SubdivError::InvalidRange {
                name: "polyline coordinate count",
                value: coords.len() as f64,
            });
        }
        let points = coords.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();
        Self::new(points, closed)
    }

    /// Samples `f` at `resolution` evenly spaced parameters over `[t0, t1]`.
    ///
    /// For closed curves the end parameter is not sampled, since it coincides with the start.
    pub fn sample<F>(f: F, t0: f64, t1: f64, resolution: usize, closed: bool) -> Result<Self>
    where
        F: Fn(f64) -> Point3,
    {
        let resolution = resolution.max(2);
        let steps = if closed { resolution } else { resolution - 1 };
        let points = (0..resolution)
            .map(|i| f(t0 + (t1 - t0) * i as f64 / steps as f64))
            .collect();
        Self::new(points, closed)
    }

    /// A trefoil knot around `center`.
    pub fn trefoil(center: Point3, scale: f64, resolution: usize) -> Result<Self> {
        Self::sample(
            |t| {
                // Parametric equations for a trefoil knot
                let x = t.sin() + 2.0 * (2.0 * t).sin();
                let y = t.cos() - 2.0 * (2.0 * t).cos();
                let z = -(3.0 * t).sin();
                [center[0] + x * scale, center[1] + y * scale, center[2] + z * scale]
            },
            0.0,
            std::f64::consts::TAU,
            resolution,
            true,
        )
    }

    /// A helix around the z axis through `center`, starting at its lowest point.
    pub fn helix(center: Point3, radius: f64, pitch: f64, turns: f64, resolution: usize) -> Result<Self> {
        let height = pitch * turns;
        Self::sample(
            |t| {
                let angle = t * std::f64::consts::TAU;
                [
                    center[0] + radius * angle.cos(),
                    center[1] + radius * angle.sin(),
                    center[2] - height / 2.0 + pitch * t,
                ]
            },
            0.0,
            turns,
            resolution,
            false,
        )
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn length(&self) -> f64 {
        self.lengths[self.lengths.len() - 1]
    }

    fn segment(&self, i: usize) -> (Point3, Point3) {
        (self.points[i], self.points[(i + 1) % self.points.len()])
    }
}

impl GuideCurve for Polyline {
    fn closest_point(&self, point: &Point3) -> (f64, Point3) {
        let segments = self.lengths.len() - 1;
        if segments == 0 {
            return (0.0, self.points[0]);
        }

        let mut min_dist_sq = f64::MAX;
        let mut closest = (0.0, self.points[0]);
        for i in 0..segments {
            let (p0, p1) = self.segment(i);
            // Project point onto segment p0-p1
            let t = project_on_segment(p0, p1, *point);
            let proj = point::lerp(p0, p1, t);
            let d2 = point::distance_sq(*point, proj);
            if d2 < min_dist_sq {
                min_dist_sq = d2;
                let seg_len = self.lengths[i + 1] - self.lengths[i];
                closest = (self.lengths[i] + t * seg_len, proj);
            }
        }
        closest
    }

    fn point_at(&self, t: f64) -> Point3 {
        let segments = self.lengths.len() - 1;
        if segments == 0 {
            return self.points[0];
        }
        let t = t.clamp(0.0, self.length());
        let i = self.lengths.partition_point(|&l| l <= t).saturating_sub(1).min(segments - 1);
        let (p0, p1) = self.segment(i);
        let seg_len = self.lengths[i + 1] - self.lengths[i];
        if seg_len <= 0.0 {
            return p0;
        }
        point::lerp(p0, p1, (t - self.lengths[i]) / seg_len)
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, self.length())
    }
}
