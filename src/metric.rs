use crate::curve::GuideCurve;
use crate::hexahedron::Hexahedron;
use crate::kernel::GeometryKernel;
use crate::point::{self, Point3};

/// Mass properties of a cell together with its distance to the guide curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellMetrics {
    pub volume: f64,
    pub centroid: Point3,
    /// Curve parameter of the closest point.
    pub parameter: f64,
    pub closest: Point3,
    /// Euclidean distance between centroid and closest curve point.
    pub distance: f64,
}

/// Computes volume, centroid and curve distance with a single mass-properties query.
pub fn measure<K, C>(kernel: &K, cell: &Hexahedron, curve: &C) -> CellMetrics
where
    K: GeometryKernel,
    C: GuideCurve + ?Sized,
{
    let (volume, centroid) = kernel.volume_and_centroid(cell);
    let (parameter, closest) = curve.closest_point(&centroid);
    CellMetrics {
        volume,
        centroid,
        parameter,
        closest,
        distance: point::distance(centroid, closest),
    }
}

/// Distance from the cell centroid to the closest point on `curve`.
pub fn distance_to_curve<K, C>(kernel: &K, cell: &Hexahedron, curve: &C) -> f64
where
    K: GeometryKernel,
    C: GuideCurve + ?Sized,
{
    measure(kernel, cell, curve).distance
}

pub fn volume<K: GeometryKernel>(kernel: &K, cell: &Hexahedron) -> f64 {
    kernel.volume_and_centroid(cell).0
}

/// `(volume / max_volume) ^ exponent`, the sub-linear weight that favours keeping large cells.
#[inline]
pub fn volume_factor(volume: f64, max_volume: f64, exponent: f64) -> f64 {
    (volume / max_volume).powf(exponent)
}
