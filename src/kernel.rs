//! Geometry collaborator used by the subdivision core.
//!
//! The core never inspects faces or mass properties itself. It goes through a
//! [`GeometryKernel`], so a host with its own B-rep kernel can plug it in. [`PolyhedralKernel`] is
//! the built-in implementation for planar quadrilateral faces.

use crate::error::{Result, SubdivError};
use crate::hexahedron::{Hexahedron, CORNERS, FACES};
use crate::point::{self, Point3};

/// Geometric operations the subdivision core delegates.
/// Must be Send + Sync so passes can evaluate cells in parallel.
pub trait GeometryKernel: Send + Sync {
    /// Boundary patch produced by [`GeometryKernel::build_face`].
    type Face: Send;

    /// Volume and centroid of a closed cell.
    fn volume_and_centroid(&self, cell: &Hexahedron) -> (f64, Point3);

    /// Indices of the three edges meeting at `corner`.
    ///
    /// # Panics
    ///
    /// May panic if `corner >= 8`; the subdivision core only asks for corners of the cell.
    fn incident_edges(&self, cell: &Hexahedron, corner: usize) -> [usize; 3];

    /// Point halfway along `edge`.
    ///
    /// # Panics
    ///
    /// May panic if `edge >= 12`.
    fn edge_midpoint(&self, cell: &Hexahedron, edge: usize) -> Point3;

    /// A four-sided face through `p`, `q` and `r`, completed by point reflection so that `p` and
    /// the derived fourth corner are diagonal.
    fn build_face(&self, p: Point3, q: Point3, r: Point3) -> Self::Face;

    /// Joins six faces into one closed cell, welding corners closer than `tolerance`.
    ///
    /// Fails with [`SubdivError::OpenBoundary`] if the faces do not close.
    fn join_faces(&self, faces: &[Self::Face], tolerance: f64) -> Result<Hexahedron>;
}

/// A planar quadrilateral face given by its corner loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadFace {
    pub corners: [Point3; 4],
}

impl QuadFace {
    /// Loop `p, q, d, r` with `d = q + r - p`.
    pub fn from_three_points(p: Point3, q: Point3, r: Point3) -> QuadFace {
        QuadFace {
            corners: [p, q, point::reflect(p, q, r), r],
        }
    }

    fn shortest_edge(&self) -> f64 {
        (0..4)
            .map(|i| point::distance(self.corners[i], self.corners[(i + 1) % 4]))
            .fold(f64::INFINITY, f64::min)
    }
}

/// Exact mass properties and face joining for planar-faced hexahedra.
#[derive(Clone, Copy, Debug, Default)]
pub struct PolyhedralKernel;

impl PolyhedralKernel {
    pub fn new() -> Self {
        PolyhedralKernel
    }
}

impl GeometryKernel for PolyhedralKernel {
    type Face = QuadFace;

    fn volume_and_centroid(&self, cell: &Hexahedron) -> (f64, Point3) {
        cell.mass_properties()
    }

    fn incident_edges(&self, cell: &Hexahedron, corner: usize) -> [usize; 3] {
        match cell.incident_edges(corner) {
            Some(edges) => edges,
            None => panic!("corner index {corner} out of range"),
        }
    }

    fn edge_midpoint(&self, cell: &Hexahedron, edge: usize) -> Point3 {
        match cell.edge_midpoint(edge) {
            Some(p) => p,
            None => panic!("edge index {edge} out of range"),
        }
    }

    fn build_face(&self, p: Point3, q: Point3, r: Point3) -> QuadFace {
        QuadFace::from_three_points(p, q, r)
    }

    fn join_faces(&self, faces: &[QuadFace], tolerance: f64) -> Result<Hexahedron> {
        join_quads(faces, tolerance)
    }
}

fn open_boundary(faces: usize, vertices: usize) -> SubdivError {
    SubdivError::OpenBoundary { faces, vertices }
}

/// Welds the corners of six quads into a closed hexahedron.
fn join_quads(faces: &[QuadFace], tolerance: f64) -> Result<Hexahedron> {
    if faces.len() != FACES {
        return Err(open_boundary(faces.len(), 0));
    }

    // Weld radius is capped at half the shortest face edge.
    let shortest = faces.iter().map(QuadFace::shortest_edge).fold(f64::INFINITY, f64::min);
    let weld = tolerance.min(0.5 * shortest);
    let weld_sq = weld * weld;

    let mut vertices: Vec<Point3> = Vec::with_capacity(CORNERS);
    let mut loops = [[0usize; 4]; FACES];
    for (f, face) in faces.iter().enumerate() {
        for (k, &p) in face.corners.iter().enumerate() {
            let idx = match vertices.iter().position(|&v| point::distance_sq(v, p) <= weld_sq) {
                Some(idx) => idx,
                None => {
                    vertices.push(p);
                    vertices.len() - 1
                }
            };
            if idx >= CORNERS {
                return Err(open_boundary(faces.len(), vertices.len()));
            }
            loops[f][k] = idx;
        }
    }
    if vertices.len() != CORNERS {
        return Err(open_boundary(faces.len(), vertices.len()));
    }

    let mut corners = [[0.0; 3]; CORNERS];
    corners.copy_from_slice(&vertices);
    Hexahedron::new(corners, loops)
}
