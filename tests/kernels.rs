use cubesubdiv::point::{distance, midpoint};
use cubesubdiv::{
    GeometryKernel, Hexahedron, LineSegment, Point3, PolyhedralKernel, QuadFace, Result, SubdivError, Subdivision,
    SubdivisionParams,
};

/// Welds corners by plain distance and hands the loops to `Hexahedron::new`.
struct WeldingKernel;

impl GeometryKernel for WeldingKernel {
    type Face = QuadFace;

    fn volume_and_centroid(&self, cell: &Hexahedron) -> (f64, Point3) {
        cell.mass_properties()
    }

    fn incident_edges(&self, cell: &Hexahedron, corner: usize) -> [usize; 3] {
        let mut found = Vec::with_capacity(3);
        for (i, [a, b]) in cell.edges().into_iter().enumerate() {
            if a == corner || b == corner {
                found.push(i);
            }
        }
        [found[0], found[1], found[2]]
    }

    fn edge_midpoint(&self, cell: &Hexahedron, edge: usize) -> Point3 {
        let [a, b] = cell.edges()[edge];
        midpoint(cell.corners()[a], cell.corners()[b])
    }

    fn build_face(&self, p: Point3, q: Point3, r: Point3) -> QuadFace {
        QuadFace::from_three_points(p, q, r)
    }

    fn join_faces(&self, faces: &[QuadFace], tolerance: f64) -> Result<Hexahedron> {
        let mut corners: Vec<Point3> = Vec::new();
        let mut loops = [[0usize; 4]; 6];
        if faces.len() != loops.len() {
            return Err(SubdivError::OpenBoundary { faces: faces.len(), vertices: 0 });
        }
        for (face, l) in faces.iter().zip(loops.iter_mut()) {
            for (p, slot) in face.corners.iter().zip(l.iter_mut()) {
                *slot = match corners.iter().position(|q| distance(*p, *q) <= tolerance) {
                    Some(i) => i,
                    None => {
                        corners.push(*p);
                        corners.len() - 1
                    }
                };
            }
        }
        let count = corners.len();
        let corners: [Point3; 8] = corners
            .try_into()
            .map_err(|_| SubdivError::OpenBoundary { faces: faces.len(), vertices: count })?;
        Hexahedron::new(corners, loops)
    }
}

fn frustum() -> Hexahedron {
    Hexahedron::from_corners([
        [0.0, 0.0, 0.0],
        [4.0, 0.0, 0.0],
        [4.0, 4.0, 0.0],
        [0.0, 4.0, 0.0],
        [1.0, 1.0, 2.0],
        [3.0, 1.0, 2.0],
        [3.0, 3.0, 2.0],
        [1.0, 3.0, 2.0],
    ])
    .unwrap()
}

fn z_axis() -> LineSegment {
    LineSegment::new([2.0, 2.0, -10.0], [2.0, 2.0, 10.0])
}

#[test]
fn test_custom_kernel_subdivides_frustum() {
    let initial = frustum();
    assert!((initial.volume() - 56.0 / 3.0).abs() < 1e-9);

    let params = SubdivisionParams::new(10.0, 0.0, -1.0, 0.0, 1).seeded(1);
    let engine = Subdivision::with_kernel(WeldingKernel, z_axis(), params).unwrap();
    let cells = engine.run(initial.clone()).unwrap();

    assert_eq!(cells.len(), 8);
    for (i, cell) in cells.iter().enumerate() {
        // Each child is anchored at its parent corner and faces outward.
        assert_eq!(cell.corner(0), initial.corner(i));
        assert!(cell.signed_volume() > 0.0);
    }
}

#[test]
fn test_custom_kernel_matches_builtin() {
    let params = SubdivisionParams::new(10.0, 0.0, -1.0, 0.0, 2).seeded(1);
    let custom = Subdivision::with_kernel(WeldingKernel, z_axis(), params)
        .unwrap()
        .run(frustum())
        .unwrap();
    let builtin = Subdivision::with_kernel(PolyhedralKernel, z_axis(), params)
        .unwrap()
        .run(frustum())
        .unwrap();
    assert_eq!(custom.len(), 64);
    assert_eq!(custom, builtin);
}

#[test]
fn test_custom_kernel_reports_open_boundary() {
    let faces: Vec<QuadFace> = (0..6).map(|f| QuadFace { corners: frustum().face_loop(f).unwrap() }).collect();
    assert!(WeldingKernel.join_faces(&faces, 1e-9).is_ok());
    let err = WeldingKernel.join_faces(&faces[..4], 1e-9).unwrap_err();
    assert_eq!(err, SubdivError::OpenBoundary { faces: 4, vertices: 0 });
}
