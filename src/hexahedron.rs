use crate::bounds::BoundingBox;
use crate::error::{Result, SubdivError};
use crate::point::{self, Point3};

/// Number of corners of a hexahedral cell.
pub const CORNERS: usize = 8;
/// Number of quadrilateral faces of a hexahedral cell.
pub const FACES: usize = 6;
/// Number of edges of a hexahedral cell.
pub const EDGES: usize = 12;

// Vertex order and outward face loops of an axis-aligned box.
const BOX_FACES: [[u8; 4]; FACES] = [
    [3, 2, 1, 0], // Bottom (z-)
    [4, 5, 6, 7], // Top (z+)
    [0, 1, 5, 4], // Front (y-)
    [2, 3, 7, 6], // Back (y+)
    [0, 4, 7, 3], // Left (x-)
    [1, 2, 6, 5], // Right (x+)
];

/// A closed hexahedral cell: 8 corners and 6 quadrilateral faces.
///
/// Face loops are oriented outward (counter-clockwise seen from outside). Edges are derived from
/// the face loops in first-seen order, so edge indices are stable for a given face layout.
#[derive(Clone, Debug, PartialEq)]
pub struct Hexahedron {
    vertices: [Point3; CORNERS],
    faces: [[u8; 4]; FACES],
    edges: [[u8; 2]; EDGES],
}

impl Hexahedron {
    /// An axis-aligned box cell.
    ///
    /// Corners are numbered as in a unit cube: 0 = (min, min, min), 1 = (max, min, min),
    /// 2 = (max, max, min), 3 = (min, max, min) and 4..8 the same at `max_z`.
    pub fn from_bounds(bounds: BoundingBox) -> Hexahedron {
        let vertices = [
            [bounds.min_x, bounds.min_y, bounds.min_z], // 0
            [bounds.max_x, bounds.min_y, bounds.min_z], // 1
            [bounds.max_x, bounds.max_y, bounds.min_z], // 2
            [bounds.min_x, bounds.max_y, bounds.min_z], // 3
            [bounds.min_x, bounds.min_y, bounds.max_z], // 4
            [bounds.max_x, bounds.min_y, bounds.max_z], // 5
            [bounds.max_x, bounds.max_y, bounds.max_z], // 6
            [bounds.min_x, bounds.max_y, bounds.max_z], // 7
        ];
        Hexahedron::from_topology(vertices, BOX_FACES)
    }

    /// A parallelepiped spanned by the edge vectors `u`, `v`, `w` from `origin`.
    ///
    /// Corners follow the numbering of [`Hexahedron::from_bounds`] with `u`, `v`, `w` in place
    /// of the x, y and z axes. A left-handed frame is accepted; the faces are flipped so they
    /// still point outward.
    pub fn parallelepiped(origin: Point3, u: Point3, v: Point3, w: Point3) -> Hexahedron {
        let uv = point::add(u, v);
        let vertices = [
            origin,
            point::add(origin, u),
            point::add(origin, uv),
            point::add(origin, v),
            point::add(origin, w),
            point::add(point::add(origin, u), w),
            point::add(point::add(origin, uv), w),
            point::add(point::add(origin, v), w),
        ];
        let mut cell = Hexahedron::from_topology(vertices, BOX_FACES);
        if cell.signed_volume() < 0.0 {
            cell.flip();
        }
        cell
    }

    /// A cell from eight corners and six face loops of corner indices.
    ///
    /// The loops must describe a closed hexahedron: every edge shared by exactly two faces and
    /// three edges meeting at every corner. Loops may come in mixed orientation; they are made
    /// consistent and then turned outward.
    ///
    /// Fails with [`SubdivError::OpenBoundary`] if the loops do not close.
    pub fn new(corners: [Point3; CORNERS], faces: [[usize; 4]; FACES]) -> Result<Hexahedron> {
        let used = (0..CORNERS).filter(|i| faces.iter().any(|f| f.contains(i))).count();
        let open = || SubdivError::OpenBoundary { faces: FACES, vertices: used };

        let mut loops = [[0u8; 4]; FACES];
        for (f, face) in faces.iter().enumerate() {
            for (k, &i) in face.iter().enumerate() {
                if i >= CORNERS || face[..k].contains(&i) {
                    return Err(open());
                }
                loops[f][k] = i as u8;
            }
        }

        // 1. Every edge must be used by exactly two faces
        // (edge key, [(face, runs from low to high index)])
        let mut uses: Vec<([u8; 2], Vec<(usize, bool)>)> = Vec::with_capacity(EDGES);
        for (f, l) in loops.iter().enumerate() {
            for i in 0..4 {
                let a = l[i];
                let b = l[(i + 1) % 4];
                let key = if a < b { [a, b] } else { [b, a] };
                match uses.iter_mut().find(|(k, _)| *k == key) {
                    Some((_, list)) => list.push((f, a < b)),
                    None => uses.push((key, vec![(f, a < b)])),
                }
            }
        }
        if uses.len() != EDGES || uses.iter().any(|(_, list)| list.len() != 2) {
            return Err(open());
        }

        // 2. Orient neighbours so each shared edge is traversed in opposite directions
        let mut flipped: [Option<bool>; FACES] = [None; FACES];
        flipped[0] = Some(false);
        let mut stack = vec![0usize];
        while let Some(f) = stack.pop() {
            let Some(f_flip) = flipped[f] else { continue };
            for (_, list) in &uses {
                let (this, other) = match (list[0], list[1]) {
                    (a, b) if a.0 == f => (a, b),
                    (a, b) if b.0 == f => (b, a),
                    _ => continue,
                };
                let effective = this.1 ^ f_flip;
                let needed = other.1 ^ !effective;
                match flipped[other.0] {
                    None => {
                        flipped[other.0] = Some(needed);
                        stack.push(other.0);
                    }
                    Some(existing) if existing != needed => return Err(open()),
                    Some(_) => {}
                }
            }
        }
        for (f, l) in loops.iter_mut().enumerate() {
            match flipped[f] {
                Some(true) => l.swap(1, 3),
                Some(false) => {}
                None => return Err(open()),
            }
        }

        let mut cell = Hexahedron::from_topology(corners, loops);

        // 3. Three edges at every corner
        let mut degree = [0u8; CORNERS];
        for [a, b] in cell.edges {
            degree[a as usize] += 1;
            degree[b as usize] += 1;
        }
        if degree.iter().any(|&d| d != 3) {
            return Err(open());
        }

        if cell.signed_volume() < 0.0 {
            cell.flip();
        }
        Ok(cell)
    }

    /// A cell from eight corners numbered as in [`Hexahedron::from_bounds`].
    ///
    /// The corners need not form a parallelepiped; faces are planar only if the input is.
    pub fn from_corners(corners: [Point3; CORNERS]) -> Result<Hexahedron> {
        Hexahedron::new(corners, BOX_FACES.map(|f| f.map(usize::from)))
    }

    /// Assembles a cell from corners and face loops that are already known to be closed and
    /// consistently oriented.
    fn from_topology(vertices: [Point3; CORNERS], faces: [[u8; 4]; FACES]) -> Hexahedron {
        let mut edges = [[0u8; 2]; EDGES];
        let mut count = 0;
        for face in &faces {
            for i in 0..4 {
                let a = face[i];
                let b = face[(i + 1) % 4];
                let key = if a < b { [a, b] } else { [b, a] };
                if !edges[..count].contains(&key) && count < EDGES {
                    edges[count] = key;
                    count += 1;
                }
            }
        }
        Hexahedron { vertices, faces, edges }
    }

    /// Reverses every face loop, turning the orientation inside out.
    fn flip(&mut self) {
        for face in self.faces.iter_mut() {
            face.swap(1, 3);
        }
    }

    /// Position of corner `index`, or `None` if `index >= 8`.
    pub fn corner(&self, index: usize) -> Option<Point3> {
        self.vertices.get(index).copied()
    }

    pub fn corners(&self) -> &[Point3; CORNERS] {
        &self.vertices
    }

    /// Corner indices of every face loop.
    pub fn faces(&self) -> Vec<Vec<usize>> {
        self.faces
            .iter()
            .map(|f| f.iter().map(|&i| i as usize).collect())
            .collect()
    }

    /// Corner positions of face `index`, in loop order.
    pub fn face_loop(&self, index: usize) -> Option<[Point3; 4]> {
        self.faces.get(index).map(|f| f.map(|i| self.vertices[i as usize]))
    }

    /// Corner index pairs of every edge.
    pub fn edges(&self) -> Vec<[usize; 2]> {
        self.edges.iter().map(|e| [e[0] as usize, e[1] as usize]).collect()
    }

    /// The three edges meeting at `corner`, in edge order.
    pub fn incident_edges(&self, corner: usize) -> Option<[usize; 3]> {
        if corner >= CORNERS {
            return None;
        }
        let mut found = [0usize; 3];
        let mut count = 0;
        for (i, e) in self.edges.iter().enumerate() {
            if (e[0] as usize == corner || e[1] as usize == corner) && count < 3 {
                found[count] = i;
                count += 1;
            }
        }
        Some(found)
    }

    /// Point at normalized parameter `t` along `edge`, measured from its lower corner index.
    pub fn edge_point(&self, edge: usize, t: f64) -> Option<Point3> {
        let [a, b] = *self.edges.get(edge)?;
        Some(point::lerp(self.vertices[a as usize], self.vertices[b as usize], t))
    }

    pub fn edge_midpoint(&self, edge: usize) -> Option<Point3> {
        self.edge_point(edge, 0.5)
    }

    pub fn bounds(&self) -> BoundingBox {
        let v = &self.vertices;
        let mut b = BoundingBox::new(v[0][0], v[0][1], v[0][2], v[0][0], v[0][1], v[0][2]);
        for p in &v[1..] {
            b.min_x = b.min_x.min(p[0]);
            b.min_y = b.min_y.min(p[1]);
            b.min_z = b.min_z.min(p[2]);
            b.max_x = b.max_x.max(p[0]);
            b.max_y = b.max_y.max(p[1]);
            b.max_z = b.max_z.max(p[2]);
        }
        b
    }

    /// Flat array of vertices [x, y, z, x, y, z, ...].
    pub fn flat_vertices(&self) -> Vec<f64> {
        self.vertices.iter().flat_map(|p| p.iter().copied()).collect()
    }

    /// Flattened corner indices of all face loops.
    pub fn flat_face_indices(&self) -> Vec<u32> {
        self.faces.iter().flat_map(|f| f.iter().map(|&i| i as u32)).collect()
    }

    /// Signed volume; positive when the faces point outward.
    pub fn signed_volume(&self) -> f64 {
        self.mass_properties_signed().0
    }

    pub fn volume(&self) -> f64 {
        self.signed_volume().abs()
    }

    pub fn centroid(&self) -> Point3 {
        self.mass_properties().1
    }

    /// Volume and centroid in one pass over the faces.
    pub fn mass_properties(&self) -> (f64, Point3) {
        let (volume, centroid) = self.mass_properties_signed();
        (volume.abs(), centroid)
    }

    fn mass_properties_signed(&self) -> (f64, Point3) {
        // Tetrahedra are fanned from the first corner rather than the origin, which keeps the
        // determinants well conditioned for small cells far from the origin.
        let origin = self.vertices[0];
        let mut centroid_x: f64 = 0.0;
        let mut centroid_y: f64 = 0.0;
        let mut centroid_z: f64 = 0.0;
        let mut total_volume: f64 = 0.0;

        for face in &self.faces {
            // Use the first vertex of the face as a pivot for fan triangulation
            let v0 = point::sub(self.vertices[face[0] as usize], origin);

            for i in 1..3 {
                let v1 = point::sub(self.vertices[face[i] as usize], origin);
                let v2 = point::sub(self.vertices[face[i + 1] as usize], origin);

                let det: f64 = point::dot(v0, point::cross(v1, v2));
                total_volume += det;

                centroid_x += det * (v0[0] + v1[0] + v2[0]);
                centroid_y += det * (v0[1] + v1[1] + v2[1]);
                centroid_z += det * (v0[2] + v1[2] + v2[2]);
            }
        }

        if total_volume.abs() < 1e-300 {
            let mean = self
                .vertices
                .iter()
                .fold([0.0; 3], |acc, p| point::add(acc, *p));
            return (0.0, point::scale(mean, 1.0 / CORNERS as f64));
        }

        let factor: f64 = 1.0 / (4.0 * total_volume);
        (
            total_volume / 6.0,
            [
                origin[0] + centroid_x * factor,
                origin[1] + centroid_y * factor,
                origin[2] + centroid_z * factor,
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_metrics() {
        let cell = Hexahedron::from_bounds(BoundingBox::new(0.0, 0.0, 0.0, 10.0, 20.0, 30.0));
        assert!((cell.volume() - 6000.0).abs() < 1e-6);
        assert!(cell.signed_volume() > 0.0);
        let c = cell.centroid();
        assert!((c[0] - 5.0).abs() < 1e-9);
        assert!((c[1] - 10.0).abs() < 1e-9);
        assert!((c[2] - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_box_topology() {
        let cell = Hexahedron::from_bounds(BoundingBox::cube(0.0, 0.0, 0.0, 1.0));
        let edges = cell.edges();
        assert_eq!(edges.len(), EDGES);
        for corner in 0..CORNERS {
            let incident = cell.incident_edges(corner).unwrap();
            for &e in &incident {
                assert!(edges[e].contains(&corner));
            }
            // Three distinct edges, each of unit length in a unit cube.
            assert!(incident[0] != incident[1] && incident[1] != incident[2] && incident[0] != incident[2]);
            for &e in &incident {
                let [a, b] = edges[e];
                assert!((point::distance(cell.corner(a).unwrap(), cell.corner(b).unwrap()) - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_edge_midpoint() {
        let cell = Hexahedron::from_bounds(BoundingBox::new(0.0, 0.0, 0.0, 2.0, 2.0, 2.0));
        // Edge 0 joins corners 2 and 3 (first edge of the bottom loop).
        assert_eq!(cell.edges()[0], [2, 3]);
        assert_eq!(cell.edge_midpoint(0), Some([1.0, 2.0, 0.0]));
    }

    #[test]
    fn test_left_handed_parallelepiped() {
        let cell = Hexahedron::parallelepiped(
            [5.0, 5.0, 5.0],
            [0.0, 2.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 0.0, 3.0],
        );
        assert!(cell.signed_volume() > 0.0);
        assert!((cell.volume() - 6.0).abs() < 1e-12);
        let c = cell.centroid();
        assert!((c[0] - 5.5).abs() < 1e-12);
        assert!((c[1] - 6.0).abs() < 1e-12);
        assert!((c[2] - 6.5).abs() < 1e-12);
    }

    #[test]
    fn test_sheared_volume() {
        let cell = Hexahedron::parallelepiped(
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.5, 1.0, 0.0],
            [0.25, 0.25, 1.0],
        );
        assert!((cell.volume() - 1.0).abs() < 1e-12);
    }

    fn frustum_corners() -> [Point3; CORNERS] {
        [
            [0.0, 0.0, 0.0],
            [2.0, 0.0, 0.0],
            [2.0, 2.0, 0.0],
            [0.0, 2.0, 0.0],
            [0.5, 0.5, 1.0],
            [1.5, 0.5, 1.0],
            [1.5, 1.5, 1.0],
            [0.5, 1.5, 1.0],
        ]
    }

    #[test]
    fn test_from_corners_frustum() {
        let cell = Hexahedron::from_corners(frustum_corners()).unwrap();
        // Square frustum with bases 4 and 1 and height 1.
        assert!((cell.signed_volume() - 7.0 / 3.0).abs() < 1e-12);
        let c = cell.centroid();
        assert!((c[0] - 1.0).abs() < 1e-12);
        assert!((c[1] - 1.0).abs() < 1e-12);
        assert!((c[2] - 11.0 / 28.0).abs() < 1e-12);
    }

    #[test]
    fn test_new_repairs_orientation() {
        let mut faces = BOX_FACES.map(|f| f.map(usize::from));
        faces[0].reverse();
        faces[3].reverse();
        let cell = Hexahedron::new(frustum_corners(), faces).unwrap();
        assert!(cell.signed_volume() > 0.0);

        let inward = BOX_FACES.map(|f| [f[0], f[3], f[2], f[1]].map(usize::from));
        let cell = Hexahedron::new(frustum_corners(), inward).unwrap();
        assert!((cell.signed_volume() - 7.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_new_rejects_open_loops() {
        let mut faces = BOX_FACES.map(|f| f.map(usize::from));
        faces[1] = [4, 5, 6, 6];
        assert!(matches!(
            Hexahedron::new(frustum_corners(), faces),
            Err(SubdivError::OpenBoundary { .. })
        ));

        let mut faces = BOX_FACES.map(|f| f.map(usize::from));
        faces[2] = [0, 1, 5, 9];
        assert!(Hexahedron::new(frustum_corners(), faces).is_err());

        // Two copies of the bottom leave the top uncovered.
        let mut faces = BOX_FACES.map(|f| f.map(usize::from));
        faces[1] = faces[0];
        assert!(Hexahedron::new(frustum_corners(), faces).is_err());
    }

    #[test]
    fn test_accessors_out_of_range() {
        let cell = Hexahedron::from_bounds(BoundingBox::cube(0.0, 0.0, 0.0, 1.0));
        assert!(cell.corner(CORNERS).is_none());
        assert!(cell.face_loop(FACES).is_none());
        assert!(cell.incident_edges(CORNERS).is_none());
        assert!(cell.edge_point(EDGES, 0.5).is_none());
        assert!(cell.edge_midpoint(EDGES).is_none());
        assert_eq!(cell.corner(6), Some([0.5, 0.5, 0.5]));
    }
}
