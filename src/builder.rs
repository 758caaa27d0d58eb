use crate::error::Result;
use crate::hexahedron::{Hexahedron, CORNERS};
use crate::kernel::GeometryKernel;
use crate::point::{reflect, Point3};

/// The eight corners of the cell spanned by corner `a` and the points `b`, `c`, `d` on its
/// three edges: `[a, b, c, d, e, f, g, h]` where `e`, `f`, `g` complete the faces through `a`
/// and `h` is the corner opposite `a`.
pub fn cell_corners(a: Point3, b: Point3, c: Point3, d: Point3) -> [Point3; CORNERS] {
    let e = reflect(a, b, c);
    let f = reflect(a, b, d);
    let g = reflect(a, c, d);
    let h = reflect(d, f, g);
    [a, b, c, d, e, f, g, h]
}

/// Builds the cell with corner `a` whose three edges from `a` end at `b`, `c` and `d`.
///
/// Called with the edge midpoints of a parent corner, this yields the eighth of the parent
/// nearest to that corner. Each face is built from three points and completed by point
/// reflection; the six faces are then joined by the kernel.
pub fn build_cell<K: GeometryKernel>(
    kernel: &K,
    a: Point3,
    b: Point3,
    c: Point3,
    d: Point3,
    tolerance: f64,
) -> Result<Hexahedron> {
    let [_, _, _, _, e, f, g, _] = cell_corners(a, b, c, d);

    let faces = [
        kernel.build_face(a, b, c), // a b e c
        kernel.build_face(a, b, d), // a b f d
        kernel.build_face(a, c, d), // a c g d
        kernel.build_face(d, f, g), // d f h g
        kernel.build_face(b, f, e), // b f h e
        kernel.build_face(c, e, g), // c e h g
    ];

    kernel.join_faces(&faces, tolerance)
}
