use crate::builder::build_cell;
use crate::error::Result;
use crate::hexahedron::{Hexahedron, CORNERS};
use crate::kernel::GeometryKernel;

/// Splits `cell` into eight children, one per corner, in corner order.
///
/// Each child is spanned by a parent corner and the midpoints of the three edges meeting there.
/// If any child fails to close, the whole split fails: a partial split would leave a gap.
pub fn subdivide<K: GeometryKernel>(kernel: &K, cell: &Hexahedron, tolerance: f64) -> Result<Vec<Hexahedron>> {
    (0..CORNERS)
        .map(|corner| {
            let [e0, e1, e2] = kernel.incident_edges(cell, corner);
            build_cell(
                kernel,
                cell.corners()[corner],
                kernel.edge_midpoint(cell, e0),
                kernel.edge_midpoint(cell, e1),
                kernel.edge_midpoint(cell, e2),
                tolerance,
            )
        })
        .collect()
}
