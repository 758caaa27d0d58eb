//! # cubesubdiv
//!
//! `cubesubdiv` grows a density field of hexahedral cells around a guide curve. Starting from a
//! single cube, it repeatedly splits cells close to the curve into eight children and randomly
//! discards cells far from it, with smaller cells discarded more readily. It is designed to be
//! used in Rust as well as compiled to WebAssembly (WASM).
//!
//! ## Features
//!
//! - **Octree-like subdivision**: Children are built from a corner and its three edge midpoints
//!   by point reflection, exact for any parallelepiped.
//! - **Stochastic thresholds**: Independent noise on the subdivision and reduction distances.
//! - **Pluggable geometry**: Mass properties and face joining go through a [`GeometryKernel`].
//! - **Parallel passes**: Cells of a pass are evaluated with `rayon`; a fixed seed stays
//!   reproducible regardless of thread count.
//!
//! ## Main Interface
//!
//! The primary entry point is the [`Subdivision`] struct:
//!
//! ```
//! use cubesubdiv::{BoundingBox, Hexahedron, LineSegment, Subdivision, SubdivisionParams};
//!
//! let cube = Hexahedron::from_bounds(BoundingBox::cube(0.0, 0.0, 0.0, 1.0));
//! let axis = LineSegment::new([0.0, 0.0, -10.0], [0.0, 0.0, 10.0]);
//! let params = SubdivisionParams::new(2.0, 0.0, -1.0, 0.0, 1).seeded(7);
//! let cells = Subdivision::new(axis, params)?.run(cube)?;
//! assert_eq!(cells.len(), 8);
//! # Ok::<(), cubesubdiv::SubdivError>(())
//! ```

mod bounds;
mod builder;
mod curve;
mod engine;
mod error;
mod hexahedron;
mod kernel;
mod metric;
mod params;
pub mod point;
mod subdivide;
mod wasm;

pub use bounds::BoundingBox;
pub use builder::{build_cell, cell_corners};
pub use curve::{GuideCurve, LineSegment, Polyline};
pub use engine::{RoundStats, Run, Subdivision};
pub use error::{Result, SubdivError};
pub use hexahedron::Hexahedron;
pub use kernel::{GeometryKernel, PolyhedralKernel, QuadFace};
pub use metric::{distance_to_curve, measure, volume, volume_factor, CellMetrics};
pub use params::{SeedPolicy, SubdivisionParams, DEFAULT_JOIN_TOLERANCE, DEFAULT_VOLUME_EXPONENT};
pub use point::{reflect, Point3};
pub use subdivide::subdivide;
pub use wasm::CubeSubdivision;
