use crate::bounds::BoundingBox;
use crate::curve::Polyline;
use crate::engine::Subdivision;
use crate::hexahedron::Hexahedron;
use crate::params::{SeedPolicy, SubdivisionParams};
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

/// Curve-guided subdivision of a box, driven from JavaScript.
///
/// The guide curve is a polyline given as a flat array [x, y, z, x, y, z, ...]. Parameters start
/// at their defaults and are changed with the setters before calling `calculate`.
#[wasm_bindgen]
pub struct CubeSubdivision {
    bounds: BoundingBox,
    curve: Polyline,
    params: SubdivisionParams,
    cells: Vec<Hexahedron>,
}

#[wasm_bindgen]
impl CubeSubdivision {
    #[wasm_bindgen(constructor)]
    pub fn new(bounds: BoundingBox, curve: &[f64], closed: bool) -> Result<CubeSubdivision, JsError> {
        Ok(CubeSubdivision {
            bounds,
            curve: Polyline::from_flat(curve, closed)?,
            params: SubdivisionParams::default(),
            cells: vec![Hexahedron::from_bounds(bounds)],
        })
    }

    /// Distance threshold and random rate of the subdivision pass.
    pub fn set_subdivision(&mut self, dist: f64, random_rate: f64) {
        self.params.subdiv_dist = dist;
        self.params.subdiv_random_rate = random_rate;
    }

    /// Distance threshold and random rate of the reduction pass.
    pub fn set_reduction(&mut self, dist: f64, random_rate: f64) {
        self.params.reduce_dist = dist;
        self.params.reduce_random_rate = random_rate;
    }

    pub fn set_loops(&mut self, loops: i32) -> Result<(), JsError> {
        self.params.loops = u32::try_from(loops).map_err(|_| JsError::new("loops must not be negative"))?;
        Ok(())
    }

    pub fn set_join_tolerance(&mut self, tolerance: f64) {
        self.params.join_tolerance = tolerance;
    }

    /// Makes runs reproducible.
    pub fn set_seed(&mut self, seed: u32) {
        self.params.seed = SeedPolicy::Fixed(seed as u64);
    }

    /// Seeds every run from entropy (the default).
    pub fn clear_seed(&mut self) {
        self.params.seed = SeedPolicy::Entropy;
    }

    /// Runs all rounds, replacing the cells of any previous run.
    pub fn calculate(&mut self) -> Result<(), JsError> {
        let engine = Subdivision::new(self.curve.clone(), self.params)?;
        self.cells = engine.run(Hexahedron::from_bounds(self.bounds))?;
        Ok(())
    }

    pub fn count_cells(&self) -> usize {
        self.cells.len()
    }

    /// Flat array of the 8 corners of cell `index`.
    pub fn cell_vertices(&self, index: usize) -> Option<Vec<f64>> {
        self.cells.get(index).map(Hexahedron::flat_vertices)
    }

    /// Flattened corner indices of the 6 face loops of cell `index`.
    pub fn cell_faces(&self, index: usize) -> Option<Vec<u32>> {
        self.cells.get(index).map(Hexahedron::flat_face_indices)
    }

    pub fn cell_volume(&self, index: usize) -> Option<f64> {
        self.cells.get(index).map(Hexahedron::volume)
    }

    pub fn cell_centroid(&self, index: usize) -> Option<Vec<f64>> {
        self.cells.get(index).map(|c| c.centroid().to_vec())
    }

    pub fn total_volume(&self) -> f64 {
        self.cells.iter().map(Hexahedron::volume).sum()
    }
}

impl CubeSubdivision {
    pub fn cells(&self) -> &[Hexahedron] {
        &self.cells
    }

    pub fn params(&self) -> &SubdivisionParams {
        &self.params
    }
}
