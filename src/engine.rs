use crate::curve::GuideCurve;
use crate::error::{Result, SubdivError};
use crate::hexahedron::Hexahedron;
use crate::kernel::{GeometryKernel, PolyhedralKernel};
use crate::metric::{self, volume_factor};
use crate::params::SubdivisionParams;
use crate::point;
use crate::subdivide::subdivide;
use log::{debug, info, trace, warn};
use rand::Rng;
use rayon::prelude::*;

// Initial solids with volume below this fraction of their bounding diagonal cubed are degenerate.
const DEGENERATE_VOLUME_RATIO: f64 = 1e-12;

/// Cell counts of one completed round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoundStats {
    /// Zero-based index of the round.
    pub round: usize,
    /// Cells alive at the start of the round.
    pub input: usize,
    /// Cells replaced by their eight children.
    pub subdivided: usize,
    /// Cells entering the reduction pass.
    pub candidates: usize,
    /// Cells kept for the next round.
    pub survivors: usize,
}

/// Curve-guided subdivide/reduce process over hexahedral cells.
///
/// This struct owns:
/// - The **kernel** answering geometric queries.
/// - The **guide curve** that attracts subdivision.
/// - The **parameters** of the run.
///
/// Every round first splits cells near the curve into eight children, then discards cells whose
/// noise- and volume-weighted distance does not exceed the reduction threshold. Per-cell work
/// within a pass runs on the rayon thread pool; all random draws happen on the calling thread,
/// so a fixed seed reproduces the same cells regardless of the number of threads.
pub struct Subdivision<C: GuideCurve, K: GeometryKernel = PolyhedralKernel> {
    kernel: K,
    curve: C,
    params: SubdivisionParams,
}

impl<C: GuideCurve> Subdivision<C, PolyhedralKernel> {
    /// Creates a subdivision using the built-in [`PolyhedralKernel`].
    pub fn new(curve: C, params: SubdivisionParams) -> Result<Self> {
        Self::with_kernel(PolyhedralKernel, curve, params)
    }
}

impl<C: GuideCurve, K: GeometryKernel> Subdivision<C, K> {
    /// Creates a subdivision with a custom geometry kernel.
    pub fn with_kernel(kernel: K, curve: C, params: SubdivisionParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { kernel, curve, params })
    }

    pub fn params(&self) -> &SubdivisionParams {
        &self.params
    }

    pub fn curve(&self) -> &C {
        &self.curve
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Runs all rounds with a generator chosen by the seed policy of the parameters.
    pub fn run(&self, initial: Hexahedron) -> Result<Vec<Hexahedron>> {
        let mut rng = self.params.seed.rng();
        self.run_with_rng(initial, &mut rng)
    }

    /// Runs all rounds drawing noise from `rng`.
    pub fn run_with_rng<R: Rng>(&self, initial: Hexahedron, rng: &mut R) -> Result<Vec<Hexahedron>> {
        let mut run = self.start(initial, rng)?;
        while run.step()?.is_some() {}
        Ok(run.finish())
    }

    /// Prepares a run that advances one round per [`Run::step`].
    ///
    /// Fails with [`SubdivError::DegenerateInput`] if the initial cell has no volume.
    pub fn start<'a, R: Rng>(&'a self, initial: Hexahedron, rng: &'a mut R) -> Result<Run<'a, C, K, R>> {
        let max_volume = metric::volume(&self.kernel, &initial);
        let bounds = initial.bounds();
        let diagonal = point::distance(bounds.min(), bounds.max());
        if !(max_volume > DEGENERATE_VOLUME_RATIO * diagonal.powi(3)) {
            return Err(SubdivError::DegenerateInput { volume: max_volume });
        }
        info!(
            "starting subdivision: {} loops, initial volume {:.6}",
            self.params.loops, max_volume
        );
        Ok(Run {
            engine: self,
            rng,
            cells: vec![initial],
            max_volume,
            round: 0,
        })
    }

    /// Splits every cell whose noisy distance to the curve is below `subdiv_dist`.
    ///
    /// Returns the new working set and the number of cells that were split.
    pub fn subdivision_pass<R: Rng>(&self, cells: &[Hexahedron], rng: &mut R) -> Result<(Vec<Hexahedron>, usize)> {
        let noise = draw_noise(rng, cells.len(), self.params.subdiv_random_rate);
        let threshold = self.params.subdiv_dist;
        let tolerance = self.params.join_tolerance;

        let outcomes: Vec<Option<Vec<Hexahedron>>> = cells
            .par_iter()
            .zip(noise.par_iter())
            .map(|(cell, &n)| {
                let distance = metric::distance_to_curve(&self.kernel, cell, &self.curve);
                let adjusted = distance * n;
                if adjusted < threshold {
                    trace!("split: distance {:.6}, adjusted {:.6}", distance, adjusted);
                    subdivide(&self.kernel, cell, tolerance).map(Some)
                } else {
                    Ok(None)
                }
            })
            .collect::<Result<_>>()?;

        let subdivided = outcomes.iter().filter(|o| o.is_some()).count();
        let mut next = Vec::with_capacity(cells.len() + subdivided * 7);
        for (cell, outcome) in cells.iter().zip(outcomes) {
            match outcome {
                Some(children) => next.extend(children),
                None => next.push(cell.clone()),
            }
        }
        Ok((next, subdivided))
    }

    /// Keeps the cells whose noisy, volume-weighted distance exceeds `reduce_dist`.
    ///
    /// `max_volume` is the volume of the initial cell of the run.
    pub fn reduction_pass<R: Rng>(&self, cells: &[Hexahedron], max_volume: f64, rng: &mut R) -> Vec<Hexahedron> {
        let noise = draw_noise(rng, cells.len(), self.params.reduce_random_rate);
        let threshold = self.params.reduce_dist;
        let exponent = self.params.volume_exponent;

        cells
            .par_iter()
            .zip(noise.par_iter())
            .filter_map(|(cell, &n)| {
                let m = metric::measure(&self.kernel, cell, &self.curve);
                let adjusted = m.distance * n * volume_factor(m.volume, max_volume, exponent);
                if adjusted > threshold {
                    Some(cell.clone())
                } else {
                    trace!("discard: distance {:.6}, adjusted {:.6}", m.distance, adjusted);
                    None
                }
            })
            .collect()
    }
}

/// One multiplier per cell, uniform on `[1 - rate, 1]`.
fn draw_noise<R: Rng>(rng: &mut R, count: usize, rate: f64) -> Vec<f64> {
    (0..count)
        .map(|_| rng.gen_range(0.0..1.0) * rate + (1.0 - rate))
        .collect()
}

/// A run in progress.
///
/// Between calls to [`Run::step`] the active cells are always the complete result of the last
/// finished round, so a host may stop early and keep [`Run::cells`].
pub struct Run<'a, C: GuideCurve, K: GeometryKernel, R: Rng> {
    engine: &'a Subdivision<C, K>,
    rng: &'a mut R,
    cells: Vec<Hexahedron>,
    max_volume: f64,
    round: usize,
}

impl<'a, C: GuideCurve, K: GeometryKernel, R: Rng> Run<'a, C, K, R> {
    /// Performs the next round, or returns `None` once all rounds are done.
    ///
    /// On error the active cells are left as they were before the round.
    pub fn step(&mut self) -> Result<Option<RoundStats>> {
        if self.round >= self.engine.params.loops as usize {
            return Ok(None);
        }

        let input = self.cells.len();
        let (candidates, subdivided) = self.engine.subdivision_pass(&self.cells, &mut *self.rng)?;
        let survivors = self.engine.reduction_pass(&candidates, self.max_volume, &mut *self.rng);

        let stats = RoundStats {
            round: self.round,
            input,
            subdivided,
            candidates: candidates.len(),
            survivors: survivors.len(),
        };
        debug!(
            "round {}: {} cells, {} split, {} candidates, {} kept",
            stats.round, stats.input, stats.subdivided, stats.candidates, stats.survivors
        );
        if survivors.is_empty() {
            warn!("round {}: every cell was discarded", self.round);
        }

        self.cells = survivors;
        self.round += 1;
        Ok(Some(stats))
    }

    /// Number of completed rounds.
    pub fn round(&self) -> usize {
        self.round
    }

    /// Volume of the initial cell, the fixed baseline of the volume factor.
    pub fn max_volume(&self) -> f64 {
        self.max_volume
    }

    pub fn cells(&self) -> &[Hexahedron] {
        &self.cells
    }

    pub fn is_finished(&self) -> bool {
        self.round >= self.engine.params.loops as usize
    }

    pub fn finish(self) -> Vec<Hexahedron> {
        info!("subdivision finished after {} rounds with {} cells", self.round, self.cells.len());
        self.cells
    }
}
