use crate::error::{Result, SubdivError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Deserializer, Serialize};

/// Weld tolerance used when joining the faces of a child cell.
pub const DEFAULT_JOIN_TOLERANCE: f64 = 0.01;
/// Exponent of the volume factor `(volume / max_volume) ^ exponent`.
pub const DEFAULT_VOLUME_EXPONENT: f64 = 0.2;

/// How the random source of a run is seeded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedPolicy {
    /// A fresh generator seeded from entropy on every run. Runs are not reproducible.
    #[default]
    Entropy,
    /// A generator seeded with the given value. Runs with equal parameters give equal results.
    Fixed(u64),
}

impl SeedPolicy {
    pub fn rng(&self) -> StdRng {
        match *self {
            SeedPolicy::Entropy => StdRng::seed_from_u64(get_seed()),
            SeedPolicy::Fixed(seed) => StdRng::seed_from_u64(seed),
        }
    }
}

fn get_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Math::random() * 4294967296.0) as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        rand::random()
    }
}

/// Parameters of a subdivide/reduce run.
///
/// Each round, a cell is split when `distance * noise < subdiv_dist` and kept afterwards when
/// `distance * noise * volume_factor > reduce_dist`. The noise multipliers are uniform on
/// `[1 - rate, 1]` for the respective random rate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubdivisionParams {
    pub subdiv_dist: f64,
    pub subdiv_random_rate: f64,
    /// `null` in JSON stands for negative infinity, which keeps every cell.
    #[serde(deserialize_with = "null_as_neg_infinity")]
    pub reduce_dist: f64,
    pub reduce_random_rate: f64,
    pub loops: u32,
    pub join_tolerance: f64,
    pub volume_exponent: f64,
    pub seed: SeedPolicy,
}

impl Default for SubdivisionParams {
    fn default() -> Self {
        Self {
            subdiv_dist: 0.0,
            subdiv_random_rate: 0.0,
            reduce_dist: f64::NEG_INFINITY,
            reduce_random_rate: 0.0,
            loops: 0,
            join_tolerance: DEFAULT_JOIN_TOLERANCE,
            volume_exponent: DEFAULT_VOLUME_EXPONENT,
            seed: SeedPolicy::Entropy,
        }
    }
}

impl SubdivisionParams {
    pub fn new(
        subdiv_dist: f64,
        subdiv_random_rate: f64,
        reduce_dist: f64,
        reduce_random_rate: f64,
        loops: u32,
    ) -> Self {
        Self {
            subdiv_dist,
            subdiv_random_rate,
            reduce_dist,
            reduce_random_rate,
            loops,
            ..Self::default()
        }
    }

    /// Like [`SubdivisionParams::new`] for hosts that carry the loop count as a signed integer.
    pub fn with_signed_loops(
        subdiv_dist: f64,
        subdiv_random_rate: f64,
        reduce_dist: f64,
        reduce_random_rate: f64,
        loops: i64,
    ) -> Result<Self> {
        let loops = u32::try_from(loops).map_err(|_| SubdivError::InvalidRange {
            name: "loops",
            value: loops as f64,
        })?;
        let params = Self::new(subdiv_dist, subdiv_random_rate, reduce_dist, reduce_random_rate, loops);
        params.validate()?;
        Ok(params)
    }

    pub fn seeded(mut self, seed: u64) -> Self {
        self.seed = SeedPolicy::Fixed(seed);
        self
    }

    pub fn unseeded(mut self) -> Self {
        self.seed = SeedPolicy::Entropy;
        self
    }

    pub fn join_tolerance(mut self, tolerance: f64) -> Self {
        self.join_tolerance = tolerance;
        self
    }

    /// Checks every parameter against its admissible range.
    pub fn validate(&self) -> Result<()> {
        check_rate("subdiv_random_rate", self.subdiv_random_rate)?;
        check_rate("reduce_random_rate", self.reduce_random_rate)?;
        if self.subdiv_dist.is_nan() {
            return Err(SubdivError::InvalidRange { name: "subdiv_dist", value: self.subdiv_dist });
        }
        if self.reduce_dist.is_nan() {
            return Err(SubdivError::InvalidRange { name: "reduce_dist", value: self.reduce_dist });
        }
        if !(self.join_tolerance > 0.0) || !self.join_tolerance.is_finite() {
            return Err(SubdivError::InvalidRange { name: "join_tolerance", value: self.join_tolerance });
        }
        if !self.volume_exponent.is_finite() {
            return Err(SubdivError::InvalidRange { name: "volume_exponent", value: self.volume_exponent });
        }
        Ok(())
    }
}

// JSON has no infinities; serde_json writes them as `null`.
fn null_as_neg_infinity<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NEG_INFINITY))
}

fn check_rate(name: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SubdivError::InvalidRange { name, value })
    }
}
