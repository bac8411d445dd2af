//! Public request/response shapes for the arrangement engine.

use nest_placer::Bed;
use nest_raster::Outline;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::error::{EngineError, EngineResult};

/// Reserved `bed_idx` value for an item that could not be placed.
pub const UNARRANGED: i32 = -1;

/// Default `UNPLACED_PENALTY`: large enough to dominate any realistic
/// bounding-box term, matching the source's literal `1_000_000`.
pub const DEFAULT_UNPLACED_PENALTY: f64 = 1.0e6;

/// One input item: an outline plus its placement priority.
#[derive(Debug, Clone)]
pub struct Item {
    pub outline: Outline,
    pub priority: i32,
}

/// Whether the Arranger runs a single deterministic pass or several
/// independently-scored attempts under different orderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    Single,
    Multiple,
}

/// Tunables controlling rasterization precision, spacing, the rotation
/// fan, search step, and (optional) multi-attempt orchestration.
#[derive(Debug, Clone)]
pub struct ArrangeParams {
    /// Model units per pixel.
    pub precision_mm: f64,
    /// Minimum clearance between placed items, in model units.
    pub spacing_mm: f64,
    /// Brute-force spiral-search step, in model units (`δ`).
    pub delta_mm: f64,
    /// Rotation fan step, in radians (`Δθ`).
    pub delta_r_rad: f64,
    pub allow_rotations: bool,
    pub sort_mode: SortMode,
    /// Number of independently-ordered attempts when `sort_mode =
    /// Multiple`. Ignored for `Single`.
    pub random_iterations: u32,
    /// Worker count for `Multiple` mode. `0` means "available hardware
    /// parallelism" (left to rayon's default pool sizing).
    pub thread_count: usize,
    /// Overridable `UNPLACED_PENALTY` term of the score.
    pub unplaced_penalty: f64,
    /// If true, a part with zero usable rotations aborts the whole call
    /// (`EngineError::PartDoesNotFit`) instead of being recorded as an
    /// unarranged per-item result.
    pub strict: bool,
    /// Seed for the randomized sort criterion in `Multiple` mode, for
    /// reproducibility across runs.
    pub seed: u64,
}

impl ArrangeParams {
    /// Validate parameters before any part is loaded. Malformed inputs
    /// are rejected synchronously and produce no placements.
    pub fn validate(&self) -> EngineResult<()> {
        if !(self.precision_mm > 0.0) {
            return Err(EngineError::InvalidInput(format!(
                "precision_mm must be > 0, got {}",
                self.precision_mm
            )));
        }
        if self.spacing_mm < 0.0 {
            return Err(EngineError::InvalidInput(format!(
                "spacing_mm must be >= 0, got {}",
                self.spacing_mm
            )));
        }
        if !(self.delta_mm > 0.0) {
            return Err(EngineError::InvalidInput(format!(
                "delta_mm must be > 0, got {}",
                self.delta_mm
            )));
        }
        if self.allow_rotations && !(self.delta_r_rad > 0.0) {
            return Err(EngineError::InvalidInput(format!(
                "delta_r_rad must be > 0 when allow_rotations is set, got {}",
                self.delta_r_rad
            )));
        }
        Ok(())
    }
}

impl Default for ArrangeParams {
    fn default() -> Self {
        Self {
            precision_mm: 0.5,
            spacing_mm: 1.0,
            delta_mm: 1.0,
            delta_r_rad: std::f64::consts::FRAC_PI_2,
            allow_rotations: true,
            sort_mode: SortMode::Single,
            random_iterations: 1,
            thread_count: 0,
            unplaced_penalty: DEFAULT_UNPLACED_PENALTY,
            strict: false,
            seed: 0,
        }
    }
}

/// Per-item outcome of an arrangement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRecord {
    pub placed: bool,
    pub translation: (f64, f64),
    pub rotation_rad: f64,
    pub bed_idx: i32,
}

impl PlacementRecord {
    pub(crate) fn unarranged() -> Self {
        Self {
            placed: false,
            translation: (0.0, 0.0),
            rotation_rad: 0.0,
            bed_idx: UNARRANGED,
        }
    }
}

/// Callback invoked from the Arranger after each successful commit.
/// Must be thread-safe if multi-attempt parallelism is enabled.
pub type OnPacked = Box<dyn Fn(&PlacementRecord) + Send + Sync>;

/// Callback invoked between attempts with overall progress.
pub type Progress = Box<dyn Fn(f64, &str) + Send + Sync>;

/// A full arrangement request.
pub struct ArrangeRequest {
    pub items: Vec<Item>,
    pub bed: Bed,
    pub params: ArrangeParams,
    pub on_packed: Option<OnPacked>,
    pub progress: Option<Progress>,
    pub cancel: Option<Arc<AtomicBool>>,
}

impl ArrangeRequest {
    pub fn new(items: Vec<Item>, bed: Bed, params: ArrangeParams) -> Self {
        Self {
            items,
            bed,
            params,
            on_packed: None,
            progress: None,
            cancel: None,
        }
    }
}

/// Result of an arrangement call.
#[derive(Debug, Clone)]
pub struct ArrangeResponse {
    pub per_item: Vec<PlacementRecord>,
    pub score: f64,
    pub cancelled: bool,
}
