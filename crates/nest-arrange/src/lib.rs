//! nest-arrange - greedy arrangement driver: ordering, placement, scoring,
//! and optional multi-attempt orchestration.

mod arranger;
mod error;
mod ordering;
mod scoring;
mod types;

pub use arranger::Arranger;
pub use error::{EngineError, EngineResult};
pub use nest_placer::Bed;
pub use types::{
    ArrangeParams, ArrangeRequest, ArrangeResponse, Item, OnPacked, PlacementRecord, Progress,
    SortMode, DEFAULT_UNPLACED_PENALTY, UNARRANGED,
};
