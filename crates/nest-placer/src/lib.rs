//! nest-placer - plate construction and spiral-search part placement

mod bed;
mod error;
mod placer;

pub use bed::Bed;
pub use error::{PlacerError, PlacerResult};
pub use placer::{search, SearchOutcome};
