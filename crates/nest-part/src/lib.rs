//! nest-part - a part's outline plus its precomputed rotation fan of bitmaps

mod error;
mod part;

pub use error::{PartError, PartResult};
pub use part::{Part, rotation_angles};
