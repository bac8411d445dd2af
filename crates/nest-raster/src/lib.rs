//! nest-raster - scanline conversion of polygon outlines into occupancy bitmaps

mod error;
mod outline;
mod rasterize;

pub use error::{RasterError, RasterResult};
pub use outline::Outline;
pub use rasterize::rasterize;
