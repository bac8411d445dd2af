//! nest - 2D bitmap-based nesting engine
//!
//! Given a set of 2D part outlines (possibly with holes) and a build-plate
//! shape, computes a translation and rotation for each part so that parts
//! do not mutually overlap, do not leave the plate, and respect a
//! user-specified spacing margin.
//!
//! # Example
//!
//! ```
//! use nest::{ArrangeParams, ArrangeRequest, Arranger, Bed, Item, Outline};
//!
//! let square = Outline::without_holes(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
//! let items = vec![Item { outline: square, priority: 0 }];
//! let bed = Bed::Rectangle { width: 100.0, height: 100.0 };
//! let response = Arranger::run(ArrangeRequest::new(items, bed, ArrangeParams::default())).unwrap();
//! assert!(response.per_item[0].placed);
//! ```

pub use nest_core::{Bitmap, Error as CoreError};
pub use nest_raster::{rasterize, Outline, RasterError};
pub use nest_transform::{rotate, TransformError};
pub use nest_part::{rotation_angles, Part, PartError};
pub use nest_placer::{search, Bed, PlacerError, SearchOutcome};
pub use nest_arrange::{
    ArrangeParams, ArrangeRequest, ArrangeResponse, Arranger, EngineError, Item, OnPacked,
    PlacementRecord, Progress, SortMode, DEFAULT_UNPLACED_PENALTY, UNARRANGED,
};
