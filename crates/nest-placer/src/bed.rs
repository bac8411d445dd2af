//! Bed shape and plate construction
//!
//! The plate is a single mutable [`Bitmap`] sized from the bed descriptor
//! and a rasterization precision. Circular beds pre-mark every pixel
//! outside the inscribed disk as occupied, so the placer's ordinary
//! collision test also rejects poses that would leak off a round plate.

use crate::error::{PlacerError, PlacerResult};
use nest_core::Bitmap;

/// Build-plate shape, in model units (millimeters).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bed {
    Rectangle { width: f64, height: f64 },
    Circle { diameter: f64 },
}

impl Bed {
    /// Pixel dimensions at the given precision (model units per pixel).
    pub fn pixel_dims(&self, precision: f64) -> (u32, u32) {
        match *self {
            Bed::Rectangle { width, height } => (
                (width / precision).ceil() as u32,
                (height / precision).ceil() as u32,
            ),
            Bed::Circle { diameter } => {
                let d = (diameter / precision).ceil() as u32;
                (d, d)
            }
        }
    }

    /// Build a fresh plate bitmap for this bed at the given precision.
    ///
    /// # Errors
    ///
    /// Returns [`PlacerError::InvalidDimension`] if the bed has a
    /// non-positive width, height, or diameter.
    pub fn build_plate(&self, precision: f64) -> PlacerResult<Bitmap> {
        match *self {
            Bed::Rectangle { width, height } => {
                if width <= 0.0 || height <= 0.0 {
                    return Err(PlacerError::InvalidDimension(format!(
                        "rectangle bed must have positive width/height, got {width}x{height}"
                    )));
                }
            }
            Bed::Circle { diameter } => {
                if diameter <= 0.0 {
                    return Err(PlacerError::InvalidDimension(format!(
                        "circular bed must have positive diameter, got {diameter}"
                    )));
                }
            }
        }

        let (w, h) = self.pixel_dims(precision);
        let mut plate = Bitmap::new(w, h)?;

        if let Bed::Circle { .. } = self {
            mark_exterior_of_disk(&mut plate);
        }

        Ok(plate)
    }
}

/// Pre-occupy every pixel outside the disk inscribed in the plate's
/// bounding square, so collision tests double as a containment check.
fn mark_exterior_of_disk(plate: &mut Bitmap) {
    let w = plate.width() as i32;
    let h = plate.height() as i32;
    let (cx, cy) = plate.center();
    let radius = (w.min(h) as f64) / 2.0;
    let radius_sq = radius * radius;

    for y in 0..h {
        for x in 0..w {
            let dx = (x - cx) as f64;
            let dy = (y - cy) as f64;
            if dx * dx + dy * dy > radius_sq {
                plate.set(x, y, true);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangle_plate_starts_empty() {
        let bed = Bed::Rectangle {
            width: 100.0,
            height: 50.0,
        };
        let plate = bed.build_plate(0.5).unwrap();
        assert_eq!((plate.width(), plate.height()), (200, 100));
        assert_eq!(plate.occupied_count(), 0);
    }

    #[test]
    fn circle_plate_excludes_corners() {
        let bed = Bed::Circle { diameter: 20.0 };
        let plate = bed.build_plate(1.0).unwrap();
        // the exact corner of the bounding square is always outside the
        // inscribed disk
        assert!(plate.get(0, 0));
        let (cx, cy) = plate.center();
        assert!(!plate.get(cx, cy), "plate center is inside the disk");
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        assert!(
            Bed::Rectangle {
                width: 0.0,
                height: 10.0
            }
            .build_plate(1.0)
            .is_err()
        );
        assert!(Bed::Circle { diameter: -1.0 }.build_plate(1.0).is_err());
    }
}
