//! Spiral search placement
//!
//! Finds the first pose, in a deterministic center-out ring order, where
//! some rotation of a part's dilated footprint does not overlap whatever
//! is already occupied on the plate. Grounded directly on the ring/rotate
//! search loop of the bitmap-arrangement original: for increasing ring
//! radius, rotations are tried in fan order, and within a ring, offsets
//! are visited with `dy` ascending outer and `dx` ascending inner,
//! restricted to the strict ring membership `max(|dx|, |dy|) == r`.

use nest_core::Bitmap;
use nest_part::Part;
use std::sync::atomic::{AtomicBool, Ordering};

/// Outcome of a placement search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A pose was found: rotation index, and the plate-space origin (the
    /// coordinate the dilated bitmap's own local `(0,0)` maps to) at
    /// which the part's dilated footprint does not overlap the plate.
    Found { rotation: usize, x: i32, y: i32 },
    /// Every ring up to the plate's own half-diagonal was exhausted with
    /// no non-overlapping pose for any rotation.
    NotFound,
    /// The search was cancelled before it could finish.
    Cancelled,
}

/// Search the plate for the first non-overlapping pose of `part`,
/// spiraling outward from the plate's center in steps of `step_pixels`.
///
/// For each ring, rotations are tried in fan order; each rotation's
/// candidate origin is anchored so that its own gravity center lands at
/// the plate's center, matching the original's center-aligned search.
///
/// Cancellation is polled once per ring, matching the original's
/// coarser-than-per-pixel cancellation granularity.
pub fn search(
    plate: &Bitmap,
    part: &Part,
    step_pixels: u32,
    cancel: Option<&AtomicBool>,
) -> SearchOutcome {
    let step = step_pixels.max(1) as i32;
    let (plate_cx, plate_cy) = plate.center();
    let max_radius = (plate.width().max(plate.height()) as i32) + step;

    let mut r = 0;
    while r <= max_radius {
        if let Some(flag) = cancel {
            if flag.load(Ordering::Relaxed) {
                return SearchOutcome::Cancelled;
            }
        }

        for k in 0..part.num_rotations() {
            let Some(dilated) = part.dilated_bitmap(k) else {
                continue;
            };
            let (dcx, dcy) = dilated.center();
            let cx0 = plate_cx - dcx;
            let cy0 = plate_cy - dcy;

            for (dx, dy) in ring_offsets(r, step) {
                let x = cx0 + dx;
                let y = cy0 + dy;
                if !pose_fits_on_plate(plate, dilated, x, y) {
                    continue;
                }
                if !dilated.overlaps(plate, x, y) {
                    return SearchOutcome::Found { rotation: k, x, y };
                }
            }
        }

        r += step;
    }

    SearchOutcome::NotFound
}

/// Reject a pose outright if the dilated footprint's bounding box would
/// fall even partially outside the plate bitmap. `(x, y)` is the
/// plate-space origin of the dilated bitmap's own local `(0,0)`.
fn pose_fits_on_plate(plate: &Bitmap, dilated: &Bitmap, x: i32, y: i32) -> bool {
    let max_x = x + dilated.width() as i32 - 1;
    let max_y = y + dilated.height() as i32 - 1;
    x >= 0 && y >= 0 && max_x < plate.width() as i32 && max_y < plate.height() as i32
}

/// Offsets `(dx, dy)` belonging strictly to ring `r` (i.e. with
/// `max(|dx|, |dy|) == r`), in `dy`-outer-ascending, `dx`-inner-ascending
/// order. Ring zero is the single center point.
fn ring_offsets(r: i32, step: i32) -> Vec<(i32, i32)> {
    if r == 0 {
        return vec![(0, 0)];
    }

    let mut offsets = Vec::new();
    let mut dy = -r;
    while dy <= r {
        let mut dx = -r;
        while dx <= r {
            if dx.abs().max(dy.abs()) == r {
                offsets.push((dx, dy));
            }
            dx += step;
        }
        dy += step;
    }
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;
    use nest_raster::Outline;

    fn square_part(side: f64, plate_px: u32) -> Part {
        let outline =
            Outline::without_holes(vec![(0.0, 0.0), (side, 0.0), (side, side), (0.0, side)]);
        let angles = vec![0.0];
        Part::load(outline, 1.0, 0.0, &angles, plate_px, plate_px).unwrap()
    }

    #[test]
    fn places_first_part_near_plate_center() {
        let plate = Bitmap::new(100, 100).unwrap();
        let part = square_part(10.0, 100);

        let outcome = search(&plate, &part, 1, None);
        match outcome {
            SearchOutcome::Found { rotation, x, y } => {
                assert_eq!(rotation, 0);
                let dilated = part.dilated_bitmap(rotation).unwrap();
                let (pcx, pcy) = plate.center();
                let (dcx, dcy) = dilated.center();
                // the placed center should be close to the plate's own
                // center, not clear across the plate
                assert!((x + dcx - pcx).abs() <= 10);
                assert!((y + dcy - pcy).abs() <= 10);
            }
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[test]
    fn second_part_avoids_first_placement() {
        let mut plate = Bitmap::new(100, 100).unwrap();
        let part = square_part(10.0, 100);

        let first = search(&plate, &part, 1, None);
        let SearchOutcome::Found { rotation, x, y } = first else {
            panic!("expected first part to place");
        };
        let dilated = part.dilated_bitmap(rotation).unwrap();
        plate.write(dilated, x, y);

        let second = search(&plate, &part, 1, None);
        match second {
            SearchOutcome::Found { x: x2, y: y2, .. } => {
                assert!(x2 != x || y2 != y);
                assert!(!dilated.overlaps(&plate, x2, y2));
            }
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[test]
    fn reports_not_found_on_a_full_plate() {
        let mut plate = Bitmap::new(20, 20).unwrap();
        for y in 0..20 {
            for x in 0..20 {
                plate.set(x, y, true);
            }
        }
        let part = square_part(5.0, 20);
        assert_eq!(search(&plate, &part, 1, None), SearchOutcome::NotFound);
    }

    #[test]
    fn cancellation_is_observed() {
        let plate = Bitmap::new(50, 50).unwrap();
        let part = square_part(5.0, 50);
        let flag = AtomicBool::new(true);
        assert_eq!(
            search(&plate, &part, 1, Some(&flag)),
            SearchOutcome::Cancelled
        );
    }

    #[test]
    fn ring_zero_is_only_center() {
        assert_eq!(ring_offsets(0, 1), vec![(0, 0)]);
    }

    #[test]
    fn ring_one_has_eight_neighbors() {
        let offsets = ring_offsets(1, 1);
        assert_eq!(offsets.len(), 8);
        assert!(offsets.iter().all(|&(dx, dy)| dx.abs().max(dy.abs()) == 1));
    }
}
