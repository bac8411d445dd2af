//! Scanline rasterization: outline → [`Bitmap`]
//!
//! Standard even-odd scanline fill. For each pixel row, intersections
//! with contour edges are collected using the half-open `p1.y <= y <
//! p2.y` convention (so a vertex lying exactly on the scanline is never
//! double-counted), sorted, and filled pairwise. Holes are rasterized
//! the same way and cleared on the same grid.

use crate::error::{RasterError, RasterResult};
use crate::outline::Outline;
use nest_core::Bitmap;

/// Rasterize `outline` at `precision` model units per pixel, with a
/// uniform `margin` pixel border reserved for later dilation.
///
/// The returned bitmap's gravity center is the pixel coordinate of the
/// outline's axis-aligned bounding-box center. A contour with fewer
/// than 3 vertices produces an all-zero bitmap of the same allocated
/// size (no error — callers validate vertex counts upstream).
pub fn rasterize(outline: &Outline, precision: f64, margin: u32) -> RasterResult<Bitmap> {
    if !(precision > 0.0) {
        return Err(RasterError::InvalidPrecision(precision));
    }

    let (min_x, min_y, max_x, max_y) = outline.bounds().unwrap_or((0.0, 0.0, 0.0, 0.0));
    let bbox_w = max_x - min_x;
    let bbox_h = max_y - min_y;
    let margin_i = margin as i32;

    let width = (bbox_w / precision).ceil() as i64 + 2 + 2 * margin as i64;
    let height = (bbox_h / precision).ceil() as i64 + 2 + 2 * margin as i64;
    let width = width.max(1) as u32;
    let height = height.max(1) as u32;

    let mut bmp = Bitmap::new(width, height)?;

    let raster_offset = 1 + margin_i;
    let cx = ((bbox_w / 2.0) / precision).floor() as i32 + raster_offset;
    let cy = ((bbox_h / 2.0) / precision).floor() as i32 + raster_offset;
    bmp.set_center(cx, cy);

    if outline.contour().len() < 3 {
        return Ok(bmp);
    }

    let base_height = (bbox_h / precision).ceil() as i32;

    scan_fill(
        &mut bmp,
        outline.contour(),
        min_x,
        min_y,
        precision,
        raster_offset,
        width as i32,
        base_height,
        true,
    );

    for hole in outline.holes() {
        if hole.len() < 3 {
            continue;
        }
        scan_fill(
            &mut bmp, hole, min_x, min_y, precision, raster_offset, width as i32, base_height,
            false,
        );
    }

    if margin > 0 {
        bmp.dilate(margin);
    }

    Ok(bmp)
}

/// Fill (or clear) the pixel rows covered by `points`, one scanline at a
/// time, using even-odd edge-crossing intersections.
#[allow(clippy::too_many_arguments)]
fn scan_fill(
    bmp: &mut Bitmap,
    points: &[(f64, f64)],
    min_x: f64,
    min_y: f64,
    precision: f64,
    raster_offset: i32,
    width: i32,
    base_height: i32,
    value: bool,
) {
    let n = points.len();
    let mut intersections = Vec::new();

    for py in 0..base_height {
        let scan_y = min_y + py as f64 * precision;
        intersections.clear();

        for i in 0..n {
            let (x1, y1) = points[i];
            let (x2, y2) = points[(i + 1) % n];

            let crosses = (y1 <= scan_y && y2 > scan_y) || (y2 <= scan_y && y1 > scan_y);
            if crosses {
                let t = (scan_y - y1) / (y2 - y1);
                intersections.push(x1 + t * (x2 - x1));
            }
        }

        intersections.sort_by(|a, b| a.partial_cmp(b).unwrap());

        let mut i = 0;
        while i + 1 < intersections.len() {
            let x_start = ((intersections[i] - min_x) / precision).floor() as i32 + raster_offset;
            let x_end = ((intersections[i + 1] - min_x) / precision).floor() as i32 + raster_offset;
            let x_start = x_start.clamp(0, width - 1);
            let x_end = x_end.clamp(0, width - 1);
            for px in x_start..=x_end {
                bmp.set(px, py + raster_offset, value);
            }
            i += 2;
        }
    }
}
