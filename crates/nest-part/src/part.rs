//! Part - an outline plus its precomputed rotation fan
//!
//! A `Part` is immutable once loaded: the outline is rasterized once at
//! angle zero, and every other fan angle is produced by rotating that
//! bitmap (not by re-rasterizing the outline), per the engine's
//! gravity-center-preserving Rotator contract.

use crate::error::{PartError, PartResult};
use nest_core::Bitmap;
use nest_raster::Outline;
use std::f64::consts::TAU;

/// One angle in a part's rotation fan.
enum RotationSlot {
    /// The dilated bitmap fits the plate: both the spacing-dilated
    /// collision footprint and the part's own (non-dilated) footprint
    /// are retained — the placer collides against the former and blits
    /// the latter onto the plate on success.
    Fits {
        angle: f64,
        footprint: Bitmap,
        dilated: Bitmap,
    },
    /// The dilated bitmap exceeds the plate in some axis; excluded from
    /// the surface average and from placement consideration.
    DoesNotFit { angle: f64 },
}

impl RotationSlot {
    fn angle(&self) -> f64 {
        match self {
            RotationSlot::Fits { angle, .. } => *angle,
            RotationSlot::DoesNotFit { angle } => *angle,
        }
    }

    fn fits(&self) -> bool {
        matches!(self, RotationSlot::Fits { .. })
    }
}

/// An immutable part: original outline plus a precomputed rotation fan.
pub struct Part {
    outline: Outline,
    precision: f64,
    rotations: Vec<RotationSlot>,
    surface: f64,
    width: f64,
    height: f64,
}

impl Part {
    /// Load a part: rasterize at angle zero, derive every other fan
    /// angle by rotating that bitmap, dilate each by the spacing margin,
    /// and filter out rotations whose dilated size exceeds the plate.
    ///
    /// `angles` is the fan to precompute — see [`rotation_angles`] to
    /// build the standard `Δθ`- or 4-angle-default set.
    ///
    /// # Errors
    ///
    /// Returns [`PartError::NoFittingRotation`] if every angle is
    /// filtered out.
    pub fn load(
        outline: Outline,
        precision: f64,
        spacing: f64,
        angles: &[f64],
        plate_width_px: u32,
        plate_height_px: u32,
    ) -> PartResult<Part> {
        if !(precision > 0.0) {
            return Err(PartError::InvalidParameters(format!(
                "precision must be > 0, got {precision}"
            )));
        }
        if spacing < 0.0 {
            return Err(PartError::InvalidParameters(format!(
                "spacing must be >= 0, got {spacing}"
            )));
        }
        if outline.contour().len() < 3 {
            return Err(PartError::InvalidParameters(
                "contour must have at least 3 vertices".to_string(),
            ));
        }

        let base = nest_raster::rasterize(&outline, precision, 0)?;
        let spacing_px = (spacing / precision).ceil() as u32;

        let mut rotations = Vec::with_capacity(angles.len());
        for &angle in angles {
            let rotated = if angle == 0.0 {
                base.clone()
            } else {
                nest_transform::rotate(&base, angle)?
            };
            let footprint = trim(&rotated);

            // `footprint` is cropped to its tight occupied bounding box,
            // so it has no empty border for `dilate` to grow into. Pad it
            // by `spacing_px + 1` empty pixels on every side first — the
            // same `margin + 1` border the rasterizer itself builds in
            // before dilating — so the spacing margin actually gets
            // embedded into the collision footprint instead of being a
            // no-op on an already-full grid.
            let mut dilated = pad(&footprint, spacing_px + 1);
            if spacing_px > 0 {
                dilated.dilate(spacing_px);
            }

            let fits = dilated.width() <= plate_width_px && dilated.height() <= plate_height_px;
            rotations.push(if fits {
                RotationSlot::Fits {
                    angle,
                    footprint,
                    dilated,
                }
            } else {
                RotationSlot::DoesNotFit { angle }
            });
        }

        let fitting: Vec<&RotationSlot> = rotations.iter().filter(|r| r.fits()).collect();
        if fitting.is_empty() {
            return Err(PartError::NoFittingRotation);
        }

        let surface = fitting
            .iter()
            .map(|r| match r {
                RotationSlot::Fits { footprint, .. } => footprint.occupied_count() as f64,
                RotationSlot::DoesNotFit { .. } => unreachable!("filtered to Fits above"),
            })
            .sum::<f64>()
            / fitting.len() as f64;

        let (width, height) = match &rotations[0] {
            RotationSlot::Fits { dilated, .. } => {
                (dilated.width() as f64 * precision, dilated.height() as f64 * precision)
            }
            RotationSlot::DoesNotFit { .. } => {
                // angle 0 itself didn't fit; report the first fitting
                // rotation's nominal size instead.
                match fitting[0] {
                    RotationSlot::Fits { dilated, .. } => {
                        (dilated.width() as f64 * precision, dilated.height() as f64 * precision)
                    }
                    RotationSlot::DoesNotFit { .. } => unreachable!("filtered to Fits above"),
                }
            }
        };

        Ok(Part {
            outline,
            precision,
            rotations,
            surface,
            width,
            height,
        })
    }

    #[inline]
    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    #[inline]
    pub fn precision(&self) -> f64 {
        self.precision
    }

    /// Number of rotations in the fan (`K`), fitting or not.
    #[inline]
    pub fn num_rotations(&self) -> usize {
        self.rotations.len()
    }

    #[inline]
    pub fn angle(&self, k: usize) -> f64 {
        self.rotations[k].angle()
    }

    #[inline]
    pub fn fits(&self, k: usize) -> bool {
        self.rotations[k].fits()
    }

    /// The spacing-dilated collision footprint for rotation `k`, or
    /// `None` if that rotation does not fit the plate.
    pub fn dilated_bitmap(&self, k: usize) -> Option<&Bitmap> {
        match &self.rotations[k] {
            RotationSlot::Fits { dilated, .. } => Some(dilated),
            RotationSlot::DoesNotFit { .. } => None,
        }
    }

    /// The part's own (non-dilated) footprint for rotation `k`, used for
    /// the post-placement blit. `None` if that rotation does not fit.
    pub fn footprint(&self, k: usize) -> Option<&Bitmap> {
        match &self.rotations[k] {
            RotationSlot::Fits { footprint, .. } => Some(footprint),
            RotationSlot::DoesNotFit { .. } => None,
        }
    }

    /// Fraction of the footprint's bounding box that is occupied, for
    /// rotation `k`. `0.0` if that rotation does not fit.
    pub fn density(&self, k: usize) -> f64 {
        match self.footprint(k) {
            Some(bmp) => {
                let area = (bmp.width() as f64) * (bmp.height() as f64);
                if area > 0.0 {
                    bmp.occupied_count() as f64 / area
                } else {
                    0.0
                }
            }
            None => 0.0,
        }
    }

    /// Mean occupied-pixel count across fitting rotations.
    #[inline]
    pub fn surface(&self) -> f64 {
        self.surface
    }

    /// Bounding width, in model units, including spacing padding.
    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Bounding height, in model units, including spacing padding.
    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }
}

/// Build the standard fan of fan angles: `K = ceil(2*pi / delta_theta)`
/// evenly spaced angles when rotations are allowed, or the single angle
/// zero when they are not (`K = 1` regardless of `delta_theta`).
pub fn rotation_angles(delta_theta: f64, allow_rotations: bool) -> Vec<f64> {
    if !allow_rotations {
        return vec![0.0];
    }
    let k = (TAU / delta_theta).ceil() as u32;
    (0..k).map(|i| i as f64 * delta_theta).collect()
}

/// Crop a bitmap to the minimal bounding box containing its occupied
/// pixels, re-anchoring the gravity center so it keeps marking the same
/// material point. A bitmap with no occupied pixels at all is returned
/// unchanged (there is nothing to trim to).
fn trim(src: &Bitmap) -> Bitmap {
    let (w, h) = (src.width() as i32, src.height() as i32);
    let mut min_x = w;
    let mut min_y = h;
    let mut max_x = -1;
    let mut max_y = -1;

    for y in 0..h {
        for x in 0..w {
            if src.get(x, y) {
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
            }
        }
    }

    if max_x < min_x || max_y < min_y {
        return src.clone();
    }

    let new_w = (max_x - min_x + 1) as u32;
    let new_h = (max_y - min_y + 1) as u32;
    let mut dst = Bitmap::new(new_w, new_h).expect("trimmed bbox is always non-empty");

    for y in 0..new_h as i32 {
        for x in 0..new_w as i32 {
            if src.get(x + min_x, y + min_y) {
                dst.set(x, y, true);
            }
        }
    }

    let (old_cx, old_cy) = src.center();
    dst.set_center(old_cx - min_x, old_cy - min_y);
    dst
}

/// Grow a bitmap's canvas by `n` empty pixels on every side, re-anchoring
/// the gravity center so it keeps marking the same material point.
/// Unlike [`Bitmap::dilate`], which only ever fills pixels already inside
/// the grid, this actually gives later dilation room to expand into.
fn pad(src: &Bitmap, n: u32) -> Bitmap {
    let n_i = n as i32;
    let new_w = src.width() + 2 * n;
    let new_h = src.height() + 2 * n;
    let mut dst = Bitmap::new(new_w, new_h).expect("padded dimensions are always positive");

    for y in 0..src.height() as i32 {
        for x in 0..src.width() as i32 {
            if src.get(x, y) {
                dst.set(x + n_i, y + n_i, true);
            }
        }
    }

    let (old_cx, old_cy) = src.center();
    dst.set_center(old_cx + n_i, old_cy + n_i);
    dst
}
