//! Polygon-with-holes outline, in model units (millimeters).

/// A part or bed outline: a contour plus zero or more interior holes.
///
/// Points are `(x, y)` pairs in model units. The contour is assumed
/// simple (non-self-intersecting); the rasterizer does not validate
/// this.
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    contour: Vec<(f64, f64)>,
    holes: Vec<Vec<(f64, f64)>>,
}

impl Outline {
    pub fn new(contour: Vec<(f64, f64)>, holes: Vec<Vec<(f64, f64)>>) -> Self {
        Self { contour, holes }
    }

    /// A hole-free outline.
    pub fn without_holes(contour: Vec<(f64, f64)>) -> Self {
        Self {
            contour,
            holes: Vec::new(),
        }
    }

    #[inline]
    pub fn contour(&self) -> &[(f64, f64)] {
        &self.contour
    }

    #[inline]
    pub fn holes(&self) -> &[Vec<(f64, f64)>] {
        &self.holes
    }

    /// Axis-aligned bounding box of the contour: `(min_x, min_y, max_x, max_y)`.
    /// `None` if the contour has no points.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut points = self.contour.iter();
        let &(x0, y0) = points.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (x0, y0, x0, y0);
        for &(x, y) in points {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        Some((min_x, min_y, max_x, max_y))
    }

    /// Signed shoelace area of the contour (positive for counter-clockwise
    /// winding). Used as a sort-key magnitude (`|area|`), not for fill
    /// rules — rasterization uses even-odd scanline fill independent of
    /// winding direction.
    pub fn area(&self) -> f64 {
        signed_area(&self.contour)
    }
}

pub(crate) fn signed_area(points: &[(f64, f64)]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let n = points.len();
    let mut sum = 0.0;
    for i in 0..n {
        let (x0, y0) = points[i];
        let (x1, y1) = points[(i + 1) % n];
        sum += x0 * y1 - x1 * y0;
    }
    sum * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_of_square() {
        let outline = Outline::without_holes(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        assert_eq!(outline.bounds(), Some((0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn area_of_ccw_square_is_positive() {
        let outline = Outline::without_holes(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        assert!((outline.area() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn empty_outline_has_no_bounds() {
        let outline = Outline::without_holes(vec![]);
        assert_eq!(outline.bounds(), None);
    }
}
