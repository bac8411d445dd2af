//! Item ordering for a single arrangement pass.
//!
//! Default order is `(priority desc, |area| desc)`, stable on ties, per
//! the single-pass driver. Multi-attempt mode additionally permutes the
//! sort criterion across attempts (area desc, area asc, perimeter desc,
//! a seeded random shuffle), scoring each attempt independently.

use crate::types::Item;
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};

/// A sort criterion producing one ordering of item indices.
#[derive(Debug, Clone, Copy)]
pub enum SortCriterion {
    /// `(priority desc, |area| desc)` — the default, deterministic order.
    PriorityAreaDesc,
    AreaDesc,
    AreaAsc,
    PerimeterDesc,
    Random(u64),
}

/// Order item indices `0..items.len()` according to `criterion`.
pub fn order_indices(items: &[Item], criterion: SortCriterion) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..items.len()).collect();
    match criterion {
        SortCriterion::PriorityAreaDesc => {
            idx.sort_by(|&a, &b| {
                let pa = items[a].priority;
                let pb = items[b].priority;
                pb.cmp(&pa).then_with(|| {
                    let aa = items[a].outline.area().abs();
                    let ab = items[b].outline.area().abs();
                    ab.partial_cmp(&aa).unwrap_or(std::cmp::Ordering::Equal)
                })
            });
        }
        SortCriterion::AreaDesc => {
            idx.sort_by(|&a, &b| {
                let aa = items[a].outline.area().abs();
                let ab = items[b].outline.area().abs();
                ab.partial_cmp(&aa).unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        SortCriterion::AreaAsc => {
            idx.sort_by(|&a, &b| {
                let aa = items[a].outline.area().abs();
                let ab = items[b].outline.area().abs();
                aa.partial_cmp(&ab).unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        SortCriterion::PerimeterDesc => {
            idx.sort_by(|&a, &b| {
                let pa = perimeter(items[a].outline.contour());
                let pb = perimeter(items[b].outline.contour());
                pb.partial_cmp(&pa).unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        SortCriterion::Random(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            idx.shuffle(&mut rng);
        }
    }
    idx
}

fn perimeter(points: &[(f64, f64)]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let n = points.len();
    (0..n)
        .map(|i| {
            let (x0, y0) = points[i];
            let (x1, y1) = points[(i + 1) % n];
            ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt()
        })
        .sum()
}

/// Build the sequence of criteria tried across `attempts` independent
/// passes. The first attempt always uses the deterministic default
/// order; later attempts cycle through the remaining criteria, each
/// random attempt advancing the seed so repeated runs stay reproducible.
pub fn attempt_criteria(attempts: u32, seed: u64) -> Vec<SortCriterion> {
    let variants = [
        SortCriterion::PriorityAreaDesc,
        SortCriterion::AreaDesc,
        SortCriterion::AreaAsc,
        SortCriterion::PerimeterDesc,
    ];
    (0..attempts.max(1))
        .map(|i| {
            if i == 0 {
                SortCriterion::PriorityAreaDesc
            } else {
                let cycle = (i as usize - 1) % (variants.len() + 1);
                if cycle < variants.len() {
                    variants[cycle]
                } else {
                    SortCriterion::Random(seed.wrapping_add(i as u64))
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nest_raster::Outline;

    fn item(priority: i32, side: f64) -> Item {
        Item {
            outline: Outline::without_holes(vec![
                (0.0, 0.0),
                (side, 0.0),
                (side, side),
                (0.0, side),
            ]),
            priority,
        }
    }

    #[test]
    fn priority_dominates_area() {
        let items = vec![item(0, 50.0), item(10, 10.0)];
        let order = order_indices(&items, SortCriterion::PriorityAreaDesc);
        assert_eq!(order, vec![1, 0]);
    }

    #[test]
    fn area_desc_orders_by_size() {
        let items = vec![item(0, 5.0), item(0, 50.0), item(0, 20.0)];
        let order = order_indices(&items, SortCriterion::AreaDesc);
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn random_shuffle_is_seed_deterministic() {
        let items = vec![item(0, 5.0), item(0, 6.0), item(0, 7.0), item(0, 8.0)];
        let a = order_indices(&items, SortCriterion::Random(42));
        let b = order_indices(&items, SortCriterion::Random(42));
        assert_eq!(a, b);
    }

    #[test]
    fn first_attempt_criterion_is_always_default() {
        let criteria = attempt_criteria(5, 7);
        assert!(matches!(criteria[0], SortCriterion::PriorityAreaDesc));
        assert_eq!(criteria.len(), 5);
    }
}
