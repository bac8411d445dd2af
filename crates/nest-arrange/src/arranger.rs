//! Arranger — orders parts, drives the Placer per item, scores the pass.

use crate::error::{EngineError, EngineResult};
use crate::ordering::{attempt_criteria, order_indices, SortCriterion};
use crate::scoring::{self, RunningTally};
use crate::types::{ArrangeRequest, ArrangeResponse, Item, PlacementRecord, SortMode};
use nest_part::Part;
use nest_placer::{Bed, SearchOutcome};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Drives one or more arrangement attempts over a request.
pub struct Arranger;

impl Arranger {
    /// Run the request. `sort_mode = Single` runs exactly one
    /// deterministic pass; `sort_mode = Multiple` runs
    /// `params.random_iterations` independently-ordered attempts (in
    /// parallel, via rayon) and keeps the lowest-scoring one.
    pub fn run(request: ArrangeRequest) -> EngineResult<ArrangeResponse> {
        request.params.validate()?;

        let (plate_w_px, plate_h_px) = request.bed.pixel_dims(request.params.precision_mm);
        let angles = nest_part::rotation_angles(
            request.params.delta_r_rad,
            request.params.allow_rotations,
        );
        let step_pixels =
            (request.params.delta_mm / request.params.precision_mm).ceil().max(1.0) as u32;

        let parts = load_parts(
            &request.items,
            &angles,
            &request.params,
            plate_w_px,
            plate_h_px,
        )?;

        let cancel = request.cancel.clone();
        if let Some(flag) = &cancel {
            if flag.load(Ordering::Relaxed) {
                return Ok(ArrangeResponse {
                    per_item: Vec::new(),
                    score: f64::INFINITY,
                    cancelled: true,
                });
            }
        }

        let attempts = match request.params.sort_mode {
            SortMode::Single => 1,
            SortMode::Multiple => request.params.random_iterations.max(1),
        };
        let criteria = attempt_criteria(attempts, request.params.seed);

        let on_packed = request.on_packed.as_deref();
        let progress = request.progress.as_deref();

        let best = if attempts <= 1 {
            run_attempt(
                &request.items,
                &parts,
                &request.bed,
                request.params.precision_mm,
                step_pixels,
                request.params.unplaced_penalty,
                criteria[0],
                cancel.as_deref(),
                on_packed,
            )
        } else {
            run_multi(
                &request.items,
                &parts,
                &request.bed,
                request.params.precision_mm,
                step_pixels,
                request.params.unplaced_penalty,
                &criteria,
                cancel.as_deref(),
                request.params.thread_count,
                progress,
            )
        };

        match best {
            AttemptOutcome::Completed(response) => {
                // Multi-attempt mode discards every losing attempt's
                // commits, so `on_packed` only fires once the winner is
                // known — replayed in the winning pass's own item order,
                // not interleaved with the attempts that lost.
                if attempts > 1 {
                    if let Some(cb) = on_packed {
                        for record in response.per_item.iter().filter(|r| r.placed) {
                            cb(record);
                        }
                    }
                }
                Ok(response)
            }
            AttemptOutcome::Cancelled => Ok(ArrangeResponse {
                per_item: Vec::new(),
                score: f64::INFINITY,
                cancelled: true,
            }),
        }
    }
}

/// Part-loading stage: items whose outline has zero usable rotations are
/// reported here; in `strict` mode this aborts the whole call, otherwise
/// they are carried forward as permanently unarranged slots.
fn load_parts(
    items: &[Item],
    angles: &[f64],
    params: &crate::types::ArrangeParams,
    plate_w_px: u32,
    plate_h_px: u32,
) -> EngineResult<Vec<Option<Part>>> {
    let mut parts = Vec::with_capacity(items.len());
    for item in items {
        if item.outline.contour().len() < 3 {
            return Err(EngineError::InvalidInput(
                "item contour must have at least 3 vertices".to_string(),
            ));
        }
        match Part::load(
            item.outline.clone(),
            params.precision_mm,
            params.spacing_mm,
            angles,
            plate_w_px,
            plate_h_px,
        ) {
            Ok(part) => parts.push(Some(part)),
            Err(err) => {
                if params.strict {
                    return Err(EngineError::PartDoesNotFit(err));
                }
                tracing::debug!(error = %err, "part has no fitting rotation, marking unarranged");
                parts.push(None);
            }
        }
    }
    Ok(parts)
}

enum AttemptOutcome {
    Completed(ArrangeResponse),
    Cancelled,
}

#[allow(clippy::too_many_arguments)]
fn run_attempt(
    items: &[Item],
    parts: &[Option<Part>],
    bed: &Bed,
    precision_mm: f64,
    step_pixels: u32,
    unplaced_penalty: f64,
    criterion: SortCriterion,
    cancel: Option<&AtomicBool>,
    on_packed: Option<&(dyn Fn(&PlacementRecord) + Send + Sync)>,
) -> AttemptOutcome {
    let _span = tracing::debug_span!("attempt", criterion = ?criterion).entered();

    let mut plate = match bed.build_plate(precision_mm) {
        Ok(p) => p,
        Err(_) => {
            // already validated during load_parts; unreachable for a
            // request that got this far.
            return AttemptOutcome::Completed(ArrangeResponse {
                per_item: vec![PlacementRecord::unarranged(); items.len()],
                score: f64::INFINITY,
                cancelled: false,
            });
        }
    };

    let order = order_indices(items, criterion);
    let mut results = vec![PlacementRecord::unarranged(); items.len()];
    let mut tally = RunningTally::new();
    let mut unplaced_count = 0usize;

    for idx in order {
        if let Some(flag) = cancel {
            if flag.load(Ordering::Relaxed) {
                return AttemptOutcome::Cancelled;
            }
        }

        let Some(part) = &parts[idx] else {
            unplaced_count += 1;
            continue;
        };

        match nest_placer::search(&plate, part, step_pixels, cancel) {
            SearchOutcome::Found { rotation, x, y } => {
                let dilated = part.dilated_bitmap(rotation).expect("fitting rotation");
                let footprint = part.footprint(rotation).expect("fitting rotation");

                let blit_x = x + (dilated.width() as i32 - footprint.width() as i32) / 2;
                let blit_y = y + (dilated.height() as i32 - footprint.height() as i32) / 2;
                plate.write(footprint, blit_x, blit_y);

                let (fcx, fcy) = footprint.center();
                let precision = part.precision();
                let translation = (
                    (blit_x + fcx) as f64 * precision,
                    (blit_y + fcy) as f64 * precision,
                );

                let record = PlacementRecord {
                    placed: true,
                    translation,
                    rotation_rad: part.angle(rotation),
                    bed_idx: 0,
                };

                tally.record(
                    blit_x,
                    blit_y,
                    blit_x + footprint.width() as i32,
                    blit_y + footprint.height() as i32,
                    footprint.occupied_count() as u64,
                );

                if let Some(cb) = on_packed {
                    cb(&record);
                }
                results[idx] = record;
            }
            SearchOutcome::NotFound => {
                unplaced_count += 1;
            }
            SearchOutcome::Cancelled => {
                return AttemptOutcome::Cancelled;
            }
        }
    }

    let score = scoring::score(&tally, precision_mm, unplaced_count, unplaced_penalty);

    AttemptOutcome::Completed(ArrangeResponse {
        per_item: results,
        score,
        cancelled: false,
    })
}

#[allow(clippy::too_many_arguments)]
fn run_multi(
    items: &[Item],
    parts: &[Option<Part>],
    bed: &Bed,
    precision_mm: f64,
    step_pixels: u32,
    unplaced_penalty: f64,
    criteria: &[SortCriterion],
    cancel: Option<&AtomicBool>,
    thread_count: usize,
    progress: Option<&(dyn Fn(f64, &str) + Send + Sync)>,
) -> AttemptOutcome {
    let best: Mutex<Option<(f64, ArrangeResponse)>> = Mutex::new(None);
    let completed = std::sync::atomic::AtomicUsize::new(0);
    let total = criteria.len();

    let pool = if thread_count > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(thread_count)
            .build()
    } else {
        rayon::ThreadPoolBuilder::new().build()
    };

    let run_all = || {
        use rayon::prelude::*;
        criteria.par_iter().for_each(|&criterion| {
            if let Some(flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    return;
                }
            }
            let outcome = run_attempt(
                items,
                parts,
                bed,
                precision_mm,
                step_pixels,
                unplaced_penalty,
                criterion,
                cancel,
                None,
            );
            if let AttemptOutcome::Completed(response) = outcome {
                let mut guard = best.lock().expect("best-score mutex poisoned");
                let replace = match &*guard {
                    Some((best_score, _)) => response.score < *best_score,
                    None => true,
                };
                if replace {
                    *guard = Some((response.score, response));
                }
            }
            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(cb) = progress {
                cb(done as f64 / total as f64, "attempt completed");
            }
        });
    };

    match pool {
        Ok(pool) => pool.install(run_all),
        Err(_) => run_all(),
    }

    if let Some(flag) = cancel {
        if flag.load(Ordering::Relaxed) {
            return AttemptOutcome::Cancelled;
        }
    }

    match best.into_inner().expect("best-score mutex poisoned") {
        Some((_, response)) => AttemptOutcome::Completed(response),
        None => AttemptOutcome::Cancelled,
    }
}
