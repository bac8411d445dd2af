//! nest-cli - thin CLI shell over the `nest` arrangement engine.
//!
//! Flags map 1:1 onto `ArrangeParams` fields; the engine's own request/
//! response surface is otherwise untouched. Exit codes: `0` success with
//! everything placed, `1` success with some items unplaced, `2` invalid
//! input, `130` cancelled.

mod scene;

use clap::Parser;
use nest::{ArrangeParams, ArrangeRequest, Arranger, SortMode};
use std::path::PathBuf;
use std::process::ExitCode;

/// Arrange a set of part outlines on a build plate.
#[derive(Debug, Parser)]
#[command(name = "nest-cli", about = "2D bitmap-based nesting engine")]
struct Opt {
    /// Scene file: JSON `{bed, items}` describing the plate and parts.
    scene: PathBuf,

    /// Model units per pixel.
    #[arg(long, default_value_t = 0.5)]
    precision: f64,

    /// Minimum clearance between placed items, in model units.
    #[arg(long, default_value_t = 1.0)]
    spacing: f64,

    /// Spiral-search step, in model units.
    #[arg(long, default_value_t = 1.0)]
    delta: f64,

    /// Rotation fan step, in radians. Ignored when rotations are disabled.
    #[arg(long = "delta-r", default_value_t = std::f64::consts::FRAC_PI_2)]
    delta_r: f64,

    /// Disable the rotation fan (every item stays at rotation zero).
    #[arg(long)]
    no_rotations: bool,

    /// Run several independently-ordered attempts and keep the best score.
    #[arg(long)]
    multiple: bool,

    /// Number of attempts when `--multiple` is set.
    #[arg(long, default_value_t = 1)]
    iterations: u32,

    /// Worker threads for `--multiple` mode. `0` means hardware default.
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Seed for the randomized sort criterion in `--multiple` mode.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Abort the whole run if any item has zero usable rotations, instead
    /// of recording it as unarranged.
    #[arg(long)]
    strict: bool,

    /// Write the JSON response here instead of stdout.
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let opt = Opt::parse();

    let scene_text = match std::fs::read_to_string(&opt.scene) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("error: could not read scene file {:?}: {err}", opt.scene);
            return ExitCode::from(2);
        }
    };
    let scene: scene::Scene = match serde_json::from_str(&scene_text) {
        Ok(s) => s,
        Err(err) => {
            eprintln!("error: malformed scene file: {err}");
            return ExitCode::from(2);
        }
    };

    let params = ArrangeParams {
        precision_mm: opt.precision,
        spacing_mm: opt.spacing,
        delta_mm: opt.delta,
        delta_r_rad: opt.delta_r,
        allow_rotations: !opt.no_rotations,
        sort_mode: if opt.multiple {
            SortMode::Multiple
        } else {
            SortMode::Single
        },
        random_iterations: opt.iterations,
        thread_count: opt.threads,
        strict: opt.strict,
        seed: opt.seed,
        ..ArrangeParams::default()
    };

    let items = scene.items.into_iter().map(Into::into).collect();
    let bed = scene.bed.into();
    let request = ArrangeRequest::new(items, bed, params);

    let response = match Arranger::run(request) {
        Ok(response) => response,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };

    if response.cancelled {
        return ExitCode::from(130);
    }

    let output_text = serde_json::to_string_pretty(&ResponseView::from(&response))
        .expect("response view serializes");
    match &opt.output {
        Some(path) => {
            if let Err(err) = std::fs::write(path, output_text) {
                eprintln!("error: could not write output file {path:?}: {err}");
                return ExitCode::from(2);
            }
        }
        None => println!("{output_text}"),
    }

    if response.per_item.iter().all(|r| r.placed) {
        ExitCode::from(0)
    } else {
        ExitCode::from(1)
    }
}

/// Serializable mirror of [`nest::ArrangeResponse`] — the engine's own
/// response type intentionally carries no serde derives, since not every
/// caller embedding the library wants that dependency surface.
#[derive(serde::Serialize)]
struct ResponseView {
    score: f64,
    cancelled: bool,
    per_item: Vec<PlacementView>,
}

#[derive(serde::Serialize)]
struct PlacementView {
    placed: bool,
    translation: (f64, f64),
    rotation_rad: f64,
    bed_idx: i32,
}

impl From<&nest::ArrangeResponse> for ResponseView {
    fn from(response: &nest::ArrangeResponse) -> Self {
        Self {
            score: response.score,
            cancelled: response.cancelled,
            per_item: response
                .per_item
                .iter()
                .map(|r| PlacementView {
                    placed: r.placed,
                    translation: r.translation,
                    rotation_rad: r.rotation_rad,
                    bed_idx: r.bed_idx,
                })
                .collect(),
        }
    }
}
