//! End-to-end arrangement scenarios.

use nest_arrange::{ArrangeParams, ArrangeRequest, Arranger, Bed, Item, SortMode};
use nest_raster::Outline;
use std::f64::consts::{FRAC_PI_2, TAU};

fn square(side: f64) -> Outline {
    Outline::without_holes(vec![(0.0, 0.0), (side, 0.0), (side, side), (0.0, side)])
}

fn rectangle(width: f64, height: f64) -> Outline {
    Outline::without_holes(vec![
        (0.0, 0.0),
        (width, 0.0),
        (width, height),
        (0.0, height),
    ])
}

fn circle(center: (f64, f64), radius: f64, segments: usize) -> Vec<(f64, f64)> {
    (0..segments)
        .map(|i| {
            let theta = TAU * i as f64 / segments as f64;
            (center.0 + radius * theta.cos(), center.1 + radius * theta.sin())
        })
        .collect()
}

fn annulus(center: (f64, f64), outer_r: f64, inner_r: f64) -> Outline {
    Outline::new(
        circle(center, outer_r, 48),
        vec![circle(center, inner_r, 48)],
    )
}

fn base_params() -> ArrangeParams {
    ArrangeParams {
        precision_mm: 0.5,
        spacing_mm: 1.0,
        delta_mm: 1.0,
        delta_r_rad: FRAC_PI_2,
        allow_rotations: true,
        sort_mode: SortMode::Single,
        random_iterations: 1,
        thread_count: 0,
        unplaced_penalty: 1.0e6,
        strict: false,
        seed: 0,
    }
}

#[test]
fn two_unit_squares_on_generous_plate() {
    let items = vec![
        Item {
            outline: square(10.0),
            priority: 0,
        },
        Item {
            outline: square(10.0),
            priority: 0,
        },
    ];
    let bed = Bed::Rectangle {
        width: 100.0,
        height: 100.0,
    };
    let response = Arranger::run(ArrangeRequest::new(items, bed, base_params())).unwrap();

    assert!(response.per_item.iter().all(|r| r.placed));
    let a = response.per_item[0].translation;
    let b = response.per_item[1].translation;
    let dist = ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt();
    assert!(dist >= 12.0, "expected centers >= 12mm apart, got {dist}");
}

#[test]
fn annular_part_places_near_plate_center() {
    let items = vec![Item {
        outline: annulus((0.0, 0.0), 20.0, 8.0),
        priority: 0,
    }];
    let bed = Bed::Rectangle {
        width: 50.0,
        height: 50.0,
    };
    let mut params = base_params();
    params.spacing_mm = 1.0;
    let response = Arranger::run(ArrangeRequest::new(items, bed, params)).unwrap();

    assert!(response.per_item[0].placed);
    let (x, y) = response.per_item[0].translation;
    assert!((x - 25.0).abs() <= 5.0, "x={x}");
    assert!((y - 25.0).abs() <= 5.0, "y={y}");
}

#[test]
fn rotation_required_to_fit_long_rectangle() {
    let item = Item {
        outline: rectangle(80.0, 20.0),
        priority: 0,
    };
    let bed = Bed::Rectangle {
        width: 30.0,
        height: 100.0,
    };

    let mut no_rotate = base_params();
    no_rotate.allow_rotations = false;
    let response = Arranger::run(ArrangeRequest::new(
        vec![item.clone()],
        bed,
        no_rotate,
    ))
    .unwrap();
    assert!(!response.per_item[0].placed);

    let mut rotate = base_params();
    rotate.allow_rotations = true;
    rotate.delta_r_rad = FRAC_PI_2;
    let response = Arranger::run(ArrangeRequest::new(vec![item], bed, rotate)).unwrap();
    assert!(response.per_item[0].placed);
    let rotation = response.per_item[0].rotation_rad;
    let near_quarter_turn =
        (rotation - FRAC_PI_2).abs() < 1e-6 || (rotation - 3.0 * FRAC_PI_2).abs() < 1e-6;
    assert!(near_quarter_turn, "rotation={rotation}");
}

#[test]
fn circular_plate_rejects_second_square() {
    // A 10mm square's spacing-dilated collision footprint comfortably
    // inscribes in a 22mm disk (half-diagonal well under the radius),
    // but two of them side by side need a bounding circle far larger
    // than that disk admits, so only one can ever be placed.
    let items = vec![
        Item {
            outline: square(10.0),
            priority: 0,
        },
        Item {
            outline: square(10.0),
            priority: 0,
        },
    ];
    let bed = Bed::Circle { diameter: 22.0 };
    let response = Arranger::run(ArrangeRequest::new(items, bed, base_params())).unwrap();

    let placed_count = response.per_item.iter().filter(|r| r.placed).count();
    assert_eq!(placed_count, 1, "only one 10mm square fits a 22mm disk");
}

#[test]
fn priority_dominates_area() {
    let items = vec![
        Item {
            outline: square(50.0),
            priority: 0,
        },
        Item {
            outline: square(10.0),
            priority: 10,
        },
    ];
    let bed = Bed::Rectangle {
        width: 60.0,
        height: 60.0,
    };
    let response = Arranger::run(ArrangeRequest::new(items, bed, base_params())).unwrap();
    assert!(response.per_item[1].placed, "higher-priority item must place");
}

#[test]
fn repeated_runs_are_deterministic() {
    let make_request = || {
        let items = vec![
            Item {
                outline: square(20.0),
                priority: 0,
            },
            Item {
                outline: square(10.0),
                priority: 5,
            },
        ];
        let bed = Bed::Rectangle {
            width: 60.0,
            height: 60.0,
        };
        ArrangeRequest::new(items, bed, base_params())
    };

    let first = Arranger::run(make_request()).unwrap();
    let second = Arranger::run(make_request()).unwrap();

    assert_eq!(first.score, second.score);
    for (a, b) in first.per_item.iter().zip(second.per_item.iter()) {
        assert_eq!(a.placed, b.placed);
        assert_eq!(a.translation, b.translation);
        assert_eq!(a.rotation_rad, b.rotation_rad);
    }
}
