// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use quadra::peniko::Color;
use quadra::{Curve, CurveSet};

use crate::{ExampleScene, SceneConfig, SceneParams, SceneSet};

macro_rules! scene {
    ($name: ident) => {
        scene!($name, stringify!($name))
    };
    ($func:expr, $name: expr) => {
        ExampleScene {
            config: SceneConfig {
                name: $name.to_owned(),
            },
            function: Box::new($func),
        }
    };
}

/// All scenes live in the unit square with y pointing up.
pub fn test_scenes() -> SceneSet {
    let scenes = vec![
        scene!(lens_and_bar),
        scene!(lens),
        scene!(bar),
        scene!(ring),
        scene!(crossed_lenses),
        scene!(empty),
    ];
    SceneSet { scenes }
}

// Scenes

fn lens_curves() -> [Curve; 2] {
    [
        // Inner arc, bulging right.
        Curve::new((0.3, 0.3), (0.5, 0.5), (0.3, 0.7)),
        // Outer arc, back to the start.
        Curve::new((0.3, 0.7), (1.0, 0.5), (0.3, 0.3)),
    ]
}

fn bar_curves() -> [Curve; 4] {
    [
        Curve::line((0.9, 0.3), (0.9, 0.7)),
        Curve::new((0.9, 0.7), (0.93, 0.7), (0.95, 0.7)),
        Curve::line((0.95, 0.7), (0.95, 0.3)),
        Curve::new((0.95, 0.3), (0.93, 0.3), (0.9, 0.3)),
    ]
}

fn lens_and_bar(params: &mut SceneParams) -> CurveSet {
    params.color = Some(Color::from_rgb8(255, 128, 64));
    lens_curves().into_iter().chain(bar_curves()).collect()
}

fn lens(_: &mut SceneParams) -> CurveSet {
    CurveSet::new(lens_curves())
}

fn bar(_: &mut SceneParams) -> CurveSet {
    CurveSet::new(bar_curves())
}

/// A square with a square hole cut out by an opposite contour.
fn ring(params: &mut SceneParams) -> CurveSet {
    params.base_color = Some(Color::WHITE);
    params.color = Some(Color::BLACK);
    let square = |min: f32, max: f32| {
        [
            Curve::line((min, min), (max, min)),
            Curve::line((max, min), (max, max)),
            Curve::line((max, max), (min, max)),
            Curve::line((min, max), (min, min)),
        ]
    };
    let outer = square(0.1, 0.9);
    let inner = square(0.3, 0.7).map(|c| c.reversed());
    outer.into_iter().chain(inner).collect()
}

/// Two lenses with the same orientation overlapping in the middle.
///
/// Winding numbers of 2 clamp to full coverage.
fn crossed_lenses(_: &mut SceneParams) -> CurveSet {
    let shifted = lens_curves().map(|c| {
        Curve::new(
            (c.p1.x - 0.2, c.p1.y),
            (c.p2.x - 0.2, c.p2.y),
            (c.p3.x - 0.2, c.p3.y),
        )
    });
    lens_curves().into_iter().chain(shifted).collect()
}

fn empty(_: &mut SceneParams) -> CurveSet {
    CurveSet::default()
}
