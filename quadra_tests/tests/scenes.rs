// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders every test scene with both CPU dispatch modes.

#![allow(
    clippy::missing_assert_message,
    clippy::allow_attributes_without_reason
)]

use quadra_tests::{compare_backends, encode_test_scene, render_then_debug, Backend, TestParams};
use scenes::test_scenes;

fn render_scene(name: &str, width: u32, height: u32) -> quadra::Pixmap {
    let scenes = test_scenes();
    let scene = scenes.find(name).unwrap();
    let mut params = TestParams::new(name, width, height);
    let curves = encode_test_scene(scene, &mut params);
    render_then_debug(&curves, &params).unwrap()
}

#[test]
fn dispatch_modes_match_on_all_scenes() {
    for scene in &test_scenes().scenes {
        let mut params = TestParams::new(format!("dispatch_{}", scene.config.name), 97, 61);
        let curves = encode_test_scene(scene, &mut params);
        compare_backends(&curves, params, [Backend::Sequential, Backend::Parallel])
            .unwrap()
            .assert_identical()
            .unwrap();
    }
}

#[test]
fn lens_and_bar_is_orange() {
    let image = render_scene("lens_and_bar", 100, 100);
    // Lens interior at (0.5, 0.5), bar interior at (0.925, 0.5).
    assert_eq!(image.sample(50, 49), [255, 128, 64, 255]);
    assert_eq!(image.sample(92, 49), [255, 128, 64, 255]);
    // The gap between the two.
    assert_eq!(image.sample(80, 49), [0, 0, 0, 255]);
}

#[test]
fn ring_has_a_hole() {
    let image = render_scene("ring", 100, 100);
    assert_eq!(image.sample(50, 50), [255, 255, 255, 255]);
    assert_eq!(image.sample(20, 50), [0, 0, 0, 255]);
    assert_eq!(image.sample(2, 2), [255, 255, 255, 255]);
}

#[test]
fn crossed_lenses_saturate() {
    let scenes = test_scenes();
    let mut params = TestParams::new("crossed_lenses_saturate", 100, 100);
    let curves = encode_test_scene(scenes.find("crossed_lenses").unwrap(), &mut params);
    let mut renderer = quadra::cpu::Renderer::new(quadra::RendererOptions::default()).unwrap();
    let coverage = renderer.render_coverage(&curves, &params.render_params());
    assert!(coverage.iter().all(|c| (0.0..=1.0).contains(c)));
    // (0.41, 0.5) is inside both lenses.
    assert_eq!(coverage[49 * 100 + 41], 1.0);
}

#[test]
fn empty_scene_is_base_color() {
    let image = render_scene("empty", 30, 20);
    assert!(image.data().chunks_exact(4).all(|p| p == [0, 0, 0, 255]));
}
