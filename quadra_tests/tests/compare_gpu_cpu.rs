// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests which ensure that the GPU and CPU renderers give the same results across
//! a range of our test scenes.
//!
//! Run with `--features gpu`. Set `QUADRA_CI_GPU_SUPPORT=no` to ignore them on
//! machines where no adapter is expected.

#![cfg(feature = "gpu")]

use quadra::Transform;
use quadra::kurbo::Affine;
use quadra_tests::{compare_gpu_cpu, encode_test_scene, gpu_available, TestParams};
use scenes::test_scenes;

/// Make sure the CPU and GPU renderers match on a test scene.
fn compare_test_scene(name: &str, mut params: TestParams) {
    if !gpu_available() {
        eprintln!("Skipping {}: no compatible device", params.name);
        return;
    }
    let scenes = test_scenes();
    let curves = encode_test_scene(scenes.find(name).unwrap(), &mut params);
    compare_gpu_cpu(&curves, params)
        .unwrap()
        .assert_mean_less_than(0.01)
        .unwrap();
}

#[test]
#[cfg_attr(skip_gpu_tests, ignore)]
fn compare_lens_and_bar() {
    compare_test_scene("lens_and_bar", TestParams::new("compare_lens_and_bar", 400, 400));
}

#[test]
#[cfg_attr(skip_gpu_tests, ignore)]
fn compare_ring() {
    compare_test_scene("ring", TestParams::new("compare_ring", 300, 200));
}

#[test]
#[cfg_attr(skip_gpu_tests, ignore)]
fn compare_crossed_lenses() {
    compare_test_scene(
        "crossed_lenses",
        TestParams::new("compare_crossed_lenses", 256, 256),
    );
}

#[test]
#[cfg_attr(skip_gpu_tests, ignore)]
fn compare_empty() {
    compare_test_scene("empty", TestParams::new("compare_empty", 64, 64));
}

#[test]
#[cfg_attr(skip_gpu_tests, ignore)]
fn compare_rotated_lens() {
    let mut params = TestParams::new("compare_rotated_lens", 200, 200);
    let fit = params.render_params().transform;
    let rotate = Affine::rotate_about(0.5, (100.0, 100.0));
    params.transform = Some(Transform::from_kurbo(&(fit.to_kurbo() * rotate)));
    compare_test_scene("lens", params);
}
