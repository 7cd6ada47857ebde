// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use quadra::{CurveSet, Pixmap};

use crate::{render_then_debug, write_png_to_file, Backend, TestParams};

fn comparison_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("comparisons")
}

/// Per-channel differences between two renderings.
#[derive(Clone, Copy, Debug, Default)]
pub struct Statistics {
    /// Mean absolute channel difference, in `[0, 1]`.
    pub mean: f32,
    /// Largest channel difference.
    pub max: u8,
}

impl Statistics {
    fn from_images(a: &Pixmap, b: &Pixmap) -> Self {
        if a.buf.is_empty() {
            return Self::default();
        }
        let mut sum = 0_u64;
        let mut max = 0;
        for (x, y) in a.buf.iter().zip(&b.buf) {
            let diff = x.abs_diff(*y);
            sum += u64::from(diff);
            max = max.max(diff);
        }
        Self {
            mean: sum as f32 / (a.buf.len() as f32 * 255.0),
            max,
        }
    }
}

#[must_use]
/// A comparison between a curve set rendered by two backends.
pub struct BackendComparison {
    pub statistics: Statistics,
    pub paths: [PathBuf; 2],
    pub rendered: [Pixmap; 2],
    pub params: TestParams,
}

impl BackendComparison {
    pub fn assert_mean_less_than(&mut self, value: f32) -> Result<()> {
        assert!(
            value < 0.1,
            "Mean should be less than 0.1 in almost all cases for a successful test"
        );
        let mean = self.statistics.mean;
        if mean > value {
            self.handle_failure(format!("Expected mean to be less than {value}, got {mean}"))?;
        }
        self.handle_success()
    }

    pub fn assert_identical(&mut self) -> Result<()> {
        if self.statistics.max != 0 {
            let max = self.statistics.max;
            self.handle_failure(format!(
                "Expected identical images, channels differ by up to {max}"
            ))?;
        }
        self.handle_success()
    }

    fn handle_success(&mut self) -> Result<()> {
        for path in &self.paths {
            match std::fs::remove_file(path) {
                Err(e) if e.kind() == ErrorKind::NotFound => (),
                res => res?,
            }
        }
        Ok(())
    }

    fn handle_failure(&mut self, message: String) -> Result<()> {
        for (path, image) in self.paths.iter().zip(&self.rendered) {
            write_png_to_file(path, image)?;
        }
        eprintln!(
            "Wrote results from test {} to {:?} and {:?}\n",
            self.params.name, &self.paths[0], &self.paths[1]
        );

        bail!("{}", message);
    }
}

/// Renders the curves with two backends and measures how far apart they are.
pub fn compare_backends(
    curves: &CurveSet,
    mut params: TestParams,
    backends: [Backend; 2],
) -> Result<BackendComparison> {
    params.backend = backends[0];
    let first = render_then_debug(curves, &params)?;
    params.backend = backends[1];
    let second = render_then_debug(curves, &params)?;
    assert!(first.width == second.width && first.height == second.height);

    let path_root = comparison_dir().join(&params.name);
    let paths =
        backends.map(|backend| path_root.with_extension(format!("{}.png", backend.suffix())));
    Ok(BackendComparison {
        statistics: Statistics::from_images(&first, &second),
        paths,
        rendered: [first, second],
        params,
    })
}

/// Run a curve set comparing the outputs from the CPU and GPU renderers.
#[cfg(feature = "gpu")]
pub fn compare_gpu_cpu(curves: &CurveSet, params: TestParams) -> Result<BackendComparison> {
    compare_backends(curves, params, [Backend::Gpu, Backend::Sequential])
}
