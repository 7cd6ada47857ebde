// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hand-authored curve sets.

mod test_scenes;

use anyhow::{anyhow, Result};
use quadra::peniko::Color;
use quadra::{Bbox, CurveSet};

pub use test_scenes::test_scenes;

/// The region of curve space every test scene is drawn in.
pub fn viewport() -> Bbox {
    Bbox::new((0.0, 0.0), (1.0, 1.0))
}

/// Values a scene may set while it is built.
#[derive(Default)]
pub struct SceneParams {
    /// Background the scene is meant to be shown on.
    pub base_color: Option<Color>,
    /// Fill color the scene is meant to be shown in.
    pub color: Option<Color>,
}

pub struct SceneConfig {
    pub name: String,
}

pub struct ExampleScene {
    pub function: Box<dyn Fn(&mut SceneParams) -> CurveSet + Send + Sync>,
    pub config: SceneConfig,
}

impl ExampleScene {
    /// Builds the curve set.
    pub fn build(&self, params: &mut SceneParams) -> CurveSet {
        (self.function)(params)
    }
}

pub struct SceneSet {
    pub scenes: Vec<ExampleScene>,
}

impl SceneSet {
    /// Finds a scene by name, or by index when `key` is a number.
    pub fn find(&self, key: &str) -> Result<&ExampleScene> {
        if let Ok(index) = key.parse::<usize>() {
            return self.scenes.get(index).ok_or_else(|| {
                anyhow!(
                    "scene index {index} out of range, there are {} scenes",
                    self.scenes.len()
                )
            });
        }
        self.scenes
            .iter()
            .find(|scene| scene.config.name.eq_ignore_ascii_case(key))
            .ok_or_else(|| anyhow!("no scene named `{key}`"))
    }
}
