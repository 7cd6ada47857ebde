// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runtime preprocessing and validation of the WGSL sources.

use naga::{
    front::wgsl,
    valid::{Capabilities, ModuleInfo, ValidationFlags},
    AddressSpace, Module, StorageAccess,
};
use thiserror::Error;

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

pub mod preprocess;

use crate::types::{BindType, BindingInfo};

/// Name of the vertex stage entry point of every render shader.
pub const VERTEX_ENTRY: &str = "vs_main";
/// Name of the fragment stage entry point of every render shader.
pub const FRAGMENT_ENTRY: &str = "fs_main";

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("failed to parse shader `{name}`:\n{message}")]
    Parse { name: String, message: String },
    #[error("failed to validate shader `{name}`:\n{message}")]
    Validate { name: String, message: String },
    #[error("shader `{name}` has no entry point `{entry}`")]
    EntryPointNotFound { name: String, entry: String },
    #[error("failed to read shader sources")]
    Io(#[from] std::io::Error),
}

#[derive(Debug)]
pub struct ShaderInfo {
    pub source: String,
    pub module: Module,
    pub module_info: ModuleInfo,
    /// Resources used by either entry point, sorted by location.
    pub bindings: Vec<BindingInfo>,
}

impl ShaderInfo {
    pub fn new(name: &str, source: String) -> Result<ShaderInfo, Error> {
        let module = wgsl::parse_str(&source).map_err(|err| Error::Parse {
            name: name.to_owned(),
            message: err.emit_to_string(&source),
        })?;
        let module_info = naga::valid::Validator::new(
            ValidationFlags::all() & !ValidationFlags::CONTROL_FLOW_UNIFORMITY,
            Capabilities::all(),
        )
        .validate(&module)
        .map_err(|err| Error::Validate {
            name: name.to_owned(),
            message: err.emit_to_string(&source),
        })?;
        let mut entry_indices = vec![];
        for entry in [VERTEX_ENTRY, FRAGMENT_ENTRY] {
            let index = module
                .entry_points
                .iter()
                .position(|ep| ep.name == entry)
                .ok_or_else(|| Error::EntryPointNotFound {
                    name: name.to_owned(),
                    entry: entry.to_owned(),
                })?;
            entry_indices.push(index);
        }
        let mut bindings = vec![];
        for (var_handle, var) in module.global_variables.iter() {
            let used = entry_indices
                .iter()
                .any(|&ix| !module_info.get_entry_point(ix)[var_handle].is_empty());
            if !used {
                continue;
            }
            let Some(binding) = &var.binding else {
                continue;
            };
            let ty = match var.space {
                AddressSpace::Storage { access } if access.contains(StorageAccess::STORE) => {
                    BindType::Buffer
                }
                AddressSpace::Uniform => BindType::Uniform,
                _ => BindType::BufReadOnly,
            };
            bindings.push(BindingInfo {
                name: var.name.clone(),
                location: (binding.group, binding.binding),
                ty,
            });
        }
        bindings.sort_by_key(|res| res.location);
        Ok(ShaderInfo {
            source,
            module,
            module_info,
            bindings,
        })
    }

    /// Preprocesses and validates every top level `.wgsl` file in `shader_dir`.
    pub fn from_dir(shader_dir: impl AsRef<Path>) -> Result<HashMap<String, Self>, Error> {
        let shader_dir = shader_dir.as_ref();
        let imports = preprocess::get_imports(shader_dir)?;
        let mut info = HashMap::default();
        for entry in shader_dir.read_dir()? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "wgsl") {
                continue;
            }
            let Some(shader_name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let contents = std::fs::read_to_string(&path)?;
            let source = preprocess::preprocess(&contents, shader_name, &imports);
            let shader_info = Self::new(shader_name, source)?;
            info.insert(shader_name.to_string(), shader_info);
        }
        Ok(info)
    }

    /// Same as [`Self::from_dir`] for the shaders shipped with this crate.
    pub fn from_default() -> Result<HashMap<String, Self>, Error> {
        Self::from_dir(shader_dir())
    }
}

/// Directory holding the WGSL sources of this crate.
pub fn shader_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("shader")
}
