// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Reads every `shared/*.wgsl` file under `shader_dir`, keyed by file stem.
pub fn get_imports(shader_dir: &Path) -> std::io::Result<HashMap<String, String>> {
    let mut imports = HashMap::new();
    let imports_dir = shader_dir.join("shared");
    for entry in imports_dir.read_dir()? {
        let path = entry?.path();
        if path.extension().is_none_or(|ext| ext != "wgsl") {
            continue;
        }
        if let Some(import_name) = path.file_stem().and_then(|stem| stem.to_str()) {
            imports.insert(import_name.to_owned(), fs::read_to_string(&path)?);
        }
    }
    Ok(imports)
}

/// Expands `#import name` directives.
///
/// Imports are inserted in place, recursively. Other directives are
/// reported and dropped.
pub fn preprocess(input: &str, shader_name: &str, imports: &HashMap<String, String>) -> String {
    let mut output = String::with_capacity(input.len());
    for (line_number, line) in input.lines().enumerate() {
        let trimmed = line.trim_start();
        let Some(directive) = trimmed.strip_prefix('#') else {
            output.push_str(line);
            output.push('\n');
            continue;
        };
        let (name, argument) = directive
            .split_once(char::is_whitespace)
            .unwrap_or((directive, ""));
        let argument = argument.split("//").next().unwrap_or_default().trim();
        match name {
            "import" if argument.is_empty() => {
                log::warn!(
                    "#import needs a non_whitespace argument (line {line_number} of {shader_name}.wgsl)"
                );
            }
            "import" => {
                if let Some(import) = imports.get(argument) {
                    output.push_str(&preprocess(import, shader_name, imports));
                } else {
                    log::warn!(
                        "Unknown import `{argument}` (line {line_number} of {shader_name}.wgsl)"
                    );
                }
            }
            val => {
                log::warn!(
                    "Unknown preprocessor directive `{val}` (line {line_number} of {shader_name}.wgsl)"
                );
            }
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_nested_imports() {
        let imports = HashMap::from([
            ("a".to_string(), "#import b\nfn a() {}".to_string()),
            ("b".to_string(), "fn b() {}".to_string()),
        ]);
        let out = preprocess("#import a // shared\nfn main() {}", "test", &imports);
        assert_eq!(out, "fn b() {}\nfn a() {}\nfn main() {}\n");
    }

    #[test]
    fn drops_unknown_directives() {
        let out = preprocess("#ifdef full\nlet x = 1;", "test", &HashMap::new());
        assert_eq!(out, "let x = 1;\n");
    }
}
