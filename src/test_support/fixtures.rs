//! Test fixtures for common test scenarios.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A project directory with a manifest and source files.
#[derive(Debug, Clone, Default)]
pub struct ProjectFixture {
    /// Xbuild.toml content.
    pub manifest: String,
    /// Files (path relative to project root -> content).
    pub files: BTreeMap<PathBuf, String>,
}

impl ProjectFixture {
    pub fn new() -> Self {
        ProjectFixture::default()
    }

    /// An executable `calc` built from `a.c` and `b.c`.
    pub fn calc() -> Self {
        ProjectFixture::new()
            .with_manifest(manifests::executable("calc", &["a.c", "b.c"]))
            .with_file("a.c", sources::main_calling("b_value"))
            .with_file("b.c", sources::value_fn("b_value", 2))
    }

    pub fn with_manifest(mut self, manifest: impl Into<String>) -> Self {
        self.manifest = manifest.into();
        self
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    /// Write the fixture under `base`. Returns the manifest path.
    pub fn write_to(&self, base: &Path) -> std::io::Result<PathBuf> {
        for (path, content) in &self.files {
            let full = base.join(path);
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(full, content)?;
        }
        let manifest = base.join(crate::util::config::MANIFEST_NAME);
        fs::write(&manifest, &self.manifest)?;
        Ok(manifest)
    }
}

/// Manifest templates.
pub mod manifests {
    fn quoted(items: &[&str]) -> String {
        items
            .iter()
            .map(|s| format!("\"{}\"", s))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// A single executable target.
    pub fn executable(name: &str, sources: &[&str]) -> String {
        format!(
            r#"[[target]]
name = "{name}"
kind = "executable"
description = "{name} program"
sources = [{}]
"#,
            quoted(sources)
        )
    }

    /// A static library `mathlib` and an executable `app` linking it.
    pub fn library_and_app() -> String {
        r#"[build]
output-dir = "out"
compiler = "gcc"

[[target]]
name = "mathlib"
kind = "static"
sources = ["lib/add.c"]
flags = ["-O2"]

[[target]]
name = "app"
kind = "exe"
description = "Main program"
sources = ["app/main.c"]
libs = ["-lm"]
link = ["mathlib"]
commands = [["echo", "prebuild"]]
"#
        .to_string()
    }
}

/// C source templates.
pub mod sources {
    /// A translation unit defining `int <name>(void)` returning `value`.
    pub fn value_fn(name: &str, value: i32) -> String {
        format!("int {name}(void) {{ return {value}; }}\n")
    }

    /// A `main` returning the result of calling `callee`.
    pub fn main_calling(callee: &str) -> String {
        format!(
            r#"int {callee}(void);

int main(void) {{
    return {callee}() == 2 ? 0 : 1;
}}
"#
        )
    }
}
