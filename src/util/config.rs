//! Manifest support for the `xbuild` driver.
//!
//! A manifest (`Xbuild.toml`) declares targets without writing a driver
//! program:
//!
//! ```toml
//! [build]
//! output-dir = "dist"
//! compiler = "gcc"
//!
//! [[target]]
//! name = "mathlib"
//! kind = "static"
//! sources = ["lib/add.c"]
//!
//! [[target]]
//! name = "app"
//! kind = "executable"
//! description = "Main program"
//! patterns = ["src/*.c"]
//! exclude = ["src/scratch.c"]
//! flags = ["-Wall"]
//! link = ["mathlib"]
//! commands = [["echo", "building app"]]
//! ```
//!
//! Paths are relative to the directory the build runs in.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::registry::TargetRegistry;
use crate::core::target::{BuildKind, Target, DEFAULT_COMPILER, DEFAULT_OUTPUT_DIR};
use crate::util::process::{find_c_compiler, Command};

/// Default manifest file name.
pub const MANIFEST_NAME: &str = "Xbuild.toml";

/// Parsed manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Manifest {
    /// Defaults applied to every target
    pub build: BuildConfig,

    /// Target definitions, in registration order
    #[serde(rename = "target")]
    pub targets: Vec<TargetConfig>,
}

/// `[build]` defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BuildConfig {
    /// Output directory for every target without its own
    pub output_dir: Option<String>,

    /// Compiler for every target without its own
    pub compiler: Option<String>,
}

/// One `[[target]]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetConfig {
    pub name: String,

    pub kind: BuildKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compiler: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,

    /// Overrides the artifact path derived from the kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_file: Option<String>,

    #[serde(default)]
    pub sources: Vec<String>,

    /// Glob patterns, expanded after `sources`
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Sources removed after patterns are expanded
    #[serde(default)]
    pub exclude: Vec<String>,

    #[serde(default)]
    pub flags: Vec<String>,

    #[serde(default)]
    pub libs: Vec<String>,

    /// Names of library targets to link against
    #[serde(default)]
    pub link: Vec<String>,

    /// Commands run before the link step, each as a token list
    #[serde(default)]
    pub commands: Vec<Vec<String>>,
}

impl Manifest {
    /// Load a manifest from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("failed to parse manifest: {}", path.display()))
    }

    /// Parse a manifest from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Compiler for targets that name none: `[build]`, then `$CC`, then `cc`.
    fn default_compiler(&self) -> String {
        self.build
            .compiler
            .clone()
            .or_else(find_c_compiler)
            .unwrap_or_else(|| DEFAULT_COMPILER.to_string())
    }

    /// Build a registry from the manifest.
    ///
    /// Link names are resolved against the whole manifest, so a library may
    /// be declared after the target that links it.
    pub fn into_registry(self) -> Result<TargetRegistry> {
        let default_dir = self
            .build
            .output_dir
            .clone()
            .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string());
        let default_compiler = self.default_compiler();

        let mut registry = TargetRegistry::new();
        let mut links = Vec::new();

        for config in self.targets {
            let dir = config.output_dir.unwrap_or_else(|| default_dir.clone());
            let mut target = Target::with_output_dir(&config.name, config.kind, dir);

            target.set_compiler(config.compiler.unwrap_or_else(|| default_compiler.clone()));
            if let Some(description) = config.description {
                target.set_description(description);
            }
            if let Some(output_file) = config.output_file {
                target.set_output_file(output_file);
            }

            target.add_sources(config.sources);
            for pattern in &config.patterns {
                target
                    .add_sources_from_pattern(pattern)
                    .with_context(|| format!("in target `{}`", config.name))?;
            }
            for source in &config.exclude {
                target.remove_source(source);
            }

            for flag in config.flags {
                target.add_flag(flag);
            }
            for lib in config.libs {
                target.add_lib(lib);
            }
            for tokens in config.commands {
                if tokens.is_empty() {
                    bail!("target `{}` has an empty command", config.name);
                }
                target.add_command(Command::from_tokens(tokens));
            }

            links.push((config.name, config.link));
            registry.add(target)?;
        }

        for (name, deps) in links {
            for dep in deps {
                let Some(dependency) = registry.get(&dep).cloned() else {
                    bail!("target `{}` links unknown target `{}`", name, dep);
                };
                if let Some(target) = registry.get_mut(&name) {
                    target.link_against(&dependency)?;
                }
            }
        }

        Ok(registry)
    }
}
