//! Target registry - the set of targets a driver can build.
//!
//! Targets are kept in registration order, which is also the order
//! `--all` builds them in and the order usage text lists them in.

use crate::core::target::Target;
use crate::util::errors::{BuildError, BuildResult};

/// Named collection of targets.
#[derive(Debug, Clone, Default)]
pub struct TargetRegistry {
    targets: Vec<Target>,
}

impl TargetRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        TargetRegistry {
            targets: Vec::new(),
        }
    }

    /// Register a target. Names must be unique.
    pub fn add(&mut self, target: Target) -> BuildResult<()> {
        if self.contains(target.name()) {
            return Err(BuildError::DuplicateTarget {
                name: target.name().to_string(),
            });
        }
        self.targets.push(target);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Target> {
        self.targets.iter_mut().find(|t| t.name() == name)
    }

    /// Look up a target, failing with [`BuildError::UnknownTarget`].
    pub fn require_mut(&mut self, name: &str) -> BuildResult<&mut Target> {
        self.get_mut(name).ok_or_else(|| BuildError::UnknownTarget {
            name: name.to_string(),
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Target> {
        self.targets.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Target> {
        self.targets.iter_mut()
    }

    pub fn names(&self) -> Vec<&str> {
        self.targets.iter().map(Target::name).collect()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Create the output directories of every target.
    pub fn ensure_layout(&self) -> BuildResult<()> {
        for target in &self.targets {
            target.ensure_layout()?;
        }
        Ok(())
    }

    /// Usage text listing every target and the accepted options.
    pub fn usage(&self, program: &str) -> String {
        let mut out = format!("Usage: {} <target name> [options]\n", program);
        out.push_str("Targets:\n");
        for target in &self.targets {
            out.push_str(&format!("\t{}", target.name()));
            if let Some(description) = target.description() {
                out.push_str(&format!(" - {}", description));
            }
            out.push('\n');
        }
        out.push('\n');
        out.push_str("Options:\n");
        out.push_str("\t-h, --help\t\tPrint this help message\n");
        out.push_str("\t-a, --all\t\tBuild all targets\n");
        out.push_str("\t-c, --clean\t\tClean all targets\n");
        out.push_str("\t-t, --auto\t\tBuild the targets that need to be built\n");
        out
    }
}

impl<'a> IntoIterator for &'a TargetRegistry {
    type Item = &'a Target;
    type IntoIter = std::slice::Iter<'a, Target>;

    fn into_iter(self) -> Self::IntoIter {
        self.targets.iter()
    }
}
