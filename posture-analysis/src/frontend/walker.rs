//! Deterministic source-file discovery.

use std::path::{Path, PathBuf};

use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use tracing::debug;

use posture_core::config::PostureConfig;
use posture_core::errors::ScanError;

const SOURCE_EXTENSIONS: [&str; 2] = ["java", "kt"];

/// Directories never worth descending into, wherever they appear.
const SKIP_DIRS: [&str; 6] = ["target", "build", "out", ".git", ".idea", "node_modules"];

/// Directory names that mark test trees.
const TEST_DIRS: [&str; 2] = ["test", "tests"];

/// Walks a project tree and returns every scannable source file, sorted so
/// repeated scans of the same tree see files in the same order.
pub struct SourceWalker {
    exclude: Vec<String>,
    include_tests: bool,
}

impl SourceWalker {
    pub fn new() -> Self {
        Self {
            exclude: Vec::new(),
            include_tests: false,
        }
    }

    pub fn from_config(config: &PostureConfig) -> Self {
        Self {
            exclude: config.exclude.clone(),
            include_tests: config.effective_include_tests(),
        }
    }

    pub fn walk(&self, root: &Path) -> Result<Vec<PathBuf>, ScanError> {
        if !root.exists() {
            return Err(ScanError::MissingRoot(root.to_path_buf()));
        }

        let mut overrides = OverrideBuilder::new(root);
        for pattern in &self.exclude {
            // Negated override: matching paths are dropped from the walk.
            let negated = format!("!{pattern}");
            overrides
                .add(&negated)
                .map_err(|e| ScanError::InvalidExclude {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })?;
        }
        let overrides = overrides.build().map_err(|e| ScanError::Walk {
            root: root.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut files = Vec::new();
        for entry in WalkBuilder::new(root).overrides(overrides).build() {
            let entry = entry.map_err(|e| ScanError::Walk {
                root: root.to_path_buf(),
                message: e.to_string(),
            })?;
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            let path = entry.path();
            if !has_source_extension(path) || self.is_skipped(path, root) {
                continue;
            }
            files.push(path.to_path_buf());
        }
        files.sort();
        debug!(root = %root.display(), files = files.len(), "source walk complete");
        Ok(files)
    }

    fn is_skipped(&self, path: &Path, root: &Path) -> bool {
        let relative = path.strip_prefix(root).unwrap_or(path);
        relative.components().any(|component| {
            let name = component.as_os_str().to_string_lossy();
            SKIP_DIRS.contains(&name.as_ref())
                || (!self.include_tests && TEST_DIRS.contains(&name.as_ref()))
        })
    }
}

impl Default for SourceWalker {
    fn default() -> Self {
        Self::new()
    }
}

fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SOURCE_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}
