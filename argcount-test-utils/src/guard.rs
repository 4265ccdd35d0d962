//! Scratch fixture roots for testing
//!
//! Builds fixture directories inside a temporary directory that is removed
//! when the guard is dropped.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

/// A temporary fixture root, cleaned up on drop
pub struct FixtureRootGuard {
  /// The temporary directory holding the case directories
  pub temp_dir: TempDir,
}

impl Default for FixtureRootGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl FixtureRootGuard {
  /// Create an empty fixture root
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    Self { temp_dir }
  }

  /// Path to the fixture root
  pub fn path(&self) -> &Path {
    self.temp_dir.path()
  }

  /// Path to a case directory, whether or not it exists yet
  pub fn case_path(&self, case: &str) -> PathBuf {
    self.path().join(case)
  }

  /// Create an empty case directory
  pub fn create_case(&self, case: &str) -> Result<PathBuf> {
    let dir = self.case_path(case);
    fs::create_dir_all(&dir).with_context(|| format!("Failed to create case directory {}", dir.display()))?;
    Ok(dir)
  }

  /// Write one fixture file, creating the case directory if needed
  pub fn write_file(&self, case: &str, file: &str, contents: impl AsRef<[u8]>) -> Result<PathBuf> {
    let path = self.create_case(case)?.join(file);
    fs::write(&path, contents).with_context(|| format!("Failed to write fixture file {}", path.display()))?;
    Ok(path)
  }
}
