//! Fixture case loading
//!
//! A fixture root holds one directory per case. Each case directory may
//! contain `argv`, `stdin`, `stdout`, `stderr` and `return_code` files, each
//! optionally with a `.txt` suffix. When both spellings exist the `.txt`
//! file wins, except for stdin where the bare `stdin` file is used.

use std::path::{Path, PathBuf};
use std::{fs, io};

use thiserror::Error;

/// Errors raised while reading a fixture directory
#[derive(Debug, Error)]
pub enum FixtureError {
  #[error("Failed to read {}: {source}", .path.display())]
  Io { path: PathBuf, source: io::Error },
  #[error("Invalid return code in {}: '{value}'", .path.display())]
  InvalidReturnCode { path: PathBuf, value: String },
}

impl FixtureError {
  fn io(path: &Path, source: io::Error) -> Self {
    FixtureError::Io {
      path: path.to_path_buf(),
      source,
    }
  }
}

/// One invocation of the binary and what it is expected to produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureCase {
  /// Directory name of the case
  pub name: String,
  /// Path to the case directory
  pub dir: PathBuf,
  /// Arguments passed after the invocation name
  pub args: Vec<String>,
  /// Path of the stdin file, if the case has one
  pub stdin_path: Option<PathBuf>,
  pub expected_stdout: Vec<u8>,
  pub expected_stderr: Vec<u8>,
  pub expected_code: i32,
}

impl FixtureCase {
  pub const ARGV: [&'static str; 2] = ["argv", "argv.txt"];
  pub const STDIN: [&'static str; 2] = ["stdin", "stdin.txt"];
  pub const STDOUT: [&'static str; 2] = ["stdout", "stdout.txt"];
  pub const STDERR: [&'static str; 2] = ["stderr", "stderr.txt"];
  pub const RETURN_CODE: [&'static str; 2] = ["return_code", "return_code.txt"];

  /// Load a single case from its directory
  pub fn load(dir: &Path) -> Result<Self, FixtureError> {
    let name = dir
      .file_name()
      .map(|name| name.to_string_lossy().into_owned())
      .unwrap_or_default();

    let args = match read_variant(dir, &Self::ARGV)? {
      Some(bytes) => String::from_utf8_lossy(&bytes)
        .split_whitespace()
        .map(str::to_owned)
        .collect(),
      None => Vec::new(),
    };

    let expected_code = match last_existing(dir, &Self::RETURN_CODE) {
      Some(path) => parse_return_code(&path)?,
      None => 0,
    };

    Ok(Self {
      name,
      dir: dir.to_path_buf(),
      args,
      stdin_path: first_existing(dir, &Self::STDIN),
      expected_stdout: read_variant(dir, &Self::STDOUT)?.unwrap_or_default(),
      expected_stderr: read_variant(dir, &Self::STDERR)?.unwrap_or_default(),
      expected_code,
    })
  }

  /// Bytes to feed to the binary's stdin; empty when the case has none
  pub fn stdin(&self) -> Result<Vec<u8>, FixtureError> {
    match &self.stdin_path {
      Some(path) => fs::read(path).map_err(|e| FixtureError::io(path, e)),
      None => Ok(Vec::new()),
    }
  }

  /// Shell-style rendering of the invocation, for reports
  pub fn command_line(&self, program: &str) -> String {
    let mut line = program.to_string();
    for arg in &self.args {
      line.push(' ');
      line.push_str(arg);
    }
    if let Some(path) = &self.stdin_path {
      line.push_str(&format!(" < {}", path.display()));
    }
    line
  }
}

/// Load every case directory under `root`, sorted by name
pub fn load_cases(root: &Path) -> Result<Vec<FixtureCase>, FixtureError> {
  let entries = fs::read_dir(root).map_err(|e| FixtureError::io(root, e))?;

  let mut dirs = Vec::new();
  for entry in entries {
    let path = entry.map_err(|e| FixtureError::io(root, e))?.path();
    if path.is_dir() {
      dirs.push(path);
    }
  }
  dirs.sort();

  dirs.iter().map(|dir| FixtureCase::load(dir)).collect()
}

/// The first of `names` that exists in `dir`
fn first_existing(dir: &Path, names: &[&str]) -> Option<PathBuf> {
  names.iter().map(|name| dir.join(name)).find(|path| path.is_file())
}

/// The last of `names` that exists in `dir`
fn last_existing(dir: &Path, names: &[&str]) -> Option<PathBuf> {
  names.iter().rev().map(|name| dir.join(name)).find(|path| path.is_file())
}

fn read_variant(dir: &Path, names: &[&str]) -> Result<Option<Vec<u8>>, FixtureError> {
  last_existing(dir, names)
    .map(|path| fs::read(&path).map_err(|e| FixtureError::io(&path, e)))
    .transpose()
}

fn parse_return_code(path: &Path) -> Result<i32, FixtureError> {
  let raw = fs::read_to_string(path).map_err(|e| FixtureError::io(path, e))?;
  let value = raw.trim();
  if value.is_empty() {
    return Ok(0);
  }
  value.parse().map_err(|_| FixtureError::InvalidReturnCode {
    path: path.to_path_buf(),
    value: value.to_string(),
  })
}
