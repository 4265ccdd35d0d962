//! Running fixture cases and reporting results

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use assert_cmd::Command;

use crate::fixture::FixtureCase;

/// Upper bound on a single case's run time
pub const CASE_TIMEOUT: Duration = Duration::from_secs(30);

/// Name used when rendering command lines in reports
pub const PROGRAM_LABEL: &str = "argcount";

/// One observable difference between a run and its fixture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
  Stdout { actual: Vec<u8>, expected: Vec<u8> },
  Stderr { actual: Vec<u8>, expected: Vec<u8> },
  ExitCode { actual: Option<i32>, expected: i32 },
}

impl fmt::Display for Mismatch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Mismatch::Stdout { actual, expected } => write_stream(f, "stdout", actual, expected),
      Mismatch::Stderr { actual, expected } => write_stream(f, "stderr", actual, expected),
      Mismatch::ExitCode { actual, expected } => {
        let actual = actual.map_or_else(|| "none (killed by signal)".to_string(), |code| code.to_string());
        writeln!(f, "There was an error with the exit code:\nOutput:\n{actual}\nExpected:\n{expected}")
      }
    }
  }
}

fn write_stream(f: &mut fmt::Formatter<'_>, stream: &str, actual: &[u8], expected: &[u8]) -> fmt::Result {
  writeln!(
    f,
    "There was an error with {stream}:\nOutput:\n{}\nExpected:\n{}",
    String::from_utf8_lossy(actual),
    String::from_utf8_lossy(expected)
  )
}

/// Result of running one fixture case
#[derive(Debug, Clone)]
pub struct CaseReport {
  pub name: String,
  pub command_line: String,
  pub mismatches: Vec<Mismatch>,
}

impl CaseReport {
  pub fn passed(&self) -> bool {
    self.mismatches.is_empty()
  }

  /// Every mismatch, concatenated; empty when the case passed
  pub fn failure_message(&self) -> String {
    self.mismatches.iter().map(ToString::to_string).collect()
  }
}

impl fmt::Display for CaseReport {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.passed() {
      write!(f, "{}: {}: Success! :)", self.name, self.command_line)
    } else {
      write!(
        f,
        "{}: {}: Failed! :(\n{}",
        self.name,
        self.command_line,
        self.failure_message()
      )
    }
  }
}

impl FixtureCase {
  /// Run this case on `cmd`, a command already pointing at the binary
  pub fn run(&self, mut cmd: Command) -> Result<CaseReport> {
    let stdin = self.stdin()?;
    let output = cmd
      .args(&self.args)
      .write_stdin(stdin)
      .timeout(CASE_TIMEOUT)
      .output()
      .with_context(|| format!("Failed to run fixture case '{}'", self.name))?;

    Ok(self.compare(output.status.code(), output.stdout, output.stderr))
  }

  /// Compare captured results against this case's expectations
  pub fn compare(&self, code: Option<i32>, stdout: Vec<u8>, stderr: Vec<u8>) -> CaseReport {
    let mut mismatches = Vec::new();

    if code != Some(self.expected_code) {
      mismatches.push(Mismatch::ExitCode {
        actual: code,
        expected: self.expected_code,
      });
    }
    if stdout != self.expected_stdout {
      mismatches.push(Mismatch::Stdout {
        actual: stdout,
        expected: self.expected_stdout.clone(),
      });
    }
    if stderr != self.expected_stderr {
      mismatches.push(Mismatch::Stderr {
        actual: stderr,
        expected: self.expected_stderr.clone(),
      });
    }

    CaseReport {
      name: self.name.clone(),
      command_line: self.command_line(PROGRAM_LABEL),
      mismatches,
    }
  }
}

/// Totals across a run of fixture cases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
  pub failed: usize,
  pub total: usize,
}

impl Summary {
  pub fn from_reports(reports: &[CaseReport]) -> Self {
    Self {
      failed: reports.iter().filter(|report| !report.passed()).count(),
      total: reports.len(),
    }
  }

  pub const fn all_passed(&self) -> bool {
    self.failed == 0
  }
}

impl fmt::Display for Summary {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.all_passed() {
      write!(f, "All tests have been performed. No error!")
    } else {
      write!(f, "Number of failed tests: {}/{}", self.failed, self.total)
    }
  }
}
