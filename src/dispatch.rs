//! # Argument-count dispatcher
//!
//! Picks one of three fixed behaviors from the number of process arguments
//! (invocation name included) and runs it against injected streams, so the
//! same code path serves the binary and the unit tests.

use std::env;
use std::ffi::{OsStr, OsString};
use std::io::{Read, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::{debug, trace};

use crate::consts::{END_OF_INPUT_BYTE, USAGE_ERROR_EXIT_CODE, USAGE_ERROR_MESSAGE};

/// The behavior selected for a given argument count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
  /// Exactly one user argument: echo it to stdout.
  EchoArgument,
  /// Exactly two user arguments: report the usage error on stderr.
  ReportError,
  /// Any other count: echo a single byte read from stdin.
  EchoStdinByte,
}

/// Select the branch for `count` arguments, counting the invocation name.
pub const fn classify(count: usize) -> Branch {
  match count {
    2 => Branch::EchoArgument,
    3 => Branch::ReportError,
    _ => Branch::EchoStdinByte,
  }
}

/// How a dispatch run ended, as seen by the host environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
  /// An argument or stdin byte was echoed; exit status 0.
  Success,
  /// Exactly two arguments were given; exit status 1.
  UsageError,
}

impl Outcome {
  /// Process exit code for this outcome.
  pub const fn code(self) -> u8 {
    match self {
      Outcome::Success => 0,
      Outcome::UsageError => USAGE_ERROR_EXIT_CODE,
    }
  }
}

impl From<Outcome> for ExitCode {
  fn from(outcome: Outcome) -> Self {
    ExitCode::from(outcome.code())
  }
}

/// Result of reading a single byte from stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdinByte {
  Byte(u8),
  EndOfInput,
}

impl StdinByte {
  /// The byte to echo; end of input is rendered as [`END_OF_INPUT_BYTE`].
  pub const fn as_byte(self) -> u8 {
    match self {
      StdinByte::Byte(byte) => byte,
      StdinByte::EndOfInput => END_OF_INPUT_BYTE,
    }
  }
}

/// Read exactly one byte from `reader`.
///
/// A read error is indistinguishable from end of input at the interface
/// level. `Interrupted` reads are retried by the underlying iterator.
pub fn read_one_byte<R: Read>(reader: R) -> StdinByte {
  match reader.bytes().next() {
    Some(Ok(byte)) => {
      trace!(byte, "read byte from stdin");
      StdinByte::Byte(byte)
    }
    Some(Err(err)) => {
      debug!(error = %err, "stdin unreadable, treating as end of input");
      StdinByte::EndOfInput
    }
    None => {
      debug!("stdin exhausted before a byte was read");
      StdinByte::EndOfInput
    }
  }
}

/// Owns the argument list for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct Dispatcher {
  args: Vec<OsString>,
}

impl Dispatcher {
  /// Build a dispatcher over an explicit argument list. The first element is
  /// the invocation name.
  pub fn new<I, T>(args: I) -> Self
  where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
  {
    Self {
      args: args.into_iter().map(Into::into).collect(),
    }
  }

  /// Build a dispatcher over the arguments this process was started with.
  pub fn from_env() -> Self {
    Self::new(env::args_os())
  }

  /// Number of arguments, invocation name included.
  pub const fn count(&self) -> usize {
    self.args.len()
  }

  /// Branch this dispatcher will take when run.
  pub const fn branch(&self) -> Branch {
    classify(self.count())
  }

  /// Run the selected branch. Output streams are flushed before returning.
  ///
  /// `stdin` is only read on the [`Branch::EchoStdinByte`] path.
  pub fn run<R, W, E>(&self, stdin: R, mut stdout: W, mut stderr: E) -> Result<Outcome>
  where
    R: Read,
    W: Write,
    E: Write,
  {
    let branch = self.branch();
    debug!(count = self.count(), ?branch, "dispatching on argument count");

    match branch {
      Branch::EchoArgument => {
        echo_line(&mut stdout, self.args[1].as_os_str())?;
        Ok(Outcome::Success)
      }
      Branch::ReportError => {
        writeln!(stderr, "{USAGE_ERROR_MESSAGE}").context("Failed to write error message to stderr")?;
        stderr.flush().context("Failed to flush stderr")?;
        Ok(Outcome::UsageError)
      }
      Branch::EchoStdinByte => {
        let byte = read_one_byte(stdin).as_byte();
        stdout
          .write_all(&[byte, b'\n'])
          .context("Failed to write stdin byte to stdout")?;
        stdout.flush().context("Failed to flush stdout")?;
        Ok(Outcome::Success)
      }
    }
  }
}

/// Write the raw bytes of `arg` followed by a newline.
fn echo_line<W: Write>(out: &mut W, arg: &OsStr) -> Result<()> {
  out
    .write_all(arg.as_encoded_bytes())
    .context("Failed to write argument to stdout")?;
  out.write_all(b"\n").context("Failed to write newline to stdout")?;
  out.flush().context("Failed to flush stdout")?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use std::io::{self, Cursor};

  use super::*;

  /// Run `args` against `input` and collect both output streams.
  fn run_with(args: &[&str], input: &[u8]) -> (Outcome, Vec<u8>, Vec<u8>) {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let outcome = Dispatcher::new(args.iter().copied())
      .run(Cursor::new(input.to_vec()), &mut stdout, &mut stderr)
      .expect("dispatch should not fail on in-memory streams");
    (outcome, stdout, stderr)
  }

  struct BrokenReader;

  impl Read for BrokenReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
      Err(io::Error::other("stdin closed"))
    }
  }

  struct BrokenWriter;

  impl Write for BrokenWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
      Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
      Ok(())
    }
  }

  #[test]
  fn classify_covers_every_count() {
    assert_eq!(classify(0), Branch::EchoStdinByte);
    assert_eq!(classify(1), Branch::EchoStdinByte);
    assert_eq!(classify(2), Branch::EchoArgument);
    assert_eq!(classify(3), Branch::ReportError);
    assert_eq!(classify(4), Branch::EchoStdinByte);
    assert_eq!(classify(100), Branch::EchoStdinByte);
  }

  #[test]
  fn branch_follows_argument_count() {
    assert_eq!(Dispatcher::new(["argcount"]).branch(), Branch::EchoStdinByte);
    assert_eq!(Dispatcher::new(["argcount", "a"]).branch(), Branch::EchoArgument);
    assert_eq!(Dispatcher::new(["argcount", "a", "b"]).branch(), Branch::ReportError);

    let empty = Dispatcher::new(Vec::<OsString>::new());
    assert_eq!(empty.count(), 0);
    assert_eq!(empty.branch(), Branch::EchoStdinByte);
  }

  #[test]
  fn single_argument_is_echoed() {
    let (outcome, stdout, stderr) = run_with(&["argcount", "hello"], b"ignored");
    assert_eq!(outcome, Outcome::Success);
    assert_eq!(stdout, b"hello\n");
    assert!(stderr.is_empty());
  }

  #[test]
  fn flag_like_argument_is_echoed_verbatim() {
    let (_, stdout, _) = run_with(&["argcount", "--help"], b"");
    assert_eq!(stdout, b"--help\n");
  }

  #[test]
  fn empty_argument_echoes_bare_newline() {
    let (outcome, stdout, _) = run_with(&["argcount", ""], b"");
    assert_eq!(outcome, Outcome::Success);
    assert_eq!(stdout, b"\n");
  }

  #[test]
  fn two_arguments_report_usage_error() {
    let (outcome, stdout, stderr) = run_with(&["argcount", "a", "b"], b"x");
    assert_eq!(outcome, Outcome::UsageError);
    assert_eq!(outcome.code(), 1);
    assert!(stdout.is_empty());
    assert_eq!(stderr, b"error :(\n");
  }

  #[test]
  fn no_arguments_echo_first_stdin_byte() {
    let (outcome, stdout, stderr) = run_with(&["argcount"], b"Zebra");
    assert_eq!(outcome, Outcome::Success);
    assert_eq!(stdout, b"Z\n");
    assert!(stderr.is_empty());
  }

  #[test]
  fn many_arguments_behave_like_none() {
    let (outcome, stdout, _) = run_with(&["argcount", "w", "x", "y"], b"9");
    assert_eq!(outcome, Outcome::Success);
    assert_eq!(stdout, b"9\n");
  }

  #[test]
  fn empty_argument_list_reads_stdin() {
    let (outcome, stdout, _) = run_with(&[], b"q");
    assert_eq!(outcome, Outcome::Success);
    assert_eq!(stdout, b"q\n");
  }

  #[test]
  fn end_of_input_echoes_sentinel_byte() {
    let (outcome, stdout, stderr) = run_with(&["argcount"], b"");
    assert_eq!(outcome, Outcome::Success);
    assert_eq!(stdout, vec![END_OF_INPUT_BYTE, b'\n']);
    assert!(stderr.is_empty());
  }

  #[test]
  fn unreadable_stdin_is_treated_as_end_of_input() {
    assert_eq!(read_one_byte(BrokenReader), StdinByte::EndOfInput);
  }

  #[test]
  fn only_one_byte_is_consumed() {
    let mut input = Cursor::new(b"ab".to_vec());
    assert_eq!(read_one_byte(&mut input), StdinByte::Byte(b'a'));
    assert_eq!(input.position(), 1);
  }

  #[test]
  fn multibyte_input_echoes_only_the_first_byte() {
    let (_, stdout, _) = run_with(&["argcount"], "é".as_bytes());
    assert_eq!(stdout, vec![0xC3, b'\n']);
  }

  #[test]
  fn write_failure_is_propagated() {
    let result = Dispatcher::new(["argcount", "hello"]).run(io::empty(), BrokenWriter, Vec::new());
    let err = result.expect_err("broken stdout should surface an error");
    assert!(err.to_string().contains("stdout"));
  }

  #[test]
  fn outcome_codes_match_exit_statuses() {
    assert_eq!(Outcome::Success.code(), 0);
    assert_eq!(Outcome::UsageError.code(), USAGE_ERROR_EXIT_CODE);
  }
}
