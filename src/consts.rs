//! Constants shared by the dispatcher and the binary entrypoint.

/// Message written to stderr when exactly two arguments are supplied.
pub const USAGE_ERROR_MESSAGE: &str = "error :(";

/// Exit code for the two-argument path.
pub const USAGE_ERROR_EXIT_CODE: u8 = 1;

/// Byte echoed in place of a character when stdin has nothing to give.
pub const END_OF_INPUT_BYTE: u8 = 0xFF;

/// Environment variable holding the `tracing` filter directives.
///
/// Logging is off unless this is set, since stderr is part of the
/// program's observable output.
pub const ENV_LOG_FILTER: &str = "ARGCOUNT_LOG";
