//! # argcount
//!
//! Dispatches on the number of command-line arguments: echo a single
//! argument, reject exactly two, or echo one byte from stdin otherwise.

pub mod consts;
pub mod dispatch;

pub use dispatch::{Branch, Dispatcher, Outcome, StdinByte, classify, read_one_byte};
