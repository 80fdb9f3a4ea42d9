//! Command implementations behind the `ctable` binary.
//!
//! Everything here works on already-read file contents and returns the text to print, so the
//! binary only deals with arguments, files and exit codes.

pub mod commands;
pub mod logging;
