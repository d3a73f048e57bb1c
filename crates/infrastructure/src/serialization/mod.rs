//! Deterministic JSON output for report files.
//!
//! Report files are written with 2-space indentation and a trailing
//! newline so repeated runs diff cleanly.

mod json;

pub use json::*;
