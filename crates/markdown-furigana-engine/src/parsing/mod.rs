//! # Parsing
//!
//! Byte-span utilities over the rope buffer and the ruby annotation grammar.
//!
//! - **`rope`**: `Span`, line iteration with spans, span slicing
//! - **`ruby`**: the `{BASE|READING}` pattern matcher shared by the static
//!   renderer and the live decorator

pub mod rope;
pub mod ruby;
