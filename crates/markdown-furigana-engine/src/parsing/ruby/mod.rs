//! # Ruby Annotation Grammar
//!
//! Matches `{BASE|READING[|READING...]}` runs and turns them into [`Ruby`]
//! values pairing each base unit with its reading.
//!
//! ## Modules
//!
//! - **`kinds`**: delimiters and the character classes of the wire format
//! - **`types`**: `Ruby`, `RubyPair`, `RubyMatch`
//! - **`matcher`**: `candidates()` / `find_matches()` lazy scans
//!
//! ## Expansion
//!
//! With a single reading segment the whole base run is one unit:
//! `{日本|にほん}` pairs `日本` with `にほん`. With several segments every
//! base character is a unit and the counts must agree: `{日本|に|ほん}`.
//! Candidates whose counts disagree are dropped and stay literal text.

pub mod kinds;
pub mod matcher;
pub mod types;

pub use matcher::{Candidate, candidates, find_matches, find_matches_at};
pub use types::{Ruby, RubyMatch, RubyPair};
