//! Sift is an approximate string matching library for Rust.
//!
//! It answers one question: does a short pattern occur in a text within a
//! bounded number of single-character errors (insertions, deletions,
//! substitutions)? The answer comes with a normalized relevance score
//! (0.0 is a perfect match, larger is worse) and the character ranges that
//! participated in the match, ready for highlighting.
//!
//! The matching kernel is the bitap (shift-or) algorithm of Wu and Manber,
//! driven by a threshold controller that progressively tightens the error
//! budget as better candidates are found. Sift is the per-field kernel of a
//! search pipeline: build one [`BitapMatcher`] per query atom, then run it
//! over every field of every record.
//!
//! # Examples
//!
//! ```
//! use sift::{BitapMatcher, MatchOptions, PatternMatcher};
//!
//! let matcher = BitapMatcher::new("hello", MatchOptions::default()).unwrap();
//! let outcome = matcher.match_text("say hello world");
//!
//! assert!(outcome.is_match);
//! assert!(outcome.score < 0.1);
//! assert_eq!(outcome.ranges[0].start, 4);
//! assert_eq!(outcome.ranges[0].end, 8);
//! ```

#![warn(missing_docs)]

#[macro_use]
extern crate log;

pub mod matcher;
pub mod options;
pub mod score;

pub use crate::matcher::alphabet::PatternAlphabet;
pub use crate::matcher::bitap::{BitapMatcher, fuzzy_match, search};
pub use crate::matcher::{IndexType, MatchOutcome, MatchRange, PatternMatcher, ScoreType};
pub use crate::options::{MatchOptions, MatchOptionsBuilder, MatchOptionsBuilderError, OptionsError};
pub use crate::score::compute_score;

//------------------------------------------------------------------------------
/// Case sensitivity mode for matching
#[derive(Eq, PartialEq, Debug, Copy, Clone, Default)]
pub enum CaseMatching {
    /// Case-sensitive matching
    Respect,
    /// Case-insensitive matching
    #[default]
    Ignore,
    /// Smart case: case-insensitive unless the pattern contains uppercase
    Smart,
}
