//! Configuration options for matching.
//!
//! `MatchOptions` carries everything a scan needs beyond the pattern and the
//! text: where the match is expected, how strongly displacement is punished,
//! and how good a candidate must be to count as a match.
//!
//! ```
//! use sift::MatchOptionsBuilder;
//!
//! let options = MatchOptionsBuilder::default()
//!     .threshold(0.4)
//!     .ignore_location(true)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(options.distance, 100);
//! ```

use derive_builder::Builder;
use thiserror::Error;

use crate::CaseMatching;

/// Rejection of a malformed configuration, reported at the matcher boundary
/// instead of silently miscomputing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptionsError {
    /// The score threshold is NaN, infinite, or negative.
    #[error("threshold must be finite and non-negative, got {0}")]
    InvalidThreshold(f64),
}

/// Options controlling one pattern's matching behavior.
#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(build_fn(name = "final_build"))]
#[builder(default)]
pub struct MatchOptions {
    /// Character offset at which the pattern is expected to be found.
    ///
    /// Matches further away score worse, at a rate set by `distance`.
    pub location: usize,

    /// How far from `location` a match may stray before its score degrades
    /// by a full point.
    ///
    /// With the default of 100, an exact match 100 characters away from
    /// `location` scores 1.0. A distance of 0 accepts only matches at
    /// `location` itself.
    pub distance: usize,

    /// Maximum score a candidate may have and still be reported as a match.
    ///
    /// 0.0 demands perfection, 1.0 accepts nearly anything.
    pub threshold: f64,

    /// Score on accuracy alone, wherever the match sits in the text.
    pub ignore_location: bool,

    /// Keep scanning past the first accepted candidate so that every
    /// occurrence lands in the reported ranges.
    pub find_all_matches: bool,

    /// Minimum length of a matched character run to be reported.
    ///
    /// Runs shorter than this are dropped from the outcome's ranges.
    pub min_match_char_length: usize,

    /// Case sensitivity mode.
    pub case: CaseMatching,
}

impl Default for MatchOptions {
    fn default() -> Self {
        MatchOptions {
            location: 0,
            distance: 100,
            threshold: 0.6,
            ignore_location: false,
            find_all_matches: false,
            min_match_char_length: 1,
            case: CaseMatching::Ignore,
        }
    }
}

impl MatchOptions {
    /// Checks the contract on fields whose types cannot enforce it.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(OptionsError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}

impl MatchOptionsBuilder {
    /// Builds the `MatchOptions`, rejecting malformed values.
    pub fn build(&mut self) -> Result<MatchOptions, MatchOptionsBuilderError> {
        let options = self.final_build()?;
        options
            .validate()
            .map_err(|e| MatchOptionsBuilderError::ValidationError(e.to_string()))?;
        Ok(options)
    }
}
