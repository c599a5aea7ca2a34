//! Approximate matching: the per-pattern alphabet, the bit-parallel scanner,
//! and the matcher objects built on top of them.

/// Per-pattern character bit-mask table
pub mod alphabet;
/// Bit-parallel scanner and matcher
pub mod bitap;
mod util;

/// Character index into a text. All offsets reported by this crate count
/// characters, not bytes.
pub type IndexType = usize;

/// Normalized match score. 0.0 is a perfect match at the expected location;
/// values grow with error count and distance from the expected location and
/// are not bounded above.
pub type ScoreType = f64;

/// Width of one bit-vector word. Patterns longer than this are covered by
/// concatenating words and carrying the shifted-out bit into the next one.
pub(crate) const WORD_BITS: usize = u64::BITS as usize;

//------------------------------------------------------------------------------
/// A contiguous run of matched characters, inclusive on both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchRange {
    /// Index of the first matched character
    pub start: IndexType,
    /// Index of the last matched character
    pub end: IndexType,
}

/// Result of matching one pattern against one text.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchOutcome {
    /// Whether the pattern was found within the configured threshold
    pub is_match: bool,
    /// Score of the best accepted alignment; 1.0 when nothing matched
    pub score: ScoreType,
    /// Matched character runs, disjoint and ordered by start. Empty when
    /// `is_match` is false or no run reaches the configured minimum length.
    pub ranges: Vec<MatchRange>,
}

//------------------------------------------------------------------------------
/// A matcher bound to one pattern, usable against many texts.
///
/// A search pipeline holds one matcher per query atom and runs it across
/// every field of every record, usually from a worker pool, so
/// implementations must be shareable across threads.
pub trait PatternMatcher: Send + Sync {
    /// Match the pattern against `text`.
    fn match_text(&self, text: &str) -> MatchOutcome;

    /// True when the pattern occurs in `text` within the configured threshold.
    fn is_match(&self, text: &str) -> bool {
        self.match_text(text).is_match
    }
}
