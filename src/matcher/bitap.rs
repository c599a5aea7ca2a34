//! Bit-parallel approximate matching, after Wu and Manber's agrep.
//!
//! For each error level `d` the scanner keeps a bit-vector row `R[d]` per
//! text position: bit `i` (counted from the high end) is set when the first
//! `i + 1` pattern characters align with the text at that position within
//! `d` errors. A row is advanced by shifting and masking with the current
//! character's alphabet mask (exact extension) and OR-ing in shifted
//! variants of the previous level's rows (substitution, insertion,
//! deletion). A set top bit means the whole pattern aligns there.
//!
//! Rows are flat `u64` buffers; a pattern longer than 64 characters simply
//! occupies several words per position, with the shifted-out top bit of
//! each word carried into the next. One scan therefore stays exact across
//! the word boundary, and long patterns need no separate handling.
//!
//! The scan is wrapped in a threshold controller: literal occurrences are
//! found first and tighten the working score bound, each error level is
//! restricted (by binary search on the score formula) to the window of
//! locations that could still beat that bound, accepted candidates tighten
//! it further, and deeper levels are abandoned as soon as even a perfectly
//! located candidate could no longer qualify.
//!
//! # Example
//!
//! ```
//! use sift::fuzzy_match;
//!
//! let outcome = fuzzy_match("xxabcxx", "abc");
//! assert!(outcome.is_match);
//! assert!((outcome.score - 0.02).abs() < 1e-9);
//! ```

use std::cell::RefCell;
use std::fmt::{Display, Error, Formatter};

use thread_local::ThreadLocal;

use crate::CaseMatching;
use crate::matcher::alphabet::PatternAlphabet;
use crate::matcher::util::{contains_upper, mask_to_ranges};
use crate::matcher::{MatchOutcome, MatchRange, PatternMatcher, WORD_BITS};
use crate::options::{MatchOptions, OptionsError};
use crate::score::compute_score;

//------------------------------------------------------------------------------
// Scan state
//------------------------------------------------------------------------------

/// An accepted alignment: error count and the character offset it starts at.
#[derive(Clone, Copy, Debug)]
struct Candidate {
    errors: usize,
    location: usize,
}

/// Best-so-far accumulator threaded through one scan.
struct ScanState {
    /// Working score bound; starts at the configured threshold and tightens
    /// with every literal occurrence and accepted candidate.
    threshold: f64,
    /// Best candidate accepted so far.
    best: Option<Candidate>,
    /// Score of `best`; 1.0 until something is accepted.
    score: f64,
}

//------------------------------------------------------------------------------
// Core scan
//------------------------------------------------------------------------------

/// Scans `text` for the best approximate occurrence of `pattern`.
///
/// `alphabet` must have been built from `pattern`, `options` must have been
/// validated, and `pattern` must be non-empty; [`BitapMatcher`] wraps all
/// of that, including the degenerate empty-pattern case. This function is
/// the raw kernel for callers that manage patterns and alphabets themselves
/// (for instance to share one alphabet across worker threads).
#[must_use]
pub fn search(
    text: &[char],
    pattern: &[char],
    alphabet: &PatternAlphabet,
    options: &MatchOptions,
) -> MatchOutcome {
    debug_assert!(!pattern.is_empty());
    debug_assert_eq!(pattern.len(), alphabet.pattern_len());

    let pattern_len = pattern.len();
    let text_len = text.len();
    let words = alphabet.words();
    let expected_location = options.location.min(text_len);

    let mut state = ScanState {
        threshold: options.threshold,
        best: None,
        score: 1.0,
    };
    let mut match_mask = vec![false; text_len];

    // Literal occurrences first: each one tightens the working bound before
    // any bit-parallel level runs, and marks its span for highlighting.
    let mut search_from = expected_location;
    while let Some(index) = find_exact(text, pattern, search_from) {
        let score = compute_score(
            pattern_len,
            0,
            index,
            expected_location,
            options.distance,
            options.ignore_location,
        );
        state.threshold = state.threshold.min(score);
        search_from = index + pattern_len;
        for marked in &mut match_mask[index..index + pattern_len] {
            *marked = true;
        }
    }

    // Two rolling rows of bit-vectors, one per text position plus room for
    // an alignment hanging off the end. Row `j` occupies `words`
    // consecutive u64s; unwritten positions read as zero.
    let row_count = text_len + pattern_len + 2;
    let mut current = vec![0u64; row_count * words];
    let mut last = vec![0u64; row_count * words];

    let hi_word = (pattern_len - 1) / WORD_BITS;
    let hi_bit = 1u64 << ((pattern_len - 1) % WORD_BITS);

    let mut bin_max = pattern_len + text_len;

    for errors in 0..pattern_len {
        // Widest distance from the expected location that still scores
        // within the working bound at this error level.
        let mut bin_min = 0;
        let mut bin_mid = bin_max;
        while bin_min < bin_mid {
            let score = compute_score(
                pattern_len,
                errors,
                expected_location + bin_mid,
                expected_location,
                options.distance,
                options.ignore_location,
            );
            if score <= state.threshold {
                bin_min = bin_mid;
            } else {
                bin_max = bin_mid;
            }
            bin_mid = (bin_max - bin_min) / 2 + bin_min;
        }
        bin_max = bin_mid;

        let mut start = expected_location.saturating_sub(bin_mid) + 1;
        let finish = if options.find_all_matches {
            text_len
        } else {
            (expected_location + bin_mid).min(text_len) + pattern_len
        };

        current.fill(0);
        // Seed the far edge: `errors` pattern characters may be dropped
        // outright at this level.
        set_low_bits(
            &mut current[(finish + 1) * words..(finish + 2) * words],
            errors,
        );

        let mut j = finish;
        while j >= start {
            let current_location = j - 1;
            let char_mask = if current_location < text_len {
                alphabet.mask(text[current_location])
            } else {
                None
            };

            if current_location < text_len {
                match_mask[current_location] = char_mask.is_some();
            }

            // R[errors] at `j` from R[errors] at `j + 1` (exact extension)
            // and the previous level's rows at both positions
            // (substitution, insertion, deletion), word by word with the
            // shifted-out bit carried across.
            let base = j * words;
            let next = base + words;
            for w in 0..words {
                let carry = if w == 0 {
                    1
                } else {
                    current[next + w - 1] >> (WORD_BITS - 1)
                };
                let mut row = ((current[next + w] << 1) | carry)
                    & char_mask.map_or(0, |mask| mask[w]);

                if errors > 0 {
                    let edits = last[next + w] | last[base + w];
                    let edit_carry = if w == 0 {
                        1
                    } else {
                        (last[next + w - 1] | last[base + w - 1]) >> (WORD_BITS - 1)
                    };
                    row |= ((edits << 1) | edit_carry) | last[next + w];
                }

                current[base + w] = row;
            }

            if current[base + hi_word] & hi_bit != 0 {
                let score = compute_score(
                    pattern_len,
                    errors,
                    current_location,
                    expected_location,
                    options.distance,
                    options.ignore_location,
                );
                if score <= state.threshold {
                    let candidate = Candidate {
                        errors,
                        location: current_location,
                    };
                    trace!("accepted {candidate:?}, score {score:.4}");
                    state.threshold = score;
                    state.score = score;
                    state.best = Some(candidate);

                    if current_location <= expected_location {
                        // Everything further down scores strictly worse.
                        break;
                    }
                    // Mirror the accepted location around the expected one;
                    // the far side of that cannot score better.
                    start = 1.max((2 * expected_location).saturating_sub(current_location));
                }
            }

            j -= 1;
        }

        // A perfectly located candidate with one more error is the best any
        // deeper level could produce; stop once even that cannot qualify.
        let lookahead = compute_score(
            pattern_len,
            errors + 1,
            expected_location,
            expected_location,
            options.distance,
            options.ignore_location,
        );
        if lookahead > state.threshold {
            trace!("no viable candidate beyond {errors} error(s)");
            break;
        }

        std::mem::swap(&mut current, &mut last);
    }

    if let Some(best) = &state.best {
        debug!(
            "best alignment starts at {} with {} error(s)",
            best.location, best.errors
        );
    }

    let ranges = mask_to_ranges(&match_mask, options.min_match_char_length);
    let is_match = state.best.is_some() && !ranges.is_empty();
    MatchOutcome {
        is_match,
        score: state.score,
        ranges: if is_match { ranges } else { Vec::new() },
    }
}

/// First literal occurrence of `pattern` in `text` at or after `from`.
fn find_exact(text: &[char], pattern: &[char], from: usize) -> Option<usize> {
    let tail = text.get(from..)?;
    tail.windows(pattern.len())
        .position(|window| window == pattern)
        .map(|pos| pos + from)
}

/// Set the `count` lowest bits of one row.
fn set_low_bits(row: &mut [u64], count: usize) {
    let full = count / WORD_BITS;
    for word in &mut row[..full] {
        *word = !0;
    }
    if count % WORD_BITS != 0 {
        row[full] = (1u64 << (count % WORD_BITS)) - 1;
    }
}

//------------------------------------------------------------------------------
// Matcher object
//------------------------------------------------------------------------------

/// A reusable approximate matcher for one pattern.
///
/// Construction folds the pattern according to the configured case mode and
/// builds its alphabet once; [`match_text`](PatternMatcher::match_text) can
/// then be called against any number of texts, from any number of threads.
#[derive(Debug)]
pub struct BitapMatcher {
    query: String,
    pattern: Vec<char>,
    alphabet: PatternAlphabet,
    options: MatchOptions,
    case_sensitive: bool,
    text_cache: ThreadLocal<RefCell<Vec<char>>>,
}

impl BitapMatcher {
    /// Creates a matcher for `pattern`, rejecting malformed options.
    pub fn new(pattern: &str, options: MatchOptions) -> Result<Self, OptionsError> {
        options.validate()?;

        let case_sensitive = match options.case {
            CaseMatching::Respect => true,
            CaseMatching::Ignore => false,
            CaseMatching::Smart => contains_upper(pattern),
        };

        let mut chars: Vec<char> = pattern.chars().collect();
        if !case_sensitive {
            for ch in &mut chars {
                *ch = ch.to_ascii_lowercase();
            }
        }
        let alphabet = PatternAlphabet::new(&chars);
        debug!(
            "bitap matcher for {:?}: {} char(s), {} mask word(s)",
            pattern,
            chars.len(),
            alphabet.words()
        );

        Ok(BitapMatcher {
            query: pattern.to_string(),
            pattern: chars,
            alphabet,
            options,
            case_sensitive,
            text_cache: ThreadLocal::new(),
        })
    }

    /// The alphabet built for this pattern, shareable across scans.
    #[must_use]
    pub fn alphabet(&self) -> &PatternAlphabet {
        &self.alphabet
    }

    /// The options this matcher was built with.
    #[must_use]
    pub fn options(&self) -> &MatchOptions {
        &self.options
    }
}

impl PatternMatcher for BitapMatcher {
    fn match_text(&self, text: &str) -> MatchOutcome {
        // An empty pattern trivially matches anything, perfectly.
        if self.pattern.is_empty() {
            return MatchOutcome {
                is_match: true,
                score: 0.0,
                ranges: Vec::new(),
            };
        }

        let mut text_chars = self
            .text_cache
            .get_or(|| RefCell::new(Vec::new()))
            .borrow_mut();
        text_chars.clear();
        text_chars.extend(text.chars());
        if !self.case_sensitive {
            for ch in text_chars.iter_mut() {
                *ch = ch.to_ascii_lowercase();
            }
        }

        if *text_chars == self.pattern {
            return MatchOutcome {
                is_match: true,
                score: 0.0,
                ranges: vec![MatchRange {
                    start: 0,
                    end: self.pattern.len() - 1,
                }],
            };
        }

        search(&text_chars, &self.pattern, &self.alphabet, &self.options)
    }
}

impl Display for BitapMatcher {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "(Bitap: {})", self.query)
    }
}

//------------------------------------------------------------------------------
// Convenience free functions
//------------------------------------------------------------------------------

/// Matches `pattern` against `text` with default options.
///
/// ```
/// assert!(sift::fuzzy_match("hello world", "hlelo").is_match);
/// assert!(!sift::fuzzy_match("hello world", "xyzzy").is_match);
/// ```
#[must_use]
pub fn fuzzy_match(text: &str, pattern: &str) -> MatchOutcome {
    let matcher =
        BitapMatcher::new(pattern, MatchOptions::default()).expect("default options are valid");
    matcher.match_text(text)
}

//------------------------------------------------------------------------------
// Tests
//------------------------------------------------------------------------------
