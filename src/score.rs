//! Score computation for match candidates.
//!
//! The score folds two signals into one comparable number: *accuracy* (error
//! count normalized by pattern length) and *proximity* (how far the match
//! sits from the location the caller expected). 0.0 is a perfect,
//! correctly-located match; values grow as either signal degrades and are
//! not bounded above. Callers compare against a threshold, not against 1.0.

/// Converts a raw match candidate into a normalized score.
///
/// `errors` is the number of single-character edits in the alignment,
/// `current_location` the character offset at which it starts, and
/// `expected_location` where the caller expected the match. `distance`
/// controls how strongly the offset between the two degrades the score;
/// when it is 0, any misplaced match scores a full 1.0. With
/// `ignore_location` the score is the accuracy alone.
///
/// An empty pattern is treated as trivially matching: its accuracy is 0.
///
/// ```
/// use sift::compute_score;
///
/// // Two errors in a four-character pattern, at the expected location.
/// assert_eq!(compute_score(4, 2, 0, 0, 100, false), 0.5);
/// // An exact match thirty characters away at the default distance.
/// assert_eq!(compute_score(4, 0, 30, 0, 100, false), 0.3);
/// ```
#[must_use]
pub fn compute_score(
    pattern_len: usize,
    errors: usize,
    current_location: usize,
    expected_location: usize,
    distance: usize,
    ignore_location: bool,
) -> f64 {
    let accuracy = if pattern_len == 0 {
        0.0
    } else {
        errors as f64 / pattern_len as f64
    };

    if ignore_location {
        return accuracy;
    }

    let proximity = expected_location.abs_diff(current_location);

    if distance == 0 {
        return if proximity > 0 { 1.0 } else { accuracy };
    }

    accuracy + proximity as f64 / distance as f64
}

#[cfg(test)]
#[cfg_attr(coverage, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn perfect_match_scores_zero() {
        assert_eq!(compute_score(3, 0, 0, 0, 100, false), 0.0);
        assert_eq!(compute_score(3, 0, 42, 42, 100, false), 0.0);
    }

    #[test]
    fn monotone_in_errors() {
        let mut prev = 0.0;
        for errors in 0..=8 {
            let score = compute_score(8, errors, 5, 5, 100, false);
            assert!(score >= prev, "errors={errors}: {score} < {prev}");
            prev = score;
        }
    }

    #[test]
    fn monotone_in_proximity() {
        let mut prev = 0.0;
        for location in 0..200 {
            let score = compute_score(8, 0, location, 0, 100, false);
            assert!(score >= prev, "location={location}: {score} < {prev}");
            prev = score;
        }
    }

    #[test]
    fn ignore_location_depends_only_on_accuracy() {
        for location in [0, 3, 77, 10_000] {
            assert_eq!(compute_score(4, 1, location, 0, 100, true), 0.25);
        }
    }

    #[test]
    fn zero_distance_is_all_or_nothing() {
        assert_eq!(compute_score(4, 1, 7, 7, 0, false), 0.25);
        assert_eq!(compute_score(4, 1, 8, 7, 0, false), 1.0);
        assert_eq!(compute_score(4, 0, 0, 100, 0, false), 1.0);
    }

    #[test]
    fn scores_may_exceed_one() {
        assert!(compute_score(2, 2, 500, 0, 100, false) > 1.0);
    }

    #[test]
    fn empty_pattern_is_trivially_accurate() {
        assert_eq!(compute_score(0, 0, 0, 0, 100, true), 0.0);
        assert_eq!(compute_score(0, 0, 0, 0, 100, false), 0.0);
    }

    #[test]
    fn proximity_is_symmetric() {
        let before = compute_score(5, 0, 10, 30, 100, false);
        let after = compute_score(5, 0, 50, 30, 100, false);
        assert_eq!(before, after);
    }
}
