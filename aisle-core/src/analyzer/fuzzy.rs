//! Approximate substring matching.
//!
//! A pattern matches a text when it occurs *somewhere* inside it with few
//! edits. The distance is Sellers' variant of Levenshtein distance: the
//! alignment may start and end at any text position, so where the match
//! lands never affects its cost.
//!
//! ```text
//! pattern "teal"  vs  text "teak vase"
//!
//!          t e a k   v a s e
//!        0 0 0 0 0 0 0 0 0 0      row 0 is free: a match may start anywhere
//!   t    1 0 1 1 1 1 1 1 1 1
//!   e    2 1 0 1 2 2 2 2 2 1
//!   a    3 2 1 0 1 2 3 2 3 2
//!   l    4 3 2 1 1 2 3 3 3 3      best of the last row = 1
//! ```
//!
//! The per-field score is `distance / pattern_len`, so 0 is an exact
//! occurrence and 1 means nothing usable was found.

use memchr::memmem;
use smallvec::SmallVec;

/// Patterns up to this many chars keep their DP column on the stack.
const INLINE_PATTERN: usize = 32;

/// Longer patterns only match as exact substrings; the edit-distance pass
/// costs `pattern_len * text_len` per field.
pub const MAX_FUZZY_CHARS: usize = 256;

/// Guards `threshold * len` against landing just under an integer.
const ERROR_BUDGET_EPSILON: f64 = 1e-9;

/// Smallest edit distance between `pattern` and any substring of `text`.
///
/// Returns `None` when every alignment needs more than `max_errors` edits.
/// An empty pattern matches everywhere at distance 0.
pub fn substring_distance(pattern: &[char], text: &[char], max_errors: usize) -> Option<usize> {
    let m = pattern.len();
    if m == 0 {
        return Some(0);
    }

    // Any substring is at most text.len() chars long, so at least the
    // difference must be inserted.
    if m.saturating_sub(text.len()) > max_errors {
        return None;
    }

    let mut column: SmallVec<[usize; INLINE_PATTERN + 1]> = (0..=m).collect();
    let mut best = m;

    for &c in text {
        let mut diagonal = column[0];
        for i in 1..=m {
            let cost = usize::from(pattern[i - 1] != c);
            let value = (diagonal + cost)
                .min(column[i] + 1)
                .min(column[i - 1] + 1);
            diagonal = column[i];
            column[i] = value;
        }

        best = best.min(column[m]);
        if best == 0 {
            break;
        }
    }

    (best <= max_errors).then_some(best)
}

/// A normalized query prepared for repeated scoring.
///
/// Holds both the UTF-8 bytes (for the exact-substring fast path) and the
/// decoded chars (for the edit-distance pass).
pub struct Pattern {
    chars: Box<[char]>,
    finder: memmem::Finder<'static>,
}

impl Pattern {
    /// Prepares an already-normalized query.
    pub fn new(normalized: &str) -> Self {
        Self {
            chars: normalized.chars().collect(),
            finder: memmem::Finder::new(normalized.as_bytes()).into_owned(),
        }
    }

    /// Length in chars.
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Returns `true` for an empty pattern.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Largest number of edits a match may need to stay within `threshold`.
    #[inline]
    pub fn error_budget(&self, threshold: f64) -> usize {
        let budget = (threshold.clamp(0.0, 1.0) * self.chars.len() as f64 + ERROR_BUDGET_EPSILON)
            .floor();
        budget as usize
    }

    /// Scores this pattern against one normalized text.
    ///
    /// `text` and `text_chars` must describe the same string. Returns the
    /// score in `[0, 1]`, or `None` if the best alignment exceeds `threshold`
    /// or covers fewer than `min_match_len` chars. Patterns longer than
    /// [`MAX_FUZZY_CHARS`] score only on an exact occurrence.
    pub fn score(
        &self,
        text: &str,
        text_chars: &[char],
        threshold: f64,
        min_match_len: usize,
    ) -> Option<f64> {
        let m = self.chars.len();
        if m == 0 || m < min_match_len {
            return None;
        }

        if self.finder.find(text.as_bytes()).is_some() {
            return Some(0.0);
        }
        if m > MAX_FUZZY_CHARS {
            return None;
        }

        let distance = substring_distance(&self.chars, text_chars, self.error_budget(threshold))?;

        // The aligned region keeps at least m - distance pattern chars.
        if m - distance < min_match_len {
            return None;
        }

        Some(distance as f64 / m as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn dist(pattern: &str, text: &str) -> Option<usize> {
        substring_distance(&chars(pattern), &chars(text), usize::MAX)
    }

    fn score(pattern: &str, text: &str, threshold: f64) -> Option<f64> {
        Pattern::new(pattern).score(text, &chars(text), threshold, 2)
    }

    #[test]
    fn exact_occurrence_is_zero() {
        assert_eq!(dist("teal", "teal vase"), Some(0));
        assert_eq!(dist("vase", "teal vase"), Some(0));
        assert_eq!(dist("al va", "teal vase"), Some(0));
    }

    #[test]
    fn one_edit() {
        assert_eq!(dist("teal", "teak vase"), Some(1)); // substitution
        assert_eq!(dist("teal", "tel"), Some(1)); // deletion
        assert_eq!(dist("teal", "steals"), Some(0));
        assert_eq!(dist("vase", "vasse"), Some(1)); // insertion
    }

    #[test]
    fn position_does_not_matter() {
        let near = dist("lamp", "lmap desk").unwrap();
        let far = dist("lamp", "a very long description before lmap").unwrap();
        assert_eq!(near, far);
    }

    #[test]
    fn no_similarity_is_pattern_length() {
        assert_eq!(dist("xyz", "abc"), Some(3));
        assert_eq!(dist("abc", ""), Some(3));
    }

    #[test]
    fn budget_cuts_off() {
        assert_eq!(substring_distance(&chars("teal"), &chars("teak"), 0), None);
        assert_eq!(substring_distance(&chars("teal"), &chars("teak"), 1), Some(1));
        assert_eq!(substring_distance(&chars("teapot"), &chars("te"), 3), None);
    }

    #[test]
    fn empty_pattern_matches_everywhere() {
        assert_eq!(substring_distance(&[], &chars("anything"), 0), Some(0));
    }

    #[test]
    fn long_patterns_spill_to_heap() {
        let pattern = "x".repeat(INLINE_PATTERN * 2);
        let mut text = pattern.clone();
        text.replace_range(10..11, "y");
        assert_eq!(dist(&pattern, &text), Some(1));
    }

    #[test]
    fn error_budget_rounds_down() {
        let p = Pattern::new("teal");
        assert_eq!(p.error_budget(0.3), 1);
        assert_eq!(p.error_budget(0.0), 0);
        assert_eq!(Pattern::new("abcdefghij").error_budget(0.3), 3);
        assert_eq!(Pattern::new("ab").error_budget(0.3), 0);
    }

    #[test]
    fn score_is_distance_over_length() {
        assert_eq!(score("teal", "teal vase", 0.3), Some(0.0));
        assert_eq!(score("teal", "teak vase", 0.3), Some(0.25));
        assert_eq!(score("teal", "decor", 0.3), None);
    }

    #[test]
    fn short_patterns_never_score() {
        assert_eq!(score("t", "teal", 1.0), None);
        assert_eq!(score("", "teal", 1.0), None);
    }

    #[test]
    fn alignment_must_cover_min_length() {
        // With a permissive threshold "ab" could align to a single "a" char.
        assert_eq!(score("ab", "a", 1.0), None);
        assert_eq!(score("ab", "xab", 1.0), Some(0.0));
    }

    #[test]
    fn very_long_patterns_match_exactly_only() {
        let long = "x".repeat(MAX_FUZZY_CHARS + 44);
        assert_eq!(score(&long, &long, 0.3), Some(0.0));
        assert_eq!(score(&long, &format!("a {long} b"), 0.3), Some(0.0));

        let mut typo = long.clone();
        typo.replace_range(5..6, "y");
        assert_eq!(score(&typo, &long, 0.3), None);

        let at_limit = "x".repeat(MAX_FUZZY_CHARS);
        let mut near = at_limit.clone();
        near.replace_range(5..6, "y");
        assert!(score(&at_limit, &near, 0.3).is_some());
    }

    #[test]
    fn unicode_chars_count_once() {
        assert_eq!(score("café", "cafe", 0.3), Some(0.25));
        assert_eq!(dist("naïve", "naive"), Some(1));
    }
}
