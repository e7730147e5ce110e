//! Scoring functions.
//!
//! A product's score is the weighted average of the scores of the fields
//! that matched. Fields that did not match stay out of the average instead
//! of dragging it towards 1; their weight still counts when ranking, as the
//! summed weight of the matched fields breaks score ties.

use crate::analyzer::fuzzy::Pattern;
use crate::index::types::{IndexedProduct, MatchIndex, SCORE_EPSILON};
use aisle_types::Field;

impl MatchIndex {
    /// Best score of `pattern` against any value of `field`.
    #[inline]
    pub(crate) fn field_score(
        &self,
        entry: &IndexedProduct,
        field: Field,
        pattern: &Pattern,
    ) -> Option<f64> {
        let threshold = self.config.threshold;
        let min_len = self.config.min_match_len;

        entry
            .field(field)
            .iter()
            .filter_map(|value| pattern.score(&value.text, &value.chars, threshold, min_len))
            .min_by(f64::total_cmp)
    }

    /// Combined score and matched weight of one product, or `None` if it
    /// should be dropped.
    pub(crate) fn compute_score(
        &self,
        entry: &IndexedProduct,
        pattern: &Pattern,
    ) -> Option<(f64, f64)> {
        let weights = &self.config.weights;
        let mut weighted = 0.0;
        let mut total_weight = 0.0;

        for field in Field::ALL {
            let weight = weights.weight(field);
            if weight <= 0.0 {
                continue;
            }
            if let Some(score) = self.field_score(entry, field, pattern) {
                weighted += weight * score;
                total_weight += weight;
            }
        }

        if total_weight == 0.0 {
            return None;
        }

        let score = (weighted / total_weight).clamp(0.0, 1.0);
        (score <= self.config.threshold + SCORE_EPSILON).then_some((score, total_weight))
    }
}
