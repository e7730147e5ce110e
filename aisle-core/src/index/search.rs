//! Search algorithm logic.

use crate::analyzer::fuzzy::Pattern;
use crate::catalog::Catalog;
use crate::index::types::MatchIndex;
use aisle_types::MatchResult;
use rustc_hash::FxHashSet;

impl MatchIndex {
    /// Scores every indexed product against `query`.
    ///
    /// Returns `None` when the query gives no basis for scoring (blank, or
    /// shorter than the configured minimum match length); callers treat that
    /// as "no text filter". Otherwise returns the admitted products in
    /// [`MatchResult`] order. An unmatched query yields an empty list,
    /// never an error.
    pub fn search(&self, query: &str) -> Option<Vec<MatchResult>> {
        let normalized = self.normalizer.normalize(query);
        let query_len = normalized.chars().count();

        if query_len < self.config.min_match_len.max(1) {
            return None;
        }

        let pattern = Pattern::new(&normalized);

        let mut results: Vec<MatchResult> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(position, entry)| {
                self.compute_score(entry, &pattern)
                    .map(|(score, weight)| MatchResult::new(position as u32, score, weight))
            })
            .collect();

        // Positions are unique, so the result order is total.
        results.sort_unstable();

        match results.first() {
            Some(best) => {
                tracing::trace!(query = %normalized, hits = results.len(), %best, "scored query")
            }
            None => tracing::trace!(query = %normalized, "no match"),
        }
        Some(results)
    }

    /// Returns `true` if `query` would be treated as "no query".
    pub fn is_degenerate(&self, query: &str) -> bool {
        let normalized = self.normalizer.normalize(query);
        normalized.chars().count() < self.config.min_match_len.max(1)
    }

    /// Autocomplete: up to `limit` distinct product names in score order.
    ///
    /// `catalog` must be the catalog this index was built from.
    pub fn suggest<'a>(&self, catalog: &'a Catalog, query: &str, limit: usize) -> Vec<&'a str> {
        debug_assert_eq!(catalog.len(), self.len(), "index built from another catalog");

        if limit == 0 {
            return Vec::new();
        }

        let Some(results) = self.search(query) else {
            return Vec::new();
        };

        let mut seen: FxHashSet<&str> = FxHashSet::default();
        results
            .iter()
            .filter_map(|r| catalog.at(r.position))
            .map(|product| product.name.as_str())
            .filter(|name| seen.insert(*name))
            .take(limit)
            .collect()
    }
}
