//! Index types and constants.

use crate::analyzer::normalizer::TextNormalizer;

use aisle_types::{Field, MatchConfig};

use smallvec::SmallVec;

/// Slack allowed when comparing a combined score to the threshold.
pub const SCORE_EPSILON: f64 = 1e-9;

/// One normalized field value, kept in both encodings the matcher needs.
#[derive(Debug, Clone)]
pub struct IndexedText {
    pub text: String,
    pub chars: Box<[char]>,
}

impl IndexedText {
    pub fn new(normalizer: &TextNormalizer, raw: &str) -> Self {
        let text = normalizer.normalize(raw);
        let chars = text.chars().collect();
        Self { text, chars }
    }

    #[inline(always)]
    pub fn char_len(&self) -> usize {
        self.chars.len()
    }
}

/// Precomputed search fields of one catalog product.
#[derive(Debug, Clone)]
pub struct IndexedProduct {
    pub name: IndexedText,
    pub description: IndexedText,
    pub category: IndexedText,
    pub tags: SmallVec<[IndexedText; 4]>,
}

impl IndexedProduct {
    /// Values of `field`; every field but tags has exactly one.
    #[inline]
    pub fn field(&self, field: Field) -> &[IndexedText] {
        match field {
            Field::Name => core::slice::from_ref(&self.name),
            Field::Description => core::slice::from_ref(&self.description),
            Field::Category => core::slice::from_ref(&self.category),
            Field::Tags => &self.tags,
        }
    }
}

/// Weighted fuzzy-search structure over a catalog.
///
/// Built once and read-only afterwards; entry `i` describes catalog
/// position `i`.
#[derive(Debug, Clone)]
pub struct MatchIndex {
    pub(crate) entries: Vec<IndexedProduct>,
    pub(crate) normalizer: TextNormalizer,
    pub(crate) config: MatchConfig,
}

impl MatchIndex {
    /// Returns the number of indexed products.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the index covers no products.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The configuration the index was built with.
    #[inline(always)]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }
}
