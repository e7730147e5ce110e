//! Index building logic.

use crate::analyzer::normalizer::TextNormalizer;
use crate::catalog::Catalog;
use crate::index::types::{IndexedProduct, IndexedText, MatchIndex};
use aisle_types::{MatchConfig, Product};

impl MatchIndex {
    /// Builds an index over `catalog` with the default configuration.
    pub fn build(catalog: &Catalog) -> Self {
        Self::with_config(catalog, MatchConfig::default())
    }

    /// Builds an index over `catalog`.
    ///
    /// Normalizes every searchable field once, so queries only pay for
    /// normalizing the query itself. This is the one
    /// O(products x field length) pass in the engine.
    pub fn with_config(catalog: &Catalog, config: MatchConfig) -> Self {
        let normalizer = TextNormalizer::default();

        let entries: Vec<IndexedProduct> = catalog
            .iter()
            .map(|product| Self::index_product(&normalizer, product))
            .collect();

        let index = Self {
            entries,
            normalizer,
            config,
        };

        tracing::debug!(
            products = index.len(),
            threshold = config.threshold,
            "match index built"
        );

        index
    }

    fn index_product(normalizer: &TextNormalizer, product: &Product) -> IndexedProduct {
        IndexedProduct {
            name: IndexedText::new(normalizer, &product.name),
            description: IndexedText::new(normalizer, &product.description),
            category: IndexedText::new(normalizer, &product.category),
            tags: product
                .tags
                .iter()
                .map(|tag| IndexedText::new(normalizer, tag))
                .collect(),
        }
    }
}
