//! Weighted fuzzy-match index over a catalog.
//!
//! Memory Layout:
//! - One [`types::IndexedProduct`] per catalog position, in catalog order
//! - Each field is normalized once and kept both as UTF-8 (for the
//!   exact-substring fast path) and as chars (for edit distance)
//!
//! Threading:
//! - [`MatchIndex`] is immutable after [`MatchIndex::build`] and holds no
//!   scratch buffers, so it is `Send + Sync` and can be shared freely.

mod builder;
mod scoring;
mod search;
mod stats;
mod types;

pub use stats::IndexStats;
pub use types::MatchIndex;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::MAX_FUZZY_CHARS;
    use crate::catalog::Catalog;
    use crate::test_support::{sample_catalog, spec_catalog};
    use aisle_types::{Field, FieldWeights, MatchConfig, Product, ProductId};

    fn hit_ids(catalog: &Catalog, index: &MatchIndex, query: &str) -> Vec<ProductId> {
        index
            .search(query)
            .expect("query should be scored")
            .iter()
            .map(|r| catalog.at(r.position).expect("valid position").id)
            .collect()
    }

    #[test]
    fn typo_within_threshold() {
        let catalog = spec_catalog();
        let index = MatchIndex::build(&catalog);

        let results = index.search("teal").expect("scored");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].position, 0);
        assert_eq!(results[0].score, 0.0);
        assert_eq!(results[1].position, 1);
        assert!((results[1].score - 0.25).abs() < 1e-9);
    }

    #[test]
    fn degenerate_queries_are_not_scored() {
        let catalog = sample_catalog();
        let index = MatchIndex::build(&catalog);

        assert!(index.search("").is_none());
        assert!(index.search("   ").is_none());
        assert!(index.search("t").is_none());
        assert!(index.is_degenerate(" t "));
        assert!(!index.is_degenerate("te"));
    }

    #[test]
    fn unmatched_query_is_empty() {
        let catalog = sample_catalog();
        let index = MatchIndex::build(&catalog);
        assert_eq!(index.search("zzzz").map(|r| r.len()), Some(0));
    }

    #[test]
    fn exact_name_ranks_first() {
        let catalog = sample_catalog();
        let index = MatchIndex::build(&catalog);

        let results = index.search("Copper Kettle").expect("scored");
        assert_eq!(catalog.at(results[0].position).map(|p| p.id), Some(3));
        assert_eq!(results[0].score, 0.0);
    }

    #[test]
    fn case_and_whitespace_insensitive() {
        let catalog = sample_catalog();
        let index = MatchIndex::build(&catalog);
        assert_eq!(
            hit_ids(&catalog, &index, "  COPPER   kettle "),
            hit_ids(&catalog, &index, "copper kettle")
        );
    }

    #[test]
    fn tolerates_typos() {
        let catalog = sample_catalog();
        let index = MatchIndex::build(&catalog);

        assert_eq!(hit_ids(&catalog, &index, "kettel"), vec![3]);
        assert_eq!(hit_ids(&catalog, &index, "cushin"), vec![7]);
        assert_eq!(hit_ids(&catalog, &index, "teel vase"), vec![1, 2]);
    }

    #[test]
    fn threshold_is_inclusive() {
        let catalog = sample_catalog();
        let index = MatchIndex::build(&catalog);

        // "brass table lamp" needs 3 edits over 10 chars: exactly 0.3.
        let results = index.search("brass lamp").expect("scored");
        assert_eq!(results.len(), 1);
        assert!((results[0].score - 0.3).abs() < 1e-9);

        let strict = MatchIndex::with_config(&catalog, MatchConfig::strict());
        assert_eq!(strict.search("brass lamp").map(|r| r.len()), Some(0));
        assert_eq!(strict.search("kettel").map(|r| r.len()), Some(0));
    }

    #[test]
    fn equal_scores_keep_catalog_order() {
        let catalog = sample_catalog();
        let index = MatchIndex::build(&catalog);

        assert_eq!(hit_ids(&catalog, &index, "vase"), vec![1, 2]);
        assert_eq!(hit_ids(&catalog, &index, "decor"), vec![1, 2, 4, 7]);
        // 7 matches "teal" in its name and a tag, 1 only in its name.
        assert_eq!(hit_ids(&catalog, &index, "teal"), vec![7, 1, 2, 3]);
    }

    #[test]
    fn tags_are_searched() {
        let catalog = sample_catalog();
        let index = MatchIndex::build(&catalog);
        assert_eq!(hit_ids(&catalog, &index, "textile"), vec![4]);

        let no_tags = MatchConfig {
            weights: FieldWeights {
                tags: 0.0,
                ..FieldWeights::default()
            },
            ..MatchConfig::default()
        };
        let index = MatchIndex::with_config(&catalog, no_tags);
        assert!(hit_ids(&catalog, &index, "textile").is_empty());
    }

    #[test]
    fn weighted_average_of_matched_fields() {
        let mut p = Product::new(1, "Teal Lamp", "Lighting", 10.0);
        p.description = "teak finish".into();
        let catalog = Catalog::new(vec![p]).expect("valid");
        let index = MatchIndex::build(&catalog);

        // name scores 0, description 0.25: (0.4 * 0 + 0.3 * 0.25) / 0.7
        let results = index.search("teal").expect("scored");
        assert!((results[0].score - 0.075 / 0.7).abs() < 1e-9);
    }

    #[test]
    fn exact_name_outranks_lighter_fields() {
        let mut jar = Product::new(1, "Glass Jar", "Kitchen", 12.0);
        jar.tags = vec!["teal vase".into()];
        let mut planter = Product::new(2, "Planter", "Garden", 18.0);
        planter.description = "Pairs well with our teal vase".into();
        let vase = Product::new(3, "Teal Vase", "Decor", 50.0);

        let catalog = Catalog::new(vec![jar, planter, vase]).expect("valid");
        let index = MatchIndex::build(&catalog);

        let results = index.search("teal vase").expect("scored");
        assert!(results.iter().all(|r| r.score == 0.0));
        assert_eq!(hit_ids(&catalog, &index, "teal vase"), vec![3, 2, 1]);
    }

    #[test]
    fn long_exact_name_is_found() {
        let name = "x".repeat(MAX_FUZZY_CHARS + 44);
        let catalog = Catalog::new(vec![
            Product::new(1, "Desk Lamp", "Lighting", 10.0),
            Product::new(2, &name, "Decor", 10.0),
        ])
        .expect("valid");
        let index = MatchIndex::build(&catalog);

        let results = index.search(&name).expect("scored");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].position, 1);
        assert_eq!(results[0].score, 0.0);

        let mut typo = name.clone();
        typo.replace_range(0..1, "y");
        assert_eq!(index.search(&typo).map(|r| r.len()), Some(0));
    }

    #[test]
    fn suggest_returns_distinct_names() {
        let catalog = sample_catalog();
        let index = MatchIndex::build(&catalog);

        assert_eq!(index.suggest(&catalog, "vase", 10), vec!["Teal Vase", "Teak Vase"]);
        assert_eq!(index.suggest(&catalog, "teal", 2), vec!["Teal Velvet Cushion", "Teal Vase"]);
        assert!(index.suggest(&catalog, "v", 10).is_empty());
        assert!(index.suggest(&catalog, "vase", 0).is_empty());
        assert!(index.suggest(&catalog, "zzzz", 5).is_empty());

        let twins = Catalog::new(vec![
            Product::new(1, "Desk Lamp", "Lighting", 10.0),
            Product::new(2, "Desk Lamp", "Lighting", 12.0),
        ])
        .expect("valid");
        let index = MatchIndex::build(&twins);
        assert_eq!(index.suggest(&twins, "lamp", 5), vec!["Desk Lamp"]);
    }

    #[test]
    fn stats_count_indexed_text() {
        let catalog = spec_catalog();
        let index = MatchIndex::build(&catalog);
        let stats = index.stats();

        assert_eq!(stats.num_products, 2);
        assert_eq!(stats.num_tags, 0);
        assert_eq!(stats.chars_in(Field::Name), 18);
        assert_eq!(stats.chars_in(Field::Category), 10);
        assert_eq!(stats.indexed_chars(), 28);
        assert_eq!(stats.memory_usage_bytes(), 28 * 4 + 28);
        assert!(format!("{stats}").starts_with("2 products, 0 tags, 28 chars"));
    }

    #[test]
    fn empty_catalog() {
        let catalog = Catalog::default();
        let index = MatchIndex::build(&catalog);
        assert!(index.is_empty());
        assert_eq!(index.search("teal").map(|r| r.len()), Some(0));
    }
}
