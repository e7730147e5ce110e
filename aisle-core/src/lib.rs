//! Catalog query engine for storefront product discovery.
//!
//! Pipeline:
//!
//! ```text
//! Catalog ──build──> MatchIndex
//!
//! query text ──> MatchIndex::search ──> Filter ──> rank::sort_products ──> limit
//! ```
//!
//! Everything runs over an immutable [`Catalog`]; results borrow from it.
//!
//! ```
//! use aisle_core::{Catalog, Engine, FilterSpec, Product, SortMode};
//!
//! let mut teak = Product::new(2, "Teak Vase", "Decor", 60.0);
//! teak.discount = Some(10.0);
//! let catalog = Catalog::new(vec![Product::new(1, "Teal Vase", "Decor", 50.0), teak])?;
//! let engine = Engine::new(catalog);
//!
//! let hits = engine.search("teal");
//! assert_eq!(hits.iter().map(|p| p.id).collect::<Vec<_>>(), [1, 2]);
//!
//! let cheap = engine.search_with_filters("", &FilterSpec::new().with_price_range(0.0, 50.0));
//! assert_eq!(cheap.len(), 1);
//!
//! let by_price = engine.sort_products(&hits, SortMode::PriceHighLow);
//! assert_eq!(by_price[0].id, 2);
//! # Ok::<(), aisle_core::CatalogError>(())
//! ```

pub mod analyzer;
pub mod catalog;
pub mod filter;
pub mod index;
pub mod rank;
pub mod select;

mod engine;

#[cfg(test)]
pub(crate) mod test_support;

pub use aisle_types::{
    Field, FieldWeights, FilterSpec, MatchConfig, MatchResult, ParseSortModeError, PriceRange,
    Product, ProductId, SortMode,
};
pub use catalog::{Catalog, CatalogError};
pub use engine::{Engine, EngineMetrics, Query, SharedEngine};
pub use index::{IndexStats, MatchIndex};
