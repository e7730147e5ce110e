//! Query engine facade.
//!
//! [`Engine`] pairs a [`Catalog`] with the [`MatchIndex`] built from it and
//! runs the full pipeline:
//!
//! ```text
//! text ──> MatchIndex ──> candidates ──> Filter ──> sort ──> limit
//!  (blank text: candidates = catalog order)
//! ```
//!
//! [`SharedEngine`] wraps an engine for concurrent readers and whole-catalog
//! reloads.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use aisle_types::{FilterSpec, MatchConfig, PriceRange, Product, ProductId, SortMode};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::filter::{self, Filter};
use crate::index::{IndexStats, MatchIndex};
use crate::{rank, select};

/// A complete storefront query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Query {
    /// Free text; blank means "no text filter".
    pub text: String,
    /// Predicates applied after text matching.
    pub filters: FilterSpec,
    /// Final ordering; `featured` keeps relevance order.
    pub sort: SortMode,
    /// Maximum number of results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl Query {
    /// A text-only query with default filters and ordering.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_filters(mut self, filters: FilterSpec) -> Self {
        self.filters = filters;
        self
    }

    pub fn sorted_by(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Point-in-time copy of an engine's counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EngineMetrics {
    /// Text searches run, with or without filters.
    pub queries_executed: u64,
    /// Suggestion requests answered.
    pub suggestions_served: u64,
    /// Products covered by the index.
    pub products_indexed: u64,
}

#[derive(Debug, Default)]
struct Counters {
    queries: AtomicU64,
    suggestions: AtomicU64,
}

/// Catalog, match index and counters behind one read-only handle.
#[derive(Debug)]
pub struct Engine {
    catalog: Catalog,
    index: MatchIndex,
    counters: Counters,
}

impl Engine {
    /// Builds an engine with the default [`MatchConfig`].
    pub fn new(catalog: Catalog) -> Self {
        Self::with_config(catalog, MatchConfig::default())
    }

    /// Builds an engine, indexing `catalog` with `config`.
    pub fn with_config(catalog: Catalog, config: MatchConfig) -> Self {
        let index = MatchIndex::with_config(&catalog, config);
        tracing::info!(products = catalog.len(), "catalog indexed");

        Self {
            catalog,
            index,
            counters: Counters::default(),
        }
    }

    #[inline]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[inline]
    pub fn index(&self) -> &MatchIndex {
        &self.index
    }

    /// Products matching `query`, best first.
    ///
    /// A blank or too-short query returns the whole catalog in catalog order.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let results = self.candidates(query);
        tracing::debug!(hits = results.len(), "search");
        results
    }

    /// [`Engine::search`] narrowed by `filters`, keeping relevance order.
    #[tracing::instrument(level = "debug", skip(self, filters))]
    pub fn search_with_filters(&self, query: &str, filters: &FilterSpec) -> Vec<&Product> {
        let filter = Filter::compile(filters);
        if filter.rejects_all() {
            tracing::debug!("filters reject every product");
            return Vec::new();
        }

        let results = filter.apply(&self.candidates(query));
        tracing::debug!(hits = results.len(), "filtered search");
        results
    }

    /// Runs the full pipeline: text, filters, sort, limit.
    pub fn query(&self, query: &Query) -> Vec<&Product> {
        let matched = self.search_with_filters(&query.text, &query.filters);
        let mut results = rank::sort_products(&matched, query.sort);
        if let Some(limit) = query.limit {
            results.truncate(limit);
        }
        results
    }

    fn candidates(&self, query: &str) -> Vec<&Product> {
        self.counters.queries.fetch_add(1, Ordering::Relaxed);

        match self.index.search(query) {
            None => self.catalog.iter().collect(),
            Some(results) => results
                .iter()
                .filter_map(|r| self.catalog.at(r.position))
                .collect(),
        }
    }

    /// Up to `limit` distinct product names for autocomplete.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn suggestions(&self, query: &str, limit: usize) -> Vec<&str> {
        self.counters.suggestions.fetch_add(1, Ordering::Relaxed);
        self.index.suggest(&self.catalog, query, limit)
    }

    /// See [`rank::sort_products`].
    pub fn sort_products<'a>(&self, list: &[&'a Product], mode: SortMode) -> Vec<&'a Product> {
        rank::sort_products(list, mode)
    }

    pub fn related_products(&self, id: ProductId, limit: usize) -> Vec<&Product> {
        select::related_products(&self.catalog, id, limit)
    }

    pub fn popular_products(&self, limit: usize) -> Vec<&Product> {
        rank::popular_products(&self.catalog, limit)
    }

    pub fn on_sale_products(&self, limit: Option<usize>) -> Vec<&Product> {
        select::on_sale_products(&self.catalog, limit)
    }

    pub fn filter_by_price_range(&self, min: f64, max: f64) -> Vec<&Product> {
        filter::filter_by_price_range(&self.catalog, min, max)
    }

    /// Distinct categories in catalog order.
    pub fn categories(&self) -> Vec<&str> {
        self.catalog.categories()
    }

    /// Lowest and highest effective price, `None` for an empty catalog.
    pub fn price_bounds(&self) -> Option<PriceRange> {
        self.catalog.price_bounds()
    }

    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }

    pub fn metrics(&self) -> EngineMetrics {
        EngineMetrics {
            queries_executed: self.counters.queries.load(Ordering::Relaxed),
            suggestions_served: self.counters.suggestions.load(Ordering::Relaxed),
            products_indexed: self.index.len() as u64,
        }
    }
}

/// Cloneable handle to an [`Engine`] that can be swapped out wholesale.
///
/// Readers take a [`snapshot`](Self::snapshot) and query it without holding
/// the lock; [`reload`](Self::reload) indexes the new catalog first and only
/// locks to swap the pointer.
#[derive(Debug, Clone)]
pub struct SharedEngine {
    inner: Arc<RwLock<Arc<Engine>>>,
}

impl SharedEngine {
    pub fn new(engine: Engine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(engine))),
        }
    }

    /// The engine currently being served.
    pub fn snapshot(&self) -> Arc<Engine> {
        let guard = self.inner.read().unwrap_or_else(|poisoned| {
            tracing::warn!("engine lock poisoned, recovering");
            poisoned.into_inner()
        });
        Arc::clone(&guard)
    }

    /// Indexes `catalog` with the current configuration and swaps it in.
    ///
    /// Returns the engine that was replaced; snapshots taken earlier keep
    /// answering from it.
    pub fn reload(&self, catalog: Catalog) -> Arc<Engine> {
        let config = *self.snapshot().index().config();
        self.replace(Engine::with_config(catalog, config))
    }

    /// Swaps in a prebuilt engine, returning the previous one.
    pub fn replace(&self, engine: Engine) -> Arc<Engine> {
        let products = engine.catalog().len();
        let next = Arc::new(engine);

        let mut guard = self.inner.write().unwrap_or_else(|poisoned| {
            tracing::warn!("engine lock poisoned, recovering");
            poisoned.into_inner()
        });
        let previous = std::mem::replace(&mut *guard, next);
        drop(guard);

        tracing::info!(
            products,
            previous = previous.catalog().len(),
            "engine reloaded"
        );
        previous
    }
}

impl From<Engine> for SharedEngine {
    fn from(engine: Engine) -> Self {
        Self::new(engine)
    }
}
