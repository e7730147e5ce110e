//! Filter pipeline.
//!
//! Narrows a candidate list with the predicates of a [`FilterSpec`]. The
//! pipeline never reorders: survivors keep their relative input order,
//! whether that is relevance order or catalog order.

use aisle_types::{FilterSpec, PriceRange, Product};

use crate::analyzer::eq_ignore_case;

/// A [`FilterSpec`] prepared for scanning.
///
/// Compiling once per query keeps the per-product check allocation-free.
#[derive(Debug, Clone)]
pub struct Filter<'s> {
    categories: &'s [String],
    price_range: Option<PriceRange>,
    min_rating: Option<f64>,
    in_stock_only: bool,
    on_sale_only: bool,
    rejects_all: bool,
    passes_all: bool,
}

impl<'s> Filter<'s> {
    /// Prepares `spec` for scanning.
    pub fn compile(spec: &'s FilterSpec) -> Self {
        // An inverted range or a NaN bound matches nothing rather than error.
        let rejects_all = spec
            .price_range
            .is_some_and(|range| !range.is_satisfiable())
            || spec.min_rating.is_some_and(f64::is_nan);

        Self {
            categories: &spec.categories,
            price_range: spec.price_range,
            min_rating: spec.min_rating,
            in_stock_only: spec.in_stock_only,
            on_sale_only: spec.on_sale_only,
            rejects_all,
            passes_all: spec.is_unrestricted(),
        }
    }

    /// Returns `true` if no product can pass.
    #[inline]
    pub fn rejects_all(&self) -> bool {
        self.rejects_all
    }

    /// Returns `true` if `product` satisfies every configured predicate.
    pub fn matches(&self, product: &Product) -> bool {
        if self.rejects_all {
            return false;
        }
        if self.in_stock_only && !product.in_stock {
            return false;
        }
        if self.on_sale_only && !product.is_on_sale() {
            return false;
        }
        if let Some(min) = self.min_rating {
            if product.rating < min {
                return false;
            }
        }
        if let Some(range) = self.price_range {
            if !range.contains(product.effective_price()) {
                return false;
            }
        }
        self.categories.is_empty()
            || self
                .categories
                .iter()
                .any(|category| eq_ignore_case(category, &product.category))
    }

    /// Returns `true` if every product passes.
    #[inline]
    pub fn passes_all(&self) -> bool {
        self.passes_all
    }

    /// Keeps the candidates that pass, in their original order.
    pub fn apply<'a>(&self, candidates: &[&'a Product]) -> Vec<&'a Product> {
        if self.rejects_all {
            return Vec::new();
        }
        if self.passes_all {
            return candidates.to_vec();
        }
        candidates
            .iter()
            .copied()
            .filter(|product| self.matches(product))
            .collect()
    }
}

/// Applies `spec` to `candidates`, preserving order.
pub fn apply_filters<'a>(candidates: &[&'a Product], spec: &FilterSpec) -> Vec<&'a Product> {
    Filter::compile(spec).apply(candidates)
}

/// Products whose effective price lies in `[min, max]`, in input order.
///
/// `min > max` yields an empty list.
pub fn filter_by_price_range<'a, I>(products: I, min: f64, max: f64) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    let range = PriceRange::new(min, max);
    if !range.is_satisfiable() {
        return Vec::new();
    }
    products
        .into_iter()
        .filter(|product| range.contains(product.effective_price()))
        .collect()
}
