//! Catalog selectors.
//!
//! Read-only lookups over the whole catalog that keep catalog order.

use aisle_types::{Product, ProductId};

use crate::analyzer::eq_ignore_case;
use crate::catalog::Catalog;

/// Up to `limit` products sharing the category of `id`, excluding `id`.
///
/// Unknown ids and a zero limit yield an empty list.
pub fn related_products(catalog: &Catalog, id: ProductId, limit: usize) -> Vec<&Product> {
    let Some(anchor) = catalog.get(id) else {
        return Vec::new();
    };

    catalog
        .iter()
        .filter(|product| product.id != id && eq_ignore_case(&product.category, &anchor.category))
        .take(limit)
        .collect()
}

/// Discounted products, optionally truncated to `limit`.
pub fn on_sale_products(catalog: &Catalog, limit: Option<usize>) -> Vec<&Product> {
    let on_sale = catalog.iter().filter(|product| product.is_on_sale());
    match limit {
        Some(limit) => on_sale.take(limit).collect(),
        None => on_sale.collect(),
    }
}
