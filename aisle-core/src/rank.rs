//! Ranking and sorting.
//!
//! Every mode is a total order: each comparison ends in a tie-break on the
//! product id, so sorting is deterministic and idempotent. Sorting always
//! works on a copy of the caller's list.

use core::cmp::Ordering;

use aisle_types::{Product, SortMode};

use crate::analyzer::normalizer::TextNormalizer;

/// Returns `list` reordered by `mode`.
///
/// [`SortMode::Featured`] keeps the incoming order (relevance order when a
/// text query produced the list).
pub fn sort_products<'a>(list: &[&'a Product], mode: SortMode) -> Vec<&'a Product> {
    let mut sorted = list.to_vec();

    match mode {
        SortMode::Featured => {}
        SortMode::PriceLowHigh => sorted.sort_by(|a, b| {
            a.effective_price()
                .total_cmp(&b.effective_price())
                .then_with(|| a.id.cmp(&b.id))
        }),
        SortMode::PriceHighLow => sorted.sort_by(|a, b| {
            b.effective_price()
                .total_cmp(&a.effective_price())
                .then_with(|| a.id.cmp(&b.id))
        }),
        SortMode::Rating => sorted.sort_by(compare_rating),
        SortMode::NameAsc => sort_by_name(&mut sorted, false),
        SortMode::NameDesc => sort_by_name(&mut sorted, true),
        SortMode::Newest => sorted.sort_by(|a, b| b.id.cmp(&a.id)),
    }

    sorted
}

fn compare_rating(a: &&Product, b: &&Product) -> Ordering {
    b.rating
        .total_cmp(&a.rating)
        .then_with(|| b.reviews.cmp(&a.reviews))
        .then_with(|| a.id.cmp(&b.id))
}

/// Collation key for names: case and accents fold away first, the raw name
/// only separates names that fold to the same key.
fn sort_by_name(products: &mut Vec<&Product>, descending: bool) {
    let folding = TextNormalizer::folding();
    let mut keyed: Vec<(String, &Product)> = products
        .iter()
        .map(|&product| (folding.normalize(&product.name), product))
        .collect();

    keyed.sort_by(|(key_a, a), (key_b, b)| {
        let by_name = key_a
            .cmp(key_b)
            .then_with(|| a.name.cmp(&b.name));
        let by_name = if descending { by_name.reverse() } else { by_name };
        by_name.then_with(|| a.id.cmp(&b.id))
    });

    products.clear();
    products.extend(keyed.into_iter().map(|(_, product)| product));
}

/// Top `limit` products by [`Product::popularity`], ties by ascending id.
pub fn popular_products<'a, I>(products: I, limit: usize) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    if limit == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<(f64, &Product)> = products
        .into_iter()
        .map(|product| (product.popularity(), product))
        .collect();

    if ranked.len() > limit {
        ranked.select_nth_unstable_by(limit, by_popularity);
        ranked.truncate(limit);
    }
    ranked.sort_unstable_by(by_popularity);

    ranked.into_iter().map(|(_, product)| product).collect()
}

fn by_popularity(a: &(f64, &Product), b: &(f64, &Product)) -> Ordering {
    b.0.total_cmp(&a.0).then_with(|| a.1.id.cmp(&b.1.id))
}
