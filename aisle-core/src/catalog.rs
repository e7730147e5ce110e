//! Immutable product catalog.
//!
//! Products are stored once, in insertion order, in a single `Vec`. Every
//! other structure in the engine refers to them by catalog position (`u32`),
//! which doubles as the stable tie-break for equal-quality matches.
//!
//! ```text
//! products:  [p(id=7)][p(id=2)][p(id=9)] ...
//! position:      0        1        2
//! positions: {7 -> 0, 2 -> 1, 9 -> 2}      id lookup, O(1)
//! ```

use std::io::Read;

use aisle_types::{PriceRange, Product, ProductId};
use rustc_hash::FxHashMap;

use crate::analyzer::eq_ignore_case;

/// Errors raised while building a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Product ids are positive; 0 is reserved.
    #[error("product id 0 is not allowed")]
    ZeroId,
    /// Two products share an id.
    #[error("duplicate product id {id}")]
    DuplicateId {
        /// The repeated id
        id: ProductId,
    },
    /// Price is negative or not a finite number.
    #[error("product {id}: invalid price {price}")]
    InvalidPrice {
        /// Offending product
        id: ProductId,
        /// The rejected price
        price: f64,
    },
    /// Discount lies outside `[0, 100]`.
    #[error("product {id}: discount {discount} outside [0, 100]")]
    InvalidDiscount {
        /// Offending product
        id: ProductId,
        /// The rejected discount
        discount: f64,
    },
    /// Rating lies outside `[0, 5]`.
    #[error("product {id}: rating {rating} outside [0, 5]")]
    InvalidRating {
        /// Offending product
        id: ProductId,
        /// The rejected rating
        rating: f64,
    },
    /// More products than catalog positions can address.
    #[error("catalog too large: {len} products (max: {max})")]
    TooLarge {
        /// Number of products supplied
        len: usize,
        /// Largest supported catalog
        max: usize,
    },
    /// The catalog document is not valid JSON for a product list.
    #[error("malformed catalog document: {0}")]
    Json(#[from] serde_json::Error),
    /// The catalog document could not be read.
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
}

/// An ordered, validated, read-only snapshot of products.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    positions: FxHashMap<ProductId, u32>,
}

impl Catalog {
    /// Builds a catalog, keeping the given order.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] for the first product that breaks an id,
    /// price, discount or rating invariant.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        if products.len() > u32::MAX as usize {
            return Err(CatalogError::TooLarge {
                len: products.len(),
                max: u32::MAX as usize,
            });
        }

        let mut positions =
            FxHashMap::with_capacity_and_hasher(products.len(), Default::default());

        for (position, product) in products.iter().enumerate() {
            validate(product)?;
            if positions.insert(product.id, position as u32).is_some() {
                return Err(CatalogError::DuplicateId { id: product.id });
            }
        }

        Ok(Self {
            products,
            positions,
        })
    }

    /// Parses a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Json`] for malformed input, otherwise the same
    /// validation errors as [`Catalog::new`].
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// Reads a JSON array of products.
    ///
    /// # Errors
    ///
    /// As [`Catalog::from_json_str`], plus [`CatalogError::Io`].
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, CatalogError> {
        let mut json = String::new();
        reader.read_to_string(&mut json)?;
        Self::from_json_str(&json)
    }

    /// Returns the number of products.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns `true` if the catalog has no products.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// All products in catalog order.
    #[inline(always)]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Iterates products in catalog order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    /// Looks a product up by id.
    #[inline]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.position(id).map(|pos| &self.products[pos as usize])
    }

    /// Catalog position of `id`.
    #[inline]
    pub fn position(&self, id: ProductId) -> Option<u32> {
        self.positions.get(&id).copied()
    }

    /// Product at a catalog position.
    #[inline(always)]
    pub fn at(&self, position: u32) -> Option<&Product> {
        self.products.get(position as usize)
    }

    /// Distinct categories in order of first appearance.
    ///
    /// Categories differing only in case are merged; the first spelling wins.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for product in &self.products {
            if !seen.iter().any(|c| eq_ignore_case(c, &product.category)) {
                seen.push(&product.category);
            }
        }
        seen
    }

    /// Smallest and largest effective price, or `None` when empty.
    pub fn price_bounds(&self) -> Option<PriceRange> {
        let mut prices = self.products.iter().map(Product::effective_price);
        let first = prices.next()?;
        let (min, max) = prices.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(PriceRange::new(min, max))
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

impl TryFrom<Vec<Product>> for Catalog {
    type Error = CatalogError;

    fn try_from(products: Vec<Product>) -> Result<Self, Self::Error> {
        Self::new(products)
    }
}

fn validate(product: &Product) -> Result<(), CatalogError> {
    let id = product.id;
    if id == 0 {
        return Err(CatalogError::ZeroId);
    }
    if !product.price.is_finite() || product.price < 0.0 {
        return Err(CatalogError::InvalidPrice {
            id,
            price: product.price,
        });
    }
    if let Some(discount) = product.discount {
        if !(0.0..=100.0).contains(&discount) {
            return Err(CatalogError::InvalidDiscount { id, discount });
        }
    }
    if !(0.0..=5.0).contains(&product.rating) {
        return Err(CatalogError::InvalidRating {
            id,
            rating: product.rating,
        });
    }
    Ok(())
}
