//! Core types for the Aisle catalog query engine.
//!
//! This crate holds the plain value types shared by the engine and its
//! callers. Keeping them separate means:
//!
//! - **No engine dependency for callers**: a UI layer can build a
//!   [`FilterSpec`] or parse a [`SortMode`] without pulling in the index
//! - **One price definition**: [`Product::effective_price`] is the single
//!   place the discounted price is computed
//! - **Serde everywhere**: catalogs, filters and configs round-trip as JSON

#![warn(missing_docs)]

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unique product identifier.
///
/// Ids are positive and assigned once when the catalog is built. Insertion
/// order is what the catalog preserves; a larger id is treated as a newer
/// product.
pub type ProductId = u32;

/// A catalog item.
///
/// Products are immutable once the catalog is loaded. `image` is carried for
/// callers and never interpreted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique positive identifier
    pub id: ProductId,
    /// Display name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Category name, compared case-insensitively
    pub category: String,
    /// Ordered tags; may repeat
    #[serde(default)]
    pub tags: Vec<String>,
    /// Undiscounted unit price
    pub price: f64,
    /// Percent off in `[0, 100]`; `None` or `0` means no discount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    /// Average rating in `[0, 5]`
    pub rating: f64,
    /// Number of reviews behind `rating`
    #[serde(default)]
    pub reviews: u32,
    /// Whether the product can currently be ordered
    pub in_stock: bool,
    /// Opaque image reference
    #[serde(default)]
    pub image: String,
}

impl Product {
    /// Price after applying the discount percentage.
    ///
    /// Every price filter and price sort goes through this method.
    ///
    /// ```
    /// # use aisle_types::Product;
    /// let mut p = Product::new(1, "Lamp", "Lighting", 100.0);
    /// p.discount = Some(20.0);
    /// assert_eq!(p.effective_price(), 80.0);
    /// ```
    #[inline]
    #[must_use]
    pub fn effective_price(&self) -> f64 {
        match self.discount {
            Some(d) if d != 0.0 => self.price * (1.0 - d / 100.0),
            _ => self.price,
        }
    }

    /// Returns `true` if the product carries a positive discount.
    #[inline]
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.discount.is_some_and(|d| d > 0.0)
    }

    /// Popularity score: `rating * ln(reviews + 1)`.
    #[inline]
    #[must_use]
    pub fn popularity(&self) -> f64 {
        self.rating * f64::from(self.reviews).ln_1p()
    }

    /// Creates an in-stock product with no discount, rating or reviews.
    ///
    /// Mostly useful for tests and fixtures; the remaining fields are public.
    pub fn new(id: ProductId, name: &str, category: &str, price: f64) -> Self {
        Self {
            id,
            name: name.to_owned(),
            description: String::new(),
            category: category.to_owned(),
            tags: Vec::new(),
            price,
            discount: None,
            rating: 0.0,
            reviews: 0,
            in_stock: true,
            image: String::new(),
        }
    }
}

/// A searchable product field.
///
/// `#[repr(u8)]` keeps it usable as a compact array index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Field {
    /// Product name
    Name = 0,
    /// Product description
    Description = 1,
    /// Product category
    Category = 2,
    /// Product tags; each tag is matched on its own
    Tags = 3,
}

impl Field {
    /// All fields, in index order.
    pub const ALL: [Field; 4] = [Field::Name, Field::Description, Field::Category, Field::Tags];

    /// Lowercase field name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Description => "description",
            Field::Category => "category",
            Field::Tags => "tags",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relative weight of each field when combining per-field match scores.
///
/// Weights need not sum to 1; a weight of `0` disables the field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldWeights {
    /// Weight of [`Field::Name`]
    pub name: f64,
    /// Weight of [`Field::Description`]
    pub description: f64,
    /// Weight of [`Field::Category`]
    pub category: f64,
    /// Weight of [`Field::Tags`]
    pub tags: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            name: 0.4,
            description: 0.3,
            category: 0.2,
            tags: 0.1,
        }
    }
}

impl FieldWeights {
    /// Returns the configured weight of `field`.
    #[inline]
    #[must_use]
    pub const fn weight(&self, field: Field) -> f64 {
        match field {
            Field::Name => self.name,
            Field::Description => self.description,
            Field::Category => self.category,
            Field::Tags => self.tags,
        }
    }
}

/// Match index configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Highest match score admitted into results (0.0 = exact only, 1.0 = anything).
    /// Default: 0.3
    pub threshold: f64,
    /// Shortest query, and shortest matched region, that is ever scored.
    /// Default: 2
    pub min_match_len: usize,
    /// Per-field weights.
    pub weights: FieldWeights,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            min_match_len: 2,
            weights: FieldWeights::default(),
        }
    }
}

impl MatchConfig {
    /// Substring matches only: no typos tolerated.
    pub const fn strict() -> Self {
        Self {
            threshold: 0.0,
            min_match_len: 2,
            weights: FieldWeights {
                name: 0.4,
                description: 0.3,
                category: 0.2,
                tags: 0.1,
            },
        }
    }

    /// Tolerates roughly one error in every two query characters.
    pub const fn lenient() -> Self {
        Self {
            threshold: 0.5,
            min_match_len: 2,
            weights: FieldWeights {
                name: 0.4,
                description: 0.3,
                category: 0.2,
                tags: 0.1,
            },
        }
    }
}

/// Match index hit: a catalog position and its combined score.
///
/// Lower scores are better. Results order by score (ascending), then by the
/// total weight of the fields that matched (descending), then by catalog
/// position (ascending). An exact hit in the name therefore outranks an
/// exact hit that only a tag produced.
#[derive(Debug, Clone, Copy)]
pub struct MatchResult {
    /// Position of the product in the catalog
    pub position: u32,
    /// Combined score in `[0, 1]`; 0 is an exact match
    pub score: f64,
    /// Sum of the weights of the fields that matched
    pub matched_weight: f64,
}

impl MatchResult {
    /// Creates a new match result.
    #[inline(always)]
    pub const fn new(position: u32, score: f64, matched_weight: f64) -> Self {
        Self {
            position,
            score,
            matched_weight,
        }
    }
}

impl PartialEq for MatchResult {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == core::cmp::Ordering::Equal
    }
}

impl Eq for MatchResult {}

impl PartialOrd for MatchResult {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MatchResult {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.matched_weight.total_cmp(&self.matched_weight))
            .then_with(|| self.position.cmp(&other.position))
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pos={} score={:.3} weight={:.2}",
            self.position, self.score, self.matched_weight
        )
    }
}

/// Result ordering modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Keep the incoming order (relevance order for a text query, else catalog order)
    #[default]
    Featured,
    /// Cheapest effective price first
    PriceLowHigh,
    /// Most expensive effective price first
    PriceHighLow,
    /// Best rated first, more reviews winning ties
    Rating,
    /// Name, A to Z
    NameAsc,
    /// Name, Z to A
    NameDesc,
    /// Highest id first
    Newest,
}

impl SortMode {
    /// All modes, in declaration order.
    pub const ALL: [SortMode; 7] = [
        SortMode::Featured,
        SortMode::PriceLowHigh,
        SortMode::PriceHighLow,
        SortMode::Rating,
        SortMode::NameAsc,
        SortMode::NameDesc,
        SortMode::Newest,
    ];

    /// The kebab-case name used in URLs.
    pub const fn as_str(self) -> &'static str {
        match self {
            SortMode::Featured => "featured",
            SortMode::PriceLowHigh => "price-low-high",
            SortMode::PriceHighLow => "price-high-low",
            SortMode::Rating => "rating",
            SortMode::NameAsc => "name-asc",
            SortMode::NameDesc => "name-desc",
            SortMode::Newest => "newest",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown sort mode name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort mode: {0:?}")]
pub struct ParseSortModeError(pub String);

impl FromStr for SortMode {
    type Err = ParseSortModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ParseSortModeError(s.to_owned()))
    }
}

/// Inclusive effective-price bounds.
///
/// Serialized as a two-element array `[min, max]`. A range with `min > max`
/// (or a NaN bound) contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct PriceRange {
    /// Lower bound, inclusive
    pub min: f64,
    /// Upper bound, inclusive
    pub max: f64,
}

impl PriceRange {
    /// Creates a range; no validation is performed.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns `true` if at least one price can satisfy the range.
    #[inline]
    #[must_use]
    pub fn is_satisfiable(&self) -> bool {
        self.min <= self.max
    }

    /// Returns `true` if `price` lies within the bounds.
    #[inline]
    #[must_use]
    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

impl From<(f64, f64)> for PriceRange {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

impl From<PriceRange> for (f64, f64) {
    fn from(r: PriceRange) -> Self {
        (r.min, r.max)
    }
}

/// The recognized filter predicates.
///
/// All configured predicates must hold for a product to pass. Unknown keys
/// are rejected when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct FilterSpec {
    /// Accepted categories, OR-combined, case-insensitive; empty = any
    pub categories: Vec<String>,
    /// Bounds on the effective price
    pub price_range: Option<PriceRange>,
    /// Inclusive lower bound on rating
    pub min_rating: Option<f64>,
    /// Drop out-of-stock products
    pub in_stock_only: bool,
    /// Keep only discounted products
    pub on_sale_only: bool,
}

impl FilterSpec {
    /// A spec with no restrictions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to the given categories.
    #[must_use]
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Restricts effective price to `[min, max]`.
    #[must_use]
    pub fn with_price_range(mut self, min: f64, max: f64) -> Self {
        self.price_range = Some(PriceRange::new(min, max));
        self
    }

    /// Requires `rating >= min`.
    #[must_use]
    pub fn with_min_rating(mut self, min: f64) -> Self {
        self.min_rating = Some(min);
        self
    }

    /// Drops out-of-stock products.
    #[must_use]
    pub fn in_stock_only(mut self) -> Self {
        self.in_stock_only = true;
        self
    }

    /// Keeps only discounted products.
    #[must_use]
    pub fn on_sale_only(mut self) -> Self {
        self.on_sale_only = true;
        self
    }

    /// Returns `true` if no predicate is configured.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.categories.is_empty()
            && self.price_range.is_none()
            && self.min_rating.is_none()
            && !self.in_stock_only
            && !self.on_sale_only
    }
}
