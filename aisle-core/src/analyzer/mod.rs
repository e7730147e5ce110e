//! Text analysis pipeline.
//!
//! This module provides the text processing components:
//! - **Normalizer**: Lowercases and collapses whitespace (optionally folds diacritics)
//! - **Fuzzy**: Scores approximate substring matches between a query and a field

pub mod fuzzy;
pub mod normalizer;

pub use fuzzy::{substring_distance, Pattern, MAX_FUZZY_CHARS};
pub use normalizer::{eq_ignore_case, NormalizerConfig, TextNormalizer};
