//! Statistics and IndexStats.

use crate::index::types::{IndexedText, MatchIndex};
use aisle_types::Field;

/// A snapshot of index statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Number of indexed products.
    pub num_products: usize,
    /// Number of indexed tag values.
    pub num_tags: usize,
    /// Indexed chars per field, in [`Field::ALL`] order.
    pub field_chars: [usize; 4],
    /// UTF-8 bytes of normalized text across all fields.
    pub text_bytes: usize,
}

impl MatchIndex {
    /// Returns index statistics.
    pub fn stats(&self) -> IndexStats {
        let mut stats = IndexStats {
            num_products: self.entries.len(),
            ..IndexStats::default()
        };

        for entry in &self.entries {
            stats.num_tags += entry.tags.len();
            for field in Field::ALL {
                let values = entry.field(field);
                stats.field_chars[field as usize] +=
                    values.iter().map(IndexedText::char_len).sum::<usize>();
                stats.text_bytes += values.iter().map(|v| v.text.len()).sum::<usize>();
            }
        }

        stats
    }
}

impl IndexStats {
    /// Total indexed chars across fields.
    pub fn indexed_chars(&self) -> usize {
        self.field_chars.iter().sum()
    }

    /// Indexed chars of one field.
    pub fn chars_in(&self, field: Field) -> usize {
        self.field_chars[field as usize]
    }

    /// Approximate heap usage of the normalized fields in bytes.
    pub fn memory_usage_bytes(&self) -> usize {
        self.indexed_chars() * std::mem::size_of::<char>() + self.text_bytes
    }
}

impl core::fmt::Display for IndexStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} products, {} tags, {} chars",
            self.num_products,
            self.num_tags,
            self.indexed_chars()
        )?;

        for field in Field::ALL {
            write!(f, ", {}={}", field, self.chars_in(field))?;
        }

        write!(f, " (~{} bytes)", self.memory_usage_bytes())
    }
}
