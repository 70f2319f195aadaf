//! Header-based column lookup
//!
//! Builds a name to index mapping once from the header row so rules can be
//! resolved by the column name they declare rather than a literal position.

use std::collections::HashMap;

use crate::app::models::Row;

/// Column mapping built from the header row
#[derive(Debug, Clone, Default)]
pub struct ColumnMapping {
    /// Normalized (trimmed, lowercase) column name to index mapping
    pub name_to_index: HashMap<String, usize>,
}

impl ColumnMapping {
    /// Analyze the header row; the first occurrence of a repeated name wins
    pub fn analyze(header: &Row) -> Self {
        let mut name_to_index = HashMap::new();

        for (index, column) in header.fields().enumerate() {
            let name = normalize(column);
            if name.is_empty() {
                continue;
            }
            name_to_index.entry(name).or_insert(index);
        }

        ColumnMapping { name_to_index }
    }

    /// Get the index for a given column name (case-insensitive)
    pub fn get_index(&self, column_name: &str) -> Option<usize> {
        self.name_to_index.get(&normalize(column_name)).copied()
    }

    /// Check if a column exists in the mapping
    pub fn has_column(&self, column_name: &str) -> bool {
        self.get_index(column_name).is_some()
    }

    pub fn len(&self) -> usize {
        self.name_to_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.name_to_index.is_empty()
    }
}

fn normalize(column_name: &str) -> String {
    column_name.trim().to_lowercase()
}
