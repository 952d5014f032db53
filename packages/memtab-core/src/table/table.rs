//! Table rows and index management.
//!
//! Each table has:
//! - Informational schema (declared field names, not enforced)
//! - Insertion-ordered rows
//! - Record ID sequence generator
//! - Optional secondary index on one field

use std::collections::HashMap;

use crate::config::DbConfig;
use crate::value::Value;

use super::index::SecondaryIndex;
use super::row::{Row, RowId};

/// A named collection of rows.
#[derive(Debug, Clone)]
pub struct Table {
    /// Table name
    name: String,
    /// Declared field names in declaration order
    schema: Vec<String>,
    /// Rows in insertion order
    rows: Vec<Row>,
    /// Row id to its position in `rows`
    positions: HashMap<RowId, usize>,
    /// Next record ID to assign
    auto_increment_id: RowId,
    /// Secondary index, when an index field was configured
    index: Option<SecondaryIndex>,
    prune_stale_index_entries: bool,
}

impl Table {
    /// Creates an empty table.
    ///
    /// # Arguments
    /// * `name` - Table name
    /// * `schema` - Declared field names
    /// * `index_field` - Field to maintain a secondary index on
    /// * `config` - Store configuration (capacity, index maintenance)
    pub fn create(
        name: String,
        schema: Vec<String>,
        index_field: Option<String>,
        config: &DbConfig,
    ) -> Self {
        Self {
            name,
            schema,
            rows: Vec::with_capacity(config.initial_table_capacity),
            positions: HashMap::with_capacity(config.initial_table_capacity),
            auto_increment_id: 1, // Start IDs at 1
            index: index_field.map(SecondaryIndex::new),
            prune_stale_index_entries: config.prune_stale_index_entries,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &[String] {
        &self.schema
    }

    /// Rows in insertion order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn index_field(&self) -> Option<&str> {
        self.index.as_ref().map(SecondaryIndex::field)
    }

    /// Returns the id the next insert will receive.
    pub fn auto_increment_id(&self) -> RowId {
        self.auto_increment_id
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of entries in the secondary index (0 for unindexed tables).
    pub fn index_len(&self) -> usize {
        self.index.as_ref().map_or(0, SecondaryIndex::len)
    }

    /// Inserts a row and returns its newly assigned id.
    ///
    /// Any `id` the caller put in the row is overwritten. When the table is
    /// indexed and the row has a non-empty value for the index field, the
    /// index entry for that value now points at this row, even if an
    /// earlier row held the same value.
    pub fn insert(&mut self, mut row: Row) -> RowId {
        let id = self.auto_increment_id;
        self.auto_increment_id += 1;
        row.assign_id(id);

        if let Some(index) = self.index.as_mut() {
            if let Some(key) = index.key_of(&row) {
                index.insert(key, id);
            }
        }

        self.positions.insert(id, self.rows.len());
        self.rows.push(row);
        tracing::trace!(table = %self.name, id, "row inserted");
        id
    }

    /// Merges `partial` into the row with the given id.
    ///
    /// Fields absent from `partial` are left untouched; `id` is never
    /// changed. Unknown ids are a no-op. Returns whether a row was updated.
    pub fn update(&mut self, id: RowId, partial: Row) -> bool {
        let Some(position) = self.position(id) else {
            tracing::trace!(table = %self.name, id, "update skipped, row not found");
            return false;
        };

        let touches_index = self
            .index
            .as_ref()
            .is_some_and(|index| partial.contains(index.field()));
        let old_key = match self.index.as_ref() {
            Some(index) if touches_index && self.prune_stale_index_entries => {
                index.key_of(&self.rows[position])
            }
            _ => None,
        };

        let row = &mut self.rows[position];
        row.merge(partial);

        if let Some(index) = self.index.as_mut() {
            if touches_index {
                let new_key = index.key_of(row);
                if let Some(old_key) = old_key {
                    if new_key.as_ref() != Some(&old_key) {
                        index.remove_if_owned(&old_key, id);
                    }
                }
                if let Some(new_key) = new_key {
                    index.insert(new_key, id);
                }
            }
        }

        tracing::trace!(table = %self.name, id, "row updated");
        true
    }

    /// Removes the row with the given id and returns it.
    ///
    /// Unknown ids are a no-op. The row's index entry is dropped unless a
    /// later row has taken it over.
    pub fn delete(&mut self, id: RowId) -> Option<Row> {
        let position = self.positions.remove(&id)?;
        let row = self.rows.remove(position);
        for later in self.positions.values_mut() {
            if *later > position {
                *later -= 1;
            }
        }

        if let Some(index) = self.index.as_mut() {
            if let Some(key) = index.key_of(&row) {
                index.remove_if_owned(&key, id);
            }
        }

        tracing::trace!(table = %self.name, id, "row deleted");
        Some(row)
    }

    /// Finds a row by id.
    pub fn find(&self, id: RowId) -> Option<&Row> {
        self.position(id).and_then(|position| self.rows.get(position))
    }

    /// Finds a row through the secondary index.
    ///
    /// Returns `None` if the table is not indexed, the value is empty, or no
    /// live row is registered under it.
    pub fn find_by_index(&self, value: &Value) -> Option<&Row> {
        let index = self.index.as_ref()?;
        let id = index.get(&value.index_key()?)?;
        self.find(id)
    }

    fn position(&self, id: RowId) -> Option<usize> {
        self.positions.get(&id).copied()
    }
}
