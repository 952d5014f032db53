//! Secondary index over a single field.

use std::collections::HashMap;

use crate::value::{IndexKey, Value};

use super::row::{Row, RowId};

/// Maps values of one field to the id of the row holding them.
///
/// Unique per value: a later row with an equal value takes the entry over.
#[derive(Debug, Clone)]
pub struct SecondaryIndex {
    field: String,
    entries: HashMap<IndexKey, RowId>,
}

impl SecondaryIndex {
    pub fn new(field: String) -> Self {
        Self {
            field,
            entries: HashMap::new(),
        }
    }

    /// Name of the indexed field.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Key of `row` in this index, if the row holds a non-empty value for
    /// the indexed field.
    pub fn key_of(&self, row: &Row) -> Option<IndexKey> {
        row.get(&self.field).and_then(Value::index_key)
    }

    /// Points `key` at `id`, replacing whatever it pointed at before.
    pub fn insert(&mut self, key: IndexKey, id: RowId) {
        self.entries.insert(key, id);
    }

    pub fn get(&self, key: &IndexKey) -> Option<RowId> {
        self.entries.get(key).copied()
    }

    /// Removes `key` only while it still points at `id`.
    pub fn remove_if_owned(&mut self, key: &IndexKey, id: RowId) -> bool {
        if self.entries.get(key) == Some(&id) {
            self.entries.remove(key);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
