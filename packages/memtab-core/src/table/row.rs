//! Schema-free rows.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Row identifier assigned by a table on insert.
pub type RowId = u64;

/// Reserved field holding the row identifier.
pub const ID_FIELD: &str = "id";

/// A row: field name to value, in the order fields were first set.
///
/// The `id` field is owned by the table. It is written on insert and is
/// never changed by an update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    fields: IndexMap<String, Value>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a row from a JSON object. Returns `None` for any other JSON
    /// shape.
    pub fn from_json(json: serde_json::Value) -> Option<Self> {
        match json {
            serde_json::Value::Object(fields) => Some(fields.into_iter().collect()),
            _ => None,
        }
    }

    /// Sets `field` and returns the row, for chained construction.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    /// Sets `field`, returning the previous value. A new field goes last;
    /// an existing one keeps its place.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.shift_remove(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns the identifier, if the row has been inserted into a table.
    pub fn id(&self) -> Option<RowId> {
        match self.fields.get(ID_FIELD) {
            Some(Value::Int(id)) => RowId::try_from(*id).ok(),
            _ => None,
        }
    }

    /// Iterates fields in order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn assign_id(&mut self, id: RowId) {
        // Ids start at 1 and grow by one per insert; they cannot reach i64::MAX.
        self.fields
            .insert(ID_FIELD.to_string(), Value::Int(id as i64));
    }

    /// Shallow merge: every field of `partial` except `id` overwrites ours.
    pub(crate) fn merge(&mut self, partial: Row) {
        for (field, value) in partial.fields {
            if field == ID_FIELD {
                continue;
            }
            self.fields.insert(field, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json: serde_json::Map<String, serde_json::Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect();
        write!(f, "{}", serde_json::Value::Object(json))
    }
}
