//! Database container managing named tables.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::DbConfig;
use crate::error::DbError;
use crate::table::{Row, RowId, Table};
use crate::value::Value;

/// Database container holding all tables registered under one name.
#[derive(Debug)]
pub struct Database {
    /// Database name
    name: String,
    /// Map of table name to table instance
    tables: RwLock<HashMap<String, TableHandle>>,
    /// Configuration applied to every table created here
    config: DbConfig,
}

impl Database {
    /// Creates a new empty database.
    pub fn new(name: impl Into<String>, config: DbConfig) -> Self {
        Self {
            name: name.into(),
            tables: RwLock::new(HashMap::new()),
            config,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Creates a table and registers it under `name`.
    ///
    /// An existing table with the same name is replaced; its rows become
    /// unreachable through this database. Handles to the old table that
    /// callers still hold keep working on the old data.
    ///
    /// # Arguments
    /// * `name` - Table name
    /// * `schema` - Declared field names (informational)
    /// * `index_field` - Field to build a secondary index on
    ///
    /// # Returns
    /// `Result<TableHandle, DbError>` with a handle to the new table.
    pub fn create_table<I, S>(
        &self,
        name: impl Into<String>,
        schema: I,
        index_field: Option<&str>,
    ) -> Result<TableHandle, DbError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let schema: Vec<String> = schema.into_iter().map(Into::into).collect();
        let table = Table::create(
            name.clone(),
            schema,
            index_field.map(str::to_string),
            &self.config,
        );
        let handle = TableHandle::new(table);

        let mut tables = self.tables.write().map_err(|_| DbError::LockPoisoned)?;
        if tables.insert(name.clone(), handle.clone()).is_some() {
            tracing::warn!(database = %self.name, table = %name, "replaced existing table");
        } else {
            tracing::debug!(database = %self.name, table = %name, "created table");
        }
        Ok(handle)
    }

    /// Gets a handle to a table by name, or `None` if it does not exist.
    pub fn get_table(&self, name: &str) -> Result<Option<TableHandle>, DbError> {
        let tables = self.tables.read().map_err(|_| DbError::LockPoisoned)?;
        Ok(tables.get(name).cloned())
    }

    /// Returns all table names, sorted.
    pub fn table_names(&self) -> Result<Vec<String>, DbError> {
        let tables = self.tables.read().map_err(|_| DbError::LockPoisoned)?;
        let mut names: Vec<String> = tables.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    /// Returns the number of tables in the database.
    pub fn table_count(&self) -> Result<usize, DbError> {
        let tables = self.tables.read().map_err(|_| DbError::LockPoisoned)?;
        Ok(tables.len())
    }
}

/// Shared, lock-guarded reference to a table.
///
/// Cloning the handle shares the table. Mutations take the table's write
/// lock, lookups its read lock, so readers never see a half-applied insert,
/// update or delete.
#[derive(Debug, Clone)]
pub struct TableHandle {
    inner: Arc<RwLock<Table>>,
}

impl TableHandle {
    pub fn new(table: Table) -> Self {
        Self {
            inner: Arc::new(RwLock::new(table)),
        }
    }

    /// Locks the table for reading.
    pub fn read(&self) -> Result<RwLockReadGuard<'_, Table>, DbError> {
        self.inner.read().map_err(|_| DbError::LockPoisoned)
    }

    /// Locks the table for writing.
    pub fn write(&self) -> Result<RwLockWriteGuard<'_, Table>, DbError> {
        self.inner.write().map_err(|_| DbError::LockPoisoned)
    }

    /// Inserts a row. See [`Table::insert`].
    pub fn insert(&self, row: Row) -> Result<RowId, DbError> {
        Ok(self.write()?.insert(row))
    }

    /// Merges fields into a row. See [`Table::update`].
    pub fn update(&self, id: RowId, partial: Row) -> Result<bool, DbError> {
        Ok(self.write()?.update(id, partial))
    }

    /// Deletes a row. See [`Table::delete`].
    pub fn delete(&self, id: RowId) -> Result<Option<Row>, DbError> {
        Ok(self.write()?.delete(id))
    }

    /// Returns a copy of the row with the given id.
    pub fn find(&self, id: RowId) -> Result<Option<Row>, DbError> {
        Ok(self.read()?.find(id).cloned())
    }

    /// Returns a copy of the row registered under `value` in the secondary
    /// index.
    pub fn find_by_index(&self, value: impl Into<Value>) -> Result<Option<Row>, DbError> {
        let value = value.into();
        Ok(self.read()?.find_by_index(&value).cloned())
    }

    /// Returns the number of rows.
    pub fn len(&self) -> Result<usize, DbError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, DbError> {
        Ok(self.read()?.is_empty())
    }

    /// Returns true if both handles refer to the same table.
    pub fn ptr_eq(&self, other: &TableHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
