//! Process-wide registry of databases.
//!
//! [`DatabaseManager::instance`] hands out one shared manager for the whole
//! process. It is built on first access behind a `OnceCell`, so concurrent
//! first callers all observe the same instance. Isolated managers can be
//! built with [`DatabaseManager::new`].

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use once_cell::sync::OnceCell;

use crate::config::DbConfig;
use crate::database::{Database, TableHandle};
use crate::error::DbError;

static INSTANCE: OnceCell<DatabaseManager> = OnceCell::new();

/// Registry of named databases.
#[derive(Debug)]
pub struct DatabaseManager {
    /// Map of database name to database
    databases: RwLock<HashMap<String, Arc<Database>>>,
    config: DbConfig,
}

impl DatabaseManager {
    /// Creates a standalone manager, independent of the global instance.
    pub fn new(config: DbConfig) -> Self {
        Self {
            databases: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Returns the process-wide manager, creating it with the default
    /// configuration on first use.
    pub fn instance() -> &'static DatabaseManager {
        Self::instance_with(DbConfig::default)
    }

    /// Returns the process-wide manager, creating it from `config` on first
    /// use. Later calls return the existing instance and never invoke
    /// `config`.
    pub fn instance_with<F>(config: F) -> &'static DatabaseManager
    where
        F: FnOnce() -> DbConfig,
    {
        INSTANCE.get_or_init(|| {
            let config = config();
            tracing::debug!(?config, "initializing global database manager");
            DatabaseManager::new(config)
        })
    }

    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    /// Registers an empty database under `name`.
    ///
    /// Idempotent: an existing database is kept and returned untouched.
    pub fn create_database(&self, name: &str) -> Result<Arc<Database>, DbError> {
        let mut databases = self.databases.write().map_err(|_| DbError::LockPoisoned)?;
        let db = databases.entry(name.to_string()).or_insert_with(|| {
            tracing::debug!(database = %name, "created database");
            Arc::new(Database::new(name, self.config.clone()))
        });
        Ok(Arc::clone(db))
    }

    /// Gets a database by name, or `None` if it was never created.
    pub fn get_database(&self, name: &str) -> Result<Option<Arc<Database>>, DbError> {
        let databases = self.databases.read().map_err(|_| DbError::LockPoisoned)?;
        Ok(databases.get(name).cloned())
    }

    /// Creates a table inside an existing database.
    ///
    /// # Errors
    /// `DbError::DatabaseNotFound` if `db_name` was never created.
    pub fn create_table<I, S>(
        &self,
        db_name: &str,
        table_name: &str,
        schema: I,
        index_field: Option<&str>,
    ) -> Result<TableHandle, DbError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let db = self
            .get_database(db_name)?
            .ok_or_else(|| DbError::DatabaseNotFound {
                database: db_name.to_string(),
            })?;
        db.create_table(table_name, schema, index_field)
    }

    /// Gets a table, or `None` if either the database or the table is
    /// missing.
    pub fn get_table(
        &self,
        db_name: &str,
        table_name: &str,
    ) -> Result<Option<TableHandle>, DbError> {
        match self.get_database(db_name)? {
            Some(db) => db.get_table(table_name),
            None => Ok(None),
        }
    }

    /// Returns all database names, sorted.
    pub fn database_names(&self) -> Result<Vec<String>, DbError> {
        let databases = self.databases.read().map_err(|_| DbError::LockPoisoned)?;
        let mut names: Vec<String> = databases.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

impl Default for DatabaseManager {
    fn default() -> Self {
        Self::new(DbConfig::default())
    }
}
