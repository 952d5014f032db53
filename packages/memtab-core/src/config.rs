//! Store configuration.

/// Store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    /// Rows pre-allocated for every new table
    pub initial_table_capacity: usize,
    /// Drop the index entry for a row's previous value when an update
    /// changes the indexed field. When false the old entry is left behind
    /// and keeps resolving to the updated row.
    pub prune_stale_index_entries: bool,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            initial_table_capacity: 64,
            prune_stale_index_entries: true,
        }
    }
}
