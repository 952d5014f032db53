//! Command-line walkthrough of the in-memory tabular store.
//!
//! Creates a database and an indexed users table on the global manager,
//! then inserts, updates, deletes and looks rows up, printing the results
//! as JSON.

use anyhow::Context;
use clap::Parser;
use memtab_core::config::DbConfig;
use memtab_core::{DatabaseManager, Row, TableHandle};
use serde_json::json;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the demo.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Database to create
    #[arg(long, default_value = "MyDatabase")]
    database: String,

    /// Table to create inside the database
    #[arg(long, default_value = "Users")]
    table: String,

    /// Field to build the secondary index on (empty for none)
    #[arg(long, default_value = "name")]
    index_field: String,

    /// Create the table without a secondary index
    #[arg(long)]
    no_index: bool,

    /// Keep index entries for values that an update replaced
    #[arg(long)]
    keep_stale_index_entries: bool,

    /// Rows pre-allocated per table
    #[arg(long, default_value_t = 64)]
    initial_table_capacity: usize,
}

impl Args {
    /// Index field to create the table with, if any.
    fn index_field(&self) -> Option<&str> {
        if self.no_index || self.index_field.is_empty() {
            None
        } else {
            Some(&self.index_field)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = DbConfig {
        initial_table_capacity: args.initial_table_capacity,
        prune_stale_index_entries: !args.keep_stale_index_entries,
    };
    let manager = DatabaseManager::instance_with(|| config);

    manager.create_database(&args.database)?;
    manager.create_table(
        &args.database,
        &args.table,
        ["name", "age"],
        args.index_field(),
    )?;

    let users = manager
        .get_table(&args.database, &args.table)?
        .with_context(|| {
            format!(
                "table {}.{} missing after creation",
                args.database, args.table
            )
        })?;

    run_scenario(&users)?;

    let table = users.read()?;
    tracing::info!(
        table = %table.name(),
        rows = table.len(),
        next_id = table.auto_increment_id(),
        "scenario finished"
    );
    println!("rows: {}", table.len());
    Ok(())
}

fn run_scenario(users: &TableHandle) -> anyhow::Result<()> {
    let alice = users.insert(row(json!({"name": "Alice", "age": 25}))?)?;
    let bob = users.insert(row(json!({"name": "Bob", "age": 30}))?)?;
    tracing::info!(alice, bob, "inserted users");

    users.update(alice, Row::new().with("age", 26))?;
    users.delete(bob)?;

    match users.find(alice)? {
        Some(found) => println!("{}", found),
        None => println!("row {} not found", alice),
    }
    if users.find(bob)?.is_none() {
        println!("row {} deleted", bob);
    }
    if let Some(found) = users.find_by_index("Alice")? {
        println!("index \"Alice\" -> {}", found);
    }
    Ok(())
}

fn row(json: serde_json::Value) -> anyhow::Result<Row> {
    Row::from_json(json).context("row literal must be a JSON object")
}
