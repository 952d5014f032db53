//! End-to-end workflow tests.
//!
//! Drive the store the way an application does: global manager, database,
//! indexed table, then CRUD on the table handle.

use anyhow::Context;
use memtab_core::{DatabaseManager, DbError, Row, Value};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

/// Full CRUD lifecycle: create database → create table → insert → update → delete → find
#[test]
fn test_users_scenario() -> anyhow::Result<()> {
    let manager = DatabaseManager::instance();
    manager.create_database("e2e_users")?;
    manager.create_table("e2e_users", "Users", ["name", "age"], Some("name"))?;

    let users = manager
        .get_table("e2e_users", "Users")?
        .context("Users table should exist")?;

    let alice = users.insert(Row::from_json(json!({"name": "Alice", "age": 25})).context("row")?)?;
    let bob = users.insert(Row::from_json(json!({"name": "Bob", "age": 30})).context("row")?)?;
    assert_eq!((alice, bob), (1, 2));

    users.update(1, Row::new().with("age", 26))?;
    let row = users.find(1)?.context("Alice should still exist")?;
    assert_eq!(
        serde_json::to_value(&row)?,
        json!({"id": 1, "name": "Alice", "age": 26})
    );

    users.delete(2)?;
    assert!(users.find(2)?.is_none());
    assert_eq!(users.len()?, 1);

    let table = users.read()?;
    let by_index = table.find_by_index(&Value::from("Alice")).context("indexed")?;
    assert!(std::ptr::eq(by_index, table.find(1).context("by id")?));
    assert!(table.find_by_index(&Value::from("Bob")).is_none());
    Ok(())
}

/// Creating a table in an unknown database is the only hard failure.
#[test]
fn test_create_table_in_missing_database() {
    let manager = DatabaseManager::instance();
    let result = manager.create_table("e2e_never_created", "Users", ["name"], None);
    assert!(matches!(
        result,
        Err(DbError::DatabaseNotFound { ref database }) if database == "e2e_never_created"
    ));
    assert!(manager
        .get_table("e2e_never_created", "Users")
        .unwrap()
        .is_none());
}

/// Re-creating a table discards the previous rows.
#[test]
fn test_recreate_table_through_manager() -> anyhow::Result<()> {
    let manager = DatabaseManager::instance();
    manager.create_database("e2e_recreate")?;
    let first = manager.create_table("e2e_recreate", "Users", ["name"], None)?;
    first.insert(Row::new().with("name", "Alice"))?;
    first.insert(Row::new().with("name", "Bob"))?;

    manager.create_table("e2e_recreate", "Users", ["name"], Some("name"))?;
    let users = manager
        .get_table("e2e_recreate", "Users")?
        .context("Users table should exist")?;
    assert!(users.is_empty()?);
    assert!(users.find(1)?.is_none());
    assert_eq!(users.insert(Row::new().with("name", "Carol"))?, 1);
    Ok(())
}

/// Ids strictly increase and never repeat across random insert/delete mixes.
#[test]
fn test_ids_monotonic_under_random_deletes() -> anyhow::Result<()> {
    let manager = DatabaseManager::instance();
    manager.create_database("e2e_random")?;
    let table = manager.create_table("e2e_random", "Events", ["kind"], Some("kind"))?;

    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut live = Vec::new();
    let mut last_id = 0;

    for step in 0..500 {
        if !live.is_empty() && rng.gen_bool(0.4) {
            let victim = live.swap_remove(rng.gen_range(0..live.len()));
            assert!(table.delete(victim)?.is_some());
            assert!(table.find(victim)?.is_none());
        } else {
            let id = table.insert(Row::new().with("kind", format!("k{}", step % 7)))?;
            assert!(id > last_id, "id {} after {}", id, last_id);
            last_id = id;
            live.push(id);
        }
    }

    assert_eq!(table.len()?, live.len());
    for id in &live {
        let row = table.find(*id)?.context("live row missing")?;
        assert_eq!(row.id(), Some(*id));
    }
    Ok(())
}

/// An update touches only the fields it names.
#[test]
fn test_update_is_partial() -> anyhow::Result<()> {
    let manager = DatabaseManager::instance();
    manager.create_database("e2e_partial")?;
    let table = manager.create_table("e2e_partial", "Profiles", ["name", "bio"], None)?;

    let id = table.insert(
        Row::from_json(json!({
            "name": "Alice",
            "bio": {"city": "Oslo", "langs": ["rust", "go"]},
            "active": true
        }))
        .context("row")?,
    )?;
    let before = table.find(id)?.context("row")?;

    assert!(!table.update(id + 100, Row::new().with("name", "ghost"))?);
    table.update(id, Row::new().with("active", false))?;

    let after = table.find(id)?.context("row")?;
    assert_eq!(after.get("active"), Some(&Value::Bool(false)));
    for field in ["id", "name", "bio"] {
        assert_eq!(after.get(field), before.get(field), "field {}", field);
    }
    Ok(())
}
