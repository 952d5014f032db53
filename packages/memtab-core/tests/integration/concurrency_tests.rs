//! Concurrency integration tests.
//!
//! Mutations on one table are serialized by its lock: no lost inserts, no
//! duplicate ids, and readers never see a row without its index entry.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use memtab_core::config::DbConfig;
use memtab_core::{DatabaseManager, Row, Value};
use ntest::timeout;

const THREADS: usize = 8;
const INSERTS_PER_THREAD: usize = 250;

#[timeout(10000)]
#[test]
fn test_concurrent_inserts_get_unique_ids() {
    let manager = DatabaseManager::new(DbConfig::default());
    manager.create_database("MyDatabase").unwrap();
    let table = manager
        .create_table("MyDatabase", "Events", ["worker", "seq"], None)
        .unwrap();

    let ids: Vec<u64> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|worker| {
                let table = table.clone();
                s.spawn(move || {
                    (0..INSERTS_PER_THREAD)
                        .map(|seq| {
                            table
                                .insert(
                                    Row::new()
                                        .with("worker", worker as i64)
                                        .with("seq", seq as i64),
                                )
                                .unwrap()
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });

    let total = THREADS * INSERTS_PER_THREAD;
    let unique: HashSet<u64> = ids.iter().copied().collect();
    assert_eq!(unique.len(), total);
    assert_eq!(unique, (1..=total as u64).collect::<HashSet<_>>());
    assert_eq!(table.len().unwrap(), total);
    assert_eq!(table.read().unwrap().auto_increment_id(), total as u64 + 1);
}

#[timeout(10000)]
#[test]
fn test_readers_see_consistent_index() {
    let manager = DatabaseManager::new(DbConfig::default());
    manager.create_database("MyDatabase").unwrap();
    let table = manager
        .create_table("MyDatabase", "Users", ["name"], Some("name"))
        .unwrap();
    let done = AtomicBool::new(false);

    thread::scope(|s| {
        let writer = table.clone();
        let done_ref = &done;
        s.spawn(move || {
            for i in 0..1000 {
                let name = format!("user-{}", i);
                let id = writer.insert(Row::new().with("name", name.as_str())).unwrap();
                if i % 3 == 0 {
                    writer
                        .update(id, Row::new().with("name", format!("{}-renamed", name)))
                        .unwrap();
                }
                if i % 5 == 0 {
                    writer.delete(id).unwrap();
                }
            }
            done_ref.store(true, Ordering::Release);
        });

        for _ in 0..2 {
            let reader = table.clone();
            let done_ref = &done;
            s.spawn(move || {
                while !done_ref.load(Ordering::Acquire) {
                    let guard = reader.read().unwrap();
                    for row in guard.rows() {
                        let name = row.get("name").cloned().unwrap_or(Value::Null);
                        let indexed = guard.find_by_index(&name).unwrap();
                        assert_eq!(indexed.id(), row.id());
                    }
                    assert_eq!(guard.index_len(), guard.len());
                }
            });
        }
    });

    // 1000 inserts, every fifth one deleted.
    assert_eq!(table.len().unwrap(), 800);
    assert_eq!(table.read().unwrap().index_len(), 800);
}
