//! Integration test suite.
//!
//! Tests are organized by area:
//! 1. End-to-end CRUD through the global manager
//! 2. Manager lifecycle and registry semantics
//! 3. Concurrency

pub mod concurrency_tests;
pub mod end_to_end_tests;
