//! Integration test crate for the Lectern forum.
//!
//! This crate has no library code. Its tests drive `lectern-forum` end to end
//! against real SQLite databases, in memory and on disk.
//!
//! Run all integration tests:
//! ```sh
//! cargo test -p lectern-integration-tests
//! ```
