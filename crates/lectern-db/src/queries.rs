//! Database query functions organized by domain.

pub mod courses;
pub mod identity;
pub mod posts;
pub mod reactions;
pub mod search;
pub mod stats;
pub mod threads;
