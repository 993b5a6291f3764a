//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - Connection pool handed to each repository - no global connection
//! - Rely on DB constraints for referential integrity - no check-then-insert
//! - Transactions for multi-step operations

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_memory_pool, create_pool, create_pool_with_options};
pub use repos::*;
