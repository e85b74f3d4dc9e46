//! Relational storage for bookrec: the shared database handle, the generic
//! one-statement-per-call [`Repository`] with its Postgres and in-memory
//! implementations, and the migration runner.

pub mod database;
pub mod entity;
pub mod error;
pub mod memory;
pub mod migrate;
pub mod module;
pub mod postgres;
pub mod repository;

pub use database::Database;
pub use entity::{Column, ColumnKind, Entity, PgQuery};
pub use error::{ErrorKind, StoreError, StoreResult};
pub use memory::MemoryRepository;
pub use module::DatabaseModule;
pub use postgres::{PgRepository, Statements};
pub use repository::Repository;

#[cfg(test)]
mod fixtures;
