//! Book recommendation catalog.
//!
//! Six resources (books, authors, genres, libraries, user interactions and
//! recommendations) served over HTTP as plain CRUD. Each one is a
//! [`modules::crud::CrudModule`] registered with the kernel's module registry.

pub mod app;
pub mod modules;

pub use app::{build_registry, migrate, serve};
