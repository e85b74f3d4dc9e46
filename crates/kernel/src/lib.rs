//! Settings, module contract, and module lifecycle registry shared by every
//! bookrec crate.

pub mod module;
pub mod registry;
pub mod settings;

pub use module::{InitCtx, Migration, Module, RouteInfo};
pub use registry::ModuleRegistry;
