pub mod authors;
pub mod books;
pub mod crud;
pub mod genres;
pub mod libraries;
pub mod recommendations;
pub mod user_interactions;

use bookrec_db::Database;
use bookrec_kernel::{settings::CrudSettings, ModuleRegistry};

/// Register every catalog resource with the registry
pub fn register_all(registry: &mut ModuleRegistry, db: &Database, settings: &CrudSettings) {
    registry.register_custom(books::create_module(db, settings));
    registry.register_custom(authors::create_module(db, settings));
    registry.register_custom(genres::create_module(db, settings));
    registry.register_custom(libraries::create_module(db, settings));
    registry.register_custom(user_interactions::create_module(db, settings));
    registry.register_custom(recommendations::create_module(db, settings));
}
