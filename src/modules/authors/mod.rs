pub mod models;

use std::sync::Arc;

use bookrec_db::Database;
use bookrec_kernel::{settings::CrudSettings, Module};

use crate::modules::crud::CrudModule;

pub fn create_module(db: &Database, settings: &CrudSettings) -> Arc<dyn Module> {
    CrudModule::<models::Author>::on(db, settings)
}
