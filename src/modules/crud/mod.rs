//! Generic CRUD resource: one [`Entity`] wired through repository, service,
//! and handlers, registered with the kernel as a single module.

pub mod fields;
pub mod handlers;
pub mod openapi;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use bookrec_db::{Database, Entity};
use bookrec_kernel::{settings::CrudSettings, InitCtx, Migration, Module, RouteInfo};
use axum::Router;

use handlers::SharedService;
use service::CrudService;

pub struct CrudModule<E: Entity> {
    service: SharedService<E>,
}

impl<E: Entity> CrudModule<E> {
    pub fn new(service: SharedService<E>) -> Self {
        Self { service }
    }

    /// Resource backed by `db` with the pass-through service.
    pub fn on(db: &Database, settings: &CrudSettings) -> Arc<dyn Module> {
        let service = CrudService::new(db.repository::<E>(), settings);
        Arc::new(Self::new(Arc::new(service)))
    }
}

#[async_trait]
impl<E: Entity> Module for CrudModule<E> {
    fn name(&self) -> &'static str {
        E::RESOURCE
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            table = E::TABLE,
            strict_writes = ctx.settings.crud.strict_writes,
            "{} module initialized",
            E::NAME
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        handlers::router::<E>(self.service.clone())
    }

    fn route_table(&self) -> Vec<RouteInfo> {
        let collection = format!("/{}/", E::RESOURCE);
        let member = format!("/{}/{{id}}", E::RESOURCE);

        let mut routes = vec![
            RouteInfo::new("POST", collection.clone(), format!("create {}", E::NAME)),
            RouteInfo::new("GET", collection, format!("list {}", E::RESOURCE)),
            RouteInfo::new("GET", member.clone(), format!("get {}", E::NAME)),
            RouteInfo::new("PUT", member.clone(), format!("update {}", E::NAME)),
            RouteInfo::new("DELETE", member, format!("delete {}", E::NAME)),
        ];
        if E::OWNER_COLUMN.is_some() {
            routes.push(RouteInfo::new(
                "GET",
                format!("/{}/user/{{user_id}}", E::RESOURCE),
                format!("list {} by user", E::RESOURCE),
            ));
        }
        routes
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi::document::<E>())
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_init",
            up: E::SCHEMA,
        }]
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::debug!(module = self.name(), "module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::debug!(module = self.name(), "module stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::models::Book;
    use crate::modules::recommendations::models::Recommendation;

    #[test]
    fn route_table_lists_user_route_only_for_owned_entities() {
        let db = Database::memory();
        let settings = CrudSettings::default();

        let books = CrudModule::<Book>::on(&db, &settings);
        let recommendations = CrudModule::<Recommendation>::on(&db, &settings);

        assert_eq!(books.route_table().len(), 5);
        assert_eq!(recommendations.route_table().len(), 6);
        assert!(recommendations
            .route_table()
            .iter()
            .any(|route| route.path == "/recommendations/user/{user_id}"));
    }

    #[test]
    fn openapi_fragment_describes_columns() {
        let doc = openapi::document::<Book>();

        let schema = &doc["components"]["schemas"]["Book"];
        assert_eq!(schema["properties"]["publication_year"]["type"], "integer");
        assert_eq!(schema["properties"]["cover_image_url"]["type"], "string");
        assert!(doc["paths"]["/books/{id}"]["put"].is_object());
        assert!(doc["paths"]["/books/user/{user_id}"].is_null());
    }

    #[test]
    fn schema_names_are_pascal_case() {
        use crate::modules::user_interactions::models::UserInteraction;

        assert_eq!(openapi::schema_name::<Book>(), "Book");
        assert_eq!(openapi::schema_name::<UserInteraction>(), "UserInteraction");
    }

    #[test]
    fn migration_creates_the_table() {
        let db = Database::memory();
        let module = CrudModule::<Book>::on(&db, &CrudSettings::default());

        let migrations = module.migrations();
        assert_eq!(migrations.len(), 1);
        assert_eq!(migrations[0].id, "001_init");
        assert!(migrations[0].up.contains("CREATE TABLE IF NOT EXISTS books"));
    }
}
