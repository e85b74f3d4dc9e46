//! Process bootstrap: wire the store and resources into a registry, then
//! drive the registry through its lifecycle.

use anyhow::Context;
use bookrec_db::{Database, DatabaseModule};
use bookrec_kernel::{settings::Settings, InitCtx, ModuleRegistry};
use std::sync::Arc;

use crate::modules;

/// Registry with the database as the only core module and every resource
/// as a custom module.
pub fn build_registry(db: &Database, settings: &Settings) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    registry.register_core(Arc::new(DatabaseModule::new(db.clone())));
    modules::register_all(&mut registry, db, &settings.crud);
    registry
}

/// Run the HTTP server until a shutdown signal arrives.
pub async fn serve(settings: Settings) -> anyhow::Result<()> {
    let db = Database::connect(&settings.database).await?;
    let registry = build_registry(&db, &settings);

    let outcome = run(&registry, &db, &settings).await;

    // Stop every module even when startup failed halfway.
    let stopped = registry.shutdown().await;
    outcome?;
    stopped
}

async fn run(registry: &ModuleRegistry, db: &Database, settings: &Settings) -> anyhow::Result<()> {
    let ctx = InitCtx { settings };

    registry.init_core_modules(&ctx).await?;

    if settings.database.run_migrations {
        let applied = db
            .migrate(&registry.collect_migrations())
            .await
            .context("failed to run migrations")?;
        tracing::info!(applied, "migrations complete");
    } else {
        tracing::info!("automatic migrations disabled");
    }

    registry.init_custom_modules(&ctx).await?;
    registry.start_core_modules(&ctx).await?;
    registry.start_custom_modules(&ctx).await?;

    tracing::info!(
        core = registry.core_module_count(),
        custom = registry.custom_module_count(),
        "bootstrap complete"
    );

    bookrec_http::start_server(registry, settings).await
}

/// Apply pending migrations and exit.
pub async fn migrate(settings: &Settings) -> anyhow::Result<usize> {
    let db = Database::connect(&settings.database).await?;
    let registry = build_registry(&db, settings);

    let applied = db
        .migrate(&registry.collect_migrations())
        .await
        .context("failed to run migrations");
    db.close().await;
    applied
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_holds_database_and_every_resource() {
        let registry = build_registry(&Database::memory(), &Settings::default());

        assert_eq!(registry.core_module_count(), 1);
        assert_eq!(registry.custom_module_count(), 6);
        for name in [
            "db",
            "books",
            "authors",
            "genres",
            "libraries",
            "user-interactions",
            "recommendations",
        ] {
            assert!(registry.get_module(name).is_some(), "missing module {name}");
        }
    }

    #[test]
    fn one_migration_per_resource() {
        let registry = build_registry(&Database::memory(), &Settings::default());

        let migrations = registry.collect_migrations();
        assert_eq!(migrations.len(), 6);
        assert!(migrations
            .iter()
            .any(|(module, m)| module == "user-interactions"
                && m.up.contains("CREATE TABLE IF NOT EXISTS user_interactions")));
    }

    #[tokio::test]
    async fn memory_lifecycle_runs_cleanly() {
        let settings = Settings::default();
        let db = Database::memory();
        let registry = build_registry(&db, &settings);
        let ctx = InitCtx { settings: &settings };

        registry.init_core_modules(&ctx).await.unwrap();
        assert_eq!(db.migrate(&registry.collect_migrations()).await.unwrap(), 0);
        registry.init_custom_modules(&ctx).await.unwrap();
        registry.start_core_modules(&ctx).await.unwrap();
        registry.start_custom_modules(&ctx).await.unwrap();
        registry.shutdown().await.unwrap();
    }
}
