use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use bookrec_kernel::settings::{DatabaseBackend, DatabaseSettings};
use bookrec_kernel::Migration;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;

use crate::entity::Entity;
use crate::error::{StoreError, StoreResult};
use crate::memory::MemoryRepository;
use crate::migrate;
use crate::postgres::PgRepository;
use crate::repository::Repository;

/// Process-wide database handle. Cloning shares the underlying pool.
#[derive(Clone, Debug)]
pub enum Database {
    Postgres(PgPool),
    Memory,
}

impl Database {
    /// Open the store selected by `settings.backend`. For Postgres this
    /// establishes a first connection, so unreachable servers and bad
    /// credentials fail here rather than on the first request.
    pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<Self> {
        match settings.backend {
            DatabaseBackend::Memory => {
                tracing::info!(target: "bookrec-db", "using in-memory store");
                Ok(Self::memory())
            }
            DatabaseBackend::Postgres => {
                let options = connect_options(settings)?;
                let pool = PgPoolOptions::new()
                    .max_connections(settings.max_connections)
                    .acquire_timeout(Duration::from_millis(settings.acquire_timeout_ms))
                    .connect_with(options)
                    .await
                    .with_context(|| {
                        format!("error connecting to database {}", settings.display_target())
                    })?;

                tracing::info!(
                    target: "bookrec-db",
                    db = %settings.display_target(),
                    max_connections = settings.max_connections,
                    "database pool initialized"
                );
                Ok(Self::Postgres(pool))
            }
        }
    }

    pub fn memory() -> Self {
        Self::Memory
    }

    pub fn backend(&self) -> DatabaseBackend {
        match self {
            Database::Postgres(_) => DatabaseBackend::Postgres,
            Database::Memory => DatabaseBackend::Memory,
        }
    }

    /// Build the repository for `E` on this store. Memory repositories are
    /// independent, so call this once per entity.
    pub fn repository<E: Entity>(&self) -> Arc<dyn Repository<E>> {
        match self {
            Database::Postgres(pool) => Arc::new(PgRepository::<E>::new(pool.clone())),
            Database::Memory => Arc::new(MemoryRepository::<E>::new()),
        }
    }

    pub async fn ping(&self) -> StoreResult<()> {
        match self {
            Database::Postgres(pool) => {
                sqlx::query("SELECT 1")
                    .execute(pool)
                    .await
                    .map_err(|e| StoreError::from_sqlx("error pinging database", e))?;
                Ok(())
            }
            Database::Memory => Ok(()),
        }
    }

    /// Apply pending migrations. The memory store has no schema.
    pub async fn migrate(&self, migrations: &[(String, Migration)]) -> anyhow::Result<usize> {
        match self {
            Database::Postgres(pool) => migrate::run_migrations(pool, migrations).await,
            Database::Memory => {
                tracing::debug!(target: "bookrec-db", "in-memory store, skipping migrations");
                Ok(0)
            }
        }
    }

    /// Close the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        if let Database::Postgres(pool) = self {
            if !pool.is_closed() {
                pool.close().await;
                tracing::info!(target: "bookrec-db", "database connection closed");
            }
        }
    }
}

fn connect_options(settings: &DatabaseSettings) -> anyhow::Result<PgConnectOptions> {
    let ssl_mode = PgSslMode::from_str(&settings.sslmode)
        .with_context(|| format!("invalid database sslmode '{}'", settings.sslmode))?;

    Ok(PgConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .username(&settings.user)
        .password(&settings.password)
        .database(&settings.dbname)
        .ssl_mode(ssl_mode))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_options_reject_unknown_sslmode() {
        let settings = DatabaseSettings {
            sslmode: "sometimes".to_string(),
            ..DatabaseSettings::default()
        };
        let err = connect_options(&settings).unwrap_err();
        assert!(err.to_string().contains("invalid database sslmode 'sometimes'"));
    }

    #[test]
    fn connect_options_carry_settings() {
        let settings = DatabaseSettings {
            host: "db.internal".to_string(),
            port: 6543,
            dbname: "catalog".to_string(),
            sslmode: "require".to_string(),
            ..DatabaseSettings::default()
        };
        let options = connect_options(&settings).unwrap();
        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_database(), Some("catalog"));
        assert!(matches!(options.get_ssl_mode(), PgSslMode::Require));
    }

    #[tokio::test]
    async fn memory_backend_needs_no_server() {
        let settings = DatabaseSettings {
            backend: DatabaseBackend::Memory,
            ..DatabaseSettings::default()
        };
        let db = Database::connect(&settings).await.unwrap();
        assert_eq!(db.backend(), DatabaseBackend::Memory);
        db.ping().await.unwrap();
        assert_eq!(db.migrate(&[]).await.unwrap(), 0);
        db.close().await;
    }
}
