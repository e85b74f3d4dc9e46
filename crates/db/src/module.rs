use async_trait::async_trait;
use bookrec_kernel::{InitCtx, Module};

use crate::database::Database;

/// Core module owning the database handle: verifies connectivity on init
/// and closes the pool on stop.
#[derive(Debug, Clone)]
pub struct DatabaseModule {
    db: Database,
}

impl DatabaseModule {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Module for DatabaseModule {
    fn name(&self) -> &'static str {
        "db"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        self.db.ping().await?;
        tracing::info!(
            module = self.name(),
            backend = ?self.db.backend(),
            environment = ?ctx.settings.environment,
            "database reachable"
        );
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        self.db.close().await;
        Ok(())
    }
}
