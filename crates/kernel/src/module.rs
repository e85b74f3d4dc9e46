use std::fmt;

use async_trait::async_trait;
use axum::Router;

/// Context handed to modules while the application boots.
pub struct InitCtx<'a> {
    pub settings: &'a crate::settings::Settings,
}

/// A schema change contributed by a module, applied once and recorded by id.
#[derive(Debug, Clone)]
pub struct Migration {
    pub id: &'static str,
    pub up: &'static str,
}

/// One HTTP endpoint exposed by a module, used for route listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteInfo {
    pub method: &'static str,
    pub path: String,
    pub summary: String,
}

impl RouteInfo {
    pub fn new(method: &'static str, path: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            summary: summary.into(),
        }
    }
}

impl fmt::Display for RouteInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<7} {:<36} {}", self.method, self.path, self.summary)
    }
}

/// Contract between the kernel and everything it hosts: resources, the
/// database handle, and anything else with a lifecycle.
#[async_trait]
pub trait Module: Sync + Send {
    /// Unique name for this module
    fn name(&self) -> &'static str;

    /// Called during startup. Core modules are initialized before migrations
    /// run, custom modules after.
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Routes are merged at the root, so a module owns its full path prefix.
    fn routes(&self) -> Router {
        Router::new()
    }

    /// Endpoints served by [`Module::routes`], for listings and diagnostics.
    fn route_table(&self) -> Vec<RouteInfo> {
        vec![]
    }

    /// OpenAPI fragment (`paths` and `components.schemas`) merged into the
    /// served document.
    fn openapi(&self) -> Option<serde_json::Value> {
        None
    }

    /// Migrations are executed in the order returned
    fn migrations(&self) -> Vec<Migration> {
        vec![]
    }

    /// Called after migrations are complete
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Release resources. Runs on every shutdown path once the module was
    /// registered, so it must tolerate a module that never started.
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
