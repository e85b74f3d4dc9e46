//! Small entities used by the repository tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Column, Entity, PgQuery};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Shelf {
    pub id: String,
    pub label: String,
    pub capacity: i32,
}

impl Shelf {
    pub fn new(id: &str, label: &str, capacity: i32) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            capacity,
        }
    }
}

impl Entity for Shelf {
    const NAME: &'static str = "shelf";
    const RESOURCE: &'static str = "shelves";
    const TABLE: &'static str = "shelves";
    const COLUMNS: &'static [Column] = &[Column::text("label"), Column::integer("capacity")];
    const SCHEMA: &'static str =
        "CREATE TABLE shelves (id TEXT PRIMARY KEY, label TEXT NOT NULL, capacity INTEGER NOT NULL)";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query.bind(&self.label).bind(self.capacity)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Visit {
    pub id: String,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
}

impl Visit {
    pub fn new(id: &str, user_id: &str) -> Self {
        Self {
            id: id.to_string(),
            user_id: user_id.to_string(),
            timestamp: DateTime::<Utc>::default(),
        }
    }
}

impl Entity for Visit {
    const NAME: &'static str = "visit";
    const RESOURCE: &'static str = "visits";
    const TABLE: &'static str = "visits";
    const COLUMNS: &'static [Column] = &[Column::text("user_id"), Column::timestamp("timestamp")];
    const OWNER_COLUMN: Option<&'static str> = Some("user_id");
    const SCHEMA: &'static str =
        "CREATE TABLE visits (id TEXT PRIMARY KEY, user_id TEXT NOT NULL, \"timestamp\" TIMESTAMPTZ NOT NULL)";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn owner_id(&self) -> Option<&str> {
        Some(&self.user_id)
    }

    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query.bind(&self.user_id).bind(self.timestamp)
    }
}
