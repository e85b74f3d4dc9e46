use bookrec_db::{Column, Entity, PgQuery};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::modules::crud::fields::{nullable, timestamp_micros};

/// A book suggested to a user. `score` and `generated_at` are whatever the
/// caller supplied; nothing here computes them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(default)]
pub struct Recommendation {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub user_id: String,
    #[serde(deserialize_with = "nullable")]
    pub book_id: String,
    #[serde(deserialize_with = "nullable")]
    pub score: f64,
    #[serde(deserialize_with = "timestamp_micros")]
    pub generated_at: DateTime<Utc>,
}

impl Entity for Recommendation {
    const NAME: &'static str = "recommendation";
    const RESOURCE: &'static str = "recommendations";
    const TABLE: &'static str = "recommendations";
    const COLUMNS: &'static [Column] = &[
        Column::text("user_id"),
        Column::text("book_id"),
        Column::double("score"),
        Column::timestamp("generated_at"),
    ];
    const OWNER_COLUMN: Option<&'static str> = Some("user_id");
    const SCHEMA: &'static str = r#"
        CREATE TABLE IF NOT EXISTS recommendations (
            id           TEXT PRIMARY KEY,
            user_id      TEXT             NOT NULL DEFAULT '',
            book_id      TEXT             NOT NULL DEFAULT '',
            score        DOUBLE PRECISION NOT NULL DEFAULT 0,
            generated_at TIMESTAMPTZ      NOT NULL DEFAULT 'epoch'
        );
        CREATE INDEX IF NOT EXISTS recommendations_user_id_idx ON recommendations (user_id);
        "#;

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
        query
            .bind(&self.user_id)
            .bind(&self.book_id)
            .bind(self.score)
            .bind(self.generated_at)
    }
}
