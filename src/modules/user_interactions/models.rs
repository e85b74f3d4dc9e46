use bookrec_db::{Column, Entity, PgQuery};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::modules::crud::fields::{nullable, timestamp_micros};

/// Something a user did with a book (`view`, `click`, `rating`, ...).
/// Neither `user_id` nor `book_id` is checked against other tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(default)]
pub struct UserInteraction {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub user_id: String,
    #[serde(deserialize_with = "nullable")]
    pub book_id: String,
    #[serde(deserialize_with = "nullable")]
    pub interaction_type: String,
    #[serde(deserialize_with = "timestamp_micros")]
    pub timestamp: DateTime<Utc>,
}

impl Entity for UserInteraction {
    const NAME: &'static str = "user interaction";
    const RESOURCE: &'static str = "user-interactions";
    const TABLE: &'static str = "user_interactions";
    const COLUMNS: &'static [Column] = &[
        Column::text("user_id"),
        Column::text("book_id"),
        Column::text("interaction_type"),
        Column::timestamp("timestamp"),
    ];
    const OWNER_COLUMN: Option<&'static str> = Some("user_id");
    const SCHEMA: &'static str = r#"
        CREATE TABLE IF NOT EXISTS user_interactions (
            id               TEXT PRIMARY KEY,
            user_id          TEXT        NOT NULL DEFAULT '',
            book_id          TEXT        NOT NULL DEFAULT '',
            interaction_type TEXT        NOT NULL DEFAULT '',
            "timestamp"      TIMESTAMPTZ NOT NULL DEFAULT 'epoch'
        );
        CREATE INDEX IF NOT EXISTS user_interactions_user_id_idx ON user_interactions (user_id);
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
            .bind(&self.interaction_type)
            .bind(self.timestamp)
    }
}
