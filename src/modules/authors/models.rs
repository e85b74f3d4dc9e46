use bookrec_db::{Column, Entity, PgQuery};
use serde::{Deserialize, Serialize};

use crate::modules::crud::fields::nullable;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(default)]
pub struct Author {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub biography: String,
}

impl Entity for Author {
    const NAME: &'static str = "author";
    const RESOURCE: &'static str = "authors";
    const TABLE: &'static str = "authors";
    const COLUMNS: &'static [Column] = &[Column::text("name"), Column::text("biography")];
    const SCHEMA: &'static str = r#"
        CREATE TABLE IF NOT EXISTS authors (
            id        TEXT PRIMARY KEY,
            name      TEXT NOT NULL DEFAULT '',
            biography TEXT NOT NULL DEFAULT ''
        );
        "#;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query.bind(&self.name).bind(&self.biography)
    }
}
