use bookrec_db::{Column, Entity, PgQuery};
use serde::{Deserialize, Serialize};

use crate::modules::crud::fields::nullable;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(default)]
pub struct Genre {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
}

impl Entity for Genre {
    const NAME: &'static str = "genre";
    const RESOURCE: &'static str = "genres";
    const TABLE: &'static str = "genres";
    const COLUMNS: &'static [Column] = &[Column::text("name")];
    const SCHEMA: &'static str = r#"
        CREATE TABLE IF NOT EXISTS genres (
            id   TEXT PRIMARY KEY,
            name TEXT NOT NULL DEFAULT ''
        );
        "#;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query.bind(&self.name)
    }
}
