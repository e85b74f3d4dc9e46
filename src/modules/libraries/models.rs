use bookrec_db::{Column, Entity, PgQuery};
use serde::{Deserialize, Serialize};

use crate::modules::crud::fields::nullable;

/// A physical library. Coordinates are stored as given, with no bounds check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(default)]
pub struct Library {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub address: String,
    #[serde(deserialize_with = "nullable")]
    pub latitude: f64,
    #[serde(deserialize_with = "nullable")]
    pub longitude: f64,
}

impl Entity for Library {
    const NAME: &'static str = "library";
    const RESOURCE: &'static str = "libraries";
    const TABLE: &'static str = "libraries";
    const COLUMNS: &'static [Column] = &[
        Column::text("name"),
        Column::text("address"),
        Column::double("latitude"),
        Column::double("longitude"),
    ];
    const SCHEMA: &'static str = r#"
        CREATE TABLE IF NOT EXISTS libraries (
            id        TEXT PRIMARY KEY,
            name      TEXT             NOT NULL DEFAULT '',
            address   TEXT             NOT NULL DEFAULT '',
            latitude  DOUBLE PRECISION NOT NULL DEFAULT 0,
            longitude DOUBLE PRECISION NOT NULL DEFAULT 0
        );
        "#;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(&self.name)
            .bind(&self.address)
            .bind(self.latitude)
            .bind(self.longitude)
    }
}
