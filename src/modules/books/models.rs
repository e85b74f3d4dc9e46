use bookrec_db::{Column, Entity, PgQuery};
use serde::{Deserialize, Serialize};

use crate::modules::crud::fields::nullable;

/// A catalog entry. `author` and `genre` are free text, independent of the
/// author and genre resources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(default)]
pub struct Book {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub author: String,
    #[serde(deserialize_with = "nullable")]
    pub isbn: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    #[serde(deserialize_with = "nullable")]
    pub cover_image_url: String,
    #[serde(deserialize_with = "nullable")]
    pub genre: String,
    #[serde(deserialize_with = "nullable")]
    pub publication_year: i32,
}

impl Entity for Book {
    const NAME: &'static str = "book";
    const RESOURCE: &'static str = "books";
    const TABLE: &'static str = "books";
    const COLUMNS: &'static [Column] = &[
        Column::text("title"),
        Column::text("author"),
        Column::text("isbn"),
        Column::text("description"),
        Column::text("cover_image_url"),
        Column::text("genre"),
        Column::integer("publication_year"),
    ];
    const SCHEMA: &'static str = r#"
        CREATE TABLE IF NOT EXISTS books (
            id               TEXT PRIMARY KEY,
            title            TEXT    NOT NULL DEFAULT '',
            author           TEXT    NOT NULL DEFAULT '',
            isbn             TEXT    NOT NULL DEFAULT '',
            description      TEXT    NOT NULL DEFAULT '',
            cover_image_url  TEXT    NOT NULL DEFAULT '',
            genre            TEXT    NOT NULL DEFAULT '',
            publication_year INTEGER NOT NULL DEFAULT 0
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
            .bind(&self.title)
            .bind(&self.author)
            .bind(&self.isbn)
            .bind(&self.description)
            .bind(&self.cover_image_url)
            .bind(&self.genre)
            .bind(self.publication_year)
    }
}
