use serde::{de::DeserializeOwned, Serialize};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::{FromRow, Postgres};

/// A Postgres query under construction, as produced by [`sqlx::query`].
pub type PgQuery<'q> = sqlx::query::Query<'q, Postgres, PgArguments>;

/// Value type of a column, used to describe entities in API documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Integer,
    Double,
    Timestamp,
}

#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
}

impl Column {
    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Text,
        }
    }

    pub const fn integer(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Integer,
        }
    }

    pub const fn double(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Double,
        }
    }

    pub const fn timestamp(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Timestamp,
        }
    }
}

/// A record stored one-row-per-value in its own table, keyed by a
/// caller-assigned text `id` column.
///
/// Everything the generic repositories and routes need is declared here:
/// the table, the non-id columns in bind order, and how to bind them.
pub trait Entity:
    Serialize
    + DeserializeOwned
    + for<'r> FromRow<'r, PgRow>
    + Clone
    + Default
    + Send
    + Sync
    + Unpin
    + 'static
{
    /// Singular name used in messages (`"book"`).
    const NAME: &'static str;
    /// URL path segment of the collection (`"books"`).
    const RESOURCE: &'static str;
    const TABLE: &'static str;
    /// Every column except `id`, in the order [`Entity::bind_columns`] binds them.
    const COLUMNS: &'static [Column];
    /// Column naming the owning user, for entities listed per user.
    const OWNER_COLUMN: Option<&'static str> = None;
    /// DDL creating the table.
    const SCHEMA: &'static str;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// Value of [`Entity::OWNER_COLUMN`] on this record.
    fn owner_id(&self) -> Option<&str> {
        None
    }

    /// Bind every value of [`Entity::COLUMNS`], in order.
    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q>;
}
