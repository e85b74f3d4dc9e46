use std::fmt;
use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::entity::Entity;
use crate::error::{StoreError, StoreResult};
use crate::repository::Repository;

/// SQL for one entity, rendered once from its table and column list.
///
/// Identifiers are quoted because some column names (`timestamp`) are
/// keywords. Placeholders follow bind order: `$1` is always the id, the
/// remaining columns follow in [`Entity::COLUMNS`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statements {
    pub select_one: String,
    pub select_all: String,
    pub select_by_owner: Option<String>,
    pub insert: String,
    pub update: String,
    pub delete: String,
}

impl Statements {
    pub fn for_entity<E: Entity>() -> Self {
        let table = quote(E::TABLE);
        let columns: Vec<String> = E::COLUMNS.iter().map(|c| quote(c.name)).collect();

        let select_list = std::iter::once(quote("id"))
            .chain(columns.iter().cloned())
            .collect::<Vec<_>>()
            .join(", ");

        let placeholders = (1..=columns.len() + 1)
            .map(|n| format!("${n}"))
            .collect::<Vec<_>>()
            .join(", ");

        let assignments = columns
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{column} = ${}", i + 2))
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            select_one: format!("SELECT {select_list} FROM {table} WHERE \"id\" = $1"),
            select_all: format!("SELECT {select_list} FROM {table}"),
            select_by_owner: E::OWNER_COLUMN.map(|owner| {
                format!(
                    "SELECT {select_list} FROM {table} WHERE {} = $1",
                    quote(owner)
                )
            }),
            insert: format!("INSERT INTO {table} ({select_list}) VALUES ({placeholders})"),
            update: format!("UPDATE {table} SET {assignments} WHERE \"id\" = $1"),
            delete: format!("DELETE FROM {table} WHERE \"id\" = $1"),
        }
    }
}

fn quote(identifier: &str) -> String {
    format!("\"{identifier}\"")
}

/// [`Repository`] over a shared Postgres pool.
pub struct PgRepository<E> {
    pool: PgPool,
    statements: Statements,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> PgRepository<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            statements: Statements::for_entity::<E>(),
            _entity: PhantomData,
        }
    }
}

impl<E> fmt::Debug for PgRepository<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgRepository")
            .field("pool_size", &self.pool.size())
            .field("statements", &self.statements)
            .finish()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for PgRepository<E> {
    async fn get(&self, id: &str) -> StoreResult<E> {
        sqlx::query_as::<_, E>(&self.statements.select_one)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::from_sqlx(&format!("error getting {} by id", E::NAME), e))?
            .ok_or_else(|| StoreError::not_found(E::NAME, id))
    }

    async fn list(&self) -> StoreResult<Vec<E>> {
        sqlx::query_as::<_, E>(&self.statements.select_all)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::from_sqlx(&format!("error listing {}", E::RESOURCE), e))
    }

    async fn list_by_user(&self, user_id: &str) -> StoreResult<Vec<E>> {
        let Some(sql) = self.statements.select_by_owner.as_deref() else {
            return Err(StoreError::Internal(format!(
                "{} are not scoped by user",
                E::RESOURCE
            )));
        };

        sqlx::query_as::<_, E>(sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                StoreError::from_sqlx(&format!("error listing {} by user id", E::RESOURCE), e)
            })
    }

    async fn create(&self, entity: &E) -> StoreResult<()> {
        let query = sqlx::query(&self.statements.insert).bind(entity.id());
        entity
            .bind_columns(query)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::from_sqlx(&format!("error creating {}", E::NAME), e))?;
        Ok(())
    }

    async fn update(&self, entity: &E) -> StoreResult<u64> {
        let query = sqlx::query(&self.statements.update).bind(entity.id());
        let result = entity
            .bind_columns(query)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::from_sqlx(&format!("error updating {}", E::NAME), e))?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: &str) -> StoreResult<u64> {
        let result = sqlx::query(&self.statements.delete)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::from_sqlx(&format!("error deleting {}", E::NAME), e))?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{Shelf, Visit};

    #[test]
    fn statements_follow_column_order() {
        let statements = Statements::for_entity::<Shelf>();

        assert_eq!(
            statements.select_one,
            r#"SELECT "id", "label", "capacity" FROM "shelves" WHERE "id" = $1"#
        );
        assert_eq!(
            statements.select_all,
            r#"SELECT "id", "label", "capacity" FROM "shelves""#
        );
        assert_eq!(
            statements.insert,
            r#"INSERT INTO "shelves" ("id", "label", "capacity") VALUES ($1, $2, $3)"#
        );
        assert_eq!(
            statements.update,
            r#"UPDATE "shelves" SET "label" = $2, "capacity" = $3 WHERE "id" = $1"#
        );
        assert_eq!(statements.delete, r#"DELETE FROM "shelves" WHERE "id" = $1"#);
        assert_eq!(statements.select_by_owner, None);
    }

    #[test]
    fn owner_scoped_entities_get_a_user_query() {
        let statements = Statements::for_entity::<Visit>();

        assert_eq!(
            statements.select_by_owner.as_deref(),
            Some(r#"SELECT "id", "user_id", "timestamp" FROM "visits" WHERE "user_id" = $1"#)
        );
    }
}
