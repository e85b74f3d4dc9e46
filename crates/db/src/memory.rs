use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::entity::Entity;
use crate::error::{StoreError, StoreResult};
use crate::repository::Repository;

/// In-process [`Repository`] keeping rows in insertion order.
///
/// Mirrors the Postgres contract: duplicate ids conflict, writes to missing
/// ids affect zero rows, and listing returns rows in the order they were
/// inserted.
#[derive(Debug)]
pub struct MemoryRepository<E> {
    rows: RwLock<Vec<E>>,
}

impl<E: Entity> MemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

impl<E: Entity> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryRepository<E> {
    async fn get(&self, id: &str) -> StoreResult<E> {
        self.rows
            .read()
            .await
            .iter()
            .find(|row| row.id() == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(E::NAME, id))
    }

    async fn list(&self) -> StoreResult<Vec<E>> {
        Ok(self.rows.read().await.clone())
    }

    async fn list_by_user(&self, user_id: &str) -> StoreResult<Vec<E>> {
        if E::OWNER_COLUMN.is_none() {
            return Err(StoreError::Internal(format!(
                "{} are not scoped by user",
                E::RESOURCE
            )));
        }

        Ok(self
            .rows
            .read()
            .await
            .iter()
            .filter(|row| row.owner_id() == Some(user_id))
            .cloned()
            .collect())
    }

    async fn create(&self, entity: &E) -> StoreResult<()> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|row| row.id() == entity.id()) {
            return Err(StoreError::Conflict(format!(
                "error creating {}: id '{}' already exists",
                E::NAME,
                entity.id()
            )));
        }
        rows.push(entity.clone());
        Ok(())
    }

    async fn update(&self, entity: &E) -> StoreResult<u64> {
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|row| row.id() == entity.id()) {
            Some(row) => {
                *row = entity.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: &str) -> StoreResult<u64> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| row.id() != id);
        Ok((before - rows.len()) as u64)
    }
}
