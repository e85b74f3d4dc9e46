use async_trait::async_trait;

use crate::entity::Entity;
use crate::error::StoreResult;

/// Data access for one entity. Each call maps to exactly one statement
/// against the store; nothing spans calls.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Single-row lookup by primary key; `NotFound` when absent.
    async fn get(&self, id: &str) -> StoreResult<E>;

    /// Every row, in store order.
    async fn list(&self) -> StoreResult<Vec<E>>;

    /// Rows whose owner column equals `user_id`, in store order.
    async fn list_by_user(&self, user_id: &str) -> StoreResult<Vec<E>>;

    /// Insert one row; a duplicate id is a `Conflict`.
    async fn create(&self, entity: &E) -> StoreResult<()>;

    /// Overwrite every column of the row with `entity.id()`. Returns the
    /// number of rows affected, zero when the id does not exist.
    async fn update(&self, entity: &E) -> StoreResult<u64>;

    /// Delete the row with `id`. Returns the number of rows affected.
    async fn delete(&self, id: &str) -> StoreResult<u64>;
}
