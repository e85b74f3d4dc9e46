use std::sync::Arc;

use async_trait::async_trait;
use bookrec_db::{Entity, ErrorKind, Repository, StoreError};
use bookrec_kernel::settings::CrudSettings;
use thiserror::Error;

/// A store error annotated with the service operation that produced it.
#[derive(Debug, Error)]
#[error("service: failed to {action} {entity}: {source}")]
pub struct ServiceError {
    action: &'static str,
    entity: &'static str,
    source: StoreError,
}

impl ServiceError {
    fn wrap<E: Entity>(action: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self {
            action,
            entity: E::NAME,
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Operations the HTTP layer may perform on one entity.
///
/// Handlers only see this trait, so validation or derived fields can be
/// added by a different implementation without touching routing.
#[async_trait]
pub trait EntityService<E: Entity>: Send + Sync {
    async fn get(&self, id: &str) -> ServiceResult<E>;

    async fn list(&self) -> ServiceResult<Vec<E>>;

    async fn list_by_user(&self, user_id: &str) -> ServiceResult<Vec<E>>;

    /// Store `entity` and return it as stored.
    async fn create(&self, entity: E) -> ServiceResult<E>;

    /// Replace every field of the record with `entity.id()`.
    async fn update(&self, entity: E) -> ServiceResult<E>;

    async fn delete(&self, id: &str) -> ServiceResult<()>;
}

/// Forwards each call to the repository unchanged.
pub struct CrudService<E: Entity> {
    repo: Arc<dyn Repository<E>>,
    strict_writes: bool,
}

impl<E: Entity> CrudService<E> {
    pub fn new(repo: Arc<dyn Repository<E>>, settings: &CrudSettings) -> Self {
        Self {
            repo,
            strict_writes: settings.strict_writes,
        }
    }

    /// With strict writes, touching zero rows means the id did not exist.
    fn check_affected(&self, action: &'static str, id: &str, rows: u64) -> ServiceResult<()> {
        if self.strict_writes && rows == 0 {
            return Err(ServiceError::wrap::<E>(action)(StoreError::not_found(
                E::NAME,
                id,
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl<E: Entity> EntityService<E> for CrudService<E> {
    async fn get(&self, id: &str) -> ServiceResult<E> {
        self.repo.get(id).await.map_err(ServiceError::wrap::<E>("get"))
    }

    async fn list(&self) -> ServiceResult<Vec<E>> {
        self.repo.list().await.map_err(ServiceError::wrap::<E>("list"))
    }

    async fn list_by_user(&self, user_id: &str) -> ServiceResult<Vec<E>> {
        self.repo
            .list_by_user(user_id)
            .await
            .map_err(ServiceError::wrap::<E>("list by user"))
    }

    async fn create(&self, entity: E) -> ServiceResult<E> {
        self.repo
            .create(&entity)
            .await
            .map_err(ServiceError::wrap::<E>("create"))?;
        Ok(entity)
    }

    async fn update(&self, entity: E) -> ServiceResult<E> {
        let rows = self
            .repo
            .update(&entity)
            .await
            .map_err(ServiceError::wrap::<E>("update"))?;
        self.check_affected("update", entity.id(), rows)?;
        Ok(entity)
    }

    async fn delete(&self, id: &str) -> ServiceResult<()> {
        let rows = self
            .repo
            .delete(id)
            .await
            .map_err(ServiceError::wrap::<E>("delete"))?;
        self.check_affected("delete", id, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::genres::models::Genre;
    use bookrec_db::MemoryRepository;

    fn genre(id: &str, name: &str) -> Genre {
        Genre {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    fn service(strict_writes: bool) -> CrudService<Genre> {
        CrudService::new(
            Arc::new(MemoryRepository::<Genre>::new()),
            &CrudSettings { strict_writes },
        )
    }

    #[tokio::test]
    async fn errors_carry_service_prefix_and_kind() {
        let service = service(false);

        let err = service.get("g404").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(
            err.to_string(),
            "service: failed to get genre: genre 'g404' not found"
        );
    }

    #[tokio::test]
    async fn permissive_writes_ignore_missing_ids() {
        let service = service(false);

        service.update(genre("g1", "Sci-Fi")).await.unwrap();
        service.delete("g1").await.unwrap();
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn strict_writes_report_missing_ids() {
        let service = service(true);

        let update = service.update(genre("g1", "Sci-Fi")).await.unwrap_err();
        assert_eq!(update.kind(), ErrorKind::NotFound);

        let delete = service.delete("g1").await.unwrap_err();
        assert_eq!(delete.kind(), ErrorKind::NotFound);
        assert_eq!(
            delete.to_string(),
            "service: failed to delete genre: genre 'g1' not found"
        );

        service.create(genre("g1", "Sci-Fi")).await.unwrap();
        service.update(genre("g1", "Fantasy")).await.unwrap();
        assert_eq!(service.get("g1").await.unwrap().name, "Fantasy");
        service.delete("g1").await.unwrap();
    }
}
