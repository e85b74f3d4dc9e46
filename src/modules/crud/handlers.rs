//! HTTP bindings shared by every resource: decode the request, call the
//! service, encode the result.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use bookrec_db::{Entity, ErrorKind};
use bookrec_http::error::AppError;

use super::service::{EntityService, ServiceError};

pub type SharedService<E> = Arc<dyn EntityService<E>>;

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        let message = err.to_string();
        match err.kind() {
            ErrorKind::NotFound => AppError::not_found(message),
            ErrorKind::Conflict => AppError::conflict(message),
            ErrorKind::Unavailable => AppError::unavailable(message),
            ErrorKind::Internal => AppError::internal(message),
        }
    }
}

/// Routes for one resource:
///
/// ```text
/// POST   /{resource}/            create
/// GET    /{resource}/            list
/// GET    /{resource}/{id}        get
/// PUT    /{resource}/{id}        update
/// DELETE /{resource}/{id}        delete
/// GET    /{resource}/user/{id}   list by user (owner-scoped entities only)
/// ```
///
/// The collection also answers without the trailing slash.
pub fn router<E: Entity>(service: SharedService<E>) -> Router {
    let collection = format!("/{}", E::RESOURCE);

    let mut router = Router::new()
        .route(&collection, get(list::<E>).post(create::<E>))
        .route(&format!("{collection}/"), get(list::<E>).post(create::<E>))
        .route(
            &format!("{collection}/{{id}}"),
            get(get_one::<E>).put(update::<E>).delete(remove::<E>),
        );

    if E::OWNER_COLUMN.is_some() {
        router = router.route(
            &format!("{collection}/user/{{user_id}}"),
            get(list_by_user::<E>),
        );
    }

    router.with_state(service)
}

async fn list<E: Entity>(
    State(service): State<SharedService<E>>,
) -> Result<Json<Vec<E>>, AppError> {
    Ok(Json(service.list().await?))
}

async fn get_one<E: Entity>(
    State(service): State<SharedService<E>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<E>, AppError> {
    let id = required_param::<E>(id, "id")?;
    Ok(Json(service.get(&id).await?))
}

async fn list_by_user<E: Entity>(
    State(service): State<SharedService<E>>,
    user_id: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<E>>, AppError> {
    let user_id = required_param::<E>(user_id, "user id")?;
    Ok(Json(service.list_by_user(&user_id).await?))
}

async fn create<E: Entity>(
    State(service): State<SharedService<E>>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let entity = decode_body::<E>(&body)?;
    let created = service.create(entity).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update<E: Entity>(
    State(service): State<SharedService<E>>,
    id: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<Json<E>, AppError> {
    let id = required_param::<E>(id, "id")?;
    let mut entity = decode_body::<E>(&body)?;
    // the path names the record; any id in the body is ignored
    entity.set_id(id);
    Ok(Json(service.update(entity).await?))
}

async fn remove<E: Entity>(
    State(service): State<SharedService<E>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let id = required_param::<E>(id, "id")?;
    service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn required_param<E: Entity>(
    param: Result<Path<String>, PathRejection>,
    what: &str,
) -> Result<String, AppError> {
    let Path(value) = param.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    if value.trim().is_empty() {
        return Err(AppError::bad_request(format!("{} {what} is required", E::NAME)));
    }
    Ok(value)
}

/// Decode regardless of `Content-Type`; omitted fields take their zero value.
fn decode_body<E: Entity>(body: &[u8]) -> Result<E, AppError> {
    serde_json::from_slice(body)
        .map_err(|err| AppError::bad_request(format!("invalid {} payload: {err}", E::NAME)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::authors::models::Author;

    #[test]
    fn malformed_body_is_a_bad_request() {
        let err = decode_body::<Author>(b"{\"name\": ").unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }

    #[test]
    fn omitted_fields_decode_to_zero_values() {
        let author = decode_body::<Author>(br#"{"id": "a1"}"#).unwrap();
        assert_eq!(author.id, "a1");
        assert_eq!(author.name, "");
        assert_eq!(author.biography, "");
    }

    #[test]
    fn blank_path_param_is_rejected() {
        let err = required_param::<Author>(Ok(Path(" ".to_string())), "id").unwrap_err();
        match err {
            AppError::BadRequest { message, .. } => assert_eq!(message, "author id is required"),
            other => panic!("expected bad request, got {other:?}"),
        }
    }
}
