//! Generic create / update / list handlers.
//!
//! Each resource plugs in through [`ResourceApi`], which names its request
//! and response DTOs. The handlers give every resource the same contract:
//!
//! - `POST`: `200 {"message": "<Entity> created successfully"}` or `400 {"error": ...}`
//! - `PUT`: body `{"id": ..., ...}`; `200`, `400`, or `404 {"error": "<Entity> not found"}`
//! - `GET`: `?page=&per_page=` → `200 {"items": [...], "page_info": {...}}`
//!
//! Uniqueness conflicts are reported as `"A <Entity> with this <field> already exists."`.

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::sync::Arc;
use validator::Validate;

use crate::api::dto::message::MessageResponse;
use crate::api::dto::pagination::{Paginated, PaginationParams};
use crate::application::services::ResourceService;
use crate::domain::entities::Resource;
use crate::error::AppError;
use crate::utils::db_error::integrity_message;
use crate::utils::error_formatter::ErrorDetail;

/// Binds a [`Resource`] to the DTOs used by the generic handlers.
pub trait ResourceApi: Resource {
    /// Body of `POST`; validated before conversion.
    type CreateRequest: DeserializeOwned + Validate + Into<Self::New> + Send + 'static;
    /// Body of `PUT` without `id`; every field optional.
    type UpdateRequest: DeserializeOwned + Validate + Into<Self::Patch> + Send + 'static;
    /// Representation returned by `GET`.
    type Item: Serialize + From<Self> + Send + 'static;

    /// Request fields in declaration order; validation errors follow it.
    const FIELDS: &'static [&'static str];
}

/// Validates a request body, reporting failing fields in [`ResourceApi::FIELDS`] order.
///
/// # Errors
///
/// Returns [`AppError::Validation`] when any rule fails.
pub fn validate_request<R: ResourceApi>(request: &impl Validate) -> Result<(), AppError> {
    request.validate().map_err(|errors| {
        AppError::Validation(ErrorDetail::from_validation_errors(&errors, R::FIELDS))
    })
}

/// Creates a record.
///
/// # Errors
///
/// Returns 400 on malformed JSON, failed validation, or a uniqueness conflict.
pub async fn create_handler<R: ResourceApi>(
    State(service): State<Arc<ResourceService<R>>>,
    payload: Result<Json<R::CreateRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(payload) = payload?;
    validate_request::<R>(&payload)?;

    service
        .create(payload.into())
        .await
        .map_err(friendly_integrity_error::<R>)?;

    Ok(Json(MessageResponse::new(format!(
        "{} created successfully",
        R::VERBOSE_NAME
    ))))
}

/// Partially updates the record identified by `id` in the body.
///
/// The record is looked up before the payload is validated, so an unknown
/// `id` yields 404 even when the other fields are invalid.
///
/// # Errors
///
/// Returns 404 if `id` is missing, malformed, or unknown.
/// Returns 400 on malformed JSON, failed validation, or a uniqueness conflict.
pub async fn update_handler<R: ResourceApi>(
    State(service): State<Arc<ResourceService<R>>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(body) = payload?;

    let id = body
        .get("id")
        .and_then(parse_id)
        .ok_or_else(|| AppError::not_found(format!("{} not found", R::VERBOSE_NAME)))?;
    service.get(id).await?;

    let request: R::UpdateRequest =
        serde_json::from_value(body).map_err(|e| AppError::bad_request(e.to_string()))?;
    validate_request::<R>(&request)?;

    service
        .update(id, request.into())
        .await
        .map_err(friendly_integrity_error::<R>)?;

    Ok(Json(MessageResponse::new(format!(
        "{} updated successfully",
        R::VERBOSE_NAME
    ))))
}

/// Lists one page of records.
pub async fn list_handler<R: ResourceApi>(
    State(service): State<Arc<ResourceService<R>>>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Paginated<R::Item>>, AppError> {
    let (records, page_info) = service.list(&params).await?;

    Ok(Json(Paginated {
        items: records.into_iter().map(R::Item::from).collect(),
        page_info,
    }))
}

/// Accepts an integer or a string holding one.
fn parse_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn friendly_integrity_error<R: Resource>(err: AppError) -> AppError {
    match err {
        AppError::Integrity(violation) => {
            tracing::warn!(entity = R::VERBOSE_NAME, error = %violation, "Integrity violation");
            AppError::bad_request(integrity_message(
                R::VERBOSE_NAME,
                R::TABLE,
                R::UNIQUE_FIELDS,
                &violation,
            ))
        }
        other => other,
    }
}
