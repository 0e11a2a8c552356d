use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateServiceRequest, UpdateServiceRequest};
use crate::api::extractors::tenant::TenantId;
use crate::domain::models::service::{NewServiceParams, Service};
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_service(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Json(payload): Json<CreateServiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let service = Service::new(NewServiceParams {
        tenant_id,
        name: payload.name,
        description: payload.description,
        duration_min: payload.duration_min,
        buffer_min: payload.buffer_min,
        price: payload.price,
        max_capacity: payload.max_capacity.unwrap_or(1),
        staff_required: payload.staff_required.unwrap_or(1),
        booking_window: payload.booking_window,
        cancellation_policy: payload.cancellation_policy,
    })?;

    let created = state.service_repo.create(&service).await?;
    info!("Service created: {}", created.id);
    Ok(Json(created))
}

pub async fn list_services(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
) -> Result<impl IntoResponse, AppError> {
    let services = state.service_repo.list_by_tenant(&tenant_id).await?;
    Ok(Json(services))
}

pub async fn get_service(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, service_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let service = state
        .service_repo
        .find_by_id(&tenant_id, &service_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Service not found".into()))?;
    Ok(Json(service))
}

pub async fn update_service(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, service_id)): Path<(String, String)>,
    Json(payload): Json<UpdateServiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let existing = state
        .service_repo
        .find_by_id(&tenant_id, &service_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Service not found".into()))?;

    let current_window = existing.booking_window();
    let current_policy = existing.cancellation_policy();

    // Re-validate the merged attributes through the constructor so an
    // update cannot sneak past the bounds a create enforces.
    let mut merged = Service::new(NewServiceParams {
        tenant_id: existing.tenant_id.clone(),
        name: payload.name.unwrap_or(existing.name),
        description: payload.description.or(existing.description),
        duration_min: payload.duration_min.unwrap_or(existing.duration_min),
        buffer_min: payload.buffer_min.unwrap_or(existing.buffer_min),
        price: payload.price.unwrap_or(existing.price),
        max_capacity: payload.max_capacity.unwrap_or(existing.max_capacity),
        staff_required: payload.staff_required.unwrap_or(existing.staff_required),
        booking_window: payload.booking_window.or(current_window),
        cancellation_policy: payload.cancellation_policy.or(current_policy),
    })?;
    merged.id = existing.id;
    merged.is_active = payload.is_active.unwrap_or(existing.is_active);
    merged.created_at = existing.created_at;

    let updated = state.service_repo.update(&merged).await?;
    Ok(Json(updated))
}

pub async fn delete_service(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, service_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state.service_repo.delete(&tenant_id, &service_id).await?;
    info!("Service deleted: {}", service_id);
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
