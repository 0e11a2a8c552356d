use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateStaffRequest, UpdateStaffRequest};
use crate::api::extractors::tenant::TenantId;
use crate::domain::models::staff::{NewStaffParams, Staff};
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_staff(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Json(payload): Json<CreateStaffRequest>,
) -> Result<impl IntoResponse, AppError> {
    let staff = Staff::new(NewStaffParams {
        tenant_id,
        first_name: payload.first_name,
        last_name: payload.last_name,
        email: payload.email,
        working_hours: payload.working_hours,
        breaks: payload.breaks,
        service_ids: payload.service_ids,
    })?;

    let created = state.staff_repo.create(&staff).await?;
    info!("Staff created: {}", created.id);
    Ok(Json(created))
}

pub async fn list_staff(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
) -> Result<impl IntoResponse, AppError> {
    let staff = state.staff_repo.list_by_tenant(&tenant_id).await?;
    Ok(Json(staff))
}

pub async fn get_staff(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, staff_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let staff = state
        .staff_repo
        .find_by_id(&tenant_id, &staff_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Staff not found".into()))?;
    Ok(Json(staff))
}

pub async fn update_staff(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, staff_id)): Path<(String, String)>,
    Json(payload): Json<UpdateStaffRequest>,
) -> Result<impl IntoResponse, AppError> {
    let existing = state
        .staff_repo
        .find_by_id(&tenant_id, &staff_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Staff not found".into()))?;

    let current_hours = existing.working_hours();
    let current_breaks = existing.breaks();
    let current_services = existing.service_ids();

    let mut merged = Staff::new(NewStaffParams {
        tenant_id: existing.tenant_id.clone(),
        first_name: payload.first_name.unwrap_or(existing.first_name),
        last_name: payload.last_name.unwrap_or(existing.last_name),
        email: payload.email.unwrap_or(existing.email),
        working_hours: payload.working_hours.unwrap_or(current_hours),
        breaks: payload.breaks.unwrap_or(current_breaks),
        service_ids: payload.service_ids.unwrap_or(current_services),
    })?;
    merged.id = existing.id;
    merged.is_active = payload.is_active.unwrap_or(existing.is_active);
    merged.created_at = existing.created_at;

    let updated = state.staff_repo.update(&merged).await?;
    Ok(Json(updated))
}

pub async fn delete_staff(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, staff_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state.staff_repo.delete(&tenant_id, &staff_id).await?;
    info!("Staff deleted: {}", staff_id);
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
