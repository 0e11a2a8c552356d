use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::CreateTenantRequest;
use crate::domain::models::tenant::Tenant;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_tenant(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateTenantRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() || payload.slug.trim().is_empty() {
        return Err(AppError::Validation("name and slug are required".into()));
    }

    let tenant = Tenant::new(payload.name, payload.slug);
    let created = state.tenant_repo.create(&tenant).await?;

    info!("Tenant created: {}", created.id);
    Ok(Json(created))
}

pub async fn get_tenant_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let tenant = state
        .tenant_repo
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Tenant not found".into()))?;
    Ok(Json(tenant))
}
