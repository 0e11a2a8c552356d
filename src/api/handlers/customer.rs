use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::info;

use chrono::Utc;

use crate::api::dtos::requests::{CreateCustomerRequest, UpdateCustomerRequest};
use crate::api::dtos::responses::CustomerExportResponse;
use crate::api::extractors::tenant::TenantId;
use crate::domain::models::customer::Customer;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_customer(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Json(payload): Json<CreateCustomerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let customer = Customer::new(
        tenant_id,
        payload.first_name,
        payload.last_name,
        payload.email,
        payload.phone,
    );
    let created = state.customer_repo.create(&customer).await?;
    info!("Customer created: {}", created.id);
    Ok(Json(created))
}

pub async fn list_customers(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
) -> Result<impl IntoResponse, AppError> {
    let customers = state.customer_repo.list_by_tenant(&tenant_id).await?;
    Ok(Json(customers))
}

pub async fn get_customer(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, customer_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let customer = state
        .customer_repo
        .find_by_id(&tenant_id, &customer_id)
        .await?
        .filter(|c| !c.is_deleted())
        .ok_or_else(|| AppError::NotFound("Customer not found".into()))?;
    Ok(Json(customer))
}

pub async fn update_customer(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, customer_id)): Path<(String, String)>,
    Json(payload): Json<UpdateCustomerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut customer = state
        .customer_repo
        .find_by_id(&tenant_id, &customer_id)
        .await?
        .filter(|c| !c.is_deleted())
        .ok_or_else(|| AppError::NotFound("Customer not found".into()))?;

    if let Some(first_name) = payload.first_name {
        customer.first_name = first_name;
    }
    if let Some(last_name) = payload.last_name {
        customer.last_name = last_name;
    }
    if let Some(email) = payload.email {
        customer.email = email;
    }
    if let Some(phone) = payload.phone {
        customer.phone = Some(phone);
    }

    let updated = state.customer_repo.update(&customer).await?;
    Ok(Json(updated))
}

/// Data export (GDPR access request). Tombstoned customers stay
/// exportable: the right to a copy outlives the deletion request.
pub async fn export_customer_data(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, customer_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let customer = state
        .customer_repo
        .find_by_id(&tenant_id, &customer_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Customer not found".into()))?;

    let bookings = state
        .booking_repo
        .list_by_customer(&tenant_id, &customer_id)
        .await?;

    info!("Customer data exported: {}", customer_id);
    Ok(Json(CustomerExportResponse {
        customer,
        bookings,
        exported_at: Utc::now(),
    }))
}

pub async fn delete_customer(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, customer_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state
        .customer_repo
        .mark_deleted(&tenant_id, &customer_id)
        .await?;
    info!("Customer tombstoned: {}", customer_id);
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
