use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::api::dtos::requests::SlotsQuery;
use crate::api::dtos::responses::SlotsResponse;
use crate::api::extractors::tenant::TenantId;
use crate::error::AppError;
use crate::state::AppState;

pub async fn available_slots(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Query(query): Query<SlotsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let slots = state
        .slot_generator
        .available_slots(
            &tenant_id,
            &query.service_id,
            query.staff_id.as_deref(),
            query.date,
        )
        .await?;

    debug!(
        tenant_id = %tenant_id,
        service_id = %query.service_id,
        date = %query.date,
        "{} slot(s) available",
        slots.len()
    );

    Ok(Json(SlotsResponse {
        date: query.date.to_string(),
        slots,
    }))
}
