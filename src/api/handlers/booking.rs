use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::api::dtos::requests::{
    BookingListQuery, CancelBookingRequest, CreateBookingRequest, UpdateBookingStatusRequest,
};
use crate::api::dtos::responses::{BookingListResponse, CancelBookingResponse};
use crate::api::extractors::tenant::TenantId;
use crate::domain::ports::BookingQuery;
use crate::domain::services::lifecycle::CreateBookingInput;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state
        .booking_service
        .create_booking(CreateBookingInput {
            tenant_id,
            customer_id: payload.customer_id,
            service_id: payload.service_id,
            staff_id: payload.staff_id,
            start_time: payload.start_time,
            deposit: payload.deposit,
            notes: payload.notes,
        })
        .await?;
    Ok(Json(booking))
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Query(query): Query<BookingListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = BookingQuery {
        staff_id: query.staff_id,
        customer_id: query.customer_id,
        status: query.status,
        from: query.from,
        to: query.to,
        limit: query.limit,
        offset: query.offset,
    };
    let page = state.booking_repo.list_by_tenant(&tenant_id, &filter).await?;
    Ok(Json(BookingListResponse {
        bookings: page.bookings,
        total: page.total,
    }))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, booking_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state
        .booking_repo
        .find_by_id(&tenant_id, &booking_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;
    Ok(Json(booking))
}

pub async fn update_booking_status(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, booking_id)): Path<(String, String)>,
    Json(payload): Json<UpdateBookingStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state
        .booking_service
        .update_status(
            &tenant_id,
            &booking_id,
            payload.status,
            payload.reason.as_deref(),
        )
        .await?;
    Ok(Json(booking))
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, booking_id)): Path<(String, String)>,
    Json(payload): Json<CancelBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = state
        .booking_service
        .cancel_booking(&tenant_id, &booking_id, payload.reason.as_deref())
        .await?;
    Ok(Json(CancelBookingResponse {
        booking: outcome.booking,
        within_notice: outcome.within_notice,
        refund_percent: outcome.refund_percent,
    }))
}
