use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::domain::models::booking::BookingStatus;
use crate::domain::models::service::{BookingWindow, CancellationPolicy};
use crate::domain::models::staff::{BreakWindow, WeekdayHours};

#[derive(Deserialize)]
pub struct CreateTenantRequest {
    pub name: String,
    pub slug: String,
}

#[derive(Deserialize)]
pub struct CreateCustomerRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateCustomerRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateServiceRequest {
    pub name: String,
    pub description: Option<String>,
    pub duration_min: i32,
    #[serde(default)]
    pub buffer_min: i32,
    #[serde(default)]
    pub price: f64,
    pub max_capacity: Option<i32>,
    pub staff_required: Option<i32>,
    pub booking_window: Option<BookingWindow>,
    pub cancellation_policy: Option<CancellationPolicy>,
}

#[derive(Deserialize)]
pub struct UpdateServiceRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration_min: Option<i32>,
    pub buffer_min: Option<i32>,
    pub price: Option<f64>,
    pub max_capacity: Option<i32>,
    pub staff_required: Option<i32>,
    pub booking_window: Option<BookingWindow>,
    pub cancellation_policy: Option<CancellationPolicy>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
pub struct CreateStaffRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub working_hours: WeekdayHours,
    #[serde(default)]
    pub breaks: Vec<BreakWindow>,
    #[serde(default)]
    pub service_ids: Vec<String>,
}

#[derive(Deserialize)]
pub struct UpdateStaffRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub working_hours: Option<WeekdayHours>,
    pub breaks: Option<Vec<BreakWindow>>,
    pub service_ids: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub customer_id: String,
    pub service_id: String,
    pub staff_id: Option<String>,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub deposit: f64,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
    pub reason: Option<String>,
}

#[derive(Deserialize)]
pub struct CancelBookingRequest {
    pub reason: Option<String>,
}

#[derive(Deserialize)]
pub struct SlotsQuery {
    pub service_id: String,
    pub staff_id: Option<String>,
    pub date: NaiveDate,
}

#[derive(Deserialize)]
pub struct BookingListQuery {
    pub staff_id: Option<String>,
    pub customer_id: Option<String>,
    pub status: Option<BookingStatus>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
