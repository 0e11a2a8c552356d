use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::models::booking::Booking;
use crate::domain::models::customer::Customer;
use crate::domain::models::interval::TimeInterval;

#[derive(Serialize)]
pub struct SlotsResponse {
    pub date: String,
    pub slots: Vec<TimeInterval>,
}

#[derive(Serialize)]
pub struct BookingListResponse {
    pub bookings: Vec<Booking>,
    pub total: i64,
}

/// Full data-export payload for one customer: the record itself plus
/// every booking they ever made, tombstoned or not.
#[derive(Serialize)]
pub struct CustomerExportResponse {
    pub customer: Customer,
    pub bookings: Vec<Booking>,
    pub exported_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct CancelBookingResponse {
    pub booking: Booking,
    pub within_notice: bool,
    pub refund_percent: Option<i32>,
}
