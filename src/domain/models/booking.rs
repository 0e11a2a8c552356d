use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

use crate::domain::models::interval::TimeInterval;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    NoShow,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
            BookingStatus::NoShow => "no_show",
        }
    }

    /// Lifecycle state machine. `cancelled`, `completed` and `no_show`
    /// are terminal; everything else may only move forward.
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        match self {
            Pending => matches!(next, Confirmed | Cancelled | Completed | NoShow),
            Confirmed => matches!(next, Cancelled | Completed | NoShow),
            Cancelled | Completed | NoShow => false,
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub tenant_id: String,
    pub customer_id: String,
    pub service_id: String,
    pub staff_id: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: BookingStatus,
    pub price: f64,
    pub deposit: f64,
    pub notes: Option<String>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub tenant_id: String,
    pub customer_id: String,
    pub service_id: String,
    pub staff_id: Option<String>,
    pub start: DateTime<Utc>,
    /// Occupied minutes, service duration plus buffer.
    pub slot_minutes: i64,
    pub price: f64,
    pub deposit: f64,
    pub notes: Option<String>,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id: params.tenant_id,
            customer_id: params.customer_id,
            service_id: params.service_id,
            staff_id: params.staff_id,
            start_time: params.start,
            end_time: params.start + Duration::minutes(params.slot_minutes),
            status: BookingStatus::Pending,
            price: params.price,
            deposit: params.deposit,
            notes: params.notes,
            cancelled_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn interval(&self) -> TimeInterval {
        TimeInterval {
            start: self.start_time,
            end: self.end_time,
        }
    }
}
