use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::AppError;

/// Limits on how far in advance a booking may be placed.
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct BookingWindow {
    pub min_advance_hours: i32,
    pub max_advance_days: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct CancellationPolicy {
    pub min_hours_notice: i32,
    pub refund_percent: i32,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Service {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub description: Option<String>,
    pub duration_min: i32,
    /// Gap appended after the service before the resource frees up again.
    pub buffer_min: i32,
    pub price: f64,
    pub max_capacity: i32,
    pub staff_required: i32,
    pub min_advance_hours: Option<i32>,
    pub max_advance_days: Option<i32>,
    pub cancel_notice_hours: Option<i32>,
    pub cancel_refund_percent: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewServiceParams {
    pub tenant_id: String,
    pub name: String,
    pub description: Option<String>,
    pub duration_min: i32,
    pub buffer_min: i32,
    pub price: f64,
    pub max_capacity: i32,
    pub staff_required: i32,
    pub booking_window: Option<BookingWindow>,
    pub cancellation_policy: Option<CancellationPolicy>,
}

impl Service {
    pub fn new(params: NewServiceParams) -> Result<Self, AppError> {
        if params.duration_min <= 0 {
            return Err(AppError::Validation("duration_min must be positive".into()));
        }
        if params.buffer_min < 0 {
            return Err(AppError::Validation("buffer_min must not be negative".into()));
        }
        if params.price < 0.0 {
            return Err(AppError::Validation("price must not be negative".into()));
        }
        if params.max_capacity < 1 {
            return Err(AppError::Validation("max_capacity must be at least 1".into()));
        }
        if params.staff_required < 1 {
            return Err(AppError::Validation("staff_required must be at least 1".into()));
        }
        if let Some(w) = &params.booking_window {
            if w.min_advance_hours < 0 || w.max_advance_days < 0 {
                return Err(AppError::Validation("booking window must not be negative".into()));
            }
        }
        if let Some(p) = &params.cancellation_policy {
            if p.min_hours_notice < 0 {
                return Err(AppError::Validation("min_hours_notice must not be negative".into()));
            }
            if !(0..=100).contains(&p.refund_percent) {
                return Err(AppError::Validation("refund_percent must be between 0 and 100".into()));
            }
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            tenant_id: params.tenant_id,
            name: params.name,
            description: params.description,
            duration_min: params.duration_min,
            buffer_min: params.buffer_min,
            price: params.price,
            max_capacity: params.max_capacity,
            staff_required: params.staff_required,
            min_advance_hours: params.booking_window.map(|w| w.min_advance_hours),
            max_advance_days: params.booking_window.map(|w| w.max_advance_days),
            cancel_notice_hours: params.cancellation_policy.map(|p| p.min_hours_notice),
            cancel_refund_percent: params.cancellation_policy.map(|p| p.refund_percent),
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Minutes the resource stays occupied per booking.
    pub fn slot_minutes(&self) -> i64 {
        (self.duration_min + self.buffer_min) as i64
    }

    pub fn booking_window(&self) -> Option<BookingWindow> {
        match (self.min_advance_hours, self.max_advance_days) {
            (None, None) => None,
            (min, max) => Some(BookingWindow {
                min_advance_hours: min.unwrap_or(0),
                max_advance_days: max.unwrap_or(365),
            }),
        }
    }

    pub fn cancellation_policy(&self) -> Option<CancellationPolicy> {
        self.cancel_notice_hours.map(|hours| CancellationPolicy {
            min_hours_notice: hours,
            refund_percent: self.cancel_refund_percent.unwrap_or(100),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> NewServiceParams {
        NewServiceParams {
            tenant_id: "t1".into(),
            name: "Haircut".into(),
            description: None,
            duration_min: 30,
            buffer_min: 10,
            price: 25.0,
            max_capacity: 1,
            staff_required: 1,
            booking_window: None,
            cancellation_policy: None,
        }
    }

    #[test]
    fn rejects_zero_duration() {
        let mut p = params();
        p.duration_min = 0;
        assert!(Service::new(p).is_err());
    }

    #[test]
    fn rejects_refund_over_100() {
        let mut p = params();
        p.cancellation_policy = Some(CancellationPolicy {
            min_hours_notice: 24,
            refund_percent: 120,
        });
        assert!(Service::new(p).is_err());
    }

    #[test]
    fn slot_minutes_includes_buffer() {
        let service = Service::new(params()).unwrap();
        assert_eq!(service.slot_minutes(), 40);
    }

    #[test]
    fn window_round_trips() {
        let mut p = params();
        p.booking_window = Some(BookingWindow {
            min_advance_hours: 2,
            max_advance_days: 30,
        });
        let service = Service::new(p).unwrap();
        let w = service.booking_window().unwrap();
        assert_eq!(w.min_advance_hours, 2);
        assert_eq!(w.max_advance_days, 30);
    }
}
