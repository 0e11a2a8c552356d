use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tokio::sync::OwnedMutexGuard;
use tracing::{info, warn};

use crate::domain::models::booking::{Booking, BookingStatus, NewBookingParams};
use crate::domain::ports::{
    BookingRepository, CustomerRepository, ServiceRepository, StaffRepository,
};
use crate::domain::services::conflicts::ConflictDetector;
use crate::domain::services::rules;
use crate::error::AppError;

/// Serializes the conflict-check-then-insert sequence per (tenant,
/// staff bucket), so two concurrent requests for the same slot cannot
/// both pass the conflict check.
#[derive(Default)]
pub struct SlotLocks {
    inner: Mutex<HashMap<(String, Option<String>), Arc<tokio::sync::Mutex<()>>>>,
}

impl SlotLocks {
    pub async fn acquire(&self, tenant_id: &str, staff_id: Option<&str>) -> OwnedMutexGuard<()> {
        let key = (tenant_id.to_string(), staff_id.map(str::to_string));
        let lock = {
            let mut map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            // An entry owned only by the map has no holder and no
            // waiter; sweeping here keeps the registry bounded by the
            // set of buckets currently in flight.
            map.retain(|_, lock| Arc::strong_count(lock) > 1);
            map.entry(key)
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

pub struct CreateBookingInput {
    pub tenant_id: String,
    pub customer_id: String,
    pub service_id: String,
    pub staff_id: Option<String>,
    pub start_time: DateTime<Utc>,
    pub deposit: f64,
    pub notes: Option<String>,
}

pub struct CancellationOutcome {
    pub booking: Booking,
    /// Whether the cancel still satisfied the service's notice period.
    /// Advisory only; late cancellations are not blocked.
    pub within_notice: bool,
    pub refund_percent: Option<i32>,
}

/// Orchestrates booking creation and status transitions against the
/// store. Holds no state beyond the slot locks; every call re-reads
/// what it needs.
pub struct BookingService {
    bookings: Arc<dyn BookingRepository>,
    services: Arc<dyn ServiceRepository>,
    customers: Arc<dyn CustomerRepository>,
    staff: Arc<dyn StaffRepository>,
    detector: Arc<ConflictDetector>,
    slot_locks: SlotLocks,
}

impl BookingService {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        services: Arc<dyn ServiceRepository>,
        customers: Arc<dyn CustomerRepository>,
        staff: Arc<dyn StaffRepository>,
        detector: Arc<ConflictDetector>,
    ) -> Self {
        Self {
            bookings,
            services,
            customers,
            staff,
            detector,
            slot_locks: SlotLocks::default(),
        }
    }

    pub async fn create_booking(&self, input: CreateBookingInput) -> Result<Booking, AppError> {
        let service = self
            .services
            .find_by_id(&input.tenant_id, &input.service_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Service not found".into()))?;
        if !service.is_active {
            return Err(AppError::Validation("Service is not active".into()));
        }

        let customer = self
            .customers
            .find_by_id(&input.tenant_id, &input.customer_id)
            .await?
            .filter(|c| !c.is_deleted())
            .ok_or_else(|| AppError::NotFound("Customer not found".into()))?;

        if let Some(staff_id) = input.staff_id.as_deref() {
            let staff = self
                .staff
                .find_by_id(&input.tenant_id, staff_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Staff not found".into()))?;
            if !staff.is_active {
                return Err(AppError::Validation("Staff member is not active".into()));
            }
        }

        if input.deposit < 0.0 {
            return Err(AppError::Validation("deposit must not be negative".into()));
        }

        rules::check_booking_window(&service, input.start_time, Utc::now())?;
        let candidate = rules::booked_interval(&service, input.start_time)?;

        // Held across check + insert; released on every return path.
        let _guard = self
            .slot_locks
            .acquire(&input.tenant_id, input.staff_id.as_deref())
            .await;

        let conflicts = self
            .detector
            .find_conflicts(&input.tenant_id, input.staff_id.as_deref(), &candidate)
            .await?;
        if !conflicts.is_empty() {
            warn!(
                tenant_id = %input.tenant_id,
                "Booking rejected: {} conflicting interval(s)",
                conflicts.len()
            );
            return Err(AppError::BookingConflict(conflicts));
        }

        let slot_minutes = service.slot_minutes();
        let booking = Booking::new(NewBookingParams {
            tenant_id: input.tenant_id,
            customer_id: customer.id,
            service_id: service.id,
            staff_id: input.staff_id,
            start: input.start_time,
            slot_minutes,
            price: service.price,
            deposit: input.deposit,
            notes: input.notes,
        });

        let created = self.bookings.create(&booking).await?;
        info!("Booking created: {} ({})", created.id, created.status);
        Ok(created)
    }

    pub async fn update_status(
        &self,
        tenant_id: &str,
        booking_id: &str,
        new_status: BookingStatus,
        reason: Option<&str>,
    ) -> Result<Booking, AppError> {
        let mut booking = self
            .bookings
            .find_by_id(tenant_id, booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;

        if !booking.status.can_transition_to(new_status) {
            return Err(AppError::InvalidTransition {
                from: booking.status,
                to: new_status,
            });
        }

        let now = Utc::now();
        if new_status == BookingStatus::Cancelled {
            booking.cancelled_at = Some(now);
            let line = format!(
                "Cancellation reason: {}",
                reason.unwrap_or("No reason provided")
            );
            // Appended, never replaced: notes are an audit trail.
            booking.notes = Some(match booking.notes.take() {
                Some(existing) => format!("{}\n\n{}", existing, line),
                None => line,
            });
        }
        booking.status = new_status;
        booking.updated_at = now;

        let updated = self.bookings.update(&booking).await?;
        info!("Booking {} -> {}", updated.id, updated.status);
        Ok(updated)
    }

    pub async fn cancel_booking(
        &self,
        tenant_id: &str,
        booking_id: &str,
        reason: Option<&str>,
    ) -> Result<CancellationOutcome, AppError> {
        let existing = self
            .bookings
            .find_by_id(tenant_id, booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;

        let service = self
            .services
            .find_by_id(tenant_id, &existing.service_id)
            .await?;
        let (within_notice, refund_percent) = match &service {
            Some(svc) => (
                rules::can_cancel(svc, &existing, Utc::now()),
                svc.cancellation_policy().map(|p| p.refund_percent),
            ),
            None => (true, None),
        };

        let booking = self
            .update_status(tenant_id, booking_id, BookingStatus::Cancelled, reason)
            .await?;

        Ok(CancellationOutcome {
            booking,
            within_notice,
            refund_percent,
        })
    }
}
