use chrono::{DateTime, Duration, Utc};

use crate::domain::models::booking::Booking;
use crate::domain::models::interval::TimeInterval;
use crate::domain::models::service::Service;
use crate::error::AppError;

/// The interval a booking occupies: service duration plus buffer time,
/// so the next appointment may start no earlier than the buffer allows.
pub fn booked_interval(service: &Service, start: DateTime<Utc>) -> Result<TimeInterval, AppError> {
    TimeInterval::new(start, start + Duration::minutes(service.slot_minutes()))
}

/// Validates a candidate start against the service's booking window.
/// Services without a window accept any start time.
pub fn check_booking_window(
    service: &Service,
    start: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    let Some(window) = service.booking_window() else {
        return Ok(());
    };

    let earliest = now + Duration::hours(window.min_advance_hours as i64);
    if start < earliest {
        return Err(AppError::OutOfBookingWindow(format!(
            "bookings require at least {} hours notice",
            window.min_advance_hours
        )));
    }

    let latest = now + Duration::days(window.max_advance_days as i64);
    if start > latest {
        return Err(AppError::OutOfBookingWindow(format!(
            "bookings may be at most {} days ahead",
            window.max_advance_days
        )));
    }

    Ok(())
}

/// Whether cancelling now still satisfies the service's notice period.
/// Advisory: the lifecycle manager reports this but never blocks on it.
pub fn can_cancel(service: &Service, booking: &Booking, now: DateTime<Utc>) -> bool {
    match service.cancellation_policy() {
        Some(policy) => now + Duration::hours(policy.min_hours_notice as i64) <= booking.start_time,
        None => true,
    }
}
