use std::sync::Arc;

use crate::domain::models::booking::Booking;
use crate::domain::models::interval::TimeInterval;
use crate::domain::ports::BookingRepository;
use crate::error::AppError;

/// Decides whether a candidate interval collides with an existing
/// non-cancelled booking for the same tenant and staff bucket.
///
/// Bookings without a staff member only conflict with other unassigned
/// bookings; they are never compared across staff.
pub struct ConflictDetector {
    bookings: Arc<dyn BookingRepository>,
}

impl ConflictDetector {
    pub fn new(bookings: Arc<dyn BookingRepository>) -> Self {
        Self { bookings }
    }

    pub async fn active_in_range(
        &self,
        tenant_id: &str,
        staff_id: Option<&str>,
        range: &TimeInterval,
    ) -> Result<Vec<Booking>, AppError> {
        self.bookings
            .list_active_in_range(tenant_id, staff_id, range.start, range.end)
            .await
    }

    pub async fn find_conflicts(
        &self,
        tenant_id: &str,
        staff_id: Option<&str>,
        candidate: &TimeInterval,
    ) -> Result<Vec<TimeInterval>, AppError> {
        let existing = self.active_in_range(tenant_id, staff_id, candidate).await?;
        Ok(Self::overlapping(&existing, candidate))
    }

    /// Half-open overlap filter over already-fetched bookings. The slot
    /// generator uses this to test a whole day against one fetch.
    pub fn overlapping(existing: &[Booking], candidate: &TimeInterval) -> Vec<TimeInterval> {
        existing
            .iter()
            .map(|b| b.interval())
            .filter(|iv| iv.overlaps(candidate))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::booking::NewBookingParams;
    use chrono::{TimeZone, Utc};

    fn booking(start_h: u32, start_m: u32, minutes: i64) -> Booking {
        Booking::new(NewBookingParams {
            tenant_id: "t1".into(),
            customer_id: "c1".into(),
            service_id: "s1".into(),
            staff_id: Some("staff-a".into()),
            start: Utc.with_ymd_and_hms(2026, 3, 2, start_h, start_m, 0).unwrap(),
            slot_minutes: minutes,
            price: 0.0,
            deposit: 0.0,
            notes: None,
        })
    }

    fn interval(sh: u32, sm: u32, eh: u32, em: u32) -> TimeInterval {
        TimeInterval::new(
            Utc.with_ymd_and_hms(2026, 3, 2, sh, sm, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 2, eh, em, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn overlapping_reports_colliding_intervals() {
        let existing = vec![booking(10, 0, 40), booking(12, 0, 40)];
        let conflicts = ConflictDetector::overlapping(&existing, &interval(10, 30, 11, 0));
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0], existing[0].interval());
    }

    #[test]
    fn adjacent_booking_does_not_conflict() {
        let existing = vec![booking(10, 0, 40)];
        let conflicts = ConflictDetector::overlapping(&existing, &interval(10, 40, 11, 10));
        assert!(conflicts.is_empty());
    }
}
