use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Utc};

use crate::domain::models::interval::TimeInterval;
use crate::domain::ports::{ServiceRepository, StaffRepository};
use crate::domain::services::conflicts::ConflictDetector;
use crate::domain::services::rules;
use crate::error::AppError;

/// Enumerates bookable intervals for a service on a calendar day:
/// working hours minus breaks, stepped by the service's occupied length,
/// filtered through the booking window and the conflict detector. The
/// result is materialized fresh on every call.
pub struct SlotGenerator {
    services: Arc<dyn ServiceRepository>,
    staff: Arc<dyn StaffRepository>,
    detector: Arc<ConflictDetector>,
    /// Fallback window for availability queries without a staff member.
    default_window: (NaiveTime, NaiveTime),
}

impl SlotGenerator {
    pub fn new(
        services: Arc<dyn ServiceRepository>,
        staff: Arc<dyn StaffRepository>,
        detector: Arc<ConflictDetector>,
        default_window: (NaiveTime, NaiveTime),
    ) -> Self {
        Self {
            services,
            staff,
            detector,
            default_window,
        }
    }

    pub async fn available_slots(
        &self,
        tenant_id: &str,
        service_id: &str,
        staff_id: Option<&str>,
        date: NaiveDate,
    ) -> Result<Vec<TimeInterval>, AppError> {
        let service = self
            .services
            .find_by_id(tenant_id, service_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Service not found".into()))?;
        if !service.is_active {
            return Ok(Vec::new());
        }

        let (windows, breaks) = match staff_id {
            Some(id) => {
                let staff = self
                    .staff
                    .find_by_id(tenant_id, id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Staff not found".into()))?;
                if !staff.is_active {
                    return Ok(Vec::new());
                }
                let hours = staff.working_hours();
                let windows: Vec<(NaiveTime, NaiveTime)> = hours
                    .for_weekday(date.weekday())
                    .map(|ws| ws.iter().filter_map(|w| w.parse().ok()).collect())
                    .unwrap_or_default();
                (windows, staff.breaks_for(date.weekday()))
            }
            None => (vec![self.default_window], Vec::new()),
        };

        let open = subtract_breaks(&windows, &breaks);

        let day_start = date.and_time(NaiveTime::MIN).and_utc();
        let day_range = TimeInterval {
            start: day_start,
            end: day_start + Duration::days(1),
        };
        let existing = self
            .detector
            .active_in_range(tenant_id, staff_id, &day_range)
            .await?;

        let now = Utc::now();
        let slots = candidate_intervals(date, &open, service.slot_minutes())
            .into_iter()
            .filter(|slot| slot.start >= now)
            .filter(|slot| rules::check_booking_window(&service, slot.start, now).is_ok())
            .filter(|slot| ConflictDetector::overlapping(&existing, slot).is_empty())
            .collect();

        Ok(slots)
    }
}

/// Carves the break windows out of the working-hour windows, yielding
/// the ordered open sub-ranges of the day.
pub fn subtract_breaks(
    windows: &[(NaiveTime, NaiveTime)],
    breaks: &[(NaiveTime, NaiveTime)],
) -> Vec<(NaiveTime, NaiveTime)> {
    let mut open = Vec::new();
    for &(w_start, w_end) in windows {
        let mut segments = vec![(w_start, w_end)];
        for &(b_start, b_end) in breaks {
            let mut remaining = Vec::new();
            for (s, e) in segments {
                if b_end <= s || b_start >= e {
                    remaining.push((s, e));
                    continue;
                }
                if b_start > s {
                    remaining.push((s, b_start));
                }
                if b_end < e {
                    remaining.push((b_end, e));
                }
            }
            segments = remaining;
        }
        open.extend(segments);
    }
    open.sort();
    open
}

/// Steps candidate intervals of `slot_minutes` length through each open
/// sub-range, restarting the cursor at every sub-range start. Candidates
/// must fit entirely inside their sub-range.
pub fn candidate_intervals(
    date: NaiveDate,
    open: &[(NaiveTime, NaiveTime)],
    slot_minutes: i64,
) -> Vec<TimeInterval> {
    let mut slots = Vec::new();
    if slot_minutes <= 0 {
        return slots;
    }

    for &(start, end) in open {
        let window_end = date.and_time(end).and_utc();
        let mut cursor = date.and_time(start).and_utc();
        while cursor + Duration::minutes(slot_minutes) <= window_end {
            slots.push(TimeInterval {
                start: cursor,
                end: cursor + Duration::minutes(slot_minutes),
            });
            cursor += Duration::minutes(slot_minutes);
        }
    }

    slots.sort_by_key(|s| s.start);
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn break_splits_window_in_two() {
        let open = subtract_breaks(&[(t(9, 0), t(12, 0))], &[(t(10, 0), t(10, 15))]);
        assert_eq!(open, vec![(t(9, 0), t(10, 0)), (t(10, 15), t(12, 0))]);
    }

    #[test]
    fn break_outside_window_is_ignored() {
        let open = subtract_breaks(&[(t(9, 0), t(12, 0))], &[(t(13, 0), t(14, 0))]);
        assert_eq!(open, vec![(t(9, 0), t(12, 0))]);
    }

    #[test]
    fn break_covering_whole_window_removes_it() {
        let open = subtract_breaks(&[(t(9, 0), t(10, 0))], &[(t(8, 30), t(10, 30))]);
        assert!(open.is_empty());
    }

    #[test]
    fn break_clipping_window_edge_shrinks_it() {
        let open = subtract_breaks(&[(t(9, 0), t(12, 0))], &[(t(11, 30), t(12, 30))]);
        assert_eq!(open, vec![(t(9, 0), t(11, 30))]);
    }

    #[test]
    fn candidates_restart_after_break() {
        // Working 09:00-12:00, break 10:00-10:15, 30-minute service with
        // no buffer: starts 09:00, 09:30, 10:15, 10:45, 11:15.
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let open = subtract_breaks(&[(t(9, 0), t(12, 0))], &[(t(10, 0), t(10, 15))]);
        let slots = candidate_intervals(date, &open, 30);

        let starts: Vec<(u32, u32)> = slots
            .iter()
            .map(|s| (s.start.time().hour(), s.start.time().minute()))
            .collect();
        assert_eq!(starts, vec![(9, 0), (9, 30), (10, 15), (10, 45), (11, 15)]);
    }

    #[test]
    fn service_longer_than_every_window_yields_nothing() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let open = vec![(t(9, 0), t(10, 0)), (t(10, 15), t(11, 0))];
        assert!(candidate_intervals(date, &open, 90).is_empty());
    }

    #[test]
    fn no_open_windows_yields_nothing() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        assert!(candidate_intervals(date, &[], 30).is_empty());
    }

    #[test]
    fn step_includes_buffer_length() {
        // 30 + 10 buffer steps every 40 minutes inside 09:00-11:00.
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let slots = candidate_intervals(date, &[(t(9, 0), t(11, 0))], 40);
        let starts: Vec<(u32, u32)> = slots
            .iter()
            .map(|s| (s.start.time().hour(), s.start.time().minute()))
            .collect();
        assert_eq!(starts, vec![(9, 0), (9, 40), (10, 20)]);
    }
}
