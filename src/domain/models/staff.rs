use chrono::{DateTime, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::AppError;

/// Wall-clock `[start, end)` window, "HH:MM".
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TimeWindow {
    pub start: String,
    pub end: String,
}

impl TimeWindow {
    pub fn parse(&self) -> Result<(NaiveTime, NaiveTime), AppError> {
        let start = NaiveTime::parse_from_str(&self.start, "%H:%M")
            .map_err(|_| AppError::Validation(format!("Invalid time '{}' (expected HH:MM)", self.start)))?;
        let end = NaiveTime::parse_from_str(&self.end, "%H:%M")
            .map_err(|_| AppError::Validation(format!("Invalid time '{}' (expected HH:MM)", self.end)))?;
        if start >= end {
            return Err(AppError::Validation(format!(
                "Window start {} must be before end {}",
                self.start, self.end
            )));
        }
        Ok((start, end))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct WeekdayHours {
    pub monday: Option<Vec<TimeWindow>>,
    pub tuesday: Option<Vec<TimeWindow>>,
    pub wednesday: Option<Vec<TimeWindow>>,
    pub thursday: Option<Vec<TimeWindow>>,
    pub friday: Option<Vec<TimeWindow>>,
    pub saturday: Option<Vec<TimeWindow>>,
    pub sunday: Option<Vec<TimeWindow>>,
}

impl WeekdayHours {
    pub fn for_weekday(&self, weekday: Weekday) -> Option<&Vec<TimeWindow>> {
        match weekday {
            Weekday::Mon => self.monday.as_ref(),
            Weekday::Tue => self.tuesday.as_ref(),
            Weekday::Wed => self.wednesday.as_ref(),
            Weekday::Thu => self.thursday.as_ref(),
            Weekday::Fri => self.friday.as_ref(),
            Weekday::Sat => self.saturday.as_ref(),
            Weekday::Sun => self.sunday.as_ref(),
        }
    }

    fn all_windows(&self) -> impl Iterator<Item = &TimeWindow> {
        [
            &self.monday,
            &self.tuesday,
            &self.wednesday,
            &self.thursday,
            &self.friday,
            &self.saturday,
            &self.sunday,
        ]
        .into_iter()
        .flatten()
        .flatten()
    }
}

/// Recurring exclusion window. `day_of_week` is 0 = Monday .. 6 = Sunday.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BreakWindow {
    pub day_of_week: u8,
    pub start: String,
    pub end: String,
}

impl BreakWindow {
    pub fn window(&self) -> TimeWindow {
        TimeWindow {
            start: self.start.clone(),
            end: self.end.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Staff {
    pub id: String,
    pub tenant_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub working_hours_json: String,
    pub breaks_json: String,
    pub service_ids_json: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewStaffParams {
    pub tenant_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub working_hours: WeekdayHours,
    pub breaks: Vec<BreakWindow>,
    pub service_ids: Vec<String>,
}

impl Staff {
    pub fn new(params: NewStaffParams) -> Result<Self, AppError> {
        for window in params.working_hours.all_windows() {
            window.parse()?;
        }
        for brk in &params.breaks {
            if brk.day_of_week > 6 {
                return Err(AppError::Validation(format!(
                    "Break day_of_week {} out of range 0-6",
                    brk.day_of_week
                )));
            }
            brk.window().parse()?;
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            tenant_id: params.tenant_id,
            first_name: params.first_name,
            last_name: params.last_name,
            email: params.email,
            working_hours_json: serde_json::to_string(&params.working_hours)
                .map_err(|_| AppError::Internal)?,
            breaks_json: serde_json::to_string(&params.breaks).map_err(|_| AppError::Internal)?,
            service_ids_json: serde_json::to_string(&params.service_ids)
                .map_err(|_| AppError::Internal)?,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn working_hours(&self) -> WeekdayHours {
        serde_json::from_str(&self.working_hours_json).unwrap_or_default()
    }

    pub fn breaks(&self) -> Vec<BreakWindow> {
        serde_json::from_str(&self.breaks_json).unwrap_or_default()
    }

    pub fn service_ids(&self) -> Vec<String> {
        serde_json::from_str(&self.service_ids_json).unwrap_or_default()
    }

    /// Breaks applying on the given weekday, parsed and ordered by start.
    pub fn breaks_for(&self, weekday: Weekday) -> Vec<(NaiveTime, NaiveTime)> {
        let day = weekday.num_days_from_monday() as u8;
        let mut windows: Vec<(NaiveTime, NaiveTime)> = self
            .breaks()
            .iter()
            .filter(|b| b.day_of_week == day)
            .filter_map(|b| b.window().parse().ok())
            .collect();
        windows.sort();
        windows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(hours: WeekdayHours, breaks: Vec<BreakWindow>) -> NewStaffParams {
        NewStaffParams {
            tenant_id: "t1".into(),
            first_name: "Dana".into(),
            last_name: "Cole".into(),
            email: "dana@example.com".into(),
            working_hours: hours,
            breaks,
            service_ids: vec![],
        }
    }

    #[test]
    fn rejects_unparseable_window() {
        let hours = WeekdayHours {
            monday: Some(vec![TimeWindow {
                start: "nine".into(),
                end: "12:00".into(),
            }]),
            ..Default::default()
        };
        assert!(Staff::new(params(hours, vec![])).is_err());
    }

    #[test]
    fn rejects_inverted_window() {
        let hours = WeekdayHours {
            monday: Some(vec![TimeWindow {
                start: "12:00".into(),
                end: "09:00".into(),
            }]),
            ..Default::default()
        };
        assert!(Staff::new(params(hours, vec![])).is_err());
    }

    #[test]
    fn rejects_break_day_out_of_range() {
        let breaks = vec![BreakWindow {
            day_of_week: 7,
            start: "10:00".into(),
            end: "10:15".into(),
        }];
        assert!(Staff::new(params(WeekdayHours::default(), breaks)).is_err());
    }

    #[test]
    fn breaks_for_filters_by_weekday() {
        let breaks = vec![
            BreakWindow {
                day_of_week: 0,
                start: "10:00".into(),
                end: "10:15".into(),
            },
            BreakWindow {
                day_of_week: 2,
                start: "13:00".into(),
                end: "14:00".into(),
            },
        ];
        let staff = Staff::new(params(WeekdayHours::default(), breaks)).unwrap();

        let monday = staff.breaks_for(Weekday::Mon);
        assert_eq!(monday.len(), 1);
        assert_eq!(monday[0].0, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        assert!(staff.breaks_for(Weekday::Fri).is_empty());
    }
}
