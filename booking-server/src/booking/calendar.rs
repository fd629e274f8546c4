//! Operating Calendar
//!
//! Resolves whether a restaurant is open on a date and during which hours.
//! Resolution order: special day for the exact date, then the weekly rule for
//! the weekday, then closed. Records with unparseable times count as closed.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use shared::models::OperatingHour;

use crate::utils::time::weekday_index;

/// Hours in effect for one date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayHours {
    Closed,
    /// `close <= open` means service runs past midnight into the next date
    Open { open: NaiveTime, close: NaiveTime },
}

impl DayHours {
    /// Local service interval `[open, close)` starting on `date`
    fn interval(&self, date: NaiveDate) -> Option<(NaiveDateTime, NaiveDateTime)> {
        match *self {
            DayHours::Closed => None,
            DayHours::Open { open, close } => {
                let start = date.and_time(open);
                let mut end = date.and_time(close);
                if close <= open {
                    end += Duration::days(1);
                }
                Some((start, end))
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct OperatingCalendar {
    hours: Vec<OperatingHour>,
}

impl OperatingCalendar {
    pub fn new(hours: Vec<OperatingHour>) -> Self {
        Self { hours }
    }

    /// Hours for `date`
    pub fn hours_for(&self, date: NaiveDate) -> DayHours {
        let date_str = date.format("%Y-%m-%d").to_string();
        let special = self
            .hours
            .iter()
            .find(|h| h.is_special_day && h.special_date.as_deref() == Some(date_str.as_str()));
        if let Some(record) = special {
            return Self::resolve(record);
        }

        let weekday = weekday_index(date);
        self.hours
            .iter()
            .find(|h| !h.is_special_day && h.day_of_week == weekday)
            .map(Self::resolve)
            .unwrap_or(DayHours::Closed)
    }

    /// Whether the whole window `[start, start + duration)` on `date` is inside open hours
    ///
    /// A window straddling closing time is rejected. Early-morning windows can
    /// also fall inside the previous date's overnight service.
    pub fn is_open(&self, date: NaiveDate, start: NaiveTime, duration_minutes: i64) -> bool {
        if duration_minutes <= 0 {
            return false;
        }
        let window_start = date.and_time(start);
        let window_end = window_start + Duration::minutes(duration_minutes);

        let fits = |service: Option<(NaiveDateTime, NaiveDateTime)>| {
            service.is_some_and(|(open, close)| open <= window_start && window_end <= close)
        };

        if fits(self.hours_for(date).interval(date)) {
            return true;
        }
        date.pred_opt()
            .is_some_and(|prev| fits(self.hours_for(prev).interval(prev)))
    }

    fn resolve(record: &OperatingHour) -> DayHours {
        if record.is_closed {
            return DayHours::Closed;
        }
        match (
            NaiveTime::parse_from_str(&record.open_time, "%H:%M"),
            NaiveTime::parse_from_str(&record.close_time, "%H:%M"),
        ) {
            (Ok(open), Ok(close)) => DayHours::Open { open, close },
            _ => {
                tracing::warn!(
                    operating_hour_id = record.id,
                    open = %record.open_time,
                    close = %record.close_time,
                    "Unparseable operating hours, treating as closed"
                );
                DayHours::Closed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weekly(day: i32, open: &str, close: &str) -> OperatingHour {
        OperatingHour {
            id: day as i64 + 1,
            restaurant_id: 1,
            day_of_week: day,
            open_time: open.into(),
            close_time: close.into(),
            is_closed: false,
            is_special_day: false,
            special_date: None,
        }
    }

    fn special(date: &str, open: &str, close: &str, closed: bool) -> OperatingHour {
        OperatingHour {
            id: 100,
            restaurant_id: 1,
            day_of_week: 0,
            open_time: open.into(),
            close_time: close.into(),
            is_closed: closed,
            is_special_day: true,
            special_date: Some(date.into()),
        }
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn t(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn every_day(open: &str, close: &str) -> OperatingCalendar {
        OperatingCalendar::new((0..7).map(|day| weekly(day, open, close)).collect())
    }

    #[test]
    fn no_rule_means_closed() {
        let cal = OperatingCalendar::new(vec![]);
        assert_eq!(cal.hours_for(d("2026-10-16")), DayHours::Closed);
        assert!(!cal.is_open(d("2026-10-16"), t("19:00"), 60));
    }

    #[test]
    fn window_must_fit_entirely() {
        let cal = every_day("18:00", "23:00");
        assert!(cal.is_open(d("2026-10-16"), t("18:00"), 90));
        assert!(cal.is_open(d("2026-10-16"), t("21:30"), 90));
        // straddles closing
        assert!(!cal.is_open(d("2026-10-16"), t("22:00"), 90));
        // before opening
        assert!(!cal.is_open(d("2026-10-16"), t("17:30"), 60));
    }

    #[test]
    fn special_day_overrides_weekly() {
        let mut hours: Vec<OperatingHour> = (0..7).map(|day| weekly(day, "18:00", "23:00")).collect();
        hours.push(special("2026-12-24", "12:00", "16:00", false));
        hours.push(special("2026-12-25", "00:00", "00:00", true));
        let cal = OperatingCalendar::new(hours);

        assert!(cal.is_open(d("2026-12-24"), t("13:00"), 90));
        assert!(!cal.is_open(d("2026-12-24"), t("19:00"), 90));
        assert_eq!(cal.hours_for(d("2026-12-25")), DayHours::Closed);
        assert!(cal.is_open(d("2026-12-26"), t("19:00"), 90));
    }

    #[test]
    fn overnight_service_spans_midnight() {
        let cal = every_day("20:00", "02:00");
        assert!(cal.is_open(d("2026-10-16"), t("23:30"), 90));
        // 00:30 belongs to the previous evening's service
        assert!(cal.is_open(d("2026-10-17"), t("00:30"), 60));
        assert!(!cal.is_open(d("2026-10-17"), t("01:30"), 60));
    }

    #[test]
    fn closed_weekday_and_garbage_hours() {
        let mut hours = vec![weekly(5, "18:00", "23:00"), weekly(6, "late", "later")];
        hours[0].is_closed = true;
        let cal = OperatingCalendar::new(hours);
        // 2026-10-16 is a Friday, 2026-10-17 a Saturday
        assert_eq!(cal.hours_for(d("2026-10-16")), DayHours::Closed);
        assert_eq!(cal.hours_for(d("2026-10-17")), DayHours::Closed);
    }
}
