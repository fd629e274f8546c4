//! 统计周期解析
//!
//! Every period is a half-open range of restaurant-local calendar days
//! `[start, end)`, resolved against "today" in the restaurant timezone.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, Months, NaiveDate};
use shared::models::AnalyticsPeriod;

use crate::booking::{BookingError, BookingResult};
use crate::utils::time;

/// Longest custom range accepted (daily rows are zero-filled)
pub const MAX_CUSTOM_DAYS: i64 = 3660;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodKind {
    Today,
    Week,
    Month,
    Year,
    Custom,
}

impl PeriodKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodKind::Today => "today",
            PeriodKind::Week => "week",
            PeriodKind::Month => "month",
            PeriodKind::Year => "year",
            PeriodKind::Custom => "custom",
        }
    }
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodKind {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" => Ok(PeriodKind::Today),
            "week" => Ok(PeriodKind::Week),
            "month" => Ok(PeriodKind::Month),
            "year" => Ok(PeriodKind::Year),
            "custom" => Ok(PeriodKind::Custom),
            other => Err(BookingError::Validation(format!(
                "Unknown analytics period: {other}"
            ))),
        }
    }
}

/// Resolved `[start, end)` day range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub kind: PeriodKind,
}

impl Period {
    /// Resolve a named period relative to `today`
    ///
    /// `custom` needs both bounds and `end > start`. When explicit bounds are
    /// given without a period name, `custom` is assumed.
    pub fn resolve(
        kind: Option<PeriodKind>,
        today: NaiveDate,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> BookingResult<Self> {
        let kind = match kind {
            Some(kind) => kind,
            None if start_date.is_some() || end_date.is_some() => PeriodKind::Custom,
            None => PeriodKind::Today,
        };
        let tomorrow = today + Duration::days(1);

        let (start, end) = match kind {
            PeriodKind::Today => (today, tomorrow),
            PeriodKind::Week => (today - Duration::days(7), tomorrow),
            PeriodKind::Month => (today - Duration::days(30), tomorrow),
            PeriodKind::Year => (
                today.checked_sub_months(Months::new(12)).unwrap_or(today),
                tomorrow,
            ),
            PeriodKind::Custom => {
                let (Some(start), Some(end)) = (start_date, end_date) else {
                    return Err(BookingError::Validation(
                        "custom period requires startDate and endDate".into(),
                    ));
                };
                let start = time::parse_date(start)?;
                let end = time::parse_date(end)?;
                if end <= start {
                    return Err(BookingError::Validation(format!(
                        "endDate must be after startDate: {start} .. {end}"
                    )));
                }
                if (end - start).num_days() > MAX_CUSTOM_DAYS {
                    return Err(BookingError::Validation(format!(
                        "custom period cannot exceed {MAX_CUSTOM_DAYS} days"
                    )));
                }
                (start, end)
            }
        };
        Ok(Self { start, end, kind })
    }

    pub fn start_str(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }

    /// Does a "YYYY-MM-DD" date fall inside the range?
    pub fn contains(&self, date: &str) -> bool {
        time::parse_date(date).is_ok_and(|d| d >= self.start && d < self.end)
    }

    /// Every day of the range, ascending
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(|d| *d < self.end)
    }

    pub fn to_model(&self) -> AnalyticsPeriod {
        AnalyticsPeriod {
            start: self.start_str(),
            end: self.end_str(),
            kind: self.kind.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn named_periods_end_tomorrow() {
        let p = Period::resolve(Some(PeriodKind::Today), today(), None, None).unwrap();
        assert_eq!((p.start, p.end), (day("2026-10-16"), day("2026-10-17")));

        let p = Period::resolve(Some(PeriodKind::Week), today(), None, None).unwrap();
        assert_eq!(p.start, day("2026-10-09"));
        assert_eq!(p.days().count(), 8);

        let p = Period::resolve(Some(PeriodKind::Month), today(), None, None).unwrap();
        assert_eq!(p.start, day("2026-09-16"));

        let p = Period::resolve(Some(PeriodKind::Year), today(), None, None).unwrap();
        assert_eq!(p.start, day("2025-10-16"));
        assert_eq!(p.end, day("2026-10-17"));
    }

    #[test]
    fn custom_needs_ordered_bounds() {
        let p = Period::resolve(None, today(), Some("2026-10-01"), Some("2026-10-08")).unwrap();
        assert_eq!(p.kind, PeriodKind::Custom);
        assert_eq!(p.days().count(), 7);
        assert!(p.contains("2026-10-07"));
        assert!(!p.contains("2026-10-08"));

        for (start, end) in [
            (Some("2026-10-08"), Some("2026-10-08")),
            (Some("2026-10-08"), Some("2026-10-01")),
            (Some("2026-10-01"), None),
            (Some("yesterday"), Some("2026-10-01")),
        ] {
            assert!(Period::resolve(Some(PeriodKind::Custom), today(), start, end).is_err());
        }
    }

    #[test]
    fn period_names_parse_case_insensitively() {
        assert_eq!("WEEK".parse::<PeriodKind>().unwrap(), PeriodKind::Week);
        assert!("quarter".parse::<PeriodKind>().is_err());
    }

    #[test]
    fn model_uses_type_key() {
        let p = Period::resolve(Some(PeriodKind::Today), today(), None, None).unwrap();
        let json = serde_json::to_value(p.to_model()).unwrap();
        assert_eq!(json["type"], "today");
        assert_eq!(json["start"], "2026-10-16");
        assert_eq!(json["end"], "2026-10-17");
    }
}
