//! Operating Hour Model (营业时间)

use serde::{Deserialize, Serialize};

/// Operating hour record
///
/// Either a weekly rule (`is_special_day = false`, keyed by `day_of_week`,
/// 0=Sunday..6=Saturday) or a one-off override for `special_date`.
/// Times are restaurant-local "HH:MM"; `close_time <= open_time` means the
/// service runs past midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OperatingHour {
    pub id: i64,
    pub restaurant_id: i64,
    pub day_of_week: i32,
    pub open_time: String,
    pub close_time: String,
    pub is_closed: bool,
    pub is_special_day: bool,
    /// "YYYY-MM-DD", present only for special days
    pub special_date: Option<String>,
}

/// Weekly rule payload (upsert by restaurant + weekday)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyHoursInput {
    pub day_of_week: i32,
    pub open_time: String,
    pub close_time: String,
    #[serde(default)]
    pub is_closed: bool,
}

/// Special day payload (upsert by restaurant + date)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialDayInput {
    pub special_date: String,
    pub open_time: String,
    pub close_time: String,
    #[serde(default)]
    pub is_closed: bool,
}
