//! Reservation Model (预订)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reservation lifecycle status
///
/// PENDING → CONFIRMED → SEATED → COMPLETED, with CANCELLED and NO_SHOW as
/// terminal exits from PENDING/CONFIRMED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Seated,
    Completed,
    Cancelled,
    NoShow,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 6] = [
        Self::Pending,
        Self::Confirmed,
        Self::Seated,
        Self::Completed,
        Self::Cancelled,
        Self::NoShow,
    ];

    /// No transition leaves a terminal status
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::NoShow)
    }

    /// Statuses whose assigned table is blocked for the reservation window
    pub const fn holds_table(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed | Self::Seated)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Seated => "SEATED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
            Self::NoShow => "NO_SHOW",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the booking request came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum BookingChannel {
    Online,
    #[default]
    Staff,
}

/// Reservation entity
///
/// `date`/`time` are restaurant-local; `start_at`/`end_at` are the same
/// window as UTC Unix millis. The window is half-open: `[start_at, end_at)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: i64,
    pub restaurant_id: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    /// "YYYY-MM-DD"
    pub date: String,
    /// "HH:MM"
    pub time: String,
    pub duration_minutes: i32,
    pub start_at: i64,
    pub end_at: i64,
    pub party_size: i32,
    /// Area asked for on create; reused when a waitlisted booking is confirmed
    pub area_id: Option<i64>,
    pub table_id: Option<i64>,
    pub status: ReservationStatus,
    pub channel: BookingChannel,
    pub special_requests: Option<String>,
    pub cancellation_reason: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub confirmed_at: Option<i64>,
    pub seated_at: Option<i64>,
    pub completed_at: Option<i64>,
    pub cancelled_at: Option<i64>,
}

impl Reservation {
    /// Half-open interval overlap with `[start, end)`
    pub fn overlaps(&self, start: i64, end: i64) -> bool {
        self.start_at < end && start < self.end_at
    }

    /// Does this reservation block `table_id` during `[start, end)`?
    pub fn blocks(&self, table_id: i64, start: i64, end: i64) -> bool {
        self.table_id == Some(table_id) && self.status.holds_table() && self.overlaps(start, end)
    }
}

/// Create reservation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreate {
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub customer_phone: String,
    /// "YYYY-MM-DD" (restaurant-local)
    pub date: String,
    /// "HH:MM" (restaurant-local)
    pub time: String,
    pub party_size: i32,
    /// Overrides the restaurant default duration
    pub duration_minutes: Option<i32>,
    pub area_id: Option<i64>,
    pub table_id: Option<i64>,
    pub special_requests: Option<String>,
    #[serde(default)]
    pub channel: BookingChannel,
}

/// Cancel payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationCancel {
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reservation(start_at: i64, end_at: i64, status: ReservationStatus) -> Reservation {
        Reservation {
            id: 1,
            restaurant_id: 1,
            customer_name: "Ana".into(),
            customer_email: String::new(),
            customer_phone: String::new(),
            date: "2026-10-16".into(),
            time: "19:00".into(),
            duration_minutes: 90,
            start_at,
            end_at,
            party_size: 2,
            area_id: None,
            table_id: Some(7),
            status,
            channel: BookingChannel::Staff,
            special_requests: None,
            cancellation_reason: None,
            created_at: 0,
            updated_at: 0,
            confirmed_at: None,
            seated_at: None,
            completed_at: None,
            cancelled_at: None,
        }
    }

    #[test]
    fn adjacent_windows_do_not_overlap() {
        let r = reservation(100, 200, ReservationStatus::Confirmed);
        assert!(!r.overlaps(200, 300));
        assert!(!r.overlaps(0, 100));
        assert!(r.overlaps(199, 300));
        assert!(r.overlaps(50, 101));
    }

    #[test]
    fn terminal_reservations_release_the_table() {
        let r = reservation(100, 200, ReservationStatus::Cancelled);
        assert!(!r.blocks(7, 150, 250));
        let r = reservation(100, 200, ReservationStatus::Seated);
        assert!(r.blocks(7, 150, 250));
        assert!(!r.blocks(8, 150, 250));
    }

    #[test]
    fn status_serializes_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&ReservationStatus::NoShow).unwrap(),
            "\"NO_SHOW\""
        );
        assert!(ReservationStatus::NoShow.is_terminal());
        assert!(!ReservationStatus::Confirmed.is_terminal());
    }
}
