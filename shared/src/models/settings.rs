//! Restaurant Settings Model (预订策略)

use serde::{Deserialize, Serialize};

/// Per-restaurant booking policy
///
/// Exactly one current row per restaurant, no history. All durations are
/// minutes unless the field name says otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RestaurantSettings {
    pub restaurant_id: i64,
    /// Reservation length when the request does not override it
    pub default_reservation_duration: i32,
    /// Latest bookable start, counted from now
    pub max_advance_booking_days: i32,
    /// Earliest bookable start, counted from now
    pub min_advance_booking_hours: i32,
    pub max_party_size: i32,
    /// PENDING/CONFIRMED reservations become NO_SHOW this long after start
    pub auto_cancel_no_show_minutes: i32,
    /// Seating is accepted within `start ± grace`
    pub seating_grace_minutes: i32,
    /// Accept requests without a table (kept PENDING until confirmed)
    pub enable_waitlist: bool,
    pub enable_online_bookings: bool,
    /// New reservations that got a table start CONFIRMED instead of PENDING
    pub auto_confirm: bool,
    pub updated_at: i64,
}

pub const DEFAULT_RESERVATION_DURATION: i32 = 90;
pub const DEFAULT_MAX_ADVANCE_BOOKING_DAYS: i32 = 30;
pub const DEFAULT_MIN_ADVANCE_BOOKING_HOURS: i32 = 2;
pub const DEFAULT_MAX_PARTY_SIZE: i32 = 12;
pub const DEFAULT_AUTO_CANCEL_NO_SHOW_MINUTES: i32 = 30;
pub const DEFAULT_SEATING_GRACE_MINUTES: i32 = 30;

impl RestaurantSettings {
    /// Settings a restaurant gets before anyone edits them
    pub fn defaults(restaurant_id: i64, now: i64) -> Self {
        Self {
            restaurant_id,
            default_reservation_duration: DEFAULT_RESERVATION_DURATION,
            max_advance_booking_days: DEFAULT_MAX_ADVANCE_BOOKING_DAYS,
            min_advance_booking_hours: DEFAULT_MIN_ADVANCE_BOOKING_HOURS,
            max_party_size: DEFAULT_MAX_PARTY_SIZE,
            auto_cancel_no_show_minutes: DEFAULT_AUTO_CANCEL_NO_SHOW_MINUTES,
            seating_grace_minutes: DEFAULT_SEATING_GRACE_MINUTES,
            enable_waitlist: false,
            enable_online_bookings: true,
            auto_confirm: false,
            updated_at: now,
        }
    }

    /// Apply a partial update in place
    pub fn apply(&mut self, update: RestaurantSettingsUpdate, now: i64) {
        if let Some(v) = update.default_reservation_duration {
            self.default_reservation_duration = v;
        }
        if let Some(v) = update.max_advance_booking_days {
            self.max_advance_booking_days = v;
        }
        if let Some(v) = update.min_advance_booking_hours {
            self.min_advance_booking_hours = v;
        }
        if let Some(v) = update.max_party_size {
            self.max_party_size = v;
        }
        if let Some(v) = update.auto_cancel_no_show_minutes {
            self.auto_cancel_no_show_minutes = v;
        }
        if let Some(v) = update.seating_grace_minutes {
            self.seating_grace_minutes = v;
        }
        if let Some(v) = update.enable_waitlist {
            self.enable_waitlist = v;
        }
        if let Some(v) = update.enable_online_bookings {
            self.enable_online_bookings = v;
        }
        if let Some(v) = update.auto_confirm {
            self.auto_confirm = v;
        }
        self.updated_at = now;
    }
}

/// Update settings payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantSettingsUpdate {
    pub default_reservation_duration: Option<i32>,
    pub max_advance_booking_days: Option<i32>,
    pub min_advance_booking_hours: Option<i32>,
    pub max_party_size: Option<i32>,
    pub auto_cancel_no_show_minutes: Option<i32>,
    pub seating_grace_minutes: Option<i32>,
    pub enable_waitlist: Option<bool>,
    pub enable_online_bookings: Option<bool>,
    pub auto_confirm: Option<bool>,
}

impl RestaurantSettingsUpdate {
    /// Reject negative durations and non-positive limits
    pub fn validate(&self) -> Result<(), String> {
        let non_negative = [
            ("max_advance_booking_days", self.max_advance_booking_days),
            ("min_advance_booking_hours", self.min_advance_booking_hours),
            ("auto_cancel_no_show_minutes", self.auto_cancel_no_show_minutes),
            ("seating_grace_minutes", self.seating_grace_minutes),
        ];
        for (field, value) in non_negative {
            if let Some(v) = value
                && v < 0
            {
                return Err(format!("{field} cannot be negative: {v}"));
            }
        }
        let positive = [
            ("default_reservation_duration", self.default_reservation_duration),
            ("max_party_size", self.max_party_size),
        ];
        for (field, value) in positive {
            if let Some(v) = value
                && v <= 0
            {
                return Err(format!("{field} must be positive: {v}"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_only_touches_given_fields() {
        let mut settings = RestaurantSettings::defaults(1, 0);
        settings.apply(
            RestaurantSettingsUpdate {
                max_party_size: Some(20),
                auto_confirm: Some(true),
                ..Default::default()
            },
            5,
        );
        assert_eq!(settings.max_party_size, 20);
        assert!(settings.auto_confirm);
        assert_eq!(settings.default_reservation_duration, DEFAULT_RESERVATION_DURATION);
        assert_eq!(settings.updated_at, 5);
    }

    #[test]
    fn validate_rejects_negative_and_zero() {
        let update = RestaurantSettingsUpdate {
            min_advance_booking_hours: Some(-1),
            ..Default::default()
        };
        assert!(update.validate().is_err());

        let update = RestaurantSettingsUpdate {
            max_party_size: Some(0),
            ..Default::default()
        };
        assert!(update.validate().is_err());

        let update = RestaurantSettingsUpdate {
            auto_cancel_no_show_minutes: Some(0),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
    }
}
