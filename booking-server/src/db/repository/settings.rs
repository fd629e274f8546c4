//! Restaurant Settings Repository

use super::RepoResult;
use shared::models::RestaurantSettings;
use sqlx::SqlitePool;

pub async fn find(pool: &SqlitePool, restaurant_id: i64) -> RepoResult<Option<RestaurantSettings>> {
    let settings = sqlx::query_as::<_, RestaurantSettings>(
        "SELECT restaurant_id, default_reservation_duration, max_advance_booking_days, min_advance_booking_hours, max_party_size, auto_cancel_no_show_minutes, seating_grace_minutes, enable_waitlist, enable_online_bookings, auto_confirm, updated_at FROM restaurant_settings WHERE restaurant_id = ?",
    )
    .bind(restaurant_id)
    .fetch_optional(pool)
    .await?;
    Ok(settings)
}

/// Single current row per restaurant
pub async fn upsert(pool: &SqlitePool, s: &RestaurantSettings) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO restaurant_settings (restaurant_id, default_reservation_duration, max_advance_booking_days, min_advance_booking_hours, max_party_size, auto_cancel_no_show_minutes, seating_grace_minutes, enable_waitlist, enable_online_bookings, auto_confirm, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
         ON CONFLICT(restaurant_id) DO UPDATE SET \
            default_reservation_duration = excluded.default_reservation_duration, \
            max_advance_booking_days = excluded.max_advance_booking_days, \
            min_advance_booking_hours = excluded.min_advance_booking_hours, \
            max_party_size = excluded.max_party_size, \
            auto_cancel_no_show_minutes = excluded.auto_cancel_no_show_minutes, \
            seating_grace_minutes = excluded.seating_grace_minutes, \
            enable_waitlist = excluded.enable_waitlist, \
            enable_online_bookings = excluded.enable_online_bookings, \
            auto_confirm = excluded.auto_confirm, \
            updated_at = excluded.updated_at",
    )
    .bind(s.restaurant_id)
    .bind(s.default_reservation_duration)
    .bind(s.max_advance_booking_days)
    .bind(s.min_advance_booking_hours)
    .bind(s.max_party_size)
    .bind(s.auto_cancel_no_show_minutes)
    .bind(s.seating_grace_minutes)
    .bind(s.enable_waitlist)
    .bind(s.enable_online_bookings)
    .bind(s.auto_confirm)
    .bind(s.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}
