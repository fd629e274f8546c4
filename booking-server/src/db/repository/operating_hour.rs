//! Operating Hour Repository

use super::{RepoError, RepoResult};
use shared::models::OperatingHour;
use sqlx::SqlitePool;

const COLUMNS: &str =
    "id, restaurant_id, day_of_week, open_time, close_time, is_closed, is_special_day, special_date";

pub async fn find_by_restaurant(
    pool: &SqlitePool,
    restaurant_id: i64,
) -> RepoResult<Vec<OperatingHour>> {
    let hours = sqlx::query_as::<_, OperatingHour>(&format!(
        "SELECT {COLUMNS} FROM operating_hour WHERE restaurant_id = ? ORDER BY is_special_day, day_of_week, special_date"
    ))
    .bind(restaurant_id)
    .fetch_all(pool)
    .await?;
    Ok(hours)
}

/// Insert or replace the record keyed by weekday (weekly) or date (special day)
///
/// Keeps the existing row id when one is replaced.
pub async fn upsert(pool: &SqlitePool, hour: &OperatingHour) -> RepoResult<OperatingHour> {
    if hour.is_special_day && hour.special_date.is_none() {
        return Err(RepoError::Validation(
            "special_date is required for a special day".into(),
        ));
    }

    let existing: Option<i64> = if hour.is_special_day {
        sqlx::query_scalar(
            "SELECT id FROM operating_hour WHERE restaurant_id = ? AND is_special_day = 1 AND special_date = ?",
        )
        .bind(hour.restaurant_id)
        .bind(&hour.special_date)
        .fetch_optional(pool)
        .await?
    } else {
        sqlx::query_scalar(
            "SELECT id FROM operating_hour WHERE restaurant_id = ? AND is_special_day = 0 AND day_of_week = ?",
        )
        .bind(hour.restaurant_id)
        .bind(hour.day_of_week)
        .fetch_optional(pool)
        .await?
    };

    let mut stored = hour.clone();
    match existing {
        Some(id) => {
            stored.id = id;
            sqlx::query(
                "UPDATE operating_hour SET open_time = ?, close_time = ?, is_closed = ?, day_of_week = ? WHERE id = ?",
            )
            .bind(&stored.open_time)
            .bind(&stored.close_time)
            .bind(stored.is_closed)
            .bind(stored.day_of_week)
            .bind(id)
            .execute(pool)
            .await?;
        }
        None => {
            sqlx::query(&format!(
                "INSERT INTO operating_hour ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
            ))
            .bind(stored.id)
            .bind(stored.restaurant_id)
            .bind(stored.day_of_week)
            .bind(&stored.open_time)
            .bind(&stored.close_time)
            .bind(stored.is_closed)
            .bind(stored.is_special_day)
            .bind(&stored.special_date)
            .execute(pool)
            .await?;
        }
    }
    Ok(stored)
}
