//! Reservation Repository
//!
//! Reservations are never deleted. Every status change is a conditional
//! `UPDATE ... WHERE status IN (...)`; a table claim additionally requires
//! that no other table-holding reservation overlaps the window.

use super::{RepoError, RepoResult};
use shared::models::{Reservation, ReservationStatus};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, restaurant_id, customer_name, customer_email, customer_phone, date, time, duration_minutes, start_at, end_at, party_size, area_id, table_id, status, channel, special_requests, cancellation_reason, created_at, updated_at, confirmed_at, seated_at, completed_at, cancelled_at";

/// Statuses that keep a table occupied, as a SQL list
const HOLDING: &str = "('PENDING', 'CONFIRMED', 'SEATED')";

/// A requested status change
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub to: ReservationStatus,
    /// When the change happens (UTC millis)
    pub at: i64,
    /// Claim this table as part of the change
    pub assign_table: Option<i64>,
    pub cancellation_reason: Option<String>,
}

/// Timestamp column stamped by a transition into `status`
fn stamp_column(status: ReservationStatus) -> Option<&'static str> {
    match status {
        ReservationStatus::Confirmed => Some("confirmed_at"),
        ReservationStatus::Seated => Some("seated_at"),
        ReservationStatus::Completed => Some("completed_at"),
        ReservationStatus::Cancelled => Some("cancelled_at"),
        ReservationStatus::Pending | ReservationStatus::NoShow => None,
    }
}

fn status_list(statuses: &[ReservationStatus]) -> String {
    let quoted: Vec<String> = statuses.iter().map(|s| format!("'{}'", s.as_str())).collect();
    format!("({})", quoted.join(", "))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Reservation>> {
    let reservation =
        sqlx::query_as::<_, Reservation>(&format!("SELECT {COLUMNS} FROM reservation WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(reservation)
}

/// Table-holding reservations overlapping `[start, end)`
pub async fn find_blocking(
    pool: &SqlitePool,
    restaurant_id: i64,
    start: i64,
    end: i64,
) -> RepoResult<Vec<Reservation>> {
    let reservations = sqlx::query_as::<_, Reservation>(&format!(
        "SELECT {COLUMNS} FROM reservation WHERE restaurant_id = ? AND table_id IS NOT NULL AND status IN {HOLDING} AND start_at < ? AND ? < end_at ORDER BY start_at"
    ))
    .bind(restaurant_id)
    .bind(end)
    .bind(start)
    .fetch_all(pool)
    .await?;
    Ok(reservations)
}

/// Reservations whose local date is in `[from, to)` ("YYYY-MM-DD" compares lexically)
pub async fn find_by_date_range(
    pool: &SqlitePool,
    restaurant_id: i64,
    from: &str,
    to: &str,
) -> RepoResult<Vec<Reservation>> {
    let reservations = sqlx::query_as::<_, Reservation>(&format!(
        "SELECT {COLUMNS} FROM reservation WHERE restaurant_id = ? AND date >= ? AND date < ? ORDER BY start_at, id"
    ))
    .bind(restaurant_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;
    Ok(reservations)
}

/// PENDING/CONFIRMED reservations that started at or before `started_before`
pub async fn find_expiry_candidates(
    pool: &SqlitePool,
    restaurant_id: i64,
    started_before: i64,
) -> RepoResult<Vec<Reservation>> {
    let reservations = sqlx::query_as::<_, Reservation>(&format!(
        "SELECT {COLUMNS} FROM reservation WHERE restaurant_id = ? AND status IN ('PENDING', 'CONFIRMED') AND start_at <= ? ORDER BY start_at, id"
    ))
    .bind(restaurant_id)
    .bind(started_before)
    .fetch_all(pool)
    .await?;
    Ok(reservations)
}

/// Insert a new reservation
///
/// With a table assigned, the insert only happens if no table-holding
/// reservation overlaps the window on that table; otherwise `Conflict`.
pub async fn insert(pool: &SqlitePool, r: &Reservation) -> RepoResult<()> {
    let rows = sqlx::query(&format!(
        "INSERT INTO reservation ({COLUMNS}) \
         SELECT ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ? \
         WHERE ? IS NULL OR NOT EXISTS ( \
            SELECT 1 FROM reservation WHERE table_id = ? AND status IN {HOLDING} AND start_at < ? AND ? < end_at \
         )"
    ))
    .bind(r.id)
    .bind(r.restaurant_id)
    .bind(&r.customer_name)
    .bind(&r.customer_email)
    .bind(&r.customer_phone)
    .bind(&r.date)
    .bind(&r.time)
    .bind(r.duration_minutes)
    .bind(r.start_at)
    .bind(r.end_at)
    .bind(r.party_size)
    .bind(r.area_id)
    .bind(r.table_id)
    .bind(r.status)
    .bind(r.channel)
    .bind(&r.special_requests)
    .bind(&r.cancellation_reason)
    .bind(r.created_at)
    .bind(r.updated_at)
    .bind(r.confirmed_at)
    .bind(r.seated_at)
    .bind(r.completed_at)
    .bind(r.cancelled_at)
    // overlap guard
    .bind(r.table_id)
    .bind(r.table_id)
    .bind(r.end_at)
    .bind(r.start_at)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::Conflict(format!(
            "Table {:?} already held for the requested window",
            r.table_id
        )));
    }
    Ok(())
}

/// Compare-and-set status change
///
/// Returns `None` when the reservation is missing or its status is not in
/// `expected`. Returns `Conflict` when the status matched but the table claim
/// in `change.assign_table` lost to an overlapping reservation.
pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    expected: &[ReservationStatus],
    change: &StatusChange,
) -> RepoResult<Option<Reservation>> {
    let stamp = stamp_column(change.to)
        .map(|col| format!(", {col} = ?"))
        .unwrap_or_default();
    let expected_sql = status_list(expected);

    let mut sql = format!(
        "UPDATE reservation SET status = ?, updated_at = ?{stamp}, \
         table_id = COALESCE(?, table_id), \
         cancellation_reason = COALESCE(?, cancellation_reason) \
         WHERE id = ? AND status IN {expected_sql}"
    );
    if change.assign_table.is_some() {
        sql.push_str(&format!(
            " AND NOT EXISTS (SELECT 1 FROM reservation other WHERE other.id != reservation.id AND other.table_id = ? AND other.status IN {HOLDING} AND other.start_at < reservation.end_at AND reservation.start_at < other.end_at)"
        ));
    }

    let mut query = sqlx::query(&sql).bind(change.to).bind(change.at);
    if stamp_column(change.to).is_some() {
        query = query.bind(change.at);
    }
    query = query
        .bind(change.assign_table)
        .bind(&change.cancellation_reason)
        .bind(id);
    if let Some(table_id) = change.assign_table {
        query = query.bind(table_id);
    }
    let rows = query.execute(pool).await?;

    let current = find_by_id(pool, id).await?;
    if rows.rows_affected() == 0 {
        // 区分状态不符与桌台被抢
        if let Some(r) = &current
            && change.assign_table.is_some()
            && expected.contains(&r.status)
        {
            return Err(RepoError::Conflict(format!(
                "Table {:?} already held for reservation {id}'s window",
                change.assign_table
            )));
        }
        return Ok(None);
    }
    Ok(current)
}
