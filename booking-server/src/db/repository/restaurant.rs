//! Restaurant Repository

use super::RepoResult;
use shared::models::Restaurant;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, address, phone, email, description, timezone, is_active, created_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Restaurant>> {
    let restaurant =
        sqlx::query_as::<_, Restaurant>(&format!("SELECT {COLUMNS} FROM restaurant WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(restaurant)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Restaurant>> {
    let restaurants =
        sqlx::query_as::<_, Restaurant>(&format!("SELECT {COLUMNS} FROM restaurant ORDER BY id"))
            .fetch_all(pool)
            .await?;
    Ok(restaurants)
}

pub async fn insert(pool: &SqlitePool, r: &Restaurant) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO restaurant (id, name, address, phone, email, description, timezone, is_active, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(r.id)
    .bind(&r.name)
    .bind(&r.address)
    .bind(&r.phone)
    .bind(&r.email)
    .bind(&r.description)
    .bind(&r.timezone)
    .bind(r.is_active)
    .bind(r.created_at)
    .bind(r.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Overwrite every mutable attribute; identity and `created_at` never change
pub async fn update(pool: &SqlitePool, r: &Restaurant) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE restaurant SET name = ?, address = ?, phone = ?, email = ?, description = ?, timezone = ?, is_active = ?, updated_at = ? WHERE id = ?",
    )
    .bind(&r.name)
    .bind(&r.address)
    .bind(&r.phone)
    .bind(&r.email)
    .bind(&r.description)
    .bind(&r.timezone)
    .bind(r.is_active)
    .bind(r.updated_at)
    .bind(r.id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}
