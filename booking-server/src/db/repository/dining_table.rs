//! Dining Table Repository

use super::{RepoResult, area};
use shared::models::DiningTable;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, restaurant_id, area_id, number, capacity, location, is_active, in_maintenance";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<DiningTable>> {
    let table = sqlx::query_as::<_, DiningTable>(&format!(
        "SELECT {COLUMNS} FROM dining_table WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(table)
}

pub async fn find_by_restaurant(
    pool: &SqlitePool,
    restaurant_id: i64,
) -> RepoResult<Vec<DiningTable>> {
    let tables = sqlx::query_as::<_, DiningTable>(&format!(
        "SELECT {COLUMNS} FROM dining_table WHERE restaurant_id = ? ORDER BY number"
    ))
    .bind(restaurant_id)
    .fetch_all(pool)
    .await?;
    Ok(tables)
}

/// Insert a table and refresh its area's capacity
pub async fn insert(pool: &SqlitePool, table: &DiningTable) -> RepoResult<()> {
    sqlx::query(&format!(
        "INSERT INTO dining_table ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
    ))
    .bind(table.id)
    .bind(table.restaurant_id)
    .bind(table.area_id)
    .bind(&table.number)
    .bind(table.capacity)
    .bind(table.location)
    .bind(table.is_active)
    .bind(table.in_maintenance)
    .execute(pool)
    .await?;

    area::refresh_capacity(pool, table.area_id).await
}

/// Returns false when the table does not exist
pub async fn set_maintenance(pool: &SqlitePool, id: i64, in_maintenance: bool) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE dining_table SET in_maintenance = ? WHERE id = ?")
        .bind(in_maintenance)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Rewrite a table's editable columns and refresh the capacity of the area
/// it left (if moved) and the area it is in now.
/// Returns false when the table does not exist
pub async fn update(pool: &SqlitePool, table: &DiningTable) -> RepoResult<bool> {
    let Some(previous) = find_by_id(pool, table.id).await? else {
        return Ok(false);
    };
    sqlx::query(
        "UPDATE dining_table SET area_id = ?, number = ?, capacity = ?, location = ?, is_active = ? WHERE id = ?",
    )
    .bind(table.area_id)
    .bind(&table.number)
    .bind(table.capacity)
    .bind(table.location)
    .bind(table.is_active)
    .bind(table.id)
    .execute(pool)
    .await?;

    if previous.area_id != table.area_id {
        area::refresh_capacity(pool, previous.area_id).await?;
    }
    area::refresh_capacity(pool, table.area_id).await?;
    Ok(true)
}
