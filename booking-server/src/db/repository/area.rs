//! Area Repository

use super::RepoResult;
use shared::models::Area;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, restaurant_id, name, description, max_capacity, is_active";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Area>> {
    let area = sqlx::query_as::<_, Area>(&format!("SELECT {COLUMNS} FROM area WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(area)
}

pub async fn find_by_restaurant(pool: &SqlitePool, restaurant_id: i64) -> RepoResult<Vec<Area>> {
    let areas = sqlx::query_as::<_, Area>(&format!(
        "SELECT {COLUMNS} FROM area WHERE restaurant_id = ? ORDER BY name, id"
    ))
    .bind(restaurant_id)
    .fetch_all(pool)
    .await?;
    Ok(areas)
}

pub async fn insert(pool: &SqlitePool, area: &Area) -> RepoResult<()> {
    sqlx::query(&format!(
        "INSERT INTO area ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?)"
    ))
    .bind(area.id)
    .bind(area.restaurant_id)
    .bind(&area.name)
    .bind(&area.description)
    .bind(area.max_capacity)
    .bind(area.is_active)
    .execute(pool)
    .await?;
    Ok(())
}

/// max_capacity = sum of active table capacities, computed in SQL
pub async fn refresh_capacity(pool: &SqlitePool, area_id: i64) -> RepoResult<()> {
    sqlx::query(
        "UPDATE area SET max_capacity = (SELECT COALESCE(SUM(capacity), 0) FROM dining_table WHERE area_id = ?1 AND is_active = 1) WHERE id = ?1",
    )
    .bind(area_id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Name, description and active flag; max_capacity is derived and left alone.
/// Returns false when the area does not exist
pub async fn update(pool: &SqlitePool, area: &Area) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE area SET name = ?, description = ?, is_active = ? WHERE id = ?")
        .bind(&area.name)
        .bind(&area.description)
        .bind(area.is_active)
        .bind(area.id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
