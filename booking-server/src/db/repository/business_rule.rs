//! Business Rule Repository

use super::RepoResult;
use shared::models::BusinessRule;
use sqlx::SqlitePool;

const COLUMNS: &str =
    "id, restaurant_id, name, description, rule_type, conditions, actions, is_active, priority, created_at";

/// All rules of a restaurant, in evaluation order
pub async fn find_by_restaurant(
    pool: &SqlitePool,
    restaurant_id: i64,
) -> RepoResult<Vec<BusinessRule>> {
    let rules = sqlx::query_as::<_, BusinessRule>(&format!(
        "SELECT {COLUMNS} FROM business_rule WHERE restaurant_id = ? ORDER BY priority DESC, created_at, id"
    ))
    .bind(restaurant_id)
    .fetch_all(pool)
    .await?;
    Ok(rules)
}

pub async fn insert(pool: &SqlitePool, rule: &BusinessRule) -> RepoResult<()> {
    let conditions = serde_json::to_string(&rule.conditions)?;
    let actions = serde_json::to_string(&rule.actions)?;
    sqlx::query(&format!(
        "INSERT INTO business_rule ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
    ))
    .bind(rule.id)
    .bind(rule.restaurant_id)
    .bind(&rule.name)
    .bind(&rule.description)
    .bind(&rule.rule_type)
    .bind(conditions)
    .bind(actions)
    .bind(rule.is_active)
    .bind(rule.priority)
    .bind(rule.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Returns false when the rule does not exist
pub async fn update(pool: &SqlitePool, rule: &BusinessRule) -> RepoResult<bool> {
    let conditions = serde_json::to_string(&rule.conditions)?;
    let actions = serde_json::to_string(&rule.actions)?;
    let rows = sqlx::query(
        "UPDATE business_rule SET name = ?, description = ?, rule_type = ?, conditions = ?, actions = ?, is_active = ?, priority = ? WHERE id = ?",
    )
    .bind(&rule.name)
    .bind(&rule.description)
    .bind(&rule.rule_type)
    .bind(conditions)
    .bind(actions)
    .bind(rule.is_active)
    .bind(rule.priority)
    .bind(rule.id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}
