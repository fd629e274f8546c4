//! Area Model (区域：大厅、露台、包厢等)

use serde::{Deserialize, Serialize};

/// Area entity
///
/// `max_capacity` is the sum of the capacities of the area's active tables,
/// recomputed whenever a table changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Area {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub max_capacity: i32,
    pub is_active: bool,
}

/// Create area payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaCreate {
    pub name: String,
    pub description: Option<String>,
}

/// Update area payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AreaUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

