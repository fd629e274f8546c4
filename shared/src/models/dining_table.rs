//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Where a table physically sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum TableLocation {
    Interior,
    Exterior,
    Terrace,
    Private,
}

/// Table status as seen at a point in time
///
/// Only `Maintenance` is stored (as [`DiningTable::in_maintenance`]); the rest
/// is computed from overlapping reservations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    Available,
    Occupied,
    Reserved,
    Maintenance,
}

/// Dining table entity (桌台)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiningTable {
    pub id: i64,
    pub restaurant_id: i64,
    pub area_id: i64,
    /// Display number, also the allocation tie-breaker
    pub number: String,
    pub capacity: i32,
    pub location: TableLocation,
    pub is_active: bool,
    /// Operator-set; excludes the table from allocation
    pub in_maintenance: bool,
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableCreate {
    pub area_id: i64,
    pub number: String,
    pub capacity: Option<i32>,
    pub location: Option<TableLocation>,
}

/// Update dining table payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiningTableUpdate {
    pub area_id: Option<i64>,
    pub number: Option<String>,
    pub capacity: Option<i32>,
    pub location: Option<TableLocation>,
    pub is_active: Option<bool>,
}


/// Derived status row returned by the table status view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStatusView {
    pub table_id: i64,
    pub number: String,
    pub area_id: i64,
    pub capacity: i32,
    pub status: TableStatus,
    /// Reservation currently holding the table, if any
    pub reservation_id: Option<i64>,
}
