//! Analytics Model (数据统计)
//!
//! Shapes consumed by the dashboard; serialized camelCase. Rates are
//! fractions in [0, 1] with two decimal places.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Full analytics response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub summary: SummaryStats,
    pub charts: SummaryCharts,
    pub period: AnalyticsPeriod,
}

/// Headline counts and rates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total_reservations: u32,
    pub pending_reservations: u32,
    pub confirmed_reservations: u32,
    pub seated_reservations: u32,
    pub completed_reservations: u32,
    pub cancelled_reservations: u32,
    pub no_show_reservations: u32,
    pub total_customers: u32,
    pub total_guests: u32,
    pub active_tables: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub confirmation_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub occupancy_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub completion_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub cancellation_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub no_show_rate: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryCharts {
    pub daily_reservations: Vec<DailyReservations>,
    pub hourly_reservations: Vec<HourlyReservations>,
    pub area_performance: Vec<AreaPerformance>,
    pub top_customers: Vec<TopCustomer>,
}

/// Per-day breakdown (restaurant-local calendar day)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReservations {
    /// "YYYY-MM-DD"
    pub day: String,
    pub count: u32,
    pub pending: u32,
    pub confirmed: u32,
    pub seated: u32,
    pub completed: u32,
    pub cancelled: u32,
    pub no_show: u32,
}

/// Per-hour bucket of reservation start time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyReservations {
    /// "HH:00"
    pub hour: String,
    pub count: u32,
    pub guests: u32,
}

/// Per-area breakdown joined through the assigned table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaPerformance {
    /// None for reservations without a table
    pub id: Option<i64>,
    pub name: String,
    pub reservation_count: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub avg_party_size: Decimal,
    pub completed_count: u32,
    pub cancelled_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopCustomer {
    /// Normalized customer key
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub reservation_count: u32,
    pub total_guests: u32,
    /// "YYYY-MM-DD HH:MM" (restaurant-local)
    pub last_visit: String,
}

/// The resolved half-open date window `[start, end)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsPeriod {
    pub start: String,
    pub end: String,
    #[serde(rename = "type")]
    pub kind: String,
}
