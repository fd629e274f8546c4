//! Business Rule Model (预订规则)
//!
//! Conditions and actions are a small closed vocabulary of tagged variants.
//! Anything the server does not recognise deserializes to `Unknown`, which
//! the evaluator treats as "rule does not match".

use serde::{Deserialize, Serialize};

use super::reservation::BookingChannel;

/// A predicate over a reservation draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleCondition {
    /// party_size >= min
    PartySizeAtLeast { min: i32 },
    /// party_size <= max
    PartySizeAtMost { max: i32 },
    /// Reservation date falls on one of these weekdays (0=Sunday..6=Saturday)
    DaysOfWeek { days: Vec<u8> },
    /// Reservation start time in [start, end) ("HH:MM"); wraps past midnight when end <= start
    TimeBetween { start: String, end: String },
    /// Reservation date in [from, to] ("YYYY-MM-DD", inclusive)
    DateBetween { from: String, to: String },
    /// Requested area equals area_id
    Area { area_id: i64 },
    /// Request came through this channel
    Channel { channel: BookingChannel },
    #[serde(other)]
    Unknown,
}

/// An effect applied when a rule matches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleAction {
    /// Reject the request
    Deny { reason: Option<String> },
    /// Only tables in this area may be allocated
    RequireArea { area_id: i64 },
    /// Override the reservation duration
    SetDuration { minutes: i32 },
    /// Keep the reservation PENDING even when auto-confirm is on
    RequireManualConfirmation,
    #[serde(other)]
    Unknown,
}

/// Business rule entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BusinessRule {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Free-form classification shown in the admin UI
    pub rule_type: String,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub conditions: Vec<RuleCondition>,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub actions: Vec<RuleAction>,
    pub is_active: bool,
    /// Higher wins
    pub priority: i32,
    pub created_at: i64,
}

/// Create business rule payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessRuleCreate {
    pub name: String,
    pub description: Option<String>,
    pub rule_type: String,
    #[serde(default)]
    pub conditions: Vec<RuleCondition>,
    #[serde(default)]
    pub actions: Vec<RuleAction>,
    pub is_active: Option<bool>,
    pub priority: Option<i32>,
}

/// Update business rule payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusinessRuleUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub rule_type: Option<String>,
    pub conditions: Option<Vec<RuleCondition>>,
    pub actions: Option<Vec<RuleAction>>,
    pub is_active: Option<bool>,
    pub priority: Option<i32>,
}
