//! Data models
//!
//! Shared between booking-server and the dashboard (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` snowflakes, all timestamps UTC Unix millis.

pub mod analytics;
pub mod area;
pub mod business_rule;
pub mod dining_table;
pub mod operating_hour;
pub mod reservation;
pub mod restaurant;
pub mod settings;

// Re-exports
pub use analytics::*;
pub use area::*;
pub use business_rule::*;
pub use dining_table::*;
pub use operating_hour::*;
pub use reservation::*;
pub use restaurant::*;
pub use settings::*;
