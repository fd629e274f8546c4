//! 预订引擎
//!
//! # 组件
//!
//! - [`Clock`] - 时间源（测试中可固定）
//! - [`OperatingCalendar`] - 营业时间解析（特殊日 > 每周规则 > 关闭）
//! - [`rules`] - 业务规则评估
//! - [`allocator`] - 桌台分配（最小合适容量优先，桌号升序）
//! - [`ReservationManager`] - 预订状态机 + no-show 扫描
//! - [`RestaurantAdmin`] - 餐厅配置管理
//!
//! The engine consumes a [`BookingStore`], a [`Clock`] and an
//! [`EventPublisher`]; it never reaches for global state.

pub mod admin;
pub mod allocator;
pub mod calendar;
pub mod clock;
pub mod error;
pub mod events;
pub mod expiry;
pub mod lifecycle;
pub mod locks;
pub mod memory;
pub mod rules;
pub mod store;

#[cfg(test)]
mod tests;

pub use admin::RestaurantAdmin;
pub use calendar::{DayHours, OperatingCalendar};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{BookingError, BookingResult, Transition};
pub use events::{
    BroadcastPublisher, EventPublisher, NoopPublisher, ReservationEvent, ReservationEventKind,
};
pub use expiry::{ExpiryScheduler, SweepReport};
pub use lifecycle::{AvailabilityQuery, ReservationManager};
pub use locks::TableLocks;
pub use memory::MemoryStore;
pub use store::{BookingStore, SqliteStore, StatusChange};
