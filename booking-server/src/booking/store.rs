//! Persistence interface consumed by the engine
//!
//! [`SqliteStore`] delegates to the repository functions; [`super::MemoryStore`]
//! keeps everything in process. Both honour the same atomicity contract:
//! a reservation write that claims a table fails with
//! [`RepoError::Conflict`] when another table-holding reservation overlaps.

use async_trait::async_trait;
use shared::models::{
    Area, BusinessRule, DiningTable, OperatingHour, Reservation, ReservationStatus, Restaurant,
    RestaurantSettings,
};
use sqlx::SqlitePool;

use crate::db::repository::{
    RepoError, RepoResult, area, business_rule, dining_table, operating_hour, reservation,
    restaurant, settings,
};

pub use crate::db::repository::reservation::StatusChange;

#[async_trait]
pub trait BookingStore: Send + Sync {
    // ── Restaurant configuration ────────────────────────────────────
    async fn restaurant(&self, id: i64) -> RepoResult<Option<Restaurant>>;
    async fn restaurants(&self) -> RepoResult<Vec<Restaurant>>;
    async fn insert_restaurant(&self, restaurant: &Restaurant) -> RepoResult<()>;
    async fn update_restaurant(&self, restaurant: &Restaurant) -> RepoResult<()>;

    async fn settings(&self, restaurant_id: i64) -> RepoResult<Option<RestaurantSettings>>;
    async fn upsert_settings(&self, settings: &RestaurantSettings) -> RepoResult<()>;

    async fn operating_hours(&self, restaurant_id: i64) -> RepoResult<Vec<OperatingHour>>;
    /// Replace-or-insert keyed by weekday (weekly) or date (special day)
    async fn upsert_operating_hour(&self, hour: &OperatingHour) -> RepoResult<OperatingHour>;

    async fn areas(&self, restaurant_id: i64) -> RepoResult<Vec<Area>>;
    async fn area(&self, id: i64) -> RepoResult<Option<Area>>;
    async fn insert_area(&self, area: &Area) -> RepoResult<()>;
    /// Leaves `max_capacity` alone; `false` when the area does not exist
    async fn update_area(&self, area: &Area) -> RepoResult<bool>;

    async fn tables(&self, restaurant_id: i64) -> RepoResult<Vec<DiningTable>>;
    async fn table(&self, id: i64) -> RepoResult<Option<DiningTable>>;
    /// Also refreshes the owning area's `max_capacity`
    async fn insert_table(&self, table: &DiningTable) -> RepoResult<()>;
    /// Refreshes `max_capacity` of the old and new area; `false` when the table does not exist
    async fn update_table(&self, table: &DiningTable) -> RepoResult<bool>;
    /// `false` when the table does not exist
    async fn set_table_maintenance(&self, id: i64, in_maintenance: bool) -> RepoResult<bool>;

    async fn business_rules(&self, restaurant_id: i64) -> RepoResult<Vec<BusinessRule>>;
    async fn insert_business_rule(&self, rule: &BusinessRule) -> RepoResult<()>;
    /// `false` when the rule does not exist
    async fn update_business_rule(&self, rule: &BusinessRule) -> RepoResult<bool>;

    // ── Reservations ────────────────────────────────────────────────
    async fn reservation(&self, id: i64) -> RepoResult<Option<Reservation>>;

    /// Table-holding reservations overlapping `[start, end)`
    async fn blocking_reservations(
        &self,
        restaurant_id: i64,
        start: i64,
        end: i64,
    ) -> RepoResult<Vec<Reservation>>;

    /// Reservations whose local date is in `[from, to)`
    async fn reservations_between(
        &self,
        restaurant_id: i64,
        from: &str,
        to: &str,
    ) -> RepoResult<Vec<Reservation>>;

    /// PENDING/CONFIRMED reservations with `start_at <= started_before`
    async fn expiry_candidates(
        &self,
        restaurant_id: i64,
        started_before: i64,
    ) -> RepoResult<Vec<Reservation>>;

    /// Atomic insert; `Conflict` when the assigned table is already held
    async fn insert_reservation(&self, reservation: &Reservation) -> RepoResult<()>;

    /// Compare-and-set: `None` when the reservation is missing or not in `expected`
    async fn update_status(
        &self,
        id: i64,
        expected: &[ReservationStatus],
        change: &StatusChange,
    ) -> RepoResult<Option<Reservation>>;
}

/// SQLite-backed store
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl BookingStore for SqliteStore {
    async fn restaurant(&self, id: i64) -> RepoResult<Option<Restaurant>> {
        restaurant::find_by_id(&self.pool, id).await
    }

    async fn restaurants(&self) -> RepoResult<Vec<Restaurant>> {
        restaurant::find_all(&self.pool).await
    }

    async fn insert_restaurant(&self, r: &Restaurant) -> RepoResult<()> {
        restaurant::insert(&self.pool, r).await
    }

    async fn update_restaurant(&self, r: &Restaurant) -> RepoResult<()> {
        if restaurant::update(&self.pool, r).await? {
            Ok(())
        } else {
            Err(RepoError::NotFound(format!("Restaurant {}", r.id)))
        }
    }

    async fn settings(&self, restaurant_id: i64) -> RepoResult<Option<RestaurantSettings>> {
        settings::find(&self.pool, restaurant_id).await
    }

    async fn upsert_settings(&self, s: &RestaurantSettings) -> RepoResult<()> {
        settings::upsert(&self.pool, s).await
    }

    async fn operating_hours(&self, restaurant_id: i64) -> RepoResult<Vec<OperatingHour>> {
        operating_hour::find_by_restaurant(&self.pool, restaurant_id).await
    }

    async fn upsert_operating_hour(&self, hour: &OperatingHour) -> RepoResult<OperatingHour> {
        operating_hour::upsert(&self.pool, hour).await
    }

    async fn areas(&self, restaurant_id: i64) -> RepoResult<Vec<Area>> {
        area::find_by_restaurant(&self.pool, restaurant_id).await
    }

    async fn area(&self, id: i64) -> RepoResult<Option<Area>> {
        area::find_by_id(&self.pool, id).await
    }

    async fn insert_area(&self, a: &Area) -> RepoResult<()> {
        area::insert(&self.pool, a).await
    }

    async fn update_area(&self, a: &Area) -> RepoResult<bool> {
        area::update(&self.pool, a).await
    }

    async fn tables(&self, restaurant_id: i64) -> RepoResult<Vec<DiningTable>> {
        dining_table::find_by_restaurant(&self.pool, restaurant_id).await
    }

    async fn table(&self, id: i64) -> RepoResult<Option<DiningTable>> {
        dining_table::find_by_id(&self.pool, id).await
    }

    async fn insert_table(&self, table: &DiningTable) -> RepoResult<()> {
        dining_table::insert(&self.pool, table).await
    }

    async fn update_table(&self, table: &DiningTable) -> RepoResult<bool> {
        dining_table::update(&self.pool, table).await
    }

    async fn set_table_maintenance(&self, id: i64, in_maintenance: bool) -> RepoResult<bool> {
        dining_table::set_maintenance(&self.pool, id, in_maintenance).await
    }

    async fn business_rules(&self, restaurant_id: i64) -> RepoResult<Vec<BusinessRule>> {
        business_rule::find_by_restaurant(&self.pool, restaurant_id).await
    }

    async fn insert_business_rule(&self, rule: &BusinessRule) -> RepoResult<()> {
        business_rule::insert(&self.pool, rule).await
    }

    async fn update_business_rule(&self, rule: &BusinessRule) -> RepoResult<bool> {
        business_rule::update(&self.pool, rule).await
    }

    async fn reservation(&self, id: i64) -> RepoResult<Option<Reservation>> {
        reservation::find_by_id(&self.pool, id).await
    }

    async fn blocking_reservations(
        &self,
        restaurant_id: i64,
        start: i64,
        end: i64,
    ) -> RepoResult<Vec<Reservation>> {
        reservation::find_blocking(&self.pool, restaurant_id, start, end).await
    }

    async fn reservations_between(
        &self,
        restaurant_id: i64,
        from: &str,
        to: &str,
    ) -> RepoResult<Vec<Reservation>> {
        reservation::find_by_date_range(&self.pool, restaurant_id, from, to).await
    }

    async fn expiry_candidates(
        &self,
        restaurant_id: i64,
        started_before: i64,
    ) -> RepoResult<Vec<Reservation>> {
        reservation::find_expiry_candidates(&self.pool, restaurant_id, started_before).await
    }

    async fn insert_reservation(&self, r: &Reservation) -> RepoResult<()> {
        reservation::insert(&self.pool, r).await
    }

    async fn update_status(
        &self,
        id: i64,
        expected: &[ReservationStatus],
        change: &StatusChange,
    ) -> RepoResult<Option<Reservation>> {
        reservation::update_status(&self.pool, id, expected, change).await
    }
}
