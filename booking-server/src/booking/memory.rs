//! In-process store
//!
//! One `RwLock` over all maps; every trait call takes it once, which makes
//! each conditional write atomic.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use shared::models::{
    Area, BusinessRule, DiningTable, OperatingHour, Reservation, ReservationStatus, Restaurant,
    RestaurantSettings,
};

use super::store::{BookingStore, StatusChange};
use crate::db::repository::{RepoError, RepoResult};

#[derive(Debug, Default)]
struct Data {
    restaurants: HashMap<i64, Restaurant>,
    settings: HashMap<i64, RestaurantSettings>,
    hours: HashMap<i64, OperatingHour>,
    areas: HashMap<i64, Area>,
    tables: HashMap<i64, DiningTable>,
    rules: HashMap<i64, BusinessRule>,
    reservations: HashMap<i64, Reservation>,
}

impl Data {
    fn table_held(&self, table_id: i64, start: i64, end: i64, except: Option<i64>) -> bool {
        self.reservations
            .values()
            .any(|r| Some(r.id) != except && r.blocks(table_id, start, end))
    }

    fn refresh_area_capacity(&mut self, area_id: i64) {
        let total: i32 = self
            .tables
            .values()
            .filter(|t| t.area_id == area_id && t.is_active)
            .map(|t| t.capacity)
            .sum();
        if let Some(area) = self.areas.get_mut(&area_id) {
            area.max_capacity = total;
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<Data>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted<T>(items: impl Iterator<Item = T>, key: impl Fn(&T) -> i64) -> Vec<T> {
    let mut v: Vec<T> = items.collect();
    v.sort_by_key(key);
    v
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn restaurant(&self, id: i64) -> RepoResult<Option<Restaurant>> {
        Ok(self.data.read().restaurants.get(&id).cloned())
    }

    async fn restaurants(&self) -> RepoResult<Vec<Restaurant>> {
        Ok(sorted(self.data.read().restaurants.values().cloned(), |r| r.id))
    }

    async fn insert_restaurant(&self, r: &Restaurant) -> RepoResult<()> {
        let mut data = self.data.write();
        if data.restaurants.contains_key(&r.id) {
            return Err(RepoError::Duplicate(format!("Restaurant {}", r.id)));
        }
        data.restaurants.insert(r.id, r.clone());
        Ok(())
    }

    async fn update_restaurant(&self, r: &Restaurant) -> RepoResult<()> {
        let mut data = self.data.write();
        match data.restaurants.get_mut(&r.id) {
            Some(existing) => {
                *existing = r.clone();
                Ok(())
            }
            None => Err(RepoError::NotFound(format!("Restaurant {}", r.id))),
        }
    }

    async fn settings(&self, restaurant_id: i64) -> RepoResult<Option<RestaurantSettings>> {
        Ok(self.data.read().settings.get(&restaurant_id).cloned())
    }

    async fn upsert_settings(&self, s: &RestaurantSettings) -> RepoResult<()> {
        self.data.write().settings.insert(s.restaurant_id, s.clone());
        Ok(())
    }

    async fn operating_hours(&self, restaurant_id: i64) -> RepoResult<Vec<OperatingHour>> {
        Ok(sorted(
            self.data
                .read()
                .hours
                .values()
                .filter(|h| h.restaurant_id == restaurant_id)
                .cloned(),
            |h| h.id,
        ))
    }

    async fn upsert_operating_hour(&self, hour: &OperatingHour) -> RepoResult<OperatingHour> {
        if hour.is_special_day && hour.special_date.is_none() {
            return Err(RepoError::Validation(
                "special_date is required for a special day".into(),
            ));
        }
        let mut data = self.data.write();
        let existing = data
            .hours
            .values()
            .find(|h| {
                h.restaurant_id == hour.restaurant_id
                    && h.is_special_day == hour.is_special_day
                    && if hour.is_special_day {
                        h.special_date == hour.special_date
                    } else {
                        h.day_of_week == hour.day_of_week
                    }
            })
            .map(|h| h.id);

        let mut stored = hour.clone();
        if let Some(id) = existing {
            stored.id = id;
        }
        data.hours.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn areas(&self, restaurant_id: i64) -> RepoResult<Vec<Area>> {
        let mut areas: Vec<Area> = self
            .data
            .read()
            .areas
            .values()
            .filter(|a| a.restaurant_id == restaurant_id)
            .cloned()
            .collect();
        areas.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(areas)
    }

    async fn area(&self, id: i64) -> RepoResult<Option<Area>> {
        Ok(self.data.read().areas.get(&id).cloned())
    }

    async fn insert_area(&self, a: &Area) -> RepoResult<()> {
        let mut data = self.data.write();
        if data.areas.contains_key(&a.id) {
            return Err(RepoError::Duplicate(format!("Area {}", a.id)));
        }
        data.areas.insert(a.id, a.clone());
        Ok(())
    }

    async fn update_area(&self, a: &Area) -> RepoResult<bool> {
        match self.data.write().areas.get_mut(&a.id) {
            Some(area) => {
                area.name = a.name.clone();
                area.description = a.description.clone();
                area.is_active = a.is_active;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn tables(&self, restaurant_id: i64) -> RepoResult<Vec<DiningTable>> {
        Ok(sorted(
            self.data
                .read()
                .tables
                .values()
                .filter(|t| t.restaurant_id == restaurant_id)
                .cloned(),
            |t| t.id,
        ))
    }

    async fn table(&self, id: i64) -> RepoResult<Option<DiningTable>> {
        Ok(self.data.read().tables.get(&id).cloned())
    }

    async fn insert_table(&self, table: &DiningTable) -> RepoResult<()> {
        let mut data = self.data.write();
        let number_taken = data
            .tables
            .values()
            .any(|t| t.restaurant_id == table.restaurant_id && t.number == table.number);
        if number_taken || data.tables.contains_key(&table.id) {
            return Err(RepoError::Duplicate(format!("Table {}", table.number)));
        }
        data.tables.insert(table.id, table.clone());
        data.refresh_area_capacity(table.area_id);
        Ok(())
    }

    async fn update_table(&self, table: &DiningTable) -> RepoResult<bool> {
        let mut data = self.data.write();
        let Some(previous_area) = data.tables.get(&table.id).map(|t| t.area_id) else {
            return Ok(false);
        };
        let number_taken = data.tables.values().any(|t| {
            t.id != table.id && t.restaurant_id == table.restaurant_id && t.number == table.number
        });
        if number_taken {
            return Err(RepoError::Duplicate(format!("Table {}", table.number)));
        }
        // in_maintenance has its own setter
        if let Some(current) = data.tables.get_mut(&table.id) {
            current.area_id = table.area_id;
            current.number = table.number.clone();
            current.capacity = table.capacity;
            current.location = table.location;
            current.is_active = table.is_active;
        }
        if previous_area != table.area_id {
            data.refresh_area_capacity(previous_area);
        }
        data.refresh_area_capacity(table.area_id);
        Ok(true)
    }

    async fn set_table_maintenance(&self, id: i64, in_maintenance: bool) -> RepoResult<bool> {
        match self.data.write().tables.get_mut(&id) {
            Some(table) => {
                table.in_maintenance = in_maintenance;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn business_rules(&self, restaurant_id: i64) -> RepoResult<Vec<BusinessRule>> {
        let mut rules: Vec<BusinessRule> = self
            .data
            .read()
            .rules
            .values()
            .filter(|r| r.restaurant_id == restaurant_id)
            .cloned()
            .collect();
        rules.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then(a.created_at.cmp(&b.created_at))
                .then(a.id.cmp(&b.id))
        });
        Ok(rules)
    }

    async fn insert_business_rule(&self, rule: &BusinessRule) -> RepoResult<()> {
        self.data.write().rules.insert(rule.id, rule.clone());
        Ok(())
    }

    async fn update_business_rule(&self, rule: &BusinessRule) -> RepoResult<bool> {
        match self.data.write().rules.get_mut(&rule.id) {
            Some(current) => {
                // created_at keeps its place in the evaluation order
                *current = BusinessRule {
                    created_at: current.created_at,
                    ..rule.clone()
                };
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn reservation(&self, id: i64) -> RepoResult<Option<Reservation>> {
        Ok(self.data.read().reservations.get(&id).cloned())
    }

    async fn blocking_reservations(
        &self,
        restaurant_id: i64,
        start: i64,
        end: i64,
    ) -> RepoResult<Vec<Reservation>> {
        Ok(sorted(
            self.data
                .read()
                .reservations
                .values()
                .filter(|r| {
                    r.restaurant_id == restaurant_id
                        && r.table_id.is_some()
                        && r.status.holds_table()
                        && r.overlaps(start, end)
                })
                .cloned(),
            |r| r.start_at,
        ))
    }

    async fn reservations_between(
        &self,
        restaurant_id: i64,
        from: &str,
        to: &str,
    ) -> RepoResult<Vec<Reservation>> {
        let mut found: Vec<Reservation> = self
            .data
            .read()
            .reservations
            .values()
            .filter(|r| {
                r.restaurant_id == restaurant_id && r.date.as_str() >= from && r.date.as_str() < to
            })
            .cloned()
            .collect();
        found.sort_by_key(|r| (r.start_at, r.id));
        Ok(found)
    }

    async fn expiry_candidates(
        &self,
        restaurant_id: i64,
        started_before: i64,
    ) -> RepoResult<Vec<Reservation>> {
        let mut found: Vec<Reservation> = self
            .data
            .read()
            .reservations
            .values()
            .filter(|r| {
                r.restaurant_id == restaurant_id
                    && matches!(
                        r.status,
                        ReservationStatus::Pending | ReservationStatus::Confirmed
                    )
                    && r.start_at <= started_before
            })
            .cloned()
            .collect();
        found.sort_by_key(|r| (r.start_at, r.id));
        Ok(found)
    }

    async fn insert_reservation(&self, r: &Reservation) -> RepoResult<()> {
        let mut data = self.data.write();
        if data.reservations.contains_key(&r.id) {
            return Err(RepoError::Duplicate(format!("Reservation {}", r.id)));
        }
        if let Some(table_id) = r.table_id
            && data.table_held(table_id, r.start_at, r.end_at, None)
        {
            return Err(RepoError::Conflict(format!(
                "Table {table_id} already held for the requested window"
            )));
        }
        data.reservations.insert(r.id, r.clone());
        Ok(())
    }

    async fn update_status(
        &self,
        id: i64,
        expected: &[ReservationStatus],
        change: &StatusChange,
    ) -> RepoResult<Option<Reservation>> {
        let mut data = self.data.write();
        let Some(current) = data.reservations.get(&id) else {
            return Ok(None);
        };
        if !expected.contains(&current.status) {
            return Ok(None);
        }
        if let Some(table_id) = change.assign_table
            && data.table_held(table_id, current.start_at, current.end_at, Some(id))
        {
            return Err(RepoError::Conflict(format!(
                "Table {table_id} already held for reservation {id}'s window"
            )));
        }

        let Some(r) = data.reservations.get_mut(&id) else {
            return Ok(None);
        };
        r.status = change.to;
        r.updated_at = change.at;
        match change.to {
            ReservationStatus::Confirmed => r.confirmed_at = Some(change.at),
            ReservationStatus::Seated => r.seated_at = Some(change.at),
            ReservationStatus::Completed => r.completed_at = Some(change.at),
            ReservationStatus::Cancelled => r.cancelled_at = Some(change.at),
            ReservationStatus::Pending | ReservationStatus::NoShow => {}
        }
        if let Some(table_id) = change.assign_table {
            r.table_id = Some(table_id);
        }
        if let Some(reason) = &change.cancellation_reason {
            r.cancellation_reason = Some(reason.clone());
        }
        Ok(Some(r.clone()))
    }
}
