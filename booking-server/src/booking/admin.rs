//! Restaurant configuration management
//!
//! Explicit update operations for everything the lifecycle manager reads:
//! restaurant profile, settings, operating hours, areas, tables and rules.

use std::sync::Arc;

use chrono_tz::Tz;
use shared::models::{
    Area, AreaCreate, AreaUpdate, BusinessRule, BusinessRuleCreate, BusinessRuleUpdate,
    DiningTable, DiningTableCreate, DiningTableUpdate, OperatingHour, Restaurant, RestaurantCreate, RestaurantSettings, RestaurantSettingsUpdate,
    RestaurantUpdate, SpecialDayInput, TableLocation, WeeklyHoursInput,
};
use shared::util::snowflake_id;

use super::clock::Clock;
use super::error::{BookingError, BookingResult};
use super::store::BookingStore;
use crate::utils::time;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_len,
    validate_optional_text, validate_required_text,
};

#[derive(Clone)]
pub struct RestaurantAdmin {
    store: Arc<dyn BookingStore>,
    clock: Arc<dyn Clock>,
    default_tz: Tz,
}

impl RestaurantAdmin {
    pub fn new(store: Arc<dyn BookingStore>, clock: Arc<dyn Clock>, default_tz: Tz) -> Self {
        Self {
            store,
            clock,
            default_tz,
        }
    }

    // ── Restaurant ──────────────────────────────────────────────────

    pub async fn create_restaurant(&self, data: RestaurantCreate) -> BookingResult<Restaurant> {
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        validate_len(&data.address, "address", MAX_ADDRESS_LEN)?;
        validate_len(&data.phone, "phone", MAX_SHORT_TEXT_LEN)?;
        validate_len(&data.email, "email", MAX_EMAIL_LEN)?;
        validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
        let timezone = match data.timezone {
            Some(tz) => time::parse_tz(&tz)?.name().to_string(),
            None => self.default_tz.name().to_string(),
        };

        let now = self.clock.now_millis();
        let restaurant = Restaurant {
            id: snowflake_id(),
            name: data.name.trim().to_string(),
            address: data.address,
            phone: data.phone,
            email: data.email,
            description: data.description,
            timezone,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_restaurant(&restaurant).await?;
        self.store
            .upsert_settings(&RestaurantSettings::defaults(restaurant.id, now))
            .await?;
        tracing::info!(restaurant_id = restaurant.id, name = %restaurant.name, "Restaurant created");
        Ok(restaurant)
    }

    pub async fn restaurant(&self, id: i64) -> BookingResult<Restaurant> {
        self.store
            .restaurant(id)
            .await?
            .ok_or(BookingError::NotFound {
                entity: "restaurant",
                id,
            })
    }

    pub async fn update_restaurant(
        &self,
        id: i64,
        data: RestaurantUpdate,
    ) -> BookingResult<Restaurant> {
        let mut restaurant = self.restaurant(id).await?;
        if let Some(name) = data.name {
            validate_required_text(&name, "name", MAX_NAME_LEN)?;
            restaurant.name = name.trim().to_string();
        }
        if let Some(address) = data.address {
            validate_len(&address, "address", MAX_ADDRESS_LEN)?;
            restaurant.address = address;
        }
        if let Some(phone) = data.phone {
            validate_len(&phone, "phone", MAX_SHORT_TEXT_LEN)?;
            restaurant.phone = phone;
        }
        if let Some(email) = data.email {
            validate_len(&email, "email", MAX_EMAIL_LEN)?;
            restaurant.email = email;
        }
        if data.description.is_some() {
            validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
            restaurant.description = data.description;
        }
        if let Some(tz) = data.timezone {
            restaurant.timezone = time::parse_tz(&tz)?.name().to_string();
        }
        if let Some(active) = data.is_active {
            restaurant.is_active = active;
        }
        restaurant.updated_at = self.clock.now_millis();
        self.store.update_restaurant(&restaurant).await?;
        Ok(restaurant)
    }

    // ── Settings ────────────────────────────────────────────────────

    pub async fn settings(&self, restaurant_id: i64) -> BookingResult<RestaurantSettings> {
        self.restaurant(restaurant_id).await?;
        Ok(self
            .store
            .settings(restaurant_id)
            .await?
            .unwrap_or_else(|| RestaurantSettings::defaults(restaurant_id, 0)))
    }

    /// Partial update; starts from defaults on first write
    pub async fn update_settings(
        &self,
        restaurant_id: i64,
        update: RestaurantSettingsUpdate,
    ) -> BookingResult<RestaurantSettings> {
        update.validate().map_err(BookingError::Validation)?;
        let mut settings = self.settings(restaurant_id).await?;
        settings.apply(update, self.clock.now_millis());
        self.store.upsert_settings(&settings).await?;
        tracing::info!(restaurant_id, "Restaurant settings updated");
        Ok(settings)
    }

    // ── Operating hours ─────────────────────────────────────────────

    /// One record per weekday; replaces any existing one
    pub async fn set_weekly_hours(
        &self,
        restaurant_id: i64,
        input: WeeklyHoursInput,
    ) -> BookingResult<OperatingHour> {
        self.restaurant(restaurant_id).await?;
        if !(0..=6).contains(&input.day_of_week) {
            return Err(BookingError::Validation(format!(
                "day_of_week must be 0..=6: {}",
                input.day_of_week
            )));
        }
        validate_hours(&input.open_time, &input.close_time, input.is_closed)?;

        let hour = OperatingHour {
            id: snowflake_id(),
            restaurant_id,
            day_of_week: input.day_of_week,
            open_time: input.open_time,
            close_time: input.close_time,
            is_closed: input.is_closed,
            is_special_day: false,
            special_date: None,
        };
        Ok(self.store.upsert_operating_hour(&hour).await?)
    }

    /// One record per date; takes precedence over the weekly rule
    pub async fn set_special_day(
        &self,
        restaurant_id: i64,
        input: SpecialDayInput,
    ) -> BookingResult<OperatingHour> {
        self.restaurant(restaurant_id).await?;
        let date = time::parse_date(&input.special_date)?;
        validate_hours(&input.open_time, &input.close_time, input.is_closed)?;

        let hour = OperatingHour {
            id: snowflake_id(),
            restaurant_id,
            day_of_week: time::weekday_index(date),
            open_time: input.open_time,
            close_time: input.close_time,
            is_closed: input.is_closed,
            is_special_day: true,
            special_date: Some(date.format("%Y-%m-%d").to_string()),
        };
        Ok(self.store.upsert_operating_hour(&hour).await?)
    }

    pub async fn operating_hours(&self, restaurant_id: i64) -> BookingResult<Vec<OperatingHour>> {
        Ok(self.store.operating_hours(restaurant_id).await?)
    }

    // ── Areas and tables ────────────────────────────────────────────

    pub async fn create_area(&self, restaurant_id: i64, data: AreaCreate) -> BookingResult<Area> {
        self.restaurant(restaurant_id).await?;
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;

        let area = Area {
            id: snowflake_id(),
            restaurant_id,
            name: data.name.trim().to_string(),
            description: data.description,
            max_capacity: 0,
            is_active: true,
        };
        self.store.insert_area(&area).await?;
        Ok(area)
    }

    pub async fn areas(&self, restaurant_id: i64) -> BookingResult<Vec<Area>> {
        Ok(self.store.areas(restaurant_id).await?)
    }

    /// Area owned by `restaurant_id`, NotFound otherwise
    async fn owned_area(&self, restaurant_id: i64, area_id: i64) -> BookingResult<Area> {
        self.store
            .area(area_id)
            .await?
            .filter(|a| a.restaurant_id == restaurant_id)
            .ok_or(BookingError::NotFound {
                entity: "area",
                id: area_id,
            })
    }

    /// `max_capacity` stays derived from the tables
    pub async fn update_area(
        &self,
        restaurant_id: i64,
        area_id: i64,
        data: AreaUpdate,
    ) -> BookingResult<Area> {
        let mut area = self.owned_area(restaurant_id, area_id).await?;
        if let Some(name) = data.name {
            validate_required_text(&name, "name", MAX_NAME_LEN)?;
            area.name = name.trim().to_string();
        }
        if data.description.is_some() {
            validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
            area.description = data.description;
        }
        if let Some(active) = data.is_active {
            area.is_active = active;
        }
        if !self.store.update_area(&area).await? {
            return Err(BookingError::NotFound {
                entity: "area",
                id: area_id,
            });
        }
        Ok(area)
    }

    pub async fn create_table(
        &self,
        restaurant_id: i64,
        data: DiningTableCreate,
    ) -> BookingResult<DiningTable> {
        validate_required_text(&data.number, "number", MAX_NAME_LEN)?;
        let capacity = data.capacity.unwrap_or(4);
        if capacity <= 0 {
            return Err(BookingError::Validation(format!(
                "capacity must be positive: {capacity}"
            )));
        }
        self.owned_area(restaurant_id, data.area_id).await?;

        let table = DiningTable {
            id: snowflake_id(),
            restaurant_id,
            area_id: data.area_id,
            number: data.number.trim().to_string(),
            capacity,
            location: data.location.unwrap_or(TableLocation::Interior),
            is_active: true,
            in_maintenance: false,
        };
        self.store.insert_table(&table).await?;
        Ok(table)
    }

    pub async fn tables(&self, restaurant_id: i64) -> BookingResult<Vec<DiningTable>> {
        Ok(self.store.tables(restaurant_id).await?)
    }

    /// Edit a table. Capacity, activation or an area move refresh the
    /// affected areas' `max_capacity`. Existing reservations keep their table.
    pub async fn update_table(
        &self,
        restaurant_id: i64,
        table_id: i64,
        data: DiningTableUpdate,
    ) -> BookingResult<DiningTable> {
        let not_found = || BookingError::NotFound {
            entity: "table",
            id: table_id,
        };
        let mut table = self
            .store
            .table(table_id)
            .await?
            .filter(|t| t.restaurant_id == restaurant_id)
            .ok_or_else(not_found)?;

        if let Some(area_id) = data.area_id {
            self.owned_area(restaurant_id, area_id).await?;
            table.area_id = area_id;
        }
        if let Some(number) = data.number {
            validate_required_text(&number, "number", MAX_NAME_LEN)?;
            table.number = number.trim().to_string();
        }
        if let Some(capacity) = data.capacity {
            if capacity <= 0 {
                return Err(BookingError::Validation(format!(
                    "capacity must be positive: {capacity}"
                )));
            }
            table.capacity = capacity;
        }
        if let Some(location) = data.location {
            table.location = location;
        }
        if let Some(active) = data.is_active {
            table.is_active = active;
        }

        if !self.store.update_table(&table).await? {
            return Err(not_found());
        }
        tracing::info!(
            table_id,
            area_id = table.area_id,
            capacity = table.capacity,
            is_active = table.is_active,
            "Table updated"
        );
        Ok(table)
    }

    /// The only persisted table status
    pub async fn set_table_maintenance(
        &self,
        restaurant_id: i64,
        table_id: i64,
        in_maintenance: bool,
    ) -> BookingResult<DiningTable> {
        let not_found = BookingError::NotFound {
            entity: "table",
            id: table_id,
        };
        let table = self.store.table(table_id).await?;
        if table.as_ref().is_none_or(|t| t.restaurant_id != restaurant_id) {
            return Err(not_found);
        }
        if !self
            .store
            .set_table_maintenance(table_id, in_maintenance)
            .await?
        {
            return Err(not_found);
        }
        tracing::info!(table_id, in_maintenance, "Table maintenance flag changed");
        self.store.table(table_id).await?.ok_or(not_found)
    }

    // ── Business rules ──────────────────────────────────────────────

    pub async fn create_rule(
        &self,
        restaurant_id: i64,
        data: BusinessRuleCreate,
    ) -> BookingResult<BusinessRule> {
        self.restaurant(restaurant_id).await?;
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        validate_required_text(&data.rule_type, "rule_type", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;

        let rule = BusinessRule {
            id: snowflake_id(),
            restaurant_id,
            name: data.name.trim().to_string(),
            description: data.description,
            rule_type: data.rule_type,
            conditions: data.conditions,
            actions: data.actions,
            is_active: data.is_active.unwrap_or(true),
            priority: data.priority.unwrap_or(0),
            created_at: self.clock.now_millis(),
        };
        self.store.insert_business_rule(&rule).await?;
        Ok(rule)
    }

    pub async fn rules(&self, restaurant_id: i64) -> BookingResult<Vec<BusinessRule>> {
        Ok(self.store.business_rules(restaurant_id).await?)
    }

    /// Takes effect on the next evaluation; accepted reservations are untouched
    pub async fn update_rule(
        &self,
        restaurant_id: i64,
        rule_id: i64,
        data: BusinessRuleUpdate,
    ) -> BookingResult<BusinessRule> {
        let not_found = || BookingError::NotFound {
            entity: "business_rule",
            id: rule_id,
        };
        let mut rule = self
            .store
            .business_rules(restaurant_id)
            .await?
            .into_iter()
            .find(|r| r.id == rule_id)
            .ok_or_else(not_found)?;

        if let Some(name) = data.name {
            validate_required_text(&name, "name", MAX_NAME_LEN)?;
            rule.name = name.trim().to_string();
        }
        if data.description.is_some() {
            validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
            rule.description = data.description;
        }
        if let Some(rule_type) = data.rule_type {
            validate_required_text(&rule_type, "rule_type", MAX_SHORT_TEXT_LEN)?;
            rule.rule_type = rule_type;
        }
        if let Some(conditions) = data.conditions {
            rule.conditions = conditions;
        }
        if let Some(actions) = data.actions {
            rule.actions = actions;
        }
        if let Some(active) = data.is_active {
            rule.is_active = active;
        }
        if let Some(priority) = data.priority {
            rule.priority = priority;
        }

        if !self.store.update_business_rule(&rule).await? {
            return Err(not_found());
        }
        tracing::info!(rule_id, is_active = rule.is_active, priority = rule.priority, "Business rule updated");
        Ok(rule)
    }
}

/// Both times parse as HH:MM unless the day is closed
fn validate_hours(open: &str, close: &str, is_closed: bool) -> BookingResult<()> {
    if is_closed {
        return Ok(());
    }
    time::parse_time(open)?;
    time::parse_time(close)?;
    Ok(())
}
