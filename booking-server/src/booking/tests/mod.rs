use super::*;
use std::sync::Arc;

use chrono::NaiveDate;
use shared::models::{
    AreaCreate, BookingChannel, DiningTableCreate, Reservation, ReservationCreate,
    ReservationStatus, RestaurantCreate, RestaurantSettingsUpdate, WeeklyHoursInput,
};

mod test_policy;

const DAY: &str = "2026-10-16";

/// UTC millis for a date + HH:MM (test restaurants run on UTC)
fn at(date: &str, hm: &str) -> i64 {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap()
        .and_time(chrono::NaiveTime::parse_from_str(hm, "%H:%M").unwrap())
        .and_utc()
        .timestamp_millis()
}

struct Harness {
    manager: ReservationManager,
    admin: RestaurantAdmin,
    clock: Arc<FixedClock>,
    events: BroadcastPublisher,
    restaurant_id: i64,
    area_id: i64,
    table_ids: Vec<i64>,
}

impl Harness {
    /// Restaurant open 18:00–23:00 every day, one area, tables with the given capacities.
    /// Clock starts at 10:00 on `DAY`.
    async fn new(capacities: &[i32]) -> Self {
        let store: Arc<dyn BookingStore> = Arc::new(MemoryStore::new());
        let clock = Arc::new(FixedClock::new(at(DAY, "10:00")));
        let events = BroadcastPublisher::new();
        let manager = ReservationManager::new(store.clone(), clock.clone(), Arc::new(events.clone()));
        let admin = RestaurantAdmin::new(store, clock.clone(), chrono_tz::UTC);

        let restaurant = admin
            .create_restaurant(RestaurantCreate {
                name: "Casa Lucía".into(),
                address: "Calle Mayor 1".into(),
                phone: "+34 600 000 000".into(),
                email: "hola@casalucia.es".into(),
                description: None,
                timezone: Some("UTC".into()),
            })
            .await
            .unwrap();
        for day in 0..7 {
            admin
                .set_weekly_hours(
                    restaurant.id,
                    WeeklyHoursInput {
                        day_of_week: day,
                        open_time: "18:00".into(),
                        close_time: "23:00".into(),
                        is_closed: false,
                    },
                )
                .await
                .unwrap();
        }
        let area = admin
            .create_area(
                restaurant.id,
                AreaCreate {
                    name: "Salón".into(),
                    description: None,
                },
            )
            .await
            .unwrap();

        let mut table_ids = Vec::new();
        for (i, capacity) in capacities.iter().enumerate() {
            let table = admin
                .create_table(
                    restaurant.id,
                    DiningTableCreate {
                        area_id: area.id,
                        number: (i + 1).to_string(),
                        capacity: Some(*capacity),
                        location: None,
                    },
                )
                .await
                .unwrap();
            table_ids.push(table.id);
        }

        Self {
            manager,
            admin,
            clock,
            events,
            restaurant_id: restaurant.id,
            area_id: area.id,
            table_ids,
        }
    }

    async fn settings(&self, update: RestaurantSettingsUpdate) {
        self.admin
            .update_settings(self.restaurant_id, update)
            .await
            .unwrap();
    }

    async fn auto_confirm(&self) {
        self.settings(RestaurantSettingsUpdate {
            auto_confirm: Some(true),
            ..Default::default()
        })
        .await;
    }

    async fn book(&self, time: &str, party_size: i32) -> BookingResult<Reservation> {
        self.manager
            .create(self.restaurant_id, request(DAY, time, party_size))
            .await
    }
}

fn request(date: &str, time: &str, party_size: i32) -> ReservationCreate {
    ReservationCreate {
        customer_name: "Ana García".into(),
        customer_email: "ana@example.com".into(),
        customer_phone: "600111222".into(),
        date: date.into(),
        time: time.into(),
        party_size,
        duration_minutes: None,
        area_id: None,
        table_id: None,
        special_requests: None,
        channel: BookingChannel::Staff,
    }
}

fn assert_status(r: &Reservation, status: ReservationStatus) {
    assert_eq!(r.status, status, "reservation {} has {}", r.id, r.status);
}
