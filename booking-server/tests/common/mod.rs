//! 集成测试共用的餐厅搭建

#![allow(dead_code)]

use std::sync::Arc;

use booking_server::booking::{
    BookingStore, FixedClock, NoopPublisher, ReservationManager, RestaurantAdmin,
};
use chrono::NaiveDate;
use shared::models::{
    AreaCreate, BookingChannel, DiningTableCreate, ReservationCreate, RestaurantCreate,
    WeeklyHoursInput,
};

pub const DAY: &str = "2026-10-16";

/// UTC millis for a date + HH:MM
pub fn at(date: &str, hm: &str) -> i64 {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap()
        .and_time(chrono::NaiveTime::parse_from_str(hm, "%H:%M").unwrap())
        .and_utc()
        .timestamp_millis()
}

pub struct Fixture {
    pub manager: ReservationManager,
    pub admin: RestaurantAdmin,
    pub clock: Arc<FixedClock>,
    pub restaurant_id: i64,
    pub area_id: i64,
    pub table_ids: Vec<i64>,
}

/// UTC restaurant open 12:00–23:30 daily, one area, tables of the given capacities
pub async fn restaurant(store: Arc<dyn BookingStore>, capacities: &[i32]) -> Fixture {
    let clock = Arc::new(FixedClock::new(at(DAY, "10:00")));
    let manager = ReservationManager::new(store.clone(), clock.clone(), Arc::new(NoopPublisher));
    let admin = RestaurantAdmin::new(store, clock.clone(), chrono_tz::UTC);

    let r = admin
        .create_restaurant(RestaurantCreate {
            name: "Taberna del Puerto".into(),
            address: "Paseo Marítimo 3".into(),
            phone: "+34 611 222 333".into(),
            email: "reservas@taberna.es".into(),
            description: None,
            timezone: Some("UTC".into()),
        })
        .await
        .unwrap();
    for day in 0..7 {
        admin
            .set_weekly_hours(
                r.id,
                WeeklyHoursInput {
                    day_of_week: day,
                    open_time: "12:00".into(),
                    close_time: "23:30".into(),
                    is_closed: false,
                },
            )
            .await
            .unwrap();
    }
    let area = admin
        .create_area(
            r.id,
            AreaCreate {
                name: "Comedor".into(),
                description: None,
            },
        )
        .await
        .unwrap();
    let mut table_ids = Vec::new();
    for (i, capacity) in capacities.iter().enumerate() {
        let t = admin
            .create_table(
                r.id,
                DiningTableCreate {
                    area_id: area.id,
                    number: (i + 1).to_string(),
                    capacity: Some(*capacity),
                    location: None,
                },
            )
            .await
            .unwrap();
        table_ids.push(t.id);
    }

    Fixture {
        manager,
        admin,
        clock,
        restaurant_id: r.id,
        area_id: area.id,
        table_ids,
    }
}

pub fn request(time: &str, party_size: i32, customer: &str) -> ReservationCreate {
    ReservationCreate {
        customer_name: customer.into(),
        customer_email: format!("{}@example.com", customer.to_lowercase()),
        customer_phone: String::new(),
        date: DAY.into(),
        time: time.into(),
        party_size,
        duration_minutes: None,
        area_id: None,
        table_id: None,
        special_requests: None,
        channel: BookingChannel::Staff,
    }
}
