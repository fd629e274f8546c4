//! 并发分配压力测试
//!
//! 多个 worker 同时抢同一时段的桌台，验证不会超订。

mod common;

use std::collections::HashMap;
use std::sync::Arc;

use booking_server::booking::{BookingError, SqliteStore};
use booking_server::db::DbService;
use common::{Fixture, restaurant, request};
use rand::Rng;
use shared::models::{Reservation, ReservationStatus};

async fn on_disk(capacities: &[i32]) -> (tempfile::TempDir, Fixture) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stress.db");
    let db = DbService::new(&path.to_string_lossy()).await.unwrap();
    let f = restaurant(Arc::new(SqliteStore::new(db.pool)), capacities).await;
    (dir, f)
}

fn holding(r: &Reservation) -> bool {
    matches!(
        r.status,
        ReservationStatus::Pending | ReservationStatus::Confirmed | ReservationStatus::Seated
    )
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_same_slot_never_overbooks() {
    let (_dir, f) = on_disk(&[4, 4, 4]).await;
    let rid = f.restaurant_id;

    let mut handles = Vec::new();
    for i in 0..30 {
        let manager = f.manager.clone();
        handles.push(tokio::spawn(async move {
            manager
                .create(rid, request("20:00", 2, &format!("cliente{i}")))
                .await
        }));
    }

    let mut ok = Vec::new();
    let mut refused = 0;
    for h in handles {
        match h.await.unwrap() {
            Ok(r) => ok.push(r),
            Err(BookingError::CapacityUnavailable { party_size: 2 }) => refused += 1,
            Err(e) => panic!("unexpected error: {e:?}"),
        }
    }

    assert_eq!(ok.len(), 3);
    assert_eq!(refused, 27);
    let mut tables: Vec<_> = ok.iter().filter_map(|r| r.table_id).collect();
    tables.sort();
    let mut expected = f.table_ids.clone();
    expected.sort();
    assert_eq!(tables, expected);

    let stored = f.manager.list_for_date(rid, common::DAY).await.unwrap();
    assert_eq!(stored.len(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_mixed_slots_keep_tables_disjoint() {
    let (_dir, f) = on_disk(&[2, 2, 4, 4, 6]).await;
    let rid = f.restaurant_id;

    const SLOTS: [&str; 6] = ["19:00", "19:30", "20:00", "20:45", "21:15", "21:45"];
    let requests: Vec<(String, i32)> = {
        let mut rng = rand::thread_rng();
        (0..60)
            .map(|_| {
                (
                    SLOTS[rng.gen_range(0..SLOTS.len())].to_string(),
                    rng.gen_range(1..=6),
                )
            })
            .collect()
    };

    let mut handles = Vec::new();
    for (i, (time, party)) in requests.into_iter().enumerate() {
        let manager = f.manager.clone();
        handles.push(tokio::spawn(async move {
            manager
                .create(rid, request(&time, party, &format!("mesa{i}")))
                .await
        }));
    }

    let mut created = 0;
    for h in handles {
        match h.await.unwrap() {
            Ok(_) => created += 1,
            Err(BookingError::CapacityUnavailable { .. }) => {}
            Err(e) => panic!("unexpected error: {e:?}"),
        }
    }
    assert!(created > 0);

    let stored = f.manager.list_for_date(rid, common::DAY).await.unwrap();
    assert_eq!(stored.len(), created);

    let mut by_table: HashMap<i64, Vec<&Reservation>> = HashMap::new();
    for r in stored.iter().filter(|r| holding(r)) {
        let table_id = r.table_id.expect("held reservations carry a table");
        by_table.entry(table_id).or_default().push(r);
    }
    for (table_id, list) in by_table {
        for (i, a) in list.iter().enumerate() {
            for b in &list[i + 1..] {
                assert!(
                    !a.overlaps(b.start_at, b.end_at),
                    "table {table_id}: {} and {} overlap",
                    a.id,
                    b.id
                );
            }
        }
    }

    // capacity was respected for every assignment
    let tables = f.admin.tables(rid).await.unwrap();
    for r in &stored {
        let t = tables.iter().find(|t| Some(t.id) == r.table_id).unwrap();
        assert!(t.capacity >= r.party_size);
    }
}
