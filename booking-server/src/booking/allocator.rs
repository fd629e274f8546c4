//! Table Allocator
//!
//! Pure selection over a snapshot of tables and the reservations that hold
//! them. Serialisation against concurrent writers is the lifecycle manager's
//! job (see [`super::locks`]).

use std::cmp::Ordering;

use shared::models::{DiningTable, Reservation};

/// What the allocator is asked for
#[derive(Debug, Clone, Copy)]
pub struct AllocationRequest {
    pub party_size: i32,
    /// Window `[start_at, end_at)` in UTC millis
    pub start_at: i64,
    pub end_at: i64,
    /// Restrict to this area
    pub area_id: Option<i64>,
    /// Ignore this reservation when checking overlaps (re-allocating itself)
    pub exclude_reservation: Option<i64>,
}

/// Can `table` take the request, ignoring other reservations?
pub fn fits(table: &DiningTable, req: &AllocationRequest) -> bool {
    table.is_active
        && !table.in_maintenance
        && table.capacity >= req.party_size
        && req.area_id.is_none_or(|area| table.area_id == area)
}

/// Is `table` held by any of `busy` during the request window?
pub fn is_free(table: &DiningTable, busy: &[Reservation], req: &AllocationRequest) -> bool {
    !busy.iter().any(|r| {
        Some(r.id) != req.exclude_reservation && r.blocks(table.id, req.start_at, req.end_at)
    })
}

/// Every usable table, best first: smallest capacity, then table number
pub fn candidates<'a>(
    tables: &'a [DiningTable],
    busy: &[Reservation],
    req: &AllocationRequest,
) -> Vec<&'a DiningTable> {
    let mut found: Vec<&DiningTable> = tables
        .iter()
        .filter(|t| fits(t, req) && is_free(t, busy, req))
        .collect();
    found.sort_by(|a, b| {
        a.capacity
            .cmp(&b.capacity)
            .then_with(|| compare_numbers(&a.number, &b.number))
            .then(a.id.cmp(&b.id))
    });
    found
}

/// Best table, or `None` when nothing fits (not an error)
pub fn find_table<'a>(
    tables: &'a [DiningTable],
    busy: &[Reservation],
    req: &AllocationRequest,
) -> Option<&'a DiningTable> {
    candidates(tables, busy, req).into_iter().next()
}

/// Table numbers compare numerically when both are numbers ("2" < "10")
fn compare_numbers(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<u64>(), b.trim().parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{BookingChannel, ReservationStatus, TableLocation};

    fn table(id: i64, number: &str, capacity: i32, area_id: i64) -> DiningTable {
        DiningTable {
            id,
            restaurant_id: 1,
            area_id,
            number: number.into(),
            capacity,
            location: TableLocation::Interior,
            is_active: true,
            in_maintenance: false,
        }
    }

    fn booking(id: i64, table_id: i64, start_at: i64, end_at: i64, status: ReservationStatus) -> Reservation {
        Reservation {
            id,
            restaurant_id: 1,
            customer_name: "x".into(),
            customer_email: String::new(),
            customer_phone: String::new(),
            date: "2026-10-16".into(),
            time: "19:00".into(),
            duration_minutes: 90,
            start_at,
            end_at,
            party_size: 2,
            area_id: None,
            table_id: Some(table_id),
            status,
            channel: BookingChannel::Staff,
            special_requests: None,
            cancellation_reason: None,
            created_at: 0,
            updated_at: 0,
            confirmed_at: None,
            seated_at: None,
            completed_at: None,
            cancelled_at: None,
        }
    }

    fn req(party_size: i32, start_at: i64, end_at: i64) -> AllocationRequest {
        AllocationRequest {
            party_size,
            start_at,
            end_at,
            area_id: None,
            exclude_reservation: None,
        }
    }

    #[test]
    fn smallest_fitting_table_first() {
        let tables = vec![table(1, "1", 6, 1), table(2, "2", 4, 1), table(3, "3", 2, 1)];
        let picked = find_table(&tables, &[], &req(3, 0, 100)).unwrap();
        assert_eq!(picked.id, 2);
    }

    #[test]
    fn ties_break_on_table_number() {
        let tables = vec![table(1, "10", 4, 1), table(2, "2", 4, 1), table(3, "B", 4, 1)];
        let order: Vec<i64> = candidates(&tables, &[], &req(4, 0, 100)).iter().map(|t| t.id).collect();
        assert_eq!(order, vec![2, 1, 3]);
    }

    #[test]
    fn overlapping_holders_block_adjacent_do_not() {
        let tables = vec![table(1, "1", 4, 1)];
        let busy = vec![booking(9, 1, 100, 200, ReservationStatus::Confirmed)];
        assert!(find_table(&tables, &busy, &req(4, 150, 250)).is_none());
        assert!(find_table(&tables, &busy, &req(4, 200, 300)).is_some());

        let released = vec![booking(9, 1, 100, 200, ReservationStatus::NoShow)];
        assert!(find_table(&tables, &released, &req(4, 150, 250)).is_some());
    }

    #[test]
    fn maintenance_inactive_and_area_filters() {
        let mut broken = table(1, "1", 4, 1);
        broken.in_maintenance = true;
        let mut retired = table(2, "2", 4, 1);
        retired.is_active = false;
        let terrace = table(3, "3", 4, 2);
        let tables = vec![broken, retired, terrace];

        let mut r = req(2, 0, 100);
        assert_eq!(find_table(&tables, &[], &r).map(|t| t.id), Some(3));
        r.area_id = Some(1);
        assert!(find_table(&tables, &[], &r).is_none());
    }

    #[test]
    fn excluded_reservation_does_not_block_itself() {
        let tables = vec![table(1, "1", 4, 1)];
        let busy = vec![booking(9, 1, 100, 200, ReservationStatus::Pending)];
        let mut r = req(2, 100, 200);
        assert!(find_table(&tables, &busy, &r).is_none());
        r.exclude_reservation = Some(9);
        assert!(find_table(&tables, &busy, &r).is_some());
    }
}
