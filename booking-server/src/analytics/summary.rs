//! 预订统计聚合 (纯计算)

use std::collections::{BTreeMap, HashMap, HashSet};

use rust_decimal::{Decimal, RoundingStrategy};
use shared::models::{
    AnalyticsSummary, Area, AreaPerformance, DailyReservations, DiningTable, HourlyReservations,
    Reservation, ReservationStatus, SummaryCharts, SummaryStats, TopCustomer,
};

use super::period::Period;

pub const DEFAULT_TOP_CUSTOMERS: usize = 10;

/// Name of the bucket for reservations without a table
pub const UNASSIGNED_AREA: &str = "Unassigned";

// ============================================================================
// Rounding
// ============================================================================

/// Two decimals, half away from zero
fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `part / total`, 0 when total is 0
fn rate(part: u32, total: u32) -> Decimal {
    if total == 0 {
        return Decimal::ZERO;
    }
    round2(Decimal::from(part) / Decimal::from(total))
}

fn guests(r: &Reservation) -> u32 {
    u32::try_from(r.party_size).unwrap_or(0)
}

// ============================================================================
// Customer key
// ============================================================================

/// Email (lower-cased) if present, else phone digits, else lower-cased name
pub fn customer_key(r: &Reservation) -> String {
    let email = r.customer_email.trim();
    if !email.is_empty() {
        return email.to_lowercase();
    }
    let digits: String = r.customer_phone.chars().filter(char::is_ascii_digit).collect();
    if !digits.is_empty() {
        return digits;
    }
    r.customer_name.trim().to_lowercase()
}

/// Sortable "YYYY-MM-DD HH:MM"
fn visit_stamp(r: &Reservation) -> String {
    format!("{} {}", r.date, r.time)
}

// ============================================================================
// Summary
// ============================================================================

/// Aggregate the reservations of one restaurant over `period`
///
/// Reservations outside the period are ignored, so the caller may pass a
/// superset. Output ordering is fully determined by the input data.
pub fn summarize(
    reservations: &[Reservation],
    tables: &[DiningTable],
    areas: &[Area],
    period: &Period,
    top_n: usize,
) -> AnalyticsSummary {
    let in_period: Vec<&Reservation> = reservations
        .iter()
        .filter(|r| period.contains(&r.date))
        .collect();

    AnalyticsSummary {
        summary: summary_stats(&in_period, tables),
        charts: SummaryCharts {
            daily_reservations: daily(&in_period, period),
            hourly_reservations: hourly(&in_period),
            area_performance: area_performance(&in_period, tables, areas),
            top_customers: top_customers(&in_period, top_n),
        },
        period: period.to_model(),
    }
}

fn summary_stats(reservations: &[&Reservation], tables: &[DiningTable]) -> SummaryStats {
    let mut stats = SummaryStats::default();
    let mut customers = HashSet::new();

    for r in reservations {
        stats.total_reservations += 1;
        stats.total_guests += guests(r);
        customers.insert(customer_key(r));
        match r.status {
            ReservationStatus::Pending => stats.pending_reservations += 1,
            ReservationStatus::Confirmed => stats.confirmed_reservations += 1,
            ReservationStatus::Seated => stats.seated_reservations += 1,
            ReservationStatus::Completed => stats.completed_reservations += 1,
            ReservationStatus::Cancelled => stats.cancelled_reservations += 1,
            ReservationStatus::NoShow => stats.no_show_reservations += 1,
        }
    }

    let total = stats.total_reservations;
    stats.total_customers = customers.len() as u32;
    stats.active_tables = tables
        .iter()
        .filter(|t| t.is_active && !t.in_maintenance)
        .count() as u32;
    stats.confirmation_rate = rate(
        stats.confirmed_reservations + stats.seated_reservations + stats.completed_reservations,
        total,
    );
    stats.occupancy_rate = rate(
        stats.seated_reservations + stats.completed_reservations,
        total,
    );
    stats.completion_rate = rate(stats.completed_reservations, total);
    stats.cancellation_rate = rate(stats.cancelled_reservations, total);
    stats.no_show_rate = rate(stats.no_show_reservations, total);
    stats
}

/// One row per day of the period, zero-filled
fn daily(reservations: &[&Reservation], period: &Period) -> Vec<DailyReservations> {
    let mut days: BTreeMap<String, DailyReservations> = period
        .days()
        .map(|d| {
            let day = d.format("%Y-%m-%d").to_string();
            (
                day.clone(),
                DailyReservations {
                    day,
                    ..Default::default()
                },
            )
        })
        .collect();

    for r in reservations {
        let Some(row) = days.get_mut(&r.date) else {
            continue;
        };
        row.count += 1;
        match r.status {
            ReservationStatus::Pending => row.pending += 1,
            ReservationStatus::Confirmed => row.confirmed += 1,
            ReservationStatus::Seated => row.seated += 1,
            ReservationStatus::Completed => row.completed += 1,
            ReservationStatus::Cancelled => row.cancelled += 1,
            ReservationStatus::NoShow => row.no_show += 1,
        }
    }
    days.into_values().collect()
}

/// Only hours that saw at least one reservation
fn hourly(reservations: &[&Reservation]) -> Vec<HourlyReservations> {
    let mut hours: BTreeMap<&str, (u32, u32)> = BTreeMap::new();
    for r in reservations {
        let Some(hour) = r.time.get(..2) else {
            continue;
        };
        let entry = hours.entry(hour).or_default();
        entry.0 += 1;
        entry.1 += guests(r);
    }
    hours
        .into_iter()
        .map(|(hour, (count, guests))| HourlyReservations {
            hour: format!("{hour}:00"),
            count,
            guests,
        })
        .collect()
}

#[derive(Default)]
struct AreaTally {
    count: u32,
    guests: u32,
    completed: u32,
    cancelled: u32,
}

impl AreaTally {
    fn add(&mut self, r: &Reservation) {
        self.count += 1;
        self.guests += guests(r);
        match r.status {
            ReservationStatus::Completed => self.completed += 1,
            ReservationStatus::Cancelled => self.cancelled += 1,
            _ => {}
        }
    }

    fn into_row(self, id: Option<i64>, name: String) -> AreaPerformance {
        let avg_party_size = if self.count == 0 {
            Decimal::ZERO
        } else {
            round2(Decimal::from(self.guests) / Decimal::from(self.count))
        };
        AreaPerformance {
            id,
            name,
            reservation_count: self.count,
            avg_party_size,
            completed_count: self.completed,
            cancelled_count: self.cancelled,
        }
    }
}

/// Areas by name then id, then the unassigned bucket if anything landed there
fn area_performance(
    reservations: &[&Reservation],
    tables: &[DiningTable],
    areas: &[Area],
) -> Vec<AreaPerformance> {
    let area_of_table: HashMap<i64, i64> = tables.iter().map(|t| (t.id, t.area_id)).collect();
    let mut tallies: HashMap<i64, AreaTally> = HashMap::new();
    let mut unassigned = AreaTally::default();

    for r in reservations {
        let area_id = r
            .table_id
            .and_then(|tid| area_of_table.get(&tid))
            .filter(|aid| areas.iter().any(|a| a.id == **aid));
        match area_id {
            Some(aid) => tallies.entry(*aid).or_default().add(r),
            None => unassigned.add(r),
        }
    }

    let mut ordered: Vec<&Area> = areas.iter().collect();
    ordered.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

    let mut rows: Vec<AreaPerformance> = ordered
        .into_iter()
        .map(|a| {
            tallies
                .remove(&a.id)
                .unwrap_or_default()
                .into_row(Some(a.id), a.name.clone())
        })
        .collect();
    if unassigned.count > 0 {
        rows.push(unassigned.into_row(None, UNASSIGNED_AREA.to_string()));
    }
    rows
}

/// Most reservations first; ties by latest visit, then by key
fn top_customers(reservations: &[&Reservation], top_n: usize) -> Vec<TopCustomer> {
    let mut customers: HashMap<String, TopCustomer> = HashMap::new();

    for r in reservations {
        let key = customer_key(r);
        let stamp = visit_stamp(r);
        let entry = customers.entry(key.clone()).or_insert_with(|| TopCustomer {
            id: key,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            reservation_count: 0,
            total_guests: 0,
            last_visit: String::new(),
        });
        entry.reservation_count += 1;
        entry.total_guests += guests(r);
        // 联系方式取最近一次预订
        if stamp >= entry.last_visit {
            entry.last_visit = stamp;
            entry.name = r.customer_name.trim().to_string();
            entry.email = r.customer_email.trim().to_string();
            entry.phone = r.customer_phone.trim().to_string();
        }
    }

    let mut ranked: Vec<TopCustomer> = customers.into_values().collect();
    ranked.sort_by(|a, b| {
        b.reservation_count
            .cmp(&a.reservation_count)
            .then_with(|| b.last_visit.cmp(&a.last_visit))
            .then_with(|| a.id.cmp(&b.id))
    });
    ranked.truncate(top_n);
    ranked
}
