//! Reservation Lifecycle Manager
//!
//! PENDING → CONFIRMED → SEATED → COMPLETED, with CANCELLED and NO_SHOW as
//! exits from PENDING/CONFIRMED. Every write is a compare-and-set on the
//! store; a table claim additionally runs under that table's lock and is
//! retried a bounded number of times when a concurrent request wins.

use std::sync::Arc;

use chrono_tz::Tz;
use shared::models::{
    DiningTable, Reservation, ReservationCreate, ReservationStatus, Restaurant, RestaurantSettings,
    TableStatus, TableStatusView,
};
use shared::util::{minutes_to_millis, snowflake_id};

use super::allocator::{self, AllocationRequest};
use super::calendar::OperatingCalendar;
use super::clock::Clock;
use super::error::{BookingError, BookingResult, Transition};
use super::events::{EventPublisher, ReservationEvent, ReservationEventKind};
use super::locks::TableLocks;
use super::rules::{self, ReservationDraft};
use super::store::{BookingStore, StatusChange};
use crate::db::repository::RepoError;
use crate::utils::time;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_len,
    validate_optional_text, validate_required_text,
};

/// Default bound on allocation retries
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

const HOUR_MS: i64 = 3_600_000;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Query for [`ReservationManager::available_tables`]
#[derive(Debug, Clone)]
pub struct AvailabilityQuery {
    pub date: String,
    pub time: String,
    pub party_size: i32,
    pub duration_minutes: Option<i32>,
    pub area_id: Option<i64>,
}

/// Owns reservation state transitions
#[derive(Clone)]
pub struct ReservationManager {
    store: Arc<dyn BookingStore>,
    clock: Arc<dyn Clock>,
    events: Arc<dyn EventPublisher>,
    locks: TableLocks,
    max_attempts: u32,
    default_tz: Tz,
}

impl std::fmt::Debug for ReservationManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReservationManager")
            .field("max_attempts", &self.max_attempts)
            .field("default_tz", &self.default_tz)
            .finish_non_exhaustive()
    }
}

impl ReservationManager {
    pub fn new(
        store: Arc<dyn BookingStore>,
        clock: Arc<dyn Clock>,
        events: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            store,
            clock,
            events,
            locks: TableLocks::new(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            default_tz: chrono_tz::Europe::Madrid,
        }
    }

    /// At least one attempt is always made
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Timezone for restaurants whose stored timezone does not parse
    pub fn with_default_timezone(mut self, tz: Tz) -> Self {
        self.default_tz = tz;
        self
    }

    pub fn store(&self) -> &Arc<dyn BookingStore> {
        &self.store
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Accept a new reservation request
    ///
    /// Checks, in order: input, channel, party size, advance window, business
    /// rules, operating hours, then allocates a table. With no table and the
    /// waitlist enabled, the reservation is stored PENDING without a table.
    pub async fn create(
        &self,
        restaurant_id: i64,
        req: ReservationCreate,
    ) -> BookingResult<Reservation> {
        validate_create(&req)?;
        let (_, tz) = self.load_restaurant(restaurant_id).await?;
        let settings = self.load_settings(restaurant_id).await?;

        if req.channel == shared::models::BookingChannel::Online && !settings.enable_online_bookings
        {
            return Err(BookingError::OnlineBookingsDisabled { restaurant_id });
        }
        if req.party_size < 1 {
            return Err(BookingError::Validation(format!(
                "party_size must be at least 1: {}",
                req.party_size
            )));
        }
        if req.party_size > settings.max_party_size {
            return Err(BookingError::PartySizeExceeded {
                party_size: req.party_size,
                max: settings.max_party_size,
            });
        }

        let date = time::parse_date(&req.date)?;
        let start_time = time::parse_time(&req.time)?;
        let now = self.clock.now_millis();
        let start_at = time::date_time_to_millis(date, start_time, tz);
        check_advance_window(&settings, now, start_at)?;

        let rules = self.store.business_rules(restaurant_id).await?;
        let draft = ReservationDraft {
            party_size: req.party_size,
            date,
            time: start_time,
            area_id: req.area_id,
            channel: req.channel,
        };
        let outcome = rules::evaluate(&draft, &rules)?;

        let duration = outcome
            .duration_minutes
            .or(req.duration_minutes)
            .unwrap_or(settings.default_reservation_duration);
        if duration <= 0 {
            return Err(BookingError::Validation(format!(
                "duration_minutes must be positive: {duration}"
            )));
        }

        let calendar = OperatingCalendar::new(self.store.operating_hours(restaurant_id).await?);
        if !calendar.is_open(date, start_time, i64::from(duration)) {
            return Err(BookingError::OutsideOperatingHours {
                date: req.date,
                time: req.time,
                duration_minutes: duration,
            });
        }

        let end_at = start_at + minutes_to_millis(i64::from(duration));
        let auto_confirm = settings.auto_confirm && !outcome.require_manual_confirmation;
        let alloc = AllocationRequest {
            party_size: req.party_size,
            start_at,
            end_at,
            area_id: outcome.required_area.or(req.area_id),
            exclude_reservation: None,
        };

        let mut reservation = Reservation {
            id: snowflake_id(),
            restaurant_id,
            customer_name: req.customer_name.trim().to_string(),
            customer_email: req.customer_email.trim().to_string(),
            customer_phone: req.customer_phone.trim().to_string(),
            date: req.date,
            time: req.time,
            duration_minutes: duration,
            start_at,
            end_at,
            party_size: req.party_size,
            area_id: req.area_id,
            table_id: None,
            status: ReservationStatus::Pending,
            channel: req.channel,
            special_requests: req.special_requests,
            cancellation_reason: None,
            created_at: now,
            updated_at: now,
            confirmed_at: None,
            seated_at: None,
            completed_at: None,
            cancelled_at: None,
        };
        if auto_confirm {
            reservation.status = ReservationStatus::Confirmed;
            reservation.confirmed_at = Some(now);
        }

        for attempt in 1..=self.max_attempts {
            let table = match req.table_id {
                Some(table_id) => Some(self.requested_table(restaurant_id, table_id, &alloc).await?),
                None => self.pick_table(restaurant_id, &alloc).await?,
            };

            let Some(table) = table else {
                if settings.enable_waitlist {
                    // 候补：无桌台，保持 PENDING
                    reservation.status = ReservationStatus::Pending;
                    reservation.confirmed_at = None;
                    self.store.insert_reservation(&reservation).await?;
                    tracing::info!(
                        reservation_id = reservation.id,
                        restaurant_id,
                        party_size = reservation.party_size,
                        "Reservation waitlisted (no table available)"
                    );
                    self.emit(ReservationEventKind::Created, &reservation);
                    return Ok(reservation);
                }
                return Err(BookingError::CapacityUnavailable {
                    party_size: alloc.party_size,
                });
            };

            match self.insert_with_table(&reservation, &table).await {
                Ok(stored) => {
                    tracing::info!(
                        reservation_id = stored.id,
                        restaurant_id,
                        table_id = table.id,
                        status = %stored.status,
                        "Reservation created"
                    );
                    self.emit(ReservationEventKind::Created, &stored);
                    return Ok(stored);
                }
                Err(BookingError::ConcurrentAllocationConflict { table_id }) => {
                    tracing::debug!(
                        table_id,
                        attempt,
                        "Lost table to a concurrent booking, retrying allocation"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        tracing::warn!(
            restaurant_id,
            attempts = self.max_attempts,
            "Allocation retries exhausted"
        );
        Err(BookingError::CapacityUnavailable {
            party_size: alloc.party_size,
        })
    }

    /// PENDING → CONFIRMED, allocating a table first when waitlisted
    pub async fn confirm(&self, restaurant_id: i64, id: i64) -> BookingResult<Reservation> {
        let current = self.load_reservation(restaurant_id, id).await?;
        require_status(&current, &[ReservationStatus::Pending], Transition::Confirm)?;
        let now = self.clock.now_millis();

        if current.table_id.is_some() {
            return self
                .apply(
                    &current,
                    Transition::Confirm,
                    &[ReservationStatus::Pending],
                    StatusChange {
                        to: ReservationStatus::Confirmed,
                        at: now,
                        assign_table: None,
                        cancellation_reason: None,
                    },
                    ReservationEventKind::Confirmed,
                )
                .await;
        }

        // Waitlisted: the requested area and rule-pinned area still apply;
        // the booking was already accepted, so DENY rules are not re-checked
        let rules = self.store.business_rules(restaurant_id).await?;
        let draft = ReservationDraft {
            party_size: current.party_size,
            date: time::parse_date(&current.date)?,
            time: time::parse_time(&current.time)?,
            area_id: current.area_id,
            channel: current.channel,
        };
        let outcome = rules::placement(&draft, &rules);
        let alloc = AllocationRequest {
            party_size: current.party_size,
            start_at: current.start_at,
            end_at: current.end_at,
            area_id: outcome.required_area.or(current.area_id),
            exclude_reservation: Some(id),
        };

        for attempt in 1..=self.max_attempts {
            let Some(table) = self.pick_table(restaurant_id, &alloc).await? else {
                return Err(BookingError::CapacityUnavailable {
                    party_size: current.party_size,
                });
            };

            let _guard = self.locks.lock(table.id).await;
            let busy = self
                .store
                .blocking_reservations(restaurant_id, alloc.start_at, alloc.end_at)
                .await?;
            if !allocator::is_free(&table, &busy, &alloc) {
                tracing::debug!(table_id = table.id, attempt, "Table taken while confirming, retrying");
                continue;
            }

            let change = StatusChange {
                to: ReservationStatus::Confirmed,
                at: now,
                assign_table: Some(table.id),
                cancellation_reason: None,
            };
            match self
                .store
                .update_status(id, &[ReservationStatus::Pending], &change)
                .await
            {
                Ok(Some(updated)) => {
                    tracing::info!(
                        reservation_id = id,
                        table_id = table.id,
                        "Waitlisted reservation confirmed"
                    );
                    self.emit(ReservationEventKind::Confirmed, &updated);
                    return Ok(updated);
                }
                Ok(None) => return Err(self.stale_transition(id, Transition::Confirm).await),
                Err(RepoError::Conflict(_)) => continue,
                Err(e) => return Err(e.into()),
            }
        }

        tracing::warn!(reservation_id = id, "Allocation retries exhausted on confirm");
        Err(BookingError::CapacityUnavailable {
            party_size: current.party_size,
        })
    }

    /// CONFIRMED → SEATED, only within `start ± seating grace`
    pub async fn seat(&self, restaurant_id: i64, id: i64) -> BookingResult<Reservation> {
        let current = self.load_reservation(restaurant_id, id).await?;
        require_status(&current, &[ReservationStatus::Confirmed], Transition::Seat)?;

        let settings = self.load_settings(restaurant_id).await?;
        let now = self.clock.now_millis();
        let grace = minutes_to_millis(i64::from(settings.seating_grace_minutes));
        if now < current.start_at - grace || now > current.start_at + grace {
            return Err(BookingError::invalid_transition(
                id,
                current.status,
                Transition::Seat,
                format!(
                    "outside the seating window of {} minutes around {} {}",
                    settings.seating_grace_minutes, current.date, current.time
                ),
            ));
        }

        self.apply(
            &current,
            Transition::Seat,
            &[ReservationStatus::Confirmed],
            StatusChange {
                to: ReservationStatus::Seated,
                at: now,
                assign_table: None,
                cancellation_reason: None,
            },
            ReservationEventKind::Seated,
        )
        .await
    }

    /// SEATED → COMPLETED
    pub async fn complete(&self, restaurant_id: i64, id: i64) -> BookingResult<Reservation> {
        let current = self.load_reservation(restaurant_id, id).await?;
        require_status(&current, &[ReservationStatus::Seated], Transition::Complete)?;

        self.apply(
            &current,
            Transition::Complete,
            &[ReservationStatus::Seated],
            StatusChange {
                to: ReservationStatus::Completed,
                at: self.clock.now_millis(),
                assign_table: None,
                cancellation_reason: None,
            },
            ReservationEventKind::Completed,
        )
        .await
    }

    /// PENDING/CONFIRMED → CANCELLED
    pub async fn cancel(
        &self,
        restaurant_id: i64,
        id: i64,
        reason: Option<String>,
    ) -> BookingResult<Reservation> {
        validate_optional_text(&reason, "reason", MAX_NOTE_LEN)?;
        const FROM: [ReservationStatus; 2] = [ReservationStatus::Pending, ReservationStatus::Confirmed];

        let current = self.load_reservation(restaurant_id, id).await?;
        require_status(&current, &FROM, Transition::Cancel)?;

        self.apply(
            &current,
            Transition::Cancel,
            &FROM,
            StatusChange {
                to: ReservationStatus::Cancelled,
                at: self.clock.now_millis(),
                assign_table: None,
                cancellation_reason: reason,
            },
            ReservationEventKind::Cancelled,
        )
        .await
    }

    /// PENDING/CONFIRMED → NO_SHOW once `start + auto_cancel_no_show_minutes` has passed
    pub async fn expire(&self, restaurant_id: i64, id: i64) -> BookingResult<Reservation> {
        let current = self.load_reservation(restaurant_id, id).await?;
        let settings = self.load_settings(restaurant_id).await?;
        self.expire_loaded(&current, &settings).await
    }

    pub(crate) async fn expire_loaded(
        &self,
        current: &Reservation,
        settings: &RestaurantSettings,
    ) -> BookingResult<Reservation> {
        const FROM: [ReservationStatus; 2] = [ReservationStatus::Pending, ReservationStatus::Confirmed];
        require_status(current, &FROM, Transition::Expire)?;

        let now = self.clock.now_millis();
        let threshold =
            current.start_at + minutes_to_millis(i64::from(settings.auto_cancel_no_show_minutes));
        if now < threshold {
            return Err(BookingError::invalid_transition(
                current.id,
                current.status,
                Transition::Expire,
                format!(
                    "no-show threshold of {} minutes not reached",
                    settings.auto_cancel_no_show_minutes
                ),
            ));
        }

        self.apply(
            current,
            Transition::Expire,
            &FROM,
            StatusChange {
                to: ReservationStatus::NoShow,
                at: now,
                assign_table: None,
                cancellation_reason: None,
            },
            ReservationEventKind::NoShow,
        )
        .await
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub async fn get(&self, restaurant_id: i64, id: i64) -> BookingResult<Reservation> {
        self.load_reservation(restaurant_id, id).await
    }

    /// Reservations on one local date
    pub async fn list_for_date(
        &self,
        restaurant_id: i64,
        date: &str,
    ) -> BookingResult<Vec<Reservation>> {
        let day = time::parse_date(date)?;
        let next = day.succ_opt().unwrap_or(day).format("%Y-%m-%d").to_string();
        Ok(self
            .store
            .reservations_between(restaurant_id, date, &next)
            .await?)
    }

    /// Every table that could take the request right now, in allocation order
    ///
    /// Empty when the restaurant is closed for the window.
    pub async fn available_tables(
        &self,
        restaurant_id: i64,
        query: AvailabilityQuery,
    ) -> BookingResult<Vec<DiningTable>> {
        let (_, tz) = self.load_restaurant(restaurant_id).await?;
        let settings = self.load_settings(restaurant_id).await?;
        let date = time::parse_date(&query.date)?;
        let start_time = time::parse_time(&query.time)?;
        let duration = query
            .duration_minutes
            .unwrap_or(settings.default_reservation_duration);
        if duration <= 0 || query.party_size < 1 {
            return Err(BookingError::Validation(
                "party_size and duration must be positive".into(),
            ));
        }

        let calendar = OperatingCalendar::new(self.store.operating_hours(restaurant_id).await?);
        if !calendar.is_open(date, start_time, i64::from(duration)) {
            return Ok(Vec::new());
        }

        let start_at = time::date_time_to_millis(date, start_time, tz);
        let req = AllocationRequest {
            party_size: query.party_size,
            start_at,
            end_at: start_at + minutes_to_millis(i64::from(duration)),
            area_id: query.area_id,
            exclude_reservation: None,
        };
        let tables = self.store.tables(restaurant_id).await?;
        let busy = self
            .store
            .blocking_reservations(restaurant_id, req.start_at, req.end_at)
            .await?;
        Ok(allocator::candidates(&tables, &busy, &req)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Derived status of every active table at instant `at`
    pub async fn table_statuses(
        &self,
        restaurant_id: i64,
        at: i64,
    ) -> BookingResult<Vec<TableStatusView>> {
        self.load_restaurant(restaurant_id).await?;
        let mut tables = self.store.tables(restaurant_id).await?;
        tables.retain(|t| t.is_active);
        tables.sort_by(|a, b| a.number.cmp(&b.number).then(a.id.cmp(&b.id)));
        let holding = self
            .store
            .blocking_reservations(restaurant_id, at, at + 1)
            .await?;

        Ok(tables
            .into_iter()
            .map(|table| {
                let holder = holding.iter().find(|r| r.table_id == Some(table.id));
                let status = match (table.in_maintenance, holder.map(|r| r.status)) {
                    (true, _) => TableStatus::Maintenance,
                    (false, Some(ReservationStatus::Seated)) => TableStatus::Occupied,
                    (false, Some(_)) => TableStatus::Reserved,
                    (false, None) => TableStatus::Available,
                };
                TableStatusView {
                    table_id: table.id,
                    number: table.number,
                    area_id: table.area_id,
                    capacity: table.capacity,
                    status,
                    reservation_id: holder.map(|r| r.id),
                }
            })
            .collect())
    }

    // ========================================================================
    // Internals
    // ========================================================================

    pub(crate) async fn load_restaurant(&self, restaurant_id: i64) -> BookingResult<(Restaurant, Tz)> {
        let restaurant = self
            .store
            .restaurant(restaurant_id)
            .await?
            .ok_or(BookingError::NotFound {
                entity: "restaurant",
                id: restaurant_id,
            })?;
        let tz = restaurant.timezone.parse::<Tz>().unwrap_or_else(|_| {
            tracing::warn!(
                restaurant_id,
                timezone = %restaurant.timezone,
                "Unknown restaurant timezone, using default"
            );
            self.default_tz
        });
        Ok((restaurant, tz))
    }

    /// Stored settings, or defaults when the restaurant never saved any
    pub(crate) async fn load_settings(&self, restaurant_id: i64) -> BookingResult<RestaurantSettings> {
        Ok(self
            .store
            .settings(restaurant_id)
            .await?
            .unwrap_or_else(|| RestaurantSettings::defaults(restaurant_id, 0)))
    }

    async fn load_reservation(&self, restaurant_id: i64, id: i64) -> BookingResult<Reservation> {
        self.store
            .reservation(id)
            .await?
            .filter(|r| r.restaurant_id == restaurant_id)
            .ok_or(BookingError::NotFound {
                entity: "reservation",
                id,
            })
    }

    async fn pick_table(
        &self,
        restaurant_id: i64,
        req: &AllocationRequest,
    ) -> BookingResult<Option<DiningTable>> {
        let tables = self.store.tables(restaurant_id).await?;
        let busy = self
            .store
            .blocking_reservations(restaurant_id, req.start_at, req.end_at)
            .await?;
        Ok(allocator::find_table(&tables, &busy, req).cloned())
    }

    /// The explicitly requested table, if it can take the request; no fallback
    async fn requested_table(
        &self,
        restaurant_id: i64,
        table_id: i64,
        req: &AllocationRequest,
    ) -> BookingResult<DiningTable> {
        let table = self
            .store
            .table(table_id)
            .await?
            .filter(|t| t.restaurant_id == restaurant_id)
            .ok_or(BookingError::NotFound {
                entity: "table",
                id: table_id,
            })?;
        let busy = self
            .store
            .blocking_reservations(restaurant_id, req.start_at, req.end_at)
            .await?;
        if allocator::fits(&table, req) && allocator::is_free(&table, &busy, req) {
            Ok(table)
        } else {
            Err(BookingError::CapacityUnavailable {
                party_size: req.party_size,
            })
        }
    }

    /// Check-then-write under the table lock
    async fn insert_with_table(
        &self,
        draft: &Reservation,
        table: &DiningTable,
    ) -> BookingResult<Reservation> {
        let _guard = self.locks.lock(table.id).await;

        let busy = self
            .store
            .blocking_reservations(draft.restaurant_id, draft.start_at, draft.end_at)
            .await?;
        if busy
            .iter()
            .any(|r| r.blocks(table.id, draft.start_at, draft.end_at))
        {
            return Err(BookingError::ConcurrentAllocationConflict { table_id: table.id });
        }

        let mut reservation = draft.clone();
        reservation.table_id = Some(table.id);
        match self.store.insert_reservation(&reservation).await {
            Ok(()) => Ok(reservation),
            Err(RepoError::Conflict(_)) => {
                Err(BookingError::ConcurrentAllocationConflict { table_id: table.id })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn apply(
        &self,
        current: &Reservation,
        transition: Transition,
        expected: &[ReservationStatus],
        change: StatusChange,
        kind: ReservationEventKind,
    ) -> BookingResult<Reservation> {
        match self.store.update_status(current.id, expected, &change).await? {
            Some(updated) => {
                tracing::info!(
                    reservation_id = updated.id,
                    from = %current.status,
                    to = %updated.status,
                    "Reservation {}", transition
                );
                self.emit(kind, &updated);
                Ok(updated)
            }
            None => Err(self.stale_transition(current.id, transition).await),
        }
    }

    /// The compare-and-set lost: report what the reservation is now
    async fn stale_transition(&self, id: i64, transition: Transition) -> BookingError {
        match self.store.reservation(id).await {
            Ok(Some(r)) => BookingError::invalid_transition(
                id,
                r.status,
                transition,
                "status changed concurrently",
            ),
            Ok(None) => BookingError::NotFound {
                entity: "reservation",
                id,
            },
            Err(e) => e.into(),
        }
    }

    fn emit(&self, kind: ReservationEventKind, reservation: &Reservation) {
        self.events.publish(ReservationEvent {
            kind,
            reservation: reservation.clone(),
            occurred_at: self.clock.now_millis(),
        });
    }
}

fn require_status(
    current: &Reservation,
    allowed: &[ReservationStatus],
    transition: Transition,
) -> BookingResult<()> {
    if allowed.contains(&current.status) {
        return Ok(());
    }
    let reason = if current.status.is_terminal() {
        format!("reservation is already {}", current.status)
    } else {
        let names: Vec<&str> = allowed.iter().map(|s| s.as_str()).collect();
        format!("requires status {}", names.join(" or "))
    };
    Err(BookingError::invalid_transition(
        current.id,
        current.status,
        transition,
        reason,
    ))
}

/// `min_advance_booking_hours ≤ start − now ≤ max_advance_booking_days`
fn check_advance_window(
    settings: &RestaurantSettings,
    now: i64,
    start_at: i64,
) -> BookingResult<()> {
    let lead = start_at - now;
    let min_lead = i64::from(settings.min_advance_booking_hours) * HOUR_MS;
    let max_lead = i64::from(settings.max_advance_booking_days) * DAY_MS;
    if lead < min_lead {
        return Err(BookingError::AdvanceWindowViolation {
            reason: format!(
                "must be booked at least {} hours ahead",
                settings.min_advance_booking_hours
            ),
        });
    }
    if lead > max_lead {
        return Err(BookingError::AdvanceWindowViolation {
            reason: format!(
                "cannot be booked more than {} days ahead",
                settings.max_advance_booking_days
            ),
        });
    }
    Ok(())
}

fn validate_create(req: &ReservationCreate) -> BookingResult<()> {
    validate_required_text(&req.customer_name, "customer_name", MAX_NAME_LEN)?;
    validate_len(&req.customer_email, "customer_email", MAX_EMAIL_LEN)?;
    validate_len(&req.customer_phone, "customer_phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&req.special_requests, "special_requests", MAX_NOTE_LEN)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> RestaurantSettings {
        RestaurantSettings::defaults(1, 0)
    }

    #[test]
    fn advance_window_bounds_are_inclusive() {
        let s = settings();
        assert!(check_advance_window(&s, 0, 2 * HOUR_MS).is_ok());
        assert!(check_advance_window(&s, 0, 30 * DAY_MS).is_ok());
        assert!(check_advance_window(&s, 0, 2 * HOUR_MS - 1).is_err());
        assert!(check_advance_window(&s, 0, 30 * DAY_MS + 1).is_err());
    }

    #[test]
    fn past_start_is_too_soon() {
        let mut s = settings();
        s.min_advance_booking_hours = 0;
        assert!(matches!(
            check_advance_window(&s, 1_000, 0),
            Err(BookingError::AdvanceWindowViolation { .. })
        ));
    }
}
