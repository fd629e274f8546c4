//! Booking engine errors
//!
//! Every failure a booking operation can report, with enough context for
//! the caller to act on. Bridged to [`AppError`] at the HTTP boundary.

use shared::models::ReservationStatus;
use thiserror::Error;

use crate::db::repository::RepoError;
use crate::utils::{AppError, ErrorCode};

/// Lifecycle events a reservation can be asked to go through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Confirm,
    Seat,
    Complete,
    Cancel,
    Expire,
}

impl Transition {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Confirm => "confirm",
            Self::Seat => "seat",
            Self::Complete => "complete",
            Self::Cancel => "cancel",
            Self::Expire => "expire",
        }
    }
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Restaurant is closed for {date} {time} ({duration_minutes} min)")]
    OutsideOperatingHours {
        date: String,
        time: String,
        duration_minutes: i32,
    },

    #[error("Booking time out of policy: {reason}")]
    AdvanceWindowViolation { reason: String },

    #[error("Denied by business rule '{rule}'")]
    RuleViolation { rule: String, reason: Option<String> },

    #[error("No table available for party of {party_size}")]
    CapacityUnavailable { party_size: i32 },

    /// Only surfaced internally; retried by the allocator loop
    #[error("Table {table_id} was claimed by a concurrent request")]
    ConcurrentAllocationConflict { table_id: i64 },

    #[error("Cannot {transition} reservation {reservation_id} from {from}: {reason}")]
    InvalidTransition {
        reservation_id: i64,
        from: ReservationStatus,
        transition: Transition,
        reason: String,
    },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Party size {party_size} exceeds maximum {max}")]
    PartySizeExceeded { party_size: i32, max: i32 },

    #[error("Online bookings are disabled for restaurant {restaurant_id}")]
    OnlineBookingsDisabled { restaurant_id: i64 },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(#[from] RepoError),
}

pub type BookingResult<T> = Result<T, BookingError>;

impl BookingError {
    pub(crate) fn invalid_transition(
        reservation_id: i64,
        from: ReservationStatus,
        transition: Transition,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidTransition {
            reservation_id,
            from,
            transition,
            reason: reason.into(),
        }
    }
}

impl From<AppError> for BookingError {
    fn from(err: AppError) -> Self {
        BookingError::Validation(err.message)
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        let message = err.to_string();
        match err {
            BookingError::OutsideOperatingHours {
                date,
                time,
                duration_minutes,
            } => AppError::with_message(ErrorCode::OutsideOperatingHours, message)
                .with_detail("date", date)
                .with_detail("time", time)
                .with_detail("duration_minutes", duration_minutes),
            BookingError::AdvanceWindowViolation { reason } => {
                AppError::with_message(ErrorCode::AdvanceWindowViolation, message)
                    .with_detail("reason", reason)
            }
            BookingError::RuleViolation { rule, reason } => {
                let mut e = AppError::rule_violation(rule);
                if let Some(reason) = reason {
                    e = e.with_detail("reason", reason);
                }
                e
            }
            BookingError::CapacityUnavailable { party_size } => {
                AppError::with_message(ErrorCode::CapacityUnavailable, message)
                    .with_detail("party_size", party_size)
            }
            BookingError::ConcurrentAllocationConflict { table_id } => {
                AppError::with_message(ErrorCode::ConcurrentAllocationConflict, message)
                    .with_detail("table_id", table_id)
            }
            BookingError::InvalidTransition {
                reservation_id,
                from,
                transition,
                reason,
            } => AppError::with_message(ErrorCode::InvalidTransition, message)
                .with_detail("reservation_id", reservation_id)
                .with_detail("from", from.as_str())
                .with_detail("transition", transition.as_str())
                .with_detail("reason", reason),
            BookingError::NotFound { entity, id } => {
                let code = match entity {
                    "reservation" => ErrorCode::ReservationNotFound,
                    "restaurant" => ErrorCode::RestaurantNotFound,
                    "table" => ErrorCode::TableNotFound,
                    "area" => ErrorCode::AreaNotFound,
                    "business_rule" => ErrorCode::BusinessRuleNotFound,
                    _ => ErrorCode::NotFound,
                };
                AppError::with_message(code, message)
                    .with_detail("entity", entity)
                    .with_detail("id", id)
            }
            BookingError::PartySizeExceeded { party_size, max } => {
                AppError::with_message(ErrorCode::PartySizeExceeded, message)
                    .with_detail("party_size", party_size)
                    .with_detail("max", max)
            }
            BookingError::OnlineBookingsDisabled { restaurant_id } => {
                AppError::with_message(ErrorCode::OnlineBookingsDisabled, message)
                    .with_detail("restaurant_id", restaurant_id)
            }
            BookingError::Validation(msg) => AppError::validation(msg),
            BookingError::Store(e) => match e {
                RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
                RepoError::Duplicate(msg) => AppError::conflict(msg),
                RepoError::Validation(msg) => AppError::validation(msg),
                RepoError::Conflict(msg) => {
                    AppError::with_message(ErrorCode::ConcurrentAllocationConflict, msg)
                }
                RepoError::Database(msg) => AppError::database(msg),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_transition_maps_to_conflict_with_context() {
        let err = BookingError::invalid_transition(
            42,
            ReservationStatus::Completed,
            Transition::Cancel,
            "reservation is terminal",
        );
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::InvalidTransition);
        assert_eq!(app.http_status(), http::StatusCode::CONFLICT);
        let details = app.details.unwrap();
        assert_eq!(details["reservation_id"], 42);
        assert_eq!(details["from"], "COMPLETED");
        assert_eq!(details["transition"], "cancel");
    }

    #[test]
    fn not_found_picks_entity_code() {
        let app: AppError = BookingError::NotFound {
            entity: "reservation",
            id: 7,
        }
        .into();
        assert_eq!(app.code, ErrorCode::ReservationNotFound);

        let app: AppError = BookingError::NotFound {
            entity: "restaurant",
            id: 7,
        }
        .into();
        assert_eq!(app.code, ErrorCode::RestaurantNotFound);

        let app: AppError = BookingError::NotFound {
            entity: "business_rule",
            id: 7,
        }
        .into();
        assert_eq!(app.code, ErrorCode::BusinessRuleNotFound);
    }

    #[test]
    fn policy_errors_are_unprocessable() {
        let app: AppError = BookingError::AdvanceWindowViolation {
            reason: "too soon".into(),
        }
        .into();
        assert_eq!(app.http_status(), http::StatusCode::UNPROCESSABLE_ENTITY);

        let app: AppError = BookingError::RuleViolation {
            rule: "No terrace in winter".into(),
            reason: None,
        }
        .into();
        assert_eq!(app.code, ErrorCode::RuleViolation);
    }
}
