//! Unified error codes for the booking engine
//!
//! This module defines all error codes used across booking-server and the dashboard.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Reservation errors
//! - 2xxx: Table / area errors
//! - 3xxx: Restaurant errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Reservation ====================
    /// Requested window is outside operating hours
    OutsideOperatingHours = 1001,
    /// Booking is too soon or too far ahead
    AdvanceWindowViolation = 1002,
    /// A business rule denied the request
    RuleViolation = 1003,
    /// No table can hold the party for the window
    CapacityUnavailable = 1004,
    /// Another request claimed the table first
    ConcurrentAllocationConflict = 1005,
    /// Transition not allowed from the current status
    InvalidTransition = 1006,
    /// Party size exceeds the restaurant limit
    PartySizeExceeded = 1007,
    /// Online bookings are disabled for the restaurant
    OnlineBookingsDisabled = 1008,
    /// Reservation not found
    ReservationNotFound = 1010,

    // ==================== 2xxx: Table ====================
    /// Table not found
    TableNotFound = 2001,
    /// Table is under maintenance
    TableUnderMaintenance = 2002,
    /// Area not found
    AreaNotFound = 2101,

    // ==================== 3xxx: Restaurant ====================
    /// Restaurant not found
    RestaurantNotFound = 3001,
    /// Restaurant settings not configured
    SettingsNotConfigured = 3002,
    /// Business rule not found
    BusinessRuleNotFound = 3101,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
    /// Clock unavailable
    ClockUnavailable = 9006,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Reservation
            ErrorCode::OutsideOperatingHours => "Requested time is outside operating hours",
            ErrorCode::AdvanceWindowViolation => "Requested time is outside the booking window",
            ErrorCode::RuleViolation => "Request denied by a business rule",
            ErrorCode::CapacityUnavailable => "No table available for the requested time",
            ErrorCode::ConcurrentAllocationConflict => "Table was claimed by another request",
            ErrorCode::InvalidTransition => "Reservation cannot change to the requested status",
            ErrorCode::PartySizeExceeded => "Party size exceeds the restaurant limit",
            ErrorCode::OnlineBookingsDisabled => "Online bookings are disabled",
            ErrorCode::ReservationNotFound => "Reservation not found",

            // Table
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::TableUnderMaintenance => "Table is under maintenance",
            ErrorCode::AreaNotFound => "Area not found",

            // Restaurant
            ErrorCode::RestaurantNotFound => "Restaurant not found",
            ErrorCode::SettingsNotConfigured => "Restaurant settings are not configured",
            ErrorCode::BusinessRuleNotFound => "Business rule not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::ClockUnavailable => "Clock is unavailable",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Reservation
            1001 => Ok(ErrorCode::OutsideOperatingHours),
            1002 => Ok(ErrorCode::AdvanceWindowViolation),
            1003 => Ok(ErrorCode::RuleViolation),
            1004 => Ok(ErrorCode::CapacityUnavailable),
            1005 => Ok(ErrorCode::ConcurrentAllocationConflict),
            1006 => Ok(ErrorCode::InvalidTransition),
            1007 => Ok(ErrorCode::PartySizeExceeded),
            1008 => Ok(ErrorCode::OnlineBookingsDisabled),
            1010 => Ok(ErrorCode::ReservationNotFound),

            // Table
            2001 => Ok(ErrorCode::TableNotFound),
            2002 => Ok(ErrorCode::TableUnderMaintenance),
            2101 => Ok(ErrorCode::AreaNotFound),

            // Restaurant
            3001 => Ok(ErrorCode::RestaurantNotFound),
            3002 => Ok(ErrorCode::SettingsNotConfigured),
            3101 => Ok(ErrorCode::BusinessRuleNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),
            9006 => Ok(ErrorCode::ClockUnavailable),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}
