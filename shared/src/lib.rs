//! Shared types for the table booking engine
//!
//! Data model, unified error codes and the API response envelope used by
//! booking-server and its HTTP clients.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
