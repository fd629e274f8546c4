//! Reservation API 模块 (预订)
//!
//! 路径相对于 `/api/restaurants`。

mod handler;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::core::ServerState;

pub fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{rid}/reservations", post(handler::create).get(handler::list))
        .route("/{rid}/reservations/{id}", get(handler::get_by_id))
        .route("/{rid}/reservations/{id}/confirm", patch(handler::confirm))
        .route("/{rid}/reservations/{id}/seat", patch(handler::seat))
        .route("/{rid}/reservations/{id}/complete", patch(handler::complete))
        .route("/{rid}/reservations/{id}/cancel", patch(handler::cancel))
        .route("/{rid}/availability", get(handler::availability))
        .route("/{rid}/expiry-sweep", post(handler::expiry_sweep))
}
