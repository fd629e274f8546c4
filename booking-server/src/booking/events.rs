//! Reservation domain events
//!
//! Emitted after each successful write so notification collaborators
//! (email, SMS, dashboards) can react. Delivery is fire-and-forget.

use serde::Serialize;
use shared::models::Reservation;
use tokio::sync::broadcast;

/// Event broadcast channel capacity
const EVENT_CHANNEL_CAPACITY: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationEventKind {
    Created,
    Confirmed,
    Seated,
    Completed,
    Cancelled,
    NoShow,
}

/// Something happened to a reservation; carries the state after the change
#[derive(Debug, Clone, Serialize)]
pub struct ReservationEvent {
    pub kind: ReservationEventKind,
    pub reservation: Reservation,
    pub occurred_at: i64,
}

/// Outbound side of the notification interface
pub trait EventPublisher: Send + Sync {
    fn publish(&self, event: ReservationEvent);
}

/// tokio broadcast fan-out
#[derive(Debug, Clone)]
pub struct BroadcastPublisher {
    tx: broadcast::Sender<ReservationEvent>,
}

impl BroadcastPublisher {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ReservationEvent> {
        self.tx.subscribe()
    }
}

impl Default for BroadcastPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPublisher for BroadcastPublisher {
    fn publish(&self, event: ReservationEvent) {
        let reservation_id = event.reservation.id;
        let kind = event.kind;
        if self.tx.send(event).is_err() {
            tracing::debug!(reservation_id, ?kind, "No subscribers for reservation event");
        }
    }
}

/// Drops every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPublisher;

impl EventPublisher for NoopPublisher {
    fn publish(&self, _event: ReservationEvent) {}
}
