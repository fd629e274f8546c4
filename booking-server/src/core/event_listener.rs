//! 预订事件监听
//!
//! Subscribes to the reservation broadcast and writes one structured log line
//! per event under the `reservation_events` target. Notification delivery
//! (email/SMS) hooks in as another subscriber of the same channel.

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::booking::ReservationEvent;

/// 运行监听器，直到通道关闭或收到关机信号
pub async fn run_event_log(
    mut source: broadcast::Receiver<ReservationEvent>,
    shutdown: CancellationToken,
) {
    tracing::info!("Reservation event listener started");

    loop {
        tokio::select! {
            received = source.recv() => match received {
                Ok(event) => {
                    tracing::info!(
                        target: "reservation_events",
                        kind = ?event.kind,
                        reservation_id = event.reservation.id,
                        restaurant_id = event.reservation.restaurant_id,
                        table_id = ?event.reservation.table_id,
                        status = %event.reservation.status,
                        occurred_at = event.occurred_at,
                        "Reservation event"
                    );
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Reservation event listener lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event channel closed, listener stopping");
                    return;
                }
            },
            _ = shutdown.cancelled() => {
                tracing::info!("Reservation event listener received shutdown signal");
                return;
            }
        }
    }
}
