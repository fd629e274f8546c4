//! 超时未到店 (no-show) 扫描
//!
//! The sweep expires every PENDING/CONFIRMED reservation whose start is at
//! least `auto_cancel_no_show_minutes` in the past. Each reservation is
//! transitioned on its own compare-and-set; one failure never stops the rest.

use std::time::Duration;

use serde::Serialize;
use shared::util::minutes_to_millis;
use tokio_util::sync::CancellationToken;

use super::error::{BookingError, BookingResult};
use super::lifecycle::ReservationManager;

/// Outcome of one sweep over one restaurant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    pub restaurant_id: i64,
    /// Candidates examined
    pub examined: usize,
    /// Reservations moved to NO_SHOW
    pub expired: Vec<i64>,
    /// Candidates that changed status before we got to them
    pub skipped: Vec<i64>,
    /// Candidates whose write failed (logged)
    pub failed: Vec<i64>,
}

impl ReservationManager {
    /// Expire overdue reservations of one restaurant
    pub async fn sweep_expired(&self, restaurant_id: i64) -> BookingResult<SweepReport> {
        self.load_restaurant(restaurant_id).await?;
        let settings = self.load_settings(restaurant_id).await?;
        let now = self.clock().now_millis();
        let started_before =
            now - minutes_to_millis(i64::from(settings.auto_cancel_no_show_minutes));

        let candidates = self
            .store()
            .expiry_candidates(restaurant_id, started_before)
            .await?;

        let mut report = SweepReport {
            restaurant_id,
            examined: candidates.len(),
            ..Default::default()
        };
        for reservation in &candidates {
            match self.expire_loaded(reservation, &settings).await {
                Ok(_) => report.expired.push(reservation.id),
                Err(BookingError::InvalidTransition { from, .. }) => {
                    tracing::debug!(
                        reservation_id = reservation.id,
                        status = %from,
                        "Reservation changed status before expiry, skipped"
                    );
                    report.skipped.push(reservation.id);
                }
                Err(e) => {
                    tracing::warn!(
                        reservation_id = reservation.id,
                        error = %e,
                        "Failed to expire reservation, skipping"
                    );
                    report.failed.push(reservation.id);
                }
            }
        }

        if !report.expired.is_empty() || !report.failed.is_empty() {
            tracing::info!(
                restaurant_id,
                expired = report.expired.len(),
                failed = report.failed.len(),
                "No-show sweep finished"
            );
        }
        Ok(report)
    }

    /// Sweep every restaurant; a failing restaurant is logged and skipped
    pub async fn sweep_all(&self) -> BookingResult<Vec<SweepReport>> {
        let restaurants = self.store().restaurants().await?;
        let mut reports = Vec::with_capacity(restaurants.len());
        for restaurant in restaurants.iter().filter(|r| r.is_active) {
            match self.sweep_expired(restaurant.id).await {
                Ok(report) => reports.push(report),
                Err(e) => {
                    tracing::error!(restaurant_id = restaurant.id, error = %e, "No-show sweep failed");
                }
            }
        }
        Ok(reports)
    }
}

/// 定时 no-show 扫描
///
/// 注册为 `TaskKind::Periodic`，在 `start_background_tasks()` 中启动。
pub struct ExpiryScheduler {
    manager: ReservationManager,
    interval: Duration,
    shutdown: CancellationToken,
}

impl ExpiryScheduler {
    pub fn new(manager: ReservationManager, interval: Duration, shutdown: CancellationToken) -> Self {
        Self {
            manager,
            interval,
            shutdown,
        }
    }

    /// 主循环：启动时扫描一次，之后按间隔扫描，直到收到关机信号
    pub async fn run(self) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "No-show sweep scheduler started"
        );

        loop {
            self.tick().await;

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                // 关机信号
                _ = self.shutdown.cancelled() => {
                    tracing::info!("No-show sweep scheduler received shutdown signal");
                    return;
                }
            }
        }
    }

    async fn tick(&self) {
        if let Err(e) = self.manager.sweep_all().await {
            tracing::error!("Failed to list restaurants for no-show sweep: {}", e);
        }
    }
}
