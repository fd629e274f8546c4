//! 数据统计 (Analytics)
//!
//! Read-only aggregation over stored reservations and tables. No locking:
//! a dashboard may see a slightly stale view of in-flight writes.

pub mod period;
pub mod summary;

use std::sync::Arc;

use chrono_tz::Tz;
use serde::Deserialize;
use shared::models::AnalyticsSummary;

use crate::booking::{BookingError, BookingResult, BookingStore, Clock};
use crate::utils::time;

pub use period::{Period, PeriodKind};
pub use summary::{DEFAULT_TOP_CUSTOMERS, customer_key, summarize};

/// `GET /analytics` query string
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsQuery {
    pub period: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Clone)]
pub struct AnalyticsService {
    store: Arc<dyn BookingStore>,
    clock: Arc<dyn Clock>,
    default_tz: Tz,
    top_n: usize,
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn BookingStore>, clock: Arc<dyn Clock>, default_tz: Tz) -> Self {
        Self {
            store,
            clock,
            default_tz,
            top_n: DEFAULT_TOP_CUSTOMERS,
        }
    }

    pub fn with_top_customers(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Resolve the period against today (restaurant timezone) and summarize it
    pub async fn summary(
        &self,
        restaurant_id: i64,
        query: &AnalyticsQuery,
    ) -> BookingResult<AnalyticsSummary> {
        let restaurant = self
            .store
            .restaurant(restaurant_id)
            .await?
            .ok_or(BookingError::NotFound {
                entity: "restaurant",
                id: restaurant_id,
            })?;
        let tz = restaurant.timezone.parse::<Tz>().unwrap_or(self.default_tz);
        let today = time::local_date_of(self.clock.now_millis(), tz).ok_or_else(|| {
            BookingError::Validation("current time is not representable".to_string())
        })?;

        let kind = query
            .period
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(str::parse::<PeriodKind>)
            .transpose()?;
        let period = Period::resolve(
            kind,
            today,
            query.start_date.as_deref(),
            query.end_date.as_deref(),
        )?;

        let (from, to) = (period.start_str(), period.end_str());
        let (reservations, tables, areas) = futures::try_join!(
            self.store.reservations_between(restaurant_id, &from, &to),
            self.store.tables(restaurant_id),
            self.store.areas(restaurant_id),
        )?;

        tracing::debug!(
            restaurant_id,
            period = %period.kind,
            start = %period.start,
            end = %period.end,
            reservations = reservations.len(),
            "Analytics summary computed"
        );
        Ok(summarize(
            &reservations,
            &tables,
            &areas,
            &period,
            self.top_n,
        ))
    }
}
