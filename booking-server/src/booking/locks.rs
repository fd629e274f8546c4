//! Per-table allocation locks
//!
//! Check-then-write on a table runs under that table's mutex. Different
//! tables never contend.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, Clone, Default)]
pub struct TableLocks {
    inner: Arc<DashMap<i64, Arc<Mutex<()>>>>,
}

impl TableLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `table_id`
    pub async fn lock(&self, table_id: i64) -> OwnedMutexGuard<()> {
        // 先克隆 Arc 再 await，避免持有 DashMap 分片锁
        let mutex = self
            .inner
            .entry(table_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        mutex.lock_owned().await
    }

    /// Number of tables that have ever been locked
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn same_table_is_exclusive() {
        let locks = TableLocks::new();
        let guard = locks.lock(1).await;

        let other = locks.clone();
        let waiter = tokio::spawn(async move {
            let _g = other.lock(1).await;
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        drop(guard);
        waiter.await.unwrap();
    }

    #[tokio::test]
    async fn different_tables_do_not_contend() {
        let locks = TableLocks::new();
        let _a = locks.lock(1).await;
        let _b = tokio::time::timeout(Duration::from_millis(50), locks.lock(2))
            .await
            .unwrap();
        assert_eq!(locks.len(), 2);
    }
}
