//! In-memory ledger — useful for testing and ephemeral sessions.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rewaqbot_core::error::LedgerError;
use rewaqbot_core::ledger::{Ledger, LedgerRow, RowHandle};
use rewaqbot_core::record::AttendanceRecord;
use std::sync::Arc;
use tokio::sync::RwLock;

/// An in-memory ledger that stores rows in a Vec.
///
/// Handles are row indices; rows are only ever appended or closed in place,
/// so indices stay valid for the lifetime of the instance.
pub struct InMemoryLedger {
    rows: Arc<RwLock<Vec<AttendanceRecord>>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Snapshot of all rows, in insertion order. Test/diagnostic helper.
    pub async fn snapshot(&self) -> Vec<AttendanceRecord> {
        self.rows.read().await.clone()
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Ledger for InMemoryLedger {
    fn name(&self) -> &str {
        "memory"
    }

    async fn find_record(
        &self,
        user_id: &str,
        day: NaiveDate,
    ) -> Result<Option<LedgerRow>, LedgerError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.user_id == user_id && r.day == day)
            .map(|(i, r)| LedgerRow {
                handle: RowHandle(i as u64),
                record: r.clone(),
            }))
    }

    async fn create_record(
        &self,
        user_id: &str,
        check_in: DateTime<Utc>,
        day: NaiveDate,
    ) -> Result<RowHandle, LedgerError> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|r| r.user_id == user_id && r.day == day) {
            return Err(LedgerError::DuplicateRecord {
                user_id: user_id.to_string(),
                day,
            });
        }
        rows.push(AttendanceRecord::new(user_id, check_in, day));
        Ok(RowHandle((rows.len() - 1) as u64))
    }

    async fn set_checkout(
        &self,
        handle: RowHandle,
        check_out: DateTime<Utc>,
    ) -> Result<(), LedgerError> {
        let mut rows = self.rows.write().await;
        let row = rows
            .get_mut(handle.0 as usize)
            .ok_or(LedgerError::RowNotFound(handle))?;
        if row.check_out.is_some() {
            return Err(LedgerError::CheckoutAlreadySet(handle));
        }
        row.check_out = Some(check_out);
        Ok(())
    }

    async fn count(&self) -> Result<usize, LedgerError> {
        Ok(self.rows.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, h, m, 0).unwrap()
    }

    fn day() -> NaiveDate {
        ts(0, 0).date_naive()
    }

    #[tokio::test]
    async fn create_then_find() {
        let ledger = InMemoryLedger::new();
        let handle = ledger.create_record("RA-001", ts(9, 0), day()).await.unwrap();

        let row = ledger.find_record("RA-001", day()).await.unwrap().unwrap();
        assert_eq!(row.handle, handle);
        assert_eq!(row.record.check_in, ts(9, 0));
        assert!(row.record.check_out.is_none());
    }

    #[tokio::test]
    async fn missing_record_is_none() {
        let ledger = InMemoryLedger::new();
        assert!(ledger.find_record("RA-001", day()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_create_rejected() {
        let ledger = InMemoryLedger::new();
        ledger.create_record("RA-001", ts(9, 0), day()).await.unwrap();

        let err = ledger
            .create_record("RA-001", ts(9, 5), day())
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateRecord { .. }));
        assert_eq!(ledger.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn same_user_different_day_is_allowed() {
        let ledger = InMemoryLedger::new();
        ledger.create_record("RA-001", ts(9, 0), day()).await.unwrap();

        let other_day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        ledger
            .create_record("RA-001", ts(9, 0), other_day)
            .await
            .unwrap();
        assert_eq!(ledger.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn checkout_set_exactly_once() {
        let ledger = InMemoryLedger::new();
        let handle = ledger.create_record("RA-001", ts(9, 0), day()).await.unwrap();

        ledger.set_checkout(handle, ts(13, 30)).await.unwrap();
        let err = ledger.set_checkout(handle, ts(14, 0)).await.unwrap_err();
        assert!(matches!(err, LedgerError::CheckoutAlreadySet(_)));

        // First write is untouched by the rejected second one.
        let row = ledger.find_record("RA-001", day()).await.unwrap().unwrap();
        assert_eq!(row.record.check_out, Some(ts(13, 30)));
    }

    #[tokio::test]
    async fn checkout_on_unknown_handle() {
        let ledger = InMemoryLedger::new();
        let err = ledger
            .set_checkout(RowHandle(99), ts(13, 30))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::RowNotFound(RowHandle(99))));
    }

    #[tokio::test]
    async fn handles_stay_stable_as_rows_append() {
        let ledger = InMemoryLedger::new();
        let first = ledger.create_record("RA-001", ts(9, 0), day()).await.unwrap();
        ledger.create_record("RA-002", ts(9, 10), day()).await.unwrap();
        ledger.create_record("RA-003", ts(9, 20), day()).await.unwrap();

        ledger.set_checkout(first, ts(13, 30)).await.unwrap();
        let row = ledger.find_record("RA-001", day()).await.unwrap().unwrap();
        assert_eq!(row.record.check_out, Some(ts(13, 30)));
        assert_eq!(ledger.count().await.unwrap(), 3);
    }
}
