//! Ledger trait — the abstraction over the external attendance store.
//!
//! The ledger is the system of record for check-in/out state. The backing
//! technology (an in-memory table, a JSONL file, a hosted spreadsheet) is an
//! external dependency; the engine's correctness depends only on this
//! contract. The store may lack transactional guarantees — a read-decide-write
//! sequence against it is not atomic, and callers must treat it as such.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::record::AttendanceRecord;

/// Stable position of a row within the store.
///
/// Valid as long as the store is append-only: rows are never deleted or
/// reordered, so a handle captured from a scan keeps pointing at the same row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowHandle(pub u64);

impl std::fmt::Display for RowHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A scan hit: the record plus the handle needed to mutate it in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    pub handle: RowHandle,
    pub record: AttendanceRecord,
}

/// The core Ledger trait.
///
/// Implementations: in-memory (tests/ephemeral), JSONL file, spreadsheet
/// service over HTTP.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// The backend name (e.g., "memory", "file", "sheet").
    fn name(&self) -> &str;

    /// Find the row for `(user_id, day)`, if one is visible to this process.
    ///
    /// Must reflect all prior `create_record`/`set_checkout` calls made
    /// through this instance.
    async fn find_record(
        &self,
        user_id: &str,
        day: NaiveDate,
    ) -> std::result::Result<Option<LedgerRow>, LedgerError>;

    /// Append a new row for `(user_id, day)` with the given arrival time.
    ///
    /// Fails with [`LedgerError::DuplicateRecord`] if a row for that pair is
    /// already visible — the uniqueness invariant the store itself does not
    /// enforce natively.
    async fn create_record(
        &self,
        user_id: &str,
        check_in: DateTime<Utc>,
        day: NaiveDate,
    ) -> std::result::Result<RowHandle, LedgerError>;

    /// Set the departure time on exactly one existing row.
    ///
    /// Fails with [`LedgerError::CheckoutAlreadySet`] if the row is already
    /// closed, and [`LedgerError::RowNotFound`] for an unknown handle. Never
    /// touches any other field.
    async fn set_checkout(
        &self,
        handle: RowHandle,
        check_out: DateTime<Utc>,
    ) -> std::result::Result<(), LedgerError>;

    /// Total number of rows in the store.
    async fn count(&self) -> std::result::Result<usize, LedgerError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn row_handle_display() {
        assert_eq!(RowHandle(42).to_string(), "42");
    }

    #[test]
    fn ledger_row_serialization() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let row = LedgerRow {
            handle: RowHandle(3),
            record: AttendanceRecord::new("RA-001", at, at.date_naive()),
        };
        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("RA-001"));

        let parsed: LedgerRow = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, row);
    }
}
