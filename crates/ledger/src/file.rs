//! File-based ledger — persistent JSON-lines storage.
//!
//! Each line is a JSON-encoded `AttendanceRecord`. Rows are loaded into
//! memory on creation and flushed to disk on every mutation, giving fast
//! scans with durable writes. The file is human-inspectable and needs no
//! external services.
//!
//! Storage location: `~/.rewaqbot/attendance.jsonl`

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rewaqbot_core::error::LedgerError;
use rewaqbot_core::ledger::{Ledger, LedgerRow, RowHandle};
use rewaqbot_core::record::AttendanceRecord;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// A file-backed ledger using JSONL (one JSON object per line).
///
/// Handles are line positions. Lines are never removed, only appended or
/// rewritten in place on checkout, so positions are stable.
pub struct FileLedger {
    path: PathBuf,
    rows: Arc<RwLock<Vec<AttendanceRecord>>>,
}

impl FileLedger {
    /// Create a new file-backed ledger at the given path.
    ///
    /// If the file exists, rows are loaded from it.
    /// If the file does not exist, starts empty (file created on first write).
    pub fn new(path: PathBuf) -> Self {
        let rows = Self::load_from_disk(&path);
        debug!(path = %path.display(), count = rows.len(), "File ledger loaded");
        Self {
            path,
            rows: Arc::new(RwLock::new(rows)),
        }
    }

    /// Default path: `~/.rewaqbot/attendance.jsonl`
    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".rewaqbot").join("attendance.jsonl")
    }

    /// Load rows from a JSONL file.
    fn load_from_disk(path: &PathBuf) -> Vec<AttendanceRecord> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Vec::new(), // File doesn't exist yet — start empty
        };

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match serde_json::from_str::<AttendanceRecord>(line) {
                Ok(row) => Some(row),
                Err(e) => {
                    warn!(error = %e, "Skipping corrupted ledger row");
                    None
                }
            })
            .collect()
    }

    /// Flush all rows to disk as JSONL.
    async fn flush(&self) -> Result<(), LedgerError> {
        let rows = self.rows.read().await;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                LedgerError::Storage(format!("Failed to create ledger directory: {e}"))
            })?;
        }

        let mut content = String::new();
        for row in rows.iter() {
            let line = serde_json::to_string(row)
                .map_err(|e| LedgerError::Storage(format!("Failed to serialize row: {e}")))?;
            content.push_str(&line);
            content.push('\n');
        }

        std::fs::write(&self.path, &content)
            .map_err(|e| LedgerError::Storage(format!("Failed to write ledger file: {e}")))?;

        Ok(())
    }
}

#[async_trait]
impl Ledger for FileLedger {
    fn name(&self) -> &str {
        "file"
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
        let handle = {
            let mut rows = self.rows.write().await;
            if rows.iter().any(|r| r.user_id == user_id && r.day == day) {
                return Err(LedgerError::DuplicateRecord {
                    user_id: user_id.to_string(),
                    day,
                });
            }
            rows.push(AttendanceRecord::new(user_id, check_in, day));
            RowHandle((rows.len() - 1) as u64)
        };
        self.flush().await?;
        Ok(handle)
    }

    async fn set_checkout(
        &self,
        handle: RowHandle,
        check_out: DateTime<Utc>,
    ) -> Result<(), LedgerError> {
        {
            let mut rows = self.rows.write().await;
            let row = rows
                .get_mut(handle.0 as usize)
                .ok_or(LedgerError::RowNotFound(handle))?;
            if row.check_out.is_some() {
                return Err(LedgerError::CheckoutAlreadySet(handle));
            }
            row.check_out = Some(check_out);
        }
        self.flush().await
    }

    async fn count(&self) -> Result<usize, LedgerError> {
        Ok(self.rows.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn ts(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, h, m, 0).unwrap()
    }

    fn day() -> NaiveDate {
        ts(0, 0).date_naive()
    }

    #[tokio::test]
    async fn create_persists_across_reload() {
        let tmp = NamedTempFile::new().unwrap();
        let path = tmp.path().to_path_buf();
        drop(tmp); // Close file so the ledger can use it

        let ledger = FileLedger::new(path.clone());
        ledger.create_record("RA-001", ts(9, 0), day()).await.unwrap();

        // Verify file was written
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("RA-001"));

        // Reload from disk — the row survives
        let ledger2 = FileLedger::new(path);
        let row = ledger2.find_record("RA-001", day()).await.unwrap().unwrap();
        assert_eq!(row.record.check_in, ts(9, 0));
    }

    #[tokio::test]
    async fn checkout_persists_across_reload() {
        let tmp = NamedTempFile::new().unwrap();
        let path = tmp.path().to_path_buf();
        drop(tmp);

        let ledger = FileLedger::new(path.clone());
        let handle = ledger.create_record("RA-001", ts(9, 0), day()).await.unwrap();
        ledger.set_checkout(handle, ts(13, 30)).await.unwrap();

        let ledger2 = FileLedger::new(path);
        let row = ledger2.find_record("RA-001", day()).await.unwrap().unwrap();
        assert_eq!(row.record.check_out, Some(ts(13, 30)));
    }

    #[tokio::test]
    async fn duplicate_create_writes_nothing() {
        let tmp = NamedTempFile::new().unwrap();
        let path = tmp.path().to_path_buf();
        drop(tmp);

        let ledger = FileLedger::new(path.clone());
        ledger.create_record("RA-001", ts(9, 0), day()).await.unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        let err = ledger
            .create_record("RA-001", ts(9, 5), day())
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateRecord { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[tokio::test]
    async fn double_checkout_rejected() {
        let tmp = NamedTempFile::new().unwrap();
        let path = tmp.path().to_path_buf();
        drop(tmp);

        let ledger = FileLedger::new(path);
        let handle = ledger.create_record("RA-001", ts(9, 0), day()).await.unwrap();
        ledger.set_checkout(handle, ts(13, 30)).await.unwrap();

        let err = ledger.set_checkout(handle, ts(15, 0)).await.unwrap_err();
        assert!(matches!(err, LedgerError::CheckoutAlreadySet(_)));
    }

    #[tokio::test]
    async fn handles_missing_file_gracefully() {
        let path = PathBuf::from("/tmp/rewaqbot_test_nonexistent_ledger.jsonl");
        let _ = std::fs::remove_file(&path);
        let ledger = FileLedger::new(path);
        assert_eq!(ledger.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn handles_corrupted_lines() {
        let mut tmp = NamedTempFile::new().unwrap();
        writeln!(
            tmp,
            r#"{{"user_id":"RA-001","day":"2024-01-01","check_in":"2024-01-01T09:00:00Z"}}"#
        )
        .unwrap();
        writeln!(tmp, "this is not json").unwrap();
        writeln!(
            tmp,
            r#"{{"user_id":"RA-002","day":"2024-01-01","check_in":"2024-01-01T10:00:00Z","check_out":"2024-01-01T14:00:00Z"}}"#
        )
        .unwrap();
        let path = tmp.path().to_path_buf();

        let ledger = FileLedger::new(path);
        // Loads 2 valid rows, skips the corrupted one
        assert_eq!(ledger.count().await.unwrap(), 2);
        let row = ledger.find_record("RA-002", day()).await.unwrap().unwrap();
        assert!(row.record.is_closed());
    }
}
