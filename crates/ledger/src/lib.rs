//! Attendance ledger backends for Rewaqbot.
//!
//! Each backend implements the [`rewaqbot_core::Ledger`] contract:
//! - [`InMemoryLedger`] — ephemeral, for tests and dry runs
//! - [`FileLedger`] — durable JSONL on local disk
//! - [`SheetLedger`] — the hosted spreadsheet service over HTTP
//!
//! All backends share the append-only discipline: rows are never deleted or
//! reordered, which is what makes [`rewaqbot_core::RowHandle`] positions
//! stable across a scan-then-mutate sequence.

mod file;
mod in_memory;
mod sheet;

pub use file::FileLedger;
pub use in_memory::InMemoryLedger;
pub use sheet::{SheetLedger, SheetLedgerConfig};
