//! The attendance record — one day's check-in/check-out pair for one member.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One logical attendance row per `(user_id, day)` pair.
///
/// `check_in` is set exactly once, at creation — a record without a check-in
/// cannot exist. `check_out` transitions from `None` to `Some` exactly once.
/// Records are never deleted; the ledger is append-only at the day grain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The membership code this record belongs to.
    pub user_id: String,

    /// The day this record covers (local calendar date, ISO on the wire).
    pub day: NaiveDate,

    /// Arrival timestamp, set at creation.
    pub check_in: DateTime<Utc>,

    /// Departure timestamp, absent until the member checks out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out: Option<DateTime<Utc>>,
}

impl AttendanceRecord {
    /// Create a fresh record for a check-in.
    pub fn new(user_id: impl Into<String>, check_in: DateTime<Utc>, day: NaiveDate) -> Self {
        Self {
            user_id: user_id.into(),
            day,
            check_in,
            check_out: None,
        }
    }

    /// Whether this record has reached its terminal state for the day.
    pub fn is_closed(&self) -> bool {
        self.check_out.is_some()
    }
}
