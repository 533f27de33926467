//! The tagged result of an attendance engine operation.
//!
//! The engine yields an [`Outcome`] for every command it handles — success or
//! failure — and never a presentation string. Rendering outcomes into
//! user-facing replies is the router's job; the only user data carried here
//! is the participant's display name.

use serde::{Deserialize, Serialize};

use crate::command::CommandVerb;

/// What happened when a structured command was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// Arrival recorded; a fresh record now exists for today.
    CheckedIn { display_name: String },

    /// Departure recorded; today's record is now closed.
    CheckedOut { display_name: String },

    /// A record for today already exists — re-entrant check-in, no write.
    AlreadyCheckedIn { display_name: String },

    /// Today's record is already closed — repeated check-out, no write.
    AlreadyCheckedOut { display_name: String },

    /// Check-out without a record for today — must check in first, no write.
    NotCheckedIn { display_name: String },

    /// The member id is not in the roster; the ledger was never touched.
    NotRegistered,

    /// The line did not parse as `<verb> <id>`; nothing was touched.
    Malformed { verb: CommandVerb },

    /// A store failure was logged; the member sees a generic apology.
    Internal,
}

impl Outcome {
    /// Whether this outcome changed ledger state.
    pub fn is_mutation(&self) -> bool {
        matches!(self, Outcome::CheckedIn { .. } | Outcome::CheckedOut { .. })
    }
}
