//! The attendance state machine.
//!
//! For every `(user_id, day)` pair the engine walks a three-state machine:
//!
//! ```text
//! NoRecord --check_in--> CheckedIn --check_out--> CheckedOut (terminal)
//! ```
//!
//! Guard order is fixed: a line that does not parse is rejected before the
//! roster is consulted, an unregistered member is rejected before the ledger
//! is touched, and a state conflict is reported without a write. The
//! read-decide-write sequence against the ledger is not atomic — when the
//! store reports a conflict the engine lost a race (or a retry resent the
//! command) and the matching already-done outcome is returned instead of a
//! duplicate mutation.
//!
//! The engine never returns an error to the router: store failures are
//! logged and surface as [`Outcome::Internal`].

use std::sync::Arc;

use rewaqbot_core::clock::Clock;
use rewaqbot_core::command::{self, CommandVerb};
use rewaqbot_core::error::LedgerError;
use rewaqbot_core::ledger::Ledger;
use rewaqbot_core::outcome::Outcome;
use rewaqbot_roster::Roster;
use tracing::{debug, error};

/// Validates attendance commands and drives ledger mutations.
pub struct AttendanceEngine {
    roster: Arc<Roster>,
    ledger: Arc<dyn Ledger>,
    clock: Arc<dyn Clock>,
}

impl AttendanceEngine {
    pub fn new(roster: Arc<Roster>, ledger: Arc<dyn Ledger>, clock: Arc<dyn Clock>) -> Self {
        Self {
            roster,
            ledger,
            clock,
        }
    }

    /// Handle a `/in <user_id>` line.
    pub async fn check_in(&self, line: &str) -> Outcome {
        let verb = CommandVerb::CheckIn;
        let Some(user_id) = command::parse(verb, line) else {
            return Outcome::Malformed { verb };
        };
        let Some(participant) = self.roster.lookup(&user_id) else {
            return Outcome::NotRegistered;
        };
        let display_name = participant.display_name.clone();

        let now = self.clock.now();
        let day = now.date_naive();

        match self.ledger.find_record(&user_id, day).await {
            Ok(Some(_)) => Outcome::AlreadyCheckedIn { display_name },
            Ok(None) => match self.ledger.create_record(&user_id, now, day).await {
                Ok(handle) => {
                    debug!(user_id = %user_id, %day, row = %handle, "Check-in recorded");
                    Outcome::CheckedIn { display_name }
                }
                // Lost the race (or a resend beat us): the row exists, so the
                // member is checked in — no duplicate row is ever created.
                Err(LedgerError::DuplicateRecord { .. }) => {
                    Outcome::AlreadyCheckedIn { display_name }
                }
                Err(e) => {
                    error!(user_id = %user_id, %day, error = %e, "Check-in write failed");
                    Outcome::Internal
                }
            },
            Err(e) => {
                error!(user_id = %user_id, %day, error = %e, "Ledger scan failed");
                Outcome::Internal
            }
        }
    }

    /// Handle a `/out <user_id>` line.
    pub async fn check_out(&self, line: &str) -> Outcome {
        let verb = CommandVerb::CheckOut;
        let Some(user_id) = command::parse(verb, line) else {
            return Outcome::Malformed { verb };
        };
        let Some(participant) = self.roster.lookup(&user_id) else {
            return Outcome::NotRegistered;
        };
        let display_name = participant.display_name.clone();

        let now = self.clock.now();
        let day = now.date_naive();

        let row = match self.ledger.find_record(&user_id, day).await {
            Ok(Some(row)) => row,
            Ok(None) => return Outcome::NotCheckedIn { display_name },
            Err(e) => {
                error!(user_id = %user_id, %day, error = %e, "Ledger scan failed");
                return Outcome::Internal;
            }
        };

        if row.record.is_closed() {
            return Outcome::AlreadyCheckedOut { display_name };
        }

        match self.ledger.set_checkout(row.handle, now).await {
            Ok(()) => {
                debug!(user_id = %user_id, %day, row = %row.handle, "Check-out recorded");
                Outcome::CheckedOut { display_name }
            }
            // Someone (or a retry) closed the row between our scan and the
            // write; the stored timestamp stands untouched.
            Err(LedgerError::CheckoutAlreadySet(_)) => Outcome::AlreadyCheckedOut { display_name },
            Err(e) => {
                error!(user_id = %user_id, %day, error = %e, "Check-out write failed");
                Outcome::Internal
            }
        }
    }
}
