//! Membership roster for Rewaqbot.
//!
//! The roster is the read-only directory of registered members: a map from
//! membership code to display name, loaded eagerly at startup from a
//! [`RosterSource`] and never mutated afterwards. Refreshing it is an
//! administrative action (restart the process).

mod file_source;
mod sheet_source;

pub use file_source::FileRosterSource;
pub use sheet_source::{SheetRosterConfig, SheetRosterSource};

use std::collections::HashMap;

use rewaqbot_core::error::RosterError;
use rewaqbot_core::roster::{Participant, RosterSource};
use tracing::{info, warn};

/// The in-process membership directory.
#[derive(Debug, Clone)]
pub struct Roster {
    by_id: HashMap<String, Participant>,
}

impl Roster {
    /// Build a roster directly from a participant list.
    ///
    /// Later duplicates of a membership code replace earlier ones, matching
    /// how a re-registered member appears in the source sheet.
    pub fn from_participants(participants: impl IntoIterator<Item = Participant>) -> Self {
        let by_id = participants
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect::<HashMap<_, _>>();
        Self { by_id }
    }

    /// Load the roster eagerly from a source.
    pub async fn load(source: &dyn RosterSource) -> Result<Self, RosterError> {
        let participants = source.load().await?;
        let roster = Self::from_participants(participants);
        if roster.is_empty() {
            warn!(source = source.name(), "Roster loaded empty — every command will be rejected");
        } else {
            info!(source = source.name(), members = roster.len(), "Roster loaded");
        }
        Ok(roster)
    }

    /// Look up a member by membership code.
    pub fn lookup(&self, user_id: &str) -> Option<&Participant> {
        self.by_id.get(user_id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
