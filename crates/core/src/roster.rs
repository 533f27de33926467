//! Roster types — the read-only membership directory.
//!
//! The roster maps a membership code to a display name. It is loaded once at
//! process start from an external source and never mutated afterwards; a
//! refresh is an administrative restart.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::RosterError;

/// A registered member of the space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// The membership code members identify themselves with.
    #[serde(rename = "user_id")]
    pub id: String,

    /// Human-readable name, interpolated into replies.
    pub display_name: String,
}

impl Participant {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

/// Where the roster comes from.
///
/// Implementations: a JSON file on disk, the spreadsheet service's
/// participants table. Called exactly once, eagerly, at startup.
#[async_trait]
pub trait RosterSource: Send + Sync {
    /// The source name (e.g., "file", "sheet").
    fn name(&self) -> &str;

    /// Fetch the full membership list.
    async fn load(&self) -> std::result::Result<Vec<Participant>, RosterError>;
}
