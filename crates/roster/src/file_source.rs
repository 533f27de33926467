//! File roster source — a JSON array of participants on disk.
//!
//! Useful for small deployments and tests; the format matches the
//! spreadsheet export: `[{"user_id": "...", "display_name": "..."}]`.

use async_trait::async_trait;
use rewaqbot_core::error::RosterError;
use rewaqbot_core::roster::{Participant, RosterSource};
use std::path::PathBuf;

/// Loads the membership list from a local JSON file.
pub struct FileRosterSource {
    path: PathBuf,
}

impl FileRosterSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl RosterSource for FileRosterSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn load(&self) -> Result<Vec<Participant>, RosterError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            RosterError::Source(format!("Failed to read {}: {e}", self.path.display()))
        })?;

        serde_json::from_str(&content).map_err(|e| RosterError::Parse(e.to_string()))
    }
}
