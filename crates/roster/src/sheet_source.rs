//! Spreadsheet roster source — the participants table of the shared sheet.
//!
//! The membership list lives in the same spreadsheet service as the
//! attendance rows: `GET /participants` returns
//! `[{"user_id": "...", "display_name": "..."}]`.

use async_trait::async_trait;
use rewaqbot_core::error::RosterError;
use rewaqbot_core::roster::{Participant, RosterSource};
use tracing::warn;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the participants endpoint.
#[derive(Clone)]
pub struct SheetRosterConfig {
    pub base_url: String,
    pub api_key: String,
}

impl std::fmt::Debug for SheetRosterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetRosterConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Fetches the membership list from the spreadsheet service.
pub struct SheetRosterSource {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl SheetRosterSource {
    pub fn new(config: SheetRosterConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            client,
        }
    }
}

#[async_trait]
impl RosterSource for SheetRosterSource {
    fn name(&self) -> &str {
        "sheet"
    }

    async fn load(&self) -> Result<Vec<Participant>, RosterError> {
        let url = format!("{}/participants", self.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| RosterError::Source(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            warn!(status, body = %body, "Roster fetch failed");
            return Err(RosterError::Source(format!(
                "Participants endpoint returned {status}: {body}"
            )));
        }

        response
            .json::<Vec<Participant>>()
            .await
            .map_err(|e| RosterError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_trims_base_url() {
        let source = SheetRosterSource::new(SheetRosterConfig {
            base_url: "https://sheet.example.com/api/".into(),
            api_key: "secret".into(),
        });
        assert_eq!(source.base_url, "https://sheet.example.com/api");
        assert_eq!(source.name(), "sheet");
    }

    #[test]
    fn config_debug_redacts_key() {
        let config = SheetRosterConfig {
            base_url: "https://sheet.example.com".into(),
            api_key: "super-secret".into(),
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn participants_wire_format_parses() {
        let participants: Vec<Participant> = serde_json::from_str(
            r#"[{"user_id": "RA-001", "display_name": "سارة"}]"#,
        )
        .unwrap();
        assert_eq!(participants[0].id, "RA-001");
    }
}
