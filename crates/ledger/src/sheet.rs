//! Spreadsheet-service ledger — the hosted row store over HTTP.
//!
//! The attendance sheet is exposed by a small row-oriented API (a web-app
//! frontend over the shared spreadsheet):
//!
//! - `GET  /rows?user_id=<id>&day=<date>` — scan matching rows
//! - `POST /rows` — append one row, returns its row number
//! - `POST /rows/{n}/checkout` — set the departure time on row `n`
//!   (404 for an unknown row, 409 if the row is already closed)
//!
//! Row shape on the wire: `user_id`, `check_in` (RFC 3339), `check_out`
//! (empty string until set), `day` (ISO date). The service is eventually
//! consistent and enforces no uniqueness; the duplicate guard here works on
//! what this process can see at call time.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rewaqbot_core::error::LedgerError;
use rewaqbot_core::ledger::{Ledger, LedgerRow, RowHandle};
use rewaqbot_core::record::AttendanceRecord;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the spreadsheet service.
#[derive(Clone)]
pub struct SheetLedgerConfig {
    /// Base URL of the row API.
    pub base_url: String,
    /// Bearer token for the service.
    pub api_key: String,
}

impl std::fmt::Debug for SheetLedgerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetLedgerConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Ledger backend talking to the spreadsheet service.
pub struct SheetLedger {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl SheetLedger {
    pub fn new(config: SheetLedgerConfig) -> Self {
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

    fn map_status(status: u16, body: String) -> LedgerError {
        match status {
            401 | 403 => LedgerError::Storage(format!("Sheet service rejected credentials: {body}")),
            500..=599 => LedgerError::Unavailable(format!("Sheet service error {status}: {body}")),
            _ => LedgerError::Storage(format!("Sheet service error {status}: {body}")),
        }
    }

    async fn fetch_rows(
        &self,
        user_id: &str,
        day: NaiveDate,
    ) -> Result<Vec<SheetRowDto>, LedgerError> {
        let url = format!("{}/rows", self.base_url);
        let day_param = day.to_string();
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .query(&[("user_id", user_id), ("day", day_param.as_str())])
            .send()
            .await
            .map_err(|e| LedgerError::Unavailable(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            warn!(status, body = %body, "Sheet scan failed");
            return Err(Self::map_status(status, body));
        }

        response
            .json::<Vec<SheetRowDto>>()
            .await
            .map_err(|e| LedgerError::Storage(format!("Failed to parse sheet rows: {e}")))
    }
}

#[async_trait]
impl Ledger for SheetLedger {
    fn name(&self) -> &str {
        "sheet"
    }

    async fn find_record(
        &self,
        user_id: &str,
        day: NaiveDate,
    ) -> Result<Option<LedgerRow>, LedgerError> {
        let rows = self.fetch_rows(user_id, day).await?;
        // The service enforces no uniqueness; take the first matching row,
        // the same one a later mutation will target.
        rows.into_iter().next().map(|dto| dto.into_row()).transpose()
    }

    async fn create_record(
        &self,
        user_id: &str,
        check_in: DateTime<Utc>,
        day: NaiveDate,
    ) -> Result<RowHandle, LedgerError> {
        // Duplicate guard on this process's view of the sheet.
        if !self.fetch_rows(user_id, day).await?.is_empty() {
            return Err(LedgerError::DuplicateRecord {
                user_id: user_id.to_string(),
                day,
            });
        }

        let url = format!("{}/rows", self.base_url);
        let payload = AppendRowRequest {
            user_id,
            check_in: check_in.to_rfc3339(),
            check_out: "",
            day: day.to_string(),
        };

        debug!(user_id, %day, "Appending attendance row");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| LedgerError::Unavailable(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 && status != 201 {
            let body = response.text().await.unwrap_or_default();
            warn!(status, body = %body, "Sheet append failed");
            return Err(Self::map_status(status, body));
        }

        let appended: AppendRowResponse = response
            .json()
            .await
            .map_err(|e| LedgerError::Storage(format!("Failed to parse append response: {e}")))?;

        Ok(RowHandle(appended.row))
    }

    async fn set_checkout(
        &self,
        handle: RowHandle,
        check_out: DateTime<Utc>,
    ) -> Result<(), LedgerError> {
        let url = format!("{}/rows/{}/checkout", self.base_url, handle.0);
        let payload = CheckoutRequest {
            check_out: check_out.to_rfc3339(),
        };

        debug!(row = handle.0, "Closing attendance row");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| LedgerError::Unavailable(e.to_string()))?;

        match response.status().as_u16() {
            200 | 204 => Ok(()),
            404 => Err(LedgerError::RowNotFound(handle)),
            409 => Err(LedgerError::CheckoutAlreadySet(handle)),
            status => {
                let body = response.text().await.unwrap_or_default();
                warn!(status, body = %body, "Sheet checkout failed");
                Err(Self::map_status(status, body))
            }
        }
    }

    async fn count(&self) -> Result<usize, LedgerError> {
        let url = format!("{}/rows/count", self.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| LedgerError::Unavailable(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::map_status(status, body));
        }

        let counted: CountResponse = response
            .json()
            .await
            .map_err(|e| LedgerError::Storage(format!("Failed to parse count response: {e}")))?;
        Ok(counted.count)
    }
}

// --- Sheet service wire types ---

#[derive(Debug, Deserialize)]
struct SheetRowDto {
    row: u64,
    user_id: String,
    check_in: String,
    #[serde(default)]
    check_out: String,
    day: String,
}

impl SheetRowDto {
    /// Convert a wire row into a domain row.
    fn into_row(self) -> Result<LedgerRow, LedgerError> {
        let check_in = DateTime::parse_from_rfc3339(&self.check_in)
            .map_err(|e| LedgerError::Storage(format!("Bad check_in on row {}: {e}", self.row)))?
            .with_timezone(&Utc);

        let check_out = if self.check_out.is_empty() {
            None
        } else {
            Some(
                DateTime::parse_from_rfc3339(&self.check_out)
                    .map_err(|e| {
                        LedgerError::Storage(format!("Bad check_out on row {}: {e}", self.row))
                    })?
                    .with_timezone(&Utc),
            )
        };

        let day: NaiveDate = self
            .day
            .parse()
            .map_err(|e| LedgerError::Storage(format!("Bad day on row {}: {e}", self.row)))?;

        Ok(LedgerRow {
            handle: RowHandle(self.row),
            record: AttendanceRecord {
                user_id: self.user_id,
                day,
                check_in,
                check_out,
            },
        })
    }
}

#[derive(Debug, Serialize)]
struct AppendRowRequest<'a> {
    user_id: &'a str,
    check_in: String,
    check_out: &'a str,
    day: String,
}

#[derive(Debug, Deserialize)]
struct AppendRowResponse {
    row: u64,
}

#[derive(Debug, Serialize)]
struct CheckoutRequest {
    check_out: String,
}

#[derive(Debug, Deserialize)]
struct CountResponse {
    count: usize,
}
