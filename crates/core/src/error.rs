//! Error types for the Rewaqbot domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

use crate::ledger::RowHandle;

/// The top-level error type for all Rewaqbot operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Roster errors ---
    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),

    // --- Ledger errors ---
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    // --- Assistant errors ---
    #[error("Assistant error: {0}")]
    Assistant(#[from] AssistantError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Roster source failed: {0}")]
    Source(String),

    #[error("Roster entry could not be parsed: {0}")]
    Parse(String),
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("A record for {user_id} on {day} already exists")]
    DuplicateRecord {
        user_id: String,
        day: chrono::NaiveDate,
    },

    #[error("Checkout already set on row {0}")]
    CheckoutAlreadySet(RowHandle),

    #[error("No row for handle {0}")]
    RowNotFound(RowHandle),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Store unreachable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Error)]
pub enum AssistantError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Assistant not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_error_displays_correctly() {
        let err = Error::Ledger(LedgerError::DuplicateRecord {
            user_id: "RA-001".into(),
            day: chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        });
        assert!(err.to_string().contains("RA-001"));
        assert!(err.to_string().contains("2024-01-01"));
    }

    #[test]
    fn assistant_error_displays_correctly() {
        let err = Error::Assistant(AssistantError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        });
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn checkout_conflict_names_the_row() {
        let err = LedgerError::CheckoutAlreadySet(RowHandle(7));
        assert!(err.to_string().contains('7'));
    }
}
