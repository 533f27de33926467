//! CLI subcommands and shared wiring.

pub mod onboard;
pub mod send;
pub mod serve;
pub mod status;

use std::sync::Arc;

use rewaqbot_assistant::GroqAssistant;
use rewaqbot_config::AppConfig;
use rewaqbot_core::assistant::Assistant;
use rewaqbot_core::clock::SystemClock;
use rewaqbot_core::error::Error;
use rewaqbot_core::ledger::Ledger;
use rewaqbot_core::roster::RosterSource;
use rewaqbot_engine::AttendanceEngine;
use rewaqbot_ledger::{FileLedger, InMemoryLedger, SheetLedger, SheetLedgerConfig};
use rewaqbot_roster::{FileRosterSource, Roster, SheetRosterConfig, SheetRosterSource};
use rewaqbot_router::ConversationRouter;

/// Build the roster source named by the configuration.
fn roster_source(config: &AppConfig) -> Result<Box<dyn RosterSource>, Error> {
    match config.roster.source.as_str() {
        "file" => {
            let path = config.roster.path.clone().ok_or_else(|| Error::Config {
                message: "roster.path is required when roster.source = \"file\"".into(),
            })?;
            Ok(Box::new(FileRosterSource::new(path)))
        }
        "sheet" => {
            let base_url = config.roster.base_url.clone().ok_or_else(|| Error::Config {
                message: "roster.base_url is required when roster.source = \"sheet\"".into(),
            })?;
            Ok(Box::new(SheetRosterSource::new(SheetRosterConfig {
                base_url,
                api_key: config.roster.api_key.clone().unwrap_or_default(),
            })))
        }
        other => Err(Error::Config {
            message: format!("Unknown roster source: {other}"),
        }),
    }
}

/// Build the ledger backend named by the configuration.
pub fn build_ledger(config: &AppConfig) -> Result<Arc<dyn Ledger>, Error> {
    match config.ledger.backend.as_str() {
        "memory" => Ok(Arc::new(InMemoryLedger::new())),
        "file" => {
            let path = config
                .ledger
                .path
                .clone()
                .unwrap_or_else(FileLedger::default_path);
            Ok(Arc::new(FileLedger::new(path)))
        }
        "sheet" => {
            let base_url = config.ledger.base_url.clone().ok_or_else(|| Error::Config {
                message: "ledger.base_url is required when ledger.backend = \"sheet\"".into(),
            })?;
            Ok(Arc::new(SheetLedger::new(SheetLedgerConfig {
                base_url,
                api_key: config.ledger.api_key.clone().unwrap_or_default(),
            })))
        }
        other => Err(Error::Config {
            message: format!("Unknown ledger backend: {other}"),
        }),
    }
}

/// Load the roster eagerly, per its startup lifecycle.
pub async fn build_roster(config: &AppConfig) -> Result<Arc<Roster>, Error> {
    let source = roster_source(config)?;
    Ok(Arc::new(Roster::load(source.as_ref()).await?))
}

fn build_assistant(config: &AppConfig) -> Arc<dyn Assistant> {
    let mut assistant = GroqAssistant::new(config.assistant.api_key.clone().unwrap_or_default())
        .with_base_url(config.assistant.base_url.clone())
        .with_model(config.assistant.model.clone());
    if let Some(preamble) = &config.assistant.preamble {
        assistant = assistant.with_preamble(preamble.clone());
    }
    Arc::new(assistant)
}

/// Wire the full router: roster → ledger → engine → router.
pub async fn build_router(config: &AppConfig) -> Result<ConversationRouter, Error> {
    let roster = build_roster(config).await?;
    let ledger = build_ledger(config)?;
    let assistant = build_assistant(config);
    let engine = AttendanceEngine::new(roster, ledger, Arc::new(SystemClock));
    Ok(ConversationRouter::new(engine, assistant))
}
