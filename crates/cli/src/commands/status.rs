//! `status` — show roster and ledger health.

use rewaqbot_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    println!("Config: {config:#?}");

    match super::build_roster(&config).await {
        Ok(roster) => println!("Roster:  {} members ({})", roster.len(), config.roster.source),
        Err(e) => println!("Roster:  unavailable — {e}"),
    }

    let ledger = super::build_ledger(&config)?;
    match ledger.count().await {
        Ok(count) => println!("Ledger:  {count} rows ({})", ledger.name()),
        Err(e) => println!("Ledger:  unavailable — {e}"),
    }

    Ok(())
}
