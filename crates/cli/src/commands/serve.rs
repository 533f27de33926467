//! `serve` — answer messages from stdin, one line at a time.
//!
//! The console transport: each stdin line is one inbound message, each stdout
//! line is the reply. The chat platform adapter in front of the bot speaks
//! the same one-line-in, one-line-out protocol.

use rewaqbot_config::AppConfig;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let router = super::build_router(&config).await?;

    info!("Rewaqbot serving on stdin — one message per line, Ctrl-D to stop");

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let reply = router.dispatch(&line).await;
        println!("{reply}");
    }

    info!("stdin closed, shutting down");
    Ok(())
}
