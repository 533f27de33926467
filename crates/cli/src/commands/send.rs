//! `send` — handle a single message and print the reply.

use rewaqbot_config::AppConfig;

pub async fn run(message: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let router = super::build_router(&config).await?;

    let reply = router.dispatch(message).await;
    println!("{reply}");
    Ok(())
}
