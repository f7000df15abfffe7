//! One-shot lookups: `user`, `emotes`, `badges`, `search`.
//!
//! Each runs a single handler against the live upstreams and prints the
//! same JSON the HTTP API would return.

use emoteport_aggregator::UserService;
use emoteport_config::AppConfig;
use serde::Serialize;

async fn service() -> Result<UserService, Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let providers = emoteport_providers::build_from_config(&config)?;
    Ok(UserService::from_providers(providers, &config))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn user(name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let identity = service().await?.get_identity(name).await?;
    print_json(&identity)
}

pub async fn emotes(name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let emotes = service().await?.get_emotes(name).await?;
    print_json(&emotes)
}

pub async fn badges(name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let badges = service().await?.get_badges(name).await?;
    print_json(&badges)
}

pub async fn search(query: &str) -> Result<(), Box<dyn std::error::Error>> {
    let hits = service().await?.search(query).await;
    print_json(&hits)
}
