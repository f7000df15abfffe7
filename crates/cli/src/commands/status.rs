//! `emoteport status`: Show configuration status.

use emoteport_config::AppConfig;

fn on_off(enabled: bool) -> &'static str {
    if enabled { "enabled" } else { "disabled" }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    println!("Emoteport Status");
    println!("================");
    println!("  Config file:  {}", AppConfig::config_path().display());
    println!("  Gateway:      {}:{}", config.gateway.host, config.gateway.port);
    println!("  Twitch API:   {}", config.twitch.api_url);
    println!(
        "  Credentials:  {}",
        if config.require_credentials().is_ok() { "set" } else { "missing" }
    );
    println!("  BetterTTV:    {}", on_off(config.bttv.enabled));
    println!("  7TV:          {}", on_off(config.seventv.enabled));
    println!("  FFZ:          {}", on_off(config.ffz.enabled));
    println!("  Timeout:      {} ms", config.http.request_timeout_ms);
    println!("  Search limit: {}", config.search.limit);

    if AppConfig::config_path().exists() {
        println!("\n  Config file found");
    } else {
        println!("\n  No config file, using defaults (run `emoteport config init`)");
    }

    Ok(())
}
