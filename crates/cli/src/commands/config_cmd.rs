//! `emoteport config`: Configuration management commands.

use emoteport_config::AppConfig;

pub async fn validate() -> Result<(), Box<dyn std::error::Error>> {
    println!("Validating configuration...");

    match AppConfig::load() {
        Ok(config) => {
            println!("   Config parsed successfully");

            let mut warnings = Vec::new();

            if let Err(e) = config.require_credentials() {
                warnings.push(e.to_string());
            }

            if !config.bttv.enabled && !config.seventv.enabled && !config.ffz.enabled {
                warnings.push("Only native Twitch emotes are enabled".to_string());
            }

            if config.gateway.cors_origins.is_empty() {
                warnings.push("No CORS origins configured; browsers will be refused".to_string());
            }

            if warnings.is_empty() {
                println!("   All checks passed");
            } else {
                println!();
                for w in &warnings {
                    println!("   warning: {w}");
                }
            }

            println!();
            println!("   Gateway:   {}:{}", config.gateway.host, config.gateway.port);
            println!("   Timeout:   {} ms", config.http.request_timeout_ms);
            println!("   Search:    {} results", config.search.limit);
        }
        Err(e) => {
            println!("   Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    println!("{}", render_redacted(&config)?);
    Ok(())
}

pub async fn path() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", AppConfig::config_path().display());
    Ok(())
}

pub async fn init(force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = AppConfig::config_path();

    if config_path.exists() && !force {
        println!("Config already exists at {}", config_path.display());
        println!("   Re-run with --force to overwrite it.");
        return Ok(());
    }

    if let Some(dir) = config_path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(&config_path, AppConfig::default_toml())?;

    println!("Wrote {}", config_path.display());
    println!("   Set TWITCH_CLIENT_ID and TWITCH_CLIENT_SECRET (or the [twitch] section) before serving.");
    Ok(())
}

/// TOML rendering with the client secret masked.
fn render_redacted(config: &AppConfig) -> Result<String, toml::ser::Error> {
    let mut shown = config.clone();
    if shown.twitch.client_secret.is_some() {
        shown.twitch.client_secret = Some("***".into());
    }
    toml::to_string_pretty(&shown)
}
