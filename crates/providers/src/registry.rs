//! Provider registry: builds the adapter set from configuration.
//!
//! Declaration order here is merge order downstream: Twitch, BetterTTV, 7TV,
//! then FFZ.

use std::sync::Arc;

use emoteport_config::AppConfig;
use emoteport_core::provider::{BadgeProvider, ChannelDirectory, EmoteProvider};
use emoteport_core::{Error, Result};
use tracing::info;

use crate::bttv::BttvProvider;
use crate::ffz::FfzProvider;
use crate::http::HttpClient;
use crate::seventv::SevenTvProvider;
use crate::twitch::TwitchProvider;

/// The adapters one running instance talks to.
#[derive(Clone)]
pub struct ProviderSet {
    /// Resolves usernames and searches channels.
    pub directory: Arc<dyn ChannelDirectory>,
    /// Emote sources, in merge order.
    pub emotes: Vec<Arc<dyn EmoteProvider>>,
    /// Chat badge source.
    pub badges: Arc<dyn BadgeProvider>,
}

impl ProviderSet {
    /// Names of the registered emote sources, in merge order.
    pub fn emote_provider_names(&self) -> Vec<&str> {
        self.emotes.iter().map(|p| p.name()).collect()
    }
}

/// Build every enabled adapter from configuration.
///
/// Fails when the Twitch credentials are missing or the HTTP client cannot
/// be constructed.
pub fn build_from_config(config: &AppConfig) -> Result<ProviderSet> {
    let (client_id, client_secret) = config.require_credentials().map_err(|e| Error::Config {
        message: e.to_string(),
    })?;

    let http = HttpClient::new(&config.http).map_err(|e| Error::Config {
        message: e.to_string(),
    })?;

    let twitch = Arc::new(
        TwitchProvider::new(http.clone(), client_id, client_secret)
            .with_api_url(&config.twitch.api_url)
            .with_auth_url(&config.twitch.auth_url),
    );

    let mut emotes: Vec<Arc<dyn EmoteProvider>> = vec![twitch.clone() as Arc<dyn EmoteProvider>];

    if config.bttv.enabled {
        emotes.push(Arc::new(
            BttvProvider::new(http.clone())
                .with_api_url(&config.bttv.api_url)
                .with_cdn_url(&config.bttv.cdn_url),
        ));
    }

    if config.seventv.enabled {
        emotes.push(Arc::new(
            SevenTvProvider::new(http.clone())
                .with_api_url(&config.seventv.api_url)
                .with_cdn_url(&config.seventv.cdn_url),
        ));
    }

    if config.ffz.enabled {
        emotes.push(Arc::new(
            FfzProvider::new(http).with_api_url(&config.ffz.api_url),
        ));
    }

    let set = ProviderSet {
        directory: twitch.clone(),
        emotes,
        badges: twitch,
    };

    info!(emote_providers = ?set.emote_provider_names(), "Providers configured");
    Ok(set)
}
