//! BetterTTV adapter.
//!
//! Global emotes come back as a bare array; a channel's emotes are split
//! between `channelEmotes` (uploaded by the channel) and `sharedEmotes`
//! (borrowed from other channels). Links are built from the CDN, smallest
//! size tier.

use async_trait::async_trait;
use emoteport_core::model::{ChannelId, Emote, EmoteKind};
use emoteport_core::provider::EmoteProvider;
use emoteport_core::UpstreamError;
use serde::Deserialize;

use crate::http::{HttpClient, join_url};

const NAME: &str = "bttv";
const DEFAULT_API_URL: &str = "https://api.betterttv.net/3";
const DEFAULT_CDN_URL: &str = "https://cdn.betterttv.net";
/// Size tier 0 is served as `1x`.
const SIZE_TIER: u8 = 0;

/// BetterTTV client.
pub struct BttvProvider {
    http: HttpClient,
    api_url: String,
    cdn_url: String,
}

impl BttvProvider {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            api_url: DEFAULT_API_URL.into(),
            cdn_url: DEFAULT_CDN_URL.into(),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_cdn_url(mut self, cdn_url: impl Into<String>) -> Self {
        self.cdn_url = cdn_url.into().trim_end_matches('/').to_string();
        self
    }

    fn link(&self, emote_id: &str) -> String {
        format!("{}/emote/{emote_id}/{}x", self.cdn_url, SIZE_TIER + 1)
    }

    fn map_emotes(&self, emotes: impl IntoIterator<Item = BttvEmote>) -> Vec<Emote> {
        emotes
            .into_iter()
            .filter(|e| !e.id.is_empty())
            .filter_map(|e| Emote::new(e.code, self.link(&e.id), EmoteKind::Bttv))
            .collect()
    }
}

#[async_trait]
impl EmoteProvider for BttvProvider {
    fn name(&self) -> &str {
        NAME
    }

    async fn global_emotes(&self) -> Result<Vec<Emote>, UpstreamError> {
        let url = join_url(&self.api_url, "cached/emotes/global");
        let emotes: Vec<BttvEmote> = self.http.fetch_json(NAME, self.http.get(&url)).await?;
        Ok(self.map_emotes(emotes))
    }

    async fn channel_emotes(&self, channel_id: ChannelId) -> Result<Vec<Emote>, UpstreamError> {
        let url = join_url(&self.api_url, &format!("cached/users/twitch/{channel_id}"));
        let user: BttvUser = self.http.fetch_json(NAME, self.http.get(&url)).await?;
        Ok(self.map_emotes(user.channel_emotes.into_iter().chain(user.shared_emotes)))
    }
}

// --- BetterTTV API types (internal) ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BttvUser {
    #[serde(default)]
    channel_emotes: Vec<BttvEmote>,
    #[serde(default)]
    shared_emotes: Vec<BttvEmote>,
}

#[derive(Debug, Deserialize)]
struct BttvEmote {
    id: String,
    code: String,
}
