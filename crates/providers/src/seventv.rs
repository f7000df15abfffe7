//! 7TV adapter.
//!
//! Both endpoints return emote-set shaped data: the global set directly, a
//! channel's active set nested under `emote_set`. Emotes are linked through
//! the 7TV CDN at size tier 1 (`2x`, WebP).

use async_trait::async_trait;
use emoteport_core::model::{ChannelId, Emote, EmoteKind};
use emoteport_core::provider::EmoteProvider;
use emoteport_core::UpstreamError;
use serde::Deserialize;

use crate::http::{HttpClient, join_url};

const NAME: &str = "7tv";
const DEFAULT_API_URL: &str = "https://7tv.io/v3";
const DEFAULT_CDN_URL: &str = "https://cdn.7tv.app";
const SIZE_TIER: u8 = 1;

/// 7TV client.
pub struct SevenTvProvider {
    http: HttpClient,
    api_url: String,
    cdn_url: String,
}

impl SevenTvProvider {
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
        format!("{}/emote/{emote_id}/{}x.webp", self.cdn_url, SIZE_TIER + 1)
    }

    fn map_set(&self, set: Option<SevenTvEmoteSet>) -> Vec<Emote> {
        set.and_then(|s| s.emotes)
            .unwrap_or_default()
            .into_iter()
            .filter(|e| !e.id.is_empty())
            .filter_map(|e| Emote::new(e.name, self.link(&e.id), EmoteKind::SevenTv))
            .collect()
    }
}

#[async_trait]
impl EmoteProvider for SevenTvProvider {
    fn name(&self) -> &str {
        NAME
    }

    async fn global_emotes(&self) -> Result<Vec<Emote>, UpstreamError> {
        let url = join_url(&self.api_url, "emote-sets/global");
        let set: SevenTvEmoteSet = self.http.fetch_json(NAME, self.http.get(&url)).await?;
        Ok(self.map_set(Some(set)))
    }

    async fn channel_emotes(&self, channel_id: ChannelId) -> Result<Vec<Emote>, UpstreamError> {
        let url = join_url(&self.api_url, &format!("users/twitch/{channel_id}"));
        let connection: SevenTvConnection = self.http.fetch_json(NAME, self.http.get(&url)).await?;
        Ok(self.map_set(connection.emote_set))
    }
}

// --- 7TV API types (internal) ---

/// A platform connection (`/users/twitch/{id}`).
#[derive(Debug, Deserialize)]
struct SevenTvConnection {
    #[serde(default)]
    emote_set: Option<SevenTvEmoteSet>,
}

#[derive(Debug, Deserialize)]
struct SevenTvEmoteSet {
    #[serde(default)]
    emotes: Option<Vec<SevenTvActiveEmote>>,
}

/// An emote as enabled in a set; `name` may be a set-local alias.
#[derive(Debug, Deserialize)]
struct SevenTvActiveEmote {
    id: String,
    name: String,
}
