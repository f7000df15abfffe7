//! FrankerFaceZ adapter.
//!
//! FFZ groups emoticons into sets keyed by numeric id. The global endpoint
//! lists every public set but only `default_sets` are enabled for everyone;
//! a room points at its single set via `room.set`. Emoticons carry their own
//! URLs per scale, usually protocol-relative.

use std::collections::HashMap;

use async_trait::async_trait;
use emoteport_core::model::{ChannelId, Emote, EmoteKind};
use emoteport_core::provider::EmoteProvider;
use emoteport_core::UpstreamError;
use serde::Deserialize;

use crate::http::{HttpClient, join_url};

const NAME: &str = "ffz";
const DEFAULT_API_URL: &str = "https://api.frankerfacez.com/v1";

/// FrankerFaceZ client.
pub struct FfzProvider {
    http: HttpClient,
    api_url: String,
}

impl FfzProvider {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            api_url: DEFAULT_API_URL.into(),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Emotes of the listed sets, in the order the ids are given.
    fn map_sets(sets: &HashMap<String, FfzSet>, ids: &[u64]) -> Vec<Emote> {
        ids.iter()
            .filter_map(|id| sets.get(&id.to_string()))
            .flat_map(|set| set.emoticons.iter())
            .filter_map(|e| {
                let link = smallest_url(&e.urls)?;
                Emote::new(e.name.clone(), link, EmoteKind::Ffz)
            })
            .collect()
    }
}

/// Pick the lowest scale and make protocol-relative URLs absolute.
fn smallest_url(urls: &HashMap<String, Option<String>>) -> Option<String> {
    let (_, url) = urls
        .iter()
        .filter_map(|(scale, url)| Some((scale.parse::<u32>().ok()?, url.as_deref()?)))
        .min_by_key(|(scale, _)| *scale)?;

    Some(match url.strip_prefix("//") {
        Some(rest) => format!("https://{rest}"),
        None => url.to_string(),
    })
}

#[async_trait]
impl EmoteProvider for FfzProvider {
    fn name(&self) -> &str {
        NAME
    }

    async fn global_emotes(&self) -> Result<Vec<Emote>, UpstreamError> {
        let url = join_url(&self.api_url, "set/global");
        let global: FfzGlobal = self.http.fetch_json(NAME, self.http.get(&url)).await?;
        Ok(Self::map_sets(&global.sets, &global.default_sets))
    }

    async fn channel_emotes(&self, channel_id: ChannelId) -> Result<Vec<Emote>, UpstreamError> {
        let url = join_url(&self.api_url, &format!("room/id/{channel_id}"));
        let room: FfzRoomResponse = self.http.fetch_json(NAME, self.http.get(&url)).await?;
        Ok(Self::map_sets(&room.sets, &[room.room.set]))
    }
}

// --- FrankerFaceZ API types (internal) ---

#[derive(Debug, Deserialize)]
struct FfzGlobal {
    #[serde(default)]
    default_sets: Vec<u64>,
    #[serde(default)]
    sets: HashMap<String, FfzSet>,
}

#[derive(Debug, Deserialize)]
struct FfzRoomResponse {
    room: FfzRoom,
    #[serde(default)]
    sets: HashMap<String, FfzSet>,
}

#[derive(Debug, Deserialize)]
struct FfzRoom {
    set: u64,
}

#[derive(Debug, Deserialize)]
struct FfzSet {
    #[serde(default)]
    emoticons: Vec<FfzEmoticon>,
}

#[derive(Debug, Deserialize)]
struct FfzEmoticon {
    name: String,
    #[serde(default)]
    urls: HashMap<String, Option<String>>,
}
