//! Twitch Helix adapter.
//!
//! The platform-native provider: channel identities, channel search, native
//! emotes and chat badges. Every Helix call carries the app's `Client-Id`
//! and an app access token obtained with the client-credentials grant.
//!
//! Token lifecycle:
//! - fetched lazily on the first Helix call
//! - reused until shortly before `expires_in` elapses
//! - dropped when Helix answers 401, so the next call fetches a fresh one

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use emoteport_core::model::{Badge, ChannelCandidate, ChannelId, ChannelIdentity, Emote, EmoteKind};
use emoteport_core::provider::{BadgeProvider, ChannelDirectory, EmoteProvider};
use emoteport_core::UpstreamError;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::http::{HttpClient, join_url};

const NAME: &str = "twitch";
const DEFAULT_API_URL: &str = "https://api.twitch.tv/helix";
const DEFAULT_AUTH_URL: &str = "https://id.twitch.tv/oauth2";
/// Refresh this long before the token actually expires.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Twitch Helix client.
pub struct TwitchProvider {
    http: HttpClient,
    api_url: String,
    auth_url: String,
    client_id: String,
    client_secret: String,
    token: RwLock<Option<AppToken>>,
}

struct AppToken {
    access_token: String,
    expires_at: Instant,
}

impl AppToken {
    /// A lifetime too large to represent leaves the token already stale.
    fn new(access_token: String, expires_in: u64) -> Self {
        let now = Instant::now();
        Self {
            access_token,
            expires_at: now.checked_add(Duration::from_secs(expires_in)).unwrap_or(now),
        }
    }

    fn is_fresh(&self) -> bool {
        self.expires_at > Instant::now() + TOKEN_EXPIRY_MARGIN
    }
}

impl TwitchProvider {
    /// Create a Helix client for the given app credentials.
    pub fn new(
        http: HttpClient,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_url: DEFAULT_API_URL.into(),
            auth_url: DEFAULT_AUTH_URL.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token: RwLock::new(None),
        }
    }

    /// Override the Helix base URL (e.g., for testing or proxies).
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the OAuth base URL.
    pub fn with_auth_url(mut self, auth_url: impl Into<String>) -> Self {
        self.auth_url = auth_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Current app access token, fetching a new one if needed.
    async fn access_token(&self) -> Result<String, UpstreamError> {
        if let Some(token) = self.token.read().await.as_ref().filter(|t| t.is_fresh()) {
            return Ok(token.access_token.clone());
        }

        let mut slot = self.token.write().await;
        // Another request may have refreshed while we waited for the lock.
        if let Some(token) = slot.as_ref().filter(|t| t.is_fresh()) {
            return Ok(token.access_token.clone());
        }

        let request = self.http.post(&join_url(&self.auth_url, "token")).query(&[
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("grant_type", "client_credentials"),
        ]);
        let response: TokenResponse = self.http.fetch_json(NAME, request).await?;

        info!(expires_in = response.expires_in, "Obtained Twitch app access token");

        let access_token = response.access_token.clone();
        *slot = Some(AppToken::new(response.access_token, response.expires_in));
        Ok(access_token)
    }

    /// Authenticated GET against a Helix endpoint.
    async fn helix<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, UpstreamError> {
        let token = self.access_token().await?;
        debug!(path = %path, "Helix request");

        let request = self
            .http
            .get(&join_url(&self.api_url, path))
            .query(query)
            .header("Client-Id", &self.client_id)
            .bearer_auth(token);

        let result = self.http.fetch_json(NAME, request).await;
        if matches!(&result, Err(e) if e.is_unauthorized()) {
            *self.token.write().await = None;
        }
        result
    }

    async fn first_user(&self, query: &[(&str, &str)]) -> Result<Option<ChannelIdentity>, UpstreamError> {
        let page: HelixPage<HelixUser> = self.helix("users", query).await?;
        Ok(page.data.into_iter().next().map(Self::map_user))
    }

    fn map_user(user: HelixUser) -> ChannelIdentity {
        ChannelIdentity {
            id: user.id,
            name: user.login,
            display_name: user.display_name,
            description: user.description,
            kind: user.kind,
            broadcaster_type: user.broadcaster_type,
            profile_picture_url: user.profile_image_url,
            offline_placeholder_url: user.offline_image_url,
            creation_date: user.created_at,
        }
    }

    fn map_emotes(emotes: Vec<HelixEmote>) -> Vec<Emote> {
        emotes
            .into_iter()
            .filter_map(|e| Emote::new(e.name, e.images.url_1x, EmoteKind::Twitch))
            .collect()
    }

    fn map_badges(sets: Vec<HelixBadgeSet>) -> Vec<Badge> {
        sets.into_iter()
            .flat_map(|set| {
                let set_id = set.set_id;
                set.versions
                    .into_iter()
                    .map(move |v| Badge::new(&set_id, &v.id, v.image_url_1x))
            })
            .collect()
    }
}

#[async_trait]
impl ChannelDirectory for TwitchProvider {
    async fn user_by_login(&self, login: &str) -> Result<Option<ChannelIdentity>, UpstreamError> {
        self.first_user(&[("login", login)]).await
    }

    async fn user_by_id(&self, id: &str) -> Result<Option<ChannelIdentity>, UpstreamError> {
        self.first_user(&[("id", id)]).await
    }

    async fn search_channels(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<ChannelCandidate>, UpstreamError> {
        let first = limit.to_string();
        let page: HelixPage<HelixSearchChannel> = self
            .helix("search/channels", &[("query", query), ("first", first.as_str())])
            .await?;

        Ok(page
            .data
            .into_iter()
            .take(limit)
            .map(|c| ChannelCandidate {
                id: c.id,
                login: c.broadcaster_login,
                display_name: c.display_name,
            })
            .collect())
    }
}

#[async_trait]
impl EmoteProvider for TwitchProvider {
    fn name(&self) -> &str {
        NAME
    }

    async fn global_emotes(&self) -> Result<Vec<Emote>, UpstreamError> {
        let page: HelixPage<HelixEmote> = self.helix("chat/emotes/global", &[]).await?;
        Ok(Self::map_emotes(page.data))
    }

    async fn channel_emotes(&self, channel_id: ChannelId) -> Result<Vec<Emote>, UpstreamError> {
        let id = channel_id.to_string();
        let page: HelixPage<HelixEmote> = self
            .helix("chat/emotes", &[("broadcaster_id", id.as_str())])
            .await?;
        Ok(Self::map_emotes(page.data))
    }
}

#[async_trait]
impl BadgeProvider for TwitchProvider {
    fn name(&self) -> &str {
        NAME
    }

    async fn global_badges(&self) -> Result<Vec<Badge>, UpstreamError> {
        let page: HelixPage<HelixBadgeSet> = self.helix("chat/badges/global", &[]).await?;
        Ok(Self::map_badges(page.data))
    }

    async fn channel_badges(&self, channel_id: ChannelId) -> Result<Vec<Badge>, UpstreamError> {
        let id = channel_id.to_string();
        let page: HelixPage<HelixBadgeSet> = self
            .helix("chat/badges", &[("broadcaster_id", id.as_str())])
            .await?;
        Ok(Self::map_badges(page.data))
    }
}

// --- Helix API types (internal) ---

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct HelixPage<T> {
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct HelixUser {
    id: String,
    login: String,
    display_name: String,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    broadcaster_type: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    profile_image_url: String,
    #[serde(default)]
    offline_image_url: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct HelixSearchChannel {
    id: String,
    broadcaster_login: String,
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct HelixEmote {
    name: String,
    images: HelixEmoteImages,
}

#[derive(Debug, Deserialize)]
struct HelixEmoteImages {
    url_1x: String,
}

#[derive(Debug, Deserialize)]
struct HelixBadgeSet {
    set_id: String,
    versions: Vec<HelixBadgeVersion>,
}

#[derive(Debug, Deserialize)]
struct HelixBadgeVersion {
    id: String,
    #[serde(default)]
    image_url_1x: Option<String>,
}
