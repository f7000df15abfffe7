//! Router fixtures backed by in-memory adapters.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{TimeZone, Utc};
use emoteport_aggregator::{Aggregator, IdentityResolver, UserService};
use emoteport_core::model::{Badge, ChannelCandidate, ChannelId, ChannelIdentity, Emote, EmoteKind};
use emoteport_core::provider::{BadgeProvider, ChannelDirectory, EmoteProvider};
use emoteport_core::UpstreamError;
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::build_router;

pub fn identity(id: &str, login: &str, display_name: &str) -> ChannelIdentity {
    ChannelIdentity {
        id: id.into(),
        name: login.into(),
        display_name: display_name.into(),
        description: format!("{display_name} streams"),
        kind: String::new(),
        broadcaster_type: "affiliate".into(),
        profile_picture_url: format!("https://static-cdn.jtvnw.net/{login}-profile.png"),
        offline_placeholder_url: String::new(),
        creation_date: Utc.with_ymd_and_hms(2015, 3, 1, 12, 0, 0).unwrap(),
    }
}

fn outage(provider: &str) -> UpstreamError {
    UpstreamError::Status {
        provider: provider.into(),
        status_code: 503,
        message: "unavailable".into(),
    }
}

struct Directory(Vec<ChannelIdentity>);

#[async_trait]
impl ChannelDirectory for Directory {
    async fn user_by_login(&self, login: &str) -> Result<Option<ChannelIdentity>, UpstreamError> {
        Ok(self.0.iter().find(|u| u.name == login).cloned())
    }

    async fn user_by_id(&self, id: &str) -> Result<Option<ChannelIdentity>, UpstreamError> {
        Ok(self.0.iter().find(|u| u.id == id).cloned())
    }

    async fn search_channels(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<ChannelCandidate>, UpstreamError> {
        Ok(self
            .0
            .iter()
            .filter(|u| u.name.contains(query))
            .take(limit)
            .map(|u| ChannelCandidate {
                id: u.id.clone(),
                login: u.name.clone(),
                display_name: u.display_name.clone(),
            })
            .collect())
    }
}

/// Emote source with fixed answers; `None` means the call fails.
struct Emotes {
    name: &'static str,
    kind: EmoteKind,
    global: Option<Vec<&'static str>>,
    channel: Option<Vec<&'static str>>,
}

impl Emotes {
    fn answer(&self, names: &Option<Vec<&'static str>>) -> Result<Vec<Emote>, UpstreamError> {
        let names = names.as_ref().ok_or_else(|| outage(self.name))?;
        Ok(names
            .iter()
            .filter_map(|n| Emote::new(*n, format!("https://cdn.{}.test/{n}", self.name), self.kind))
            .collect())
    }
}

#[async_trait]
impl EmoteProvider for Emotes {
    fn name(&self) -> &str {
        self.name
    }

    async fn global_emotes(&self) -> Result<Vec<Emote>, UpstreamError> {
        self.answer(&self.global)
    }

    async fn channel_emotes(&self, _channel_id: ChannelId) -> Result<Vec<Emote>, UpstreamError> {
        self.answer(&self.channel)
    }
}

struct Badges;

#[async_trait]
impl BadgeProvider for Badges {
    fn name(&self) -> &str {
        "twitch"
    }

    async fn global_badges(&self) -> Result<Vec<Badge>, UpstreamError> {
        Ok(vec![Badge::new("staff", "1", Some("https://badges/staff/1".into()))])
    }

    async fn channel_badges(&self, _channel_id: ChannelId) -> Result<Vec<Badge>, UpstreamError> {
        Ok(vec![
            Badge::new("subscriber", "0", Some("https://badges/subscriber/0".into())),
            Badge::new("bits", "100", None),
        ])
    }
}

fn directory() -> Arc<dyn ChannelDirectory> {
    Arc::new(Directory(vec![
        identity("46390451", "zoil", "Zoil"),
        identity("101", "zorro", "zorro"),
        identity("102", "azorro", "Azorro"),
        identity("103", "quiet", "Quiet"),
    ]))
}

fn service_with(emotes: Vec<Arc<dyn EmoteProvider>>) -> UserService {
    UserService::new(
        IdentityResolver::new(directory(), 5),
        Aggregator::new(emotes, Arc::new(Badges), Duration::from_secs(5)),
    )
}

/// Twitch and 7TV answer, BetterTTV is down.
pub fn fixture_service() -> UserService {
    let twitch: Arc<dyn EmoteProvider> = Arc::new(Emotes {
        name: "twitch",
        kind: EmoteKind::Twitch,
        global: Some(vec!["Kappa"]),
        channel: Some(vec!["zoilHi"]),
    });
    let bttv: Arc<dyn EmoteProvider> = Arc::new(Emotes {
        name: "bttv",
        kind: EmoteKind::Bttv,
        global: None,
        channel: None,
    });
    let seventv: Arc<dyn EmoteProvider> = Arc::new(Emotes {
        name: "7tv",
        kind: EmoteKind::SevenTv,
        global: Some(vec!["EZ"]),
        channel: Some(vec!["zoilW"]),
    });
    service_with(vec![twitch, bttv, seventv])
}

/// Every emote source is down.
pub fn outage_service() -> UserService {
    let twitch: Arc<dyn EmoteProvider> = Arc::new(Emotes {
        name: "twitch",
        kind: EmoteKind::Twitch,
        global: None,
        channel: None,
    });
    service_with(vec![twitch])
}

pub fn app(service: UserService) -> Router {
    build_router(Arc::new(service), &["http://localhost:3000".to_string()])
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

pub fn emote_links(body: &serde_json::Value) -> Vec<&str> {
    body.as_array()
        .map(|a| a.iter().filter_map(|e| e["link"].as_str()).collect())
        .unwrap_or_default()
}
