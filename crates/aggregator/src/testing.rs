//! In-memory adapters for unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use emoteport_core::model::{Badge, ChannelCandidate, ChannelId, ChannelIdentity, Emote, EmoteKind};
use emoteport_core::provider::{BadgeProvider, ChannelDirectory, EmoteProvider};
use emoteport_core::UpstreamError;

pub fn identity(id: &str, login: &str, display_name: &str) -> ChannelIdentity {
    ChannelIdentity {
        id: id.into(),
        name: login.into(),
        display_name: display_name.into(),
        description: String::new(),
        kind: String::new(),
        broadcaster_type: String::new(),
        profile_picture_url: format!("https://static-cdn.jtvnw.net/{login}.png"),
        offline_placeholder_url: String::new(),
        creation_date: Utc.with_ymd_and_hms(2015, 3, 1, 12, 0, 0).unwrap(),
    }
}

pub fn failure(provider: &str) -> UpstreamError {
    UpstreamError::Status {
        provider: provider.into(),
        status_code: 500,
        message: "boom".into(),
    }
}

/// A directory backed by a fixed list of identities.
#[derive(Default)]
pub struct FakeDirectory {
    pub users: Vec<ChannelIdentity>,
    /// Ids whose by-id lookup fails.
    pub broken_ids: Vec<String>,
    pub fail_login: bool,
    pub fail_search: bool,
    /// Return every match regardless of the requested limit.
    pub ignore_limit: bool,
    pub calls: AtomicUsize,
    pub searched: Mutex<Vec<(String, usize)>>,
}

impl FakeDirectory {
    pub fn with_users(users: Vec<ChannelIdentity>) -> Self {
        Self {
            users,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChannelDirectory for FakeDirectory {
    async fn user_by_login(&self, login: &str) -> Result<Option<ChannelIdentity>, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_login {
            return Err(failure("twitch"));
        }
        Ok(self.users.iter().find(|u| u.name == login).cloned())
    }

    async fn user_by_id(&self, id: &str) -> Result<Option<ChannelIdentity>, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.broken_ids.iter().any(|b| b == id) {
            return Err(failure("twitch"));
        }
        Ok(self.users.iter().find(|u| u.id == id).cloned())
    }

    async fn search_channels(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<ChannelCandidate>, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut searched) = self.searched.lock() {
            searched.push((query.to_string(), limit));
        }
        if self.fail_search {
            return Err(failure("twitch"));
        }
        let needle = query.to_lowercase();
        Ok(self
            .users
            .iter()
            .filter(|u| u.name.contains(&needle))
            .take(if self.ignore_limit { usize::MAX } else { limit })
            .map(|u| ChannelCandidate {
                id: u.id.clone(),
                login: u.name.clone(),
                display_name: u.display_name.clone(),
            })
            .collect())
    }
}

/// How a fake emote source answers one scope.
#[derive(Clone)]
pub enum Reply {
    Names(Vec<&'static str>),
    Fail,
    /// Answers with the given names only after the delay.
    Slow(Duration, Vec<&'static str>),
}

pub struct FakeEmotes {
    pub name: &'static str,
    pub kind: EmoteKind,
    pub global: Reply,
    pub channel: Reply,
}

impl FakeEmotes {
    pub fn new(name: &'static str, kind: EmoteKind, global: Reply, channel: Reply) -> Self {
        Self {
            name,
            kind,
            global,
            channel,
        }
    }

    async fn answer(&self, reply: &Reply) -> Result<Vec<Emote>, UpstreamError> {
        let names = match reply {
            Reply::Names(names) => names,
            Reply::Fail => return Err(failure(self.name)),
            Reply::Slow(delay, names) => {
                tokio::time::sleep(*delay).await;
                names
            }
        };
        Ok(names
            .iter()
            .filter_map(|n| Emote::new(*n, format!("https://cdn.{}/{n}", self.name), self.kind))
            .collect())
    }
}

#[async_trait]
impl EmoteProvider for FakeEmotes {
    fn name(&self) -> &str {
        self.name
    }

    async fn global_emotes(&self) -> Result<Vec<Emote>, UpstreamError> {
        self.answer(&self.global).await
    }

    async fn channel_emotes(&self, _channel_id: ChannelId) -> Result<Vec<Emote>, UpstreamError> {
        self.answer(&self.channel).await
    }
}

pub struct FakeBadges {
    pub global: Option<Vec<&'static str>>,
    pub channel: Option<Vec<&'static str>>,
}

impl FakeBadges {
    fn badges(names: &Option<Vec<&'static str>>) -> Result<Vec<Badge>, UpstreamError> {
        let names = names.as_ref().ok_or_else(|| failure("twitch"))?;
        Ok(names
            .iter()
            .map(|&n| {
                let (set, version) = n.split_once('/').unwrap_or((n, "1"));
                Badge::new(set, version, Some(format!("https://badges/{set}/{version}")))
            })
            .collect())
    }
}

#[async_trait]
impl BadgeProvider for FakeBadges {
    fn name(&self) -> &str {
        "twitch"
    }

    async fn global_badges(&self) -> Result<Vec<Badge>, UpstreamError> {
        Self::badges(&self.global)
    }

    async fn channel_badges(&self, _channel_id: ChannelId) -> Result<Vec<Badge>, UpstreamError> {
        Self::badges(&self.channel)
    }
}
