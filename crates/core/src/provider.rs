//! Provider traits: the abstraction over upstream emote/badge APIs.
//!
//! Every third-party integration (Twitch, BetterTTV, 7TV, FrankerFaceZ)
//! implements one or more of these traits. Calls return a `Result` so the
//! failure stays visible to logging; [`settle`] is the boundary where it is
//! collapsed into an empty contribution.

use async_trait::async_trait;
use tracing::warn;

use crate::error::UpstreamError;
use crate::model::{Badge, ChannelCandidate, ChannelId, ChannelIdentity, Emote};

/// Whether a fetch targets the provider's global set or one channel's set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Global,
    Channel,
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Global => f.write_str("global"),
            Self::Channel => f.write_str("channel"),
        }
    }
}

/// Looks up channel identities on the streaming platform.
#[async_trait]
pub trait ChannelDirectory: Send + Sync {
    /// Exact lookup by login name. `Ok(None)` when the platform reports no match.
    async fn user_by_login(&self, login: &str) -> Result<Option<ChannelIdentity>, UpstreamError>;

    /// Exact lookup by numeric id.
    async fn user_by_id(&self, id: &str) -> Result<Option<ChannelIdentity>, UpstreamError>;

    /// Fuzzy channel search, at most `limit` hits in upstream relevance order.
    async fn search_channels(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<ChannelCandidate>, UpstreamError>;
}

/// A source of chat emotes.
#[async_trait]
pub trait EmoteProvider: Send + Sync {
    /// Short name for logs (e.g. "twitch", "bttv").
    fn name(&self) -> &str;

    /// Emotes available in every channel.
    async fn global_emotes(&self) -> Result<Vec<Emote>, UpstreamError>;

    /// Emotes enabled for one channel.
    async fn channel_emotes(&self, channel_id: ChannelId) -> Result<Vec<Emote>, UpstreamError>;
}

/// A source of chat badges.
#[async_trait]
pub trait BadgeProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn global_badges(&self) -> Result<Vec<Badge>, UpstreamError>;

    async fn channel_badges(&self, channel_id: ChannelId) -> Result<Vec<Badge>, UpstreamError>;
}

/// Collapse one adapter call into its contribution to an aggregate.
///
/// A failure is logged and contributes nothing.
pub fn settle<T>(
    provider: &str,
    scope: Scope,
    channel_id: Option<ChannelId>,
    result: Result<Vec<T>, UpstreamError>,
) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(e) => {
            warn!(
                provider = %provider,
                scope = %scope,
                channel_id = ?channel_id.map(ChannelId::get),
                error = %e,
                "Upstream call failed, contributing no results"
            );
            Vec::new()
        }
    }
}
