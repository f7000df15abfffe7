//! Best-effort fan-out over the emote and badge adapters.
//!
//! Every sub-call runs concurrently under its own deadline. The merge waits
//! for all of them; a call that fails or times out contributes nothing and
//! never affects its siblings.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use emoteport_core::model::{Badge, ChannelId, Emote};
use emoteport_core::provider::{BadgeProvider, EmoteProvider, Scope, settle};
use emoteport_core::UpstreamError;
use futures::future::join_all;
use tracing::debug;

/// Merges emotes and badges from the configured adapters.
pub struct Aggregator {
    emotes: Vec<Arc<dyn EmoteProvider>>,
    badges: Arc<dyn BadgeProvider>,
    deadline: Duration,
}

impl Aggregator {
    /// `emotes` is merged in the order given.
    pub fn new(
        emotes: Vec<Arc<dyn EmoteProvider>>,
        badges: Arc<dyn BadgeProvider>,
        deadline: Duration,
    ) -> Self {
        Self {
            emotes,
            badges,
            deadline,
        }
    }

    /// Global and channel emotes from every adapter.
    ///
    /// Adapters keep their registration order; within one adapter global
    /// emotes precede channel emotes. Duplicates across adapters are kept.
    pub async fn fetch_emotes(&self, channel_id: ChannelId) -> Vec<Emote> {
        let per_provider = self.emotes.iter().map(|provider| async move {
            let name = provider.name();
            let (global, channel) = tokio::join!(
                self.bounded(name, provider.global_emotes()),
                self.bounded(name, provider.channel_emotes(channel_id)),
            );

            let mut emotes = settle(name, Scope::Global, None, global);
            emotes.extend(settle(name, Scope::Channel, Some(channel_id), channel));
            emotes
        });

        let emotes: Vec<Emote> = join_all(per_provider).await.into_iter().flatten().collect();
        debug!(channel_id = channel_id.get(), count = emotes.len(), "Emotes merged");
        emotes
    }

    /// Channel badges followed by global badges.
    pub async fn fetch_badges(&self, channel_id: ChannelId) -> Vec<Badge> {
        let name = self.badges.name();
        let (channel, global) = tokio::join!(
            self.bounded(name, self.badges.channel_badges(channel_id)),
            self.bounded(name, self.badges.global_badges()),
        );

        let mut badges = settle(name, Scope::Channel, Some(channel_id), channel);
        badges.extend(settle(name, Scope::Global, None, global));
        debug!(channel_id = channel_id.get(), count = badges.len(), "Badges merged");
        badges
    }

    async fn bounded<T>(
        &self,
        provider: &str,
        call: impl Future<Output = Result<Vec<T>, UpstreamError>>,
    ) -> Result<Vec<T>, UpstreamError> {
        match tokio::time::timeout(self.deadline, call).await {
            Ok(result) => result,
            Err(_) => Err(UpstreamError::Timeout(format!(
                "{provider}: no response within {}ms",
                self.deadline.as_millis()
            ))),
        }
    }
}
