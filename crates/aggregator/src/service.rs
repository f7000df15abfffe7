//! Handler-facing operations keyed by username.

use emoteport_config::AppConfig;
use emoteport_core::model::{Badge, ChannelId, ChannelIdentity, Emote};
use emoteport_core::{Error, Result};
use emoteport_providers::ProviderSet;
use tracing::warn;

use crate::fanout::Aggregator;
use crate::resolver::IdentityResolver;

/// Username-level lookups shared by the HTTP API and the CLI.
pub struct UserService {
    resolver: IdentityResolver,
    aggregator: Aggregator,
}

impl UserService {
    pub fn new(resolver: IdentityResolver, aggregator: Aggregator) -> Self {
        Self {
            resolver,
            aggregator,
        }
    }

    /// Wire a service over a built provider set.
    pub fn from_providers(providers: ProviderSet, config: &AppConfig) -> Self {
        let resolver = IdentityResolver::new(providers.directory, config.search.limit);
        let aggregator = Aggregator::new(
            providers.emotes,
            providers.badges,
            config.http.request_timeout(),
        );
        Self::new(resolver, aggregator)
    }

    pub async fn get_identity(&self, username: &str) -> Result<ChannelIdentity> {
        self.resolver.resolve_by_username(username).await
    }

    /// All emotes usable in the channel. An empty list is still a success.
    pub async fn get_emotes(&self, username: &str) -> Result<Vec<Emote>> {
        let channel_id = self.resolve_channel(username).await?;
        Ok(self.aggregator.fetch_emotes(channel_id).await)
    }

    pub async fn get_badges(&self, username: &str) -> Result<Vec<Badge>> {
        let channel_id = self.resolve_channel(username).await?;
        Ok(self.aggregator.fetch_badges(channel_id).await)
    }

    pub async fn search(&self, partial: &str) -> Vec<ChannelIdentity> {
        self.resolver.search_by_username(partial).await
    }

    async fn resolve_channel(&self, username: &str) -> Result<ChannelId> {
        let identity = self.resolver.resolve_by_username(username).await?;
        identity.channel_id().ok_or_else(|| {
            warn!(username = %username, id = %identity.id, "Channel id is not a positive integer");
            Error::UserNotFound(username.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::testing::{FakeBadges, FakeDirectory, FakeEmotes, Reply, identity};
    use emoteport_core::model::EmoteKind;
    use emoteport_core::provider::EmoteProvider;

    fn service(directory: FakeDirectory) -> UserService {
        let resolver = IdentityResolver::new(Arc::new(directory), 5);
        let twitch: Arc<dyn EmoteProvider> = Arc::new(FakeEmotes::new(
            "twitch",
            EmoteKind::Twitch,
            Reply::Names(vec!["Kappa"]),
            Reply::Names(vec!["zoilHi"]),
        ));
        let bttv: Arc<dyn EmoteProvider> =
            Arc::new(FakeEmotes::new("bttv", EmoteKind::Bttv, Reply::Fail, Reply::Fail));
        let aggregator = Aggregator::new(
            vec![twitch, bttv],
            Arc::new(FakeBadges {
                global: Some(vec!["staff/1"]),
                channel: Some(vec!["subscriber/0"]),
            }),
            Duration::from_secs(5),
        );
        UserService::new(resolver, aggregator)
    }

    fn directory() -> FakeDirectory {
        FakeDirectory::with_users(vec![
            identity("46390451", "zoil", "Zoil"),
            identity("0", "zeroid", "ZeroId"),
            identity("abc", "weirdid", "WeirdId"),
        ])
    }

    #[tokio::test]
    async fn identity_by_username() {
        let service = service(directory());
        assert_eq!(service.get_identity("zoil").await.unwrap().display_name, "Zoil");
    }

    #[tokio::test]
    async fn emotes_for_known_user() {
        let service = service(directory());
        let names: Vec<String> = service
            .get_emotes("zoil")
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, ["Kappa", "zoilHi"]);
    }

    #[tokio::test]
    async fn badges_for_known_user() {
        let service = service(directory());
        let badges = service.get_badges("zoil").await.unwrap();
        assert_eq!(badges[0].name, "subscriber/0");
        assert_eq!(badges[1].name, "staff/1");
    }

    #[tokio::test]
    async fn unknown_user_is_not_found_everywhere() {
        let service = service(directory());
        assert!(matches!(service.get_identity("nobody").await, Err(Error::UserNotFound(_))));
        assert!(matches!(service.get_emotes("nobody").await, Err(Error::UserNotFound(_))));
        assert!(matches!(service.get_badges("nobody").await, Err(Error::UserNotFound(_))));
    }

    #[tokio::test]
    async fn unusable_channel_id_is_not_found() {
        let service = service(directory());
        for name in ["zeroid", "weirdid"] {
            assert!(service.get_identity(name).await.is_ok());
            assert!(matches!(service.get_emotes(name).await, Err(Error::UserNotFound(n)) if n == name));
            assert!(matches!(service.get_badges(name).await, Err(Error::UserNotFound(_))));
        }
    }

    #[tokio::test]
    async fn search_delegates_to_resolver() {
        let service = service(directory());
        let hits = service.search("zo").await;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "zoil");
        assert!(service.search("").await.is_empty());
    }
}
