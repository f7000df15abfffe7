//! Username resolution and channel search.

use std::cmp::Ordering;
use std::sync::Arc;

use emoteport_core::model::ChannelIdentity;
use emoteport_core::provider::ChannelDirectory;
use emoteport_core::{Error, Result};
use futures::future::join_all;
use tracing::{debug, warn};

/// Resolves usernames against the platform directory.
pub struct IdentityResolver {
    directory: Arc<dyn ChannelDirectory>,
    search_limit: usize,
}

impl IdentityResolver {
    pub fn new(directory: Arc<dyn ChannelDirectory>, search_limit: usize) -> Self {
        Self {
            directory,
            search_limit,
        }
    }

    /// Look up the channel whose login is `username`.
    ///
    /// Blank input is rejected without contacting the directory. An upstream
    /// failure is logged and reported as not found.
    pub async fn resolve_by_username(&self, username: &str) -> Result<ChannelIdentity> {
        let login = username.trim();
        if login.is_empty() {
            return Err(Error::UserNotFound(username.to_string()));
        }

        match self.directory.user_by_login(login).await {
            Ok(Some(identity)) => Ok(identity),
            Ok(None) => {
                debug!(username = %login, "No channel with this login");
                Err(Error::UserNotFound(username.to_string()))
            }
            Err(e) => {
                warn!(username = %login, error = %e, "Identity lookup failed");
                Err(Error::UserNotFound(username.to_string()))
            }
        }
    }

    /// Channels matching `partial`, fully resolved and sorted by display name.
    ///
    /// Never fails: a failed search yields nothing, a candidate that fails to
    /// resolve is dropped.
    pub async fn search_by_username(&self, partial: &str) -> Vec<ChannelIdentity> {
        let query = partial.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let candidates = match self.directory.search_channels(query, self.search_limit).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(query = %query, error = %e, "Channel search failed");
                return Vec::new();
            }
        };

        let lookups = candidates
            .iter()
            .take(self.search_limit)
            .map(|c| self.directory.user_by_id(&c.id));
        let resolved = join_all(lookups).await;

        let mut identities: Vec<ChannelIdentity> = candidates
            .iter()
            .zip(resolved)
            .filter_map(|(candidate, result)| match result {
                Ok(identity) => identity,
                Err(e) => {
                    warn!(candidate = %candidate.login, error = %e, "Dropping unresolvable search hit");
                    None
                }
            })
            .collect();

        identities.sort_by(|a, b| collate_display_names(&a.display_name, &b.display_name));
        debug!(query = %query, hits = identities.len(), "Search complete");
        identities
    }
}

/// Display-name ordering used for search results: case-insensitive first,
/// then ordinal so the result is total.
pub fn collate_display_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
